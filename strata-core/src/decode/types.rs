use serde_json::{Map, Value};

use crate::error::Result;

/// A format-specific translator from raw file content to a nested mapping.
///
/// Decoders are looked up by the file extensions they claim; claiming an
/// extension another decoder already holds transfers it (see
/// [`DecoderRegistry`](crate::decode::DecoderRegistry)).
pub trait Decoder: std::fmt::Debug + Send + Sync {
    /// File extensions this decoder claims, e.g. `["yaml", "yml"]`.
    fn extensions(&self) -> &[&str];

    /// Decodes raw content into a mapping. Malformed content, or a document
    /// whose root is not a mapping, fails with [`Error::Decode`].
    ///
    /// [`Error::Decode`]: crate::error::Error::Decode
    fn decode(&self, raw: &str) -> Result<Map<String, Value>>;
}
