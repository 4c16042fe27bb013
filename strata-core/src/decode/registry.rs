use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::decode::types::Decoder;
use crate::error::{Error, Result};

/// Maps file extensions to the decoder that claims them.
///
/// Lookups are case-insensitive: extensions are normalized to ASCII
/// lowercase on both registration and resolution. Exactly one decoder holds
/// an extension at a time; the newest registration wins.
#[derive(Default)]
pub struct DecoderRegistry {
    decoders: HashMap<String, Arc<dyn Decoder>>,
}

impl DecoderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates every extension the decoder claims with it, replacing any
    /// prior association. Re-registering the same decoder instance leaves
    /// the known-extension set unchanged.
    pub fn register(&mut self, decoder: Arc<dyn Decoder>) {
        for extension in decoder.extensions() {
            let key = extension.to_ascii_lowercase();
            if self
                .decoders
                .insert(key.clone(), Arc::clone(&decoder))
                .is_some()
            {
                debug!(extension = %key, "replaced decoder registration");
            }
        }
    }

    pub fn resolve(&self, extension: &str) -> Result<Arc<dyn Decoder>> {
        self.decoders
            .get(&extension.to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| {
                Error::UnsupportedFormat(format!(
                    "no decoder registered for extension '{extension}'"
                ))
            })
    }

    /// Sorted union of all claimed extensions.
    pub fn known_extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = self.decoders.keys().cloned().collect();
        extensions.sort();
        extensions
    }

    /// Extension-to-decoder associations, sorted by extension.
    pub fn decoders(&self) -> Vec<(String, Arc<dyn Decoder>)> {
        let mut entries: Vec<(String, Arc<dyn Decoder>)> = self
            .decoders
            .iter()
            .map(|(extension, decoder)| (extension.clone(), Arc::clone(decoder)))
            .collect();
        entries.sort_by(|left, right| left.0.cmp(&right.0));
        entries
    }
}
