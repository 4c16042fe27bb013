use quick_xml::de::from_str as xml_from_str;
use serde_json::{Map, Value};

use crate::decode::into_mapping;
use crate::decode::types::Decoder;
use crate::error::{Error, Result};

/// XML decoder. Not registered by default; callers opt in through
/// `add_decoder`, the same way any user-supplied format plugs in.
#[derive(Debug, Default)]
pub struct XmlDecoder;

impl Decoder for XmlDecoder {
    fn extensions(&self) -> &[&str] {
        &["xml"]
    }

    fn decode(&self, raw: &str) -> Result<Map<String, Value>> {
        let value = xml_from_str::<Value>(raw)
            .map_err(|err| Error::Decode(format!("invalid XML: {err}")))?;
        into_mapping(value, "XML")
    }
}
