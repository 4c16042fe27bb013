use serde_json::{Map, Value};

use crate::decode::into_mapping;
use crate::decode::types::Decoder;
use crate::error::{Error, Result};

/// Built-in decoder for `.json` files.
#[derive(Debug, Default)]
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn decode(&self, raw: &str) -> Result<Map<String, Value>> {
        let value = serde_json::from_str::<Value>(raw)
            .map_err(|err| Error::Decode(format!("invalid JSON: {err}")))?;
        into_mapping(value, "JSON")
    }
}
