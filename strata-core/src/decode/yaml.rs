use serde_json::{Map, Value};

use crate::decode::into_mapping;
use crate::decode::types::Decoder;
use crate::error::{Error, Result};

/// Built-in decoder for `.yaml`/`.yml` files.
#[derive(Debug, Default)]
pub struct YamlDecoder;

impl Decoder for YamlDecoder {
    fn extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }

    fn decode(&self, raw: &str) -> Result<Map<String, Value>> {
        let value = serde_yaml::from_str::<Value>(raw)
            .map_err(|err| Error::Decode(format!("invalid YAML: {err}")))?;
        into_mapping(value, "YAML")
    }
}
