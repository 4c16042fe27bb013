use serde_json::{Map, Value};

use crate::decode::into_mapping;
use crate::decode::types::Decoder;
use crate::error::{Error, Result};

/// Built-in decoder for `.toml` files, the native structured-config format
/// of the Rust toolchain.
#[derive(Debug, Default)]
pub struct TomlDecoder;

impl Decoder for TomlDecoder {
    fn extensions(&self) -> &[&str] {
        &["toml"]
    }

    fn decode(&self, raw: &str) -> Result<Map<String, Value>> {
        let value = toml::from_str::<Value>(raw)
            .map_err(|err| Error::Decode(format!("invalid TOML: {err}")))?;
        into_mapping(value, "TOML")
    }
}
