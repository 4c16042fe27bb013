pub mod json;
pub mod registry;
pub mod toml;
pub mod types;
pub mod xml;
pub mod yaml;

pub use json::JsonDecoder;
pub use registry::DecoderRegistry;
pub use toml::TomlDecoder;
pub use types::Decoder;
pub use xml::XmlDecoder;
pub use yaml::YamlDecoder;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Every decoder must produce a mapping at the document root.
pub(crate) fn into_mapping(value: Value, format: &str) -> Result<Map<String, Value>> {
    match value {
        Value::Object(mapping) => Ok(mapping),
        _ => Err(Error::Decode(format!(
            "{format} document root is not a mapping"
        ))),
    }
}
