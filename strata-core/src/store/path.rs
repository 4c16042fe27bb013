use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A parsed dot-notation alias such as `one.two.three`.
///
/// Segments are ordered and never empty. Malformed aliases (an empty string,
/// a leading, trailing, or doubled dot) are rejected at parse time rather
/// than silently collapsed, so every constructed path addresses a real
/// location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemPath {
    segments: Vec<String>,
}

impl ItemPath {
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl FromStr for ItemPath {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let mut segments = Vec::new();
        for segment in value.split('.') {
            if segment.is_empty() {
                return Err(Error::InvalidPath(format!(
                    "empty segment in alias '{value}'"
                )));
            }
            segments.push(segment.to_owned());
        }

        Ok(Self { segments })
    }
}

impl std::fmt::Display for ItemPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}
