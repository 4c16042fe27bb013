use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::decode::{Decoder, DecoderRegistry, JsonDecoder, TomlDecoder, YamlDecoder};
use crate::error::{Error, Result};
use crate::loader::normalize::{normalize, FileReference, FileSource};

/// Orchestrates the file-loading pipeline: normalize references, resolve a
/// decoder per extension, decode, and merge everything into one aggregate
/// mapping keyed by namespace.
pub struct FileLoader {
    registry: DecoderRegistry,
    pending: Vec<FileReference>,
}

impl Default for FileLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileLoader {
    /// Creates a loader with the built-in JSON, TOML, and YAML decoders
    /// registered.
    pub fn new() -> Self {
        let mut registry = DecoderRegistry::new();
        registry.register(Arc::new(JsonDecoder));
        registry.register(Arc::new(TomlDecoder));
        registry.register(Arc::new(YamlDecoder));
        Self {
            registry,
            pending: Vec::new(),
        }
    }

    /// Normalizes `sources` and appends them to the pending list. Nothing is
    /// read or decoded until [`process`](Self::process).
    pub fn add_files(&mut self, sources: Vec<FileSource>) -> Result<()> {
        let mut references = normalize(sources)?;
        debug!(count = references.len(), "queued file references");
        self.pending.append(&mut references);
        Ok(())
    }

    pub fn add_decoder(&mut self, decoder: Arc<dyn Decoder>) {
        self.registry.register(decoder);
    }

    pub fn known_extensions(&self) -> Vec<String> {
        self.registry.known_extensions()
    }

    /// The current extension-to-decoder associations, for diagnostics.
    pub fn decoders(&self) -> Vec<(String, Arc<dyn Decoder>)> {
        self.registry.decoders()
    }

    pub fn pending(&self) -> &[FileReference] {
        &self.pending
    }

    /// Decodes every pending file, in order, into a mapping keyed by
    /// namespace. Later files sharing a namespace fully replace earlier ones.
    ///
    /// Fail-fast: decoders for all pending extensions are resolved before
    /// any file content is read, and the first read or decode failure aborts
    /// the batch with no partial result.
    pub fn process(&self) -> Result<Map<String, Value>> {
        if self.pending.is_empty() {
            return Err(Error::EmptyFileSet);
        }

        let mut resolved = Vec::with_capacity(self.pending.len());
        for reference in &self.pending {
            let extension = reference.extension().ok_or_else(|| {
                Error::UnsupportedFormat(format!(
                    "'{}' has no file extension",
                    reference.path().display()
                ))
            })?;
            resolved.push(self.registry.resolve(extension)?);
        }

        let mut aggregate = Map::new();
        for (reference, decoder) in self.pending.iter().zip(resolved) {
            let raw = reference.read()?;
            let mapping = decoder.decode(&raw).map_err(|err| match err {
                Error::Decode(message) => Error::Decode(format!(
                    "'{}': {message}",
                    reference.path().display()
                )),
                other => other,
            })?;
            if aggregate
                .insert(reference.namespace().to_owned(), Value::Object(mapping))
                .is_some()
            {
                debug!(
                    namespace = reference.namespace(),
                    "replaced earlier entry for namespace"
                );
            }
        }

        debug!(namespaces = aggregate.len(), "produced aggregate mapping");
        Ok(aggregate)
    }
}
