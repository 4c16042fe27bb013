pub mod decode;
pub mod error;
pub mod loader;
pub mod logging;
pub mod store;

pub use decode::{Decoder, DecoderRegistry, JsonDecoder, TomlDecoder, XmlDecoder, YamlDecoder};
pub use error::{Error, Result};
pub use loader::{FileBag, FileHandle, FileLoader, FileSource};
pub use store::{ItemPath, NestedStore};

use std::sync::Arc;

use serde_json::{Map, Value};

const DEFAULT_ITEMS_NAME: &str = "items";

/// The facade composing a [`NestedStore`] with lazy file loading.
///
/// The store surface is delegated one-to-one; `load_files` runs the whole
/// pipeline (normalize, decode, namespace, merge) and hydrates the store
/// with the aggregate result.
pub struct DataManager {
    store: NestedStore,
    loader: Option<FileLoader>,
    items_name: String,
}

impl Default for DataManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DataManager {
    pub fn new() -> Self {
        Self {
            store: NestedStore::new(),
            loader: None,
            items_name: DEFAULT_ITEMS_NAME.to_owned(),
        }
    }

    pub fn with_items(items: Map<String, Value>) -> Self {
        Self {
            store: NestedStore::with_items(items),
            loader: None,
            items_name: DEFAULT_ITEMS_NAME.to_owned(),
        }
    }

    /// Overrides the field name an embedding host exposes the items under.
    /// Stored configuration only; the store itself never reads it.
    pub fn with_items_name(mut self, name: impl Into<String>) -> Self {
        self.items_name = name.into();
        self
    }

    pub fn items_name(&self) -> &str {
        &self.items_name
    }

    /// Alias for [`reset`](Self::reset), for hosts with their own
    /// constructors.
    pub fn init_manager(&mut self, items: Value) -> Result<()> {
        self.store.reset(items)
    }

    pub fn get(&self, alias: &str) -> Result<Value> {
        self.store.get(alias)
    }

    pub fn get_or(&self, alias: &str, fallback: Value) -> Value {
        self.store.get_or(alias, fallback)
    }

    pub fn get_if_exists(&self, alias: &str) -> Option<Value> {
        self.store.get_if_exists(alias)
    }

    pub fn set(&mut self, alias: &str, value: Value) -> Result<()> {
        self.store.set(alias, value)
    }

    pub fn add(&mut self, alias: &str, value: Value) -> Result<()> {
        self.store.add(alias, value)
    }

    pub fn exists(&self, alias: &str) -> bool {
        self.store.exists(alias)
    }

    pub fn has(&self, alias: &str) -> bool {
        self.store.has(alias)
    }

    pub fn remove(&mut self, alias: &str) -> Result<()> {
        self.store.remove(alias)
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }

    pub fn reset(&mut self, items: Value) -> Result<()> {
        self.store.reset(items)
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn all(&self) -> &Map<String, Value> {
        self.store.all()
    }

    pub fn to_json(&self) -> Result<String> {
        self.store.to_json()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        self.store.to_json_pretty()
    }

    /// Loads and decodes `sources`, then hydrates the store: append merges
    /// each namespace in through [`add`](Self::add), otherwise the store is
    /// replaced wholesale.
    pub fn load_files(&mut self, sources: Vec<FileSource>, append: bool) -> Result<()> {
        let loader = self.loader.get_or_insert_with(FileLoader::new);
        loader.add_files(sources)?;
        let data = loader.process()?;
        self.hydrate(data, append)
    }

    /// Registers a custom decoder with the underlying loader.
    pub fn add_decoder(&mut self, decoder: Arc<dyn Decoder>) {
        self.loader
            .get_or_insert_with(FileLoader::new)
            .add_decoder(decoder);
    }

    /// Bridges an aggregate load result into the store.
    pub fn hydrate(&mut self, data: Map<String, Value>, append: bool) -> Result<()> {
        if append {
            for (namespace, subtree) in data {
                self.store.add(&namespace, subtree)?;
            }
            Ok(())
        } else {
            self.store.reset(Value::Object(data))
        }
    }
}

impl std::fmt::Display for DataManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.store.to_json() {
            Ok(rendered) => f.write_str(&rendered),
            Err(_) => Err(std::fmt::Error),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use serde_json::json;
    use tempfile::TempDir;

    use super::DataManager;
    use crate::decode::XmlDecoder;
    use crate::loader::FileSource;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).expect("write fixture");
        path
    }

    #[test]
    fn load_files_reset_replaces_the_store() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_file(&dir, "appConfig.json", r#"{"debug": true}"#);

        let mut manager = DataManager::new();
        manager.set("stale", json!(1)).expect("set should succeed");
        manager
            .load_files(vec![FileSource::from(path)], false)
            .expect("load should succeed");

        assert!(!manager.exists("stale"));
        assert_eq!(
            manager.get("appConfig.debug").expect("item exists"),
            json!(true)
        );
    }

    #[test]
    fn load_files_append_merges_into_existing_items() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_file(&dir, "appConfig.json", r#"{"debug": true}"#);

        let mut manager = DataManager::new();
        manager
            .set("appConfig.name", json!("app"))
            .expect("set should succeed");
        manager
            .load_files(vec![FileSource::from(path)], true)
            .expect("load should succeed");

        assert_eq!(
            manager.get("appConfig").expect("item exists"),
            json!({"name": "app", "debug": true})
        );
    }

    #[test]
    fn custom_decoder_loads_through_the_manager() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_file(&dir, "xmlConfig.xml", "<config><name>app</name></config>");

        let mut manager = DataManager::new();
        manager.add_decoder(Arc::new(XmlDecoder));
        manager
            .load_files(vec![FileSource::from(path)], false)
            .expect("load should succeed");

        assert_eq!(
            manager.get("xmlConfig.name").expect("item exists"),
            json!("app")
        );
    }

    #[test]
    fn init_manager_is_an_alias_for_reset() {
        let mut manager = DataManager::new();
        manager.set("a", json!(1)).expect("set should succeed");
        manager
            .init_manager(json!({"b": 2}))
            .expect("init should succeed");

        assert!(!manager.exists("a"));
        assert_eq!(manager.get("b").expect("item exists"), json!(2));
    }

    #[test]
    fn display_renders_items_as_json() {
        let mut manager = DataManager::new();
        manager.set("a.b", json!(1)).expect("set should succeed");

        let rendered = manager.to_string();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).expect("valid JSON");
        assert_eq!(parsed, json!({"a": {"b": 1}}));
    }

    #[test]
    fn items_name_is_constructor_configuration() {
        let manager = DataManager::new().with_items_name("data");
        assert_eq!(manager.items_name(), "data");
        assert_eq!(DataManager::new().items_name(), "items");
    }
}
