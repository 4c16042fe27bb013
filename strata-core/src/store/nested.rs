use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::store::path::ItemPath;

/// A nested mapping addressed through dot-notation aliases.
///
/// The root is always a mapping. Values are [`serde_json::Value`], so every
/// stored item is one of the closed set of variants (null, bool, number,
/// string, array, object) and merge logic can match on them exhaustively.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct NestedStore {
    root: Map<String, Value>,
}

impl NestedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Map<String, Value>) -> Self {
        Self { root: items }
    }

    /// Strict lookup: fails with [`Error::ItemNotFound`] when any segment of
    /// the alias is missing.
    pub fn get(&self, alias: &str) -> Result<Value> {
        let path: ItemPath = alias.parse()?;
        get_in_object(&self.root, path.segments())
            .cloned()
            .ok_or_else(|| Error::ItemNotFound(format!("no item at '{alias}'")))
    }

    /// Lookup with a fallback. Any miss, including a malformed alias, yields
    /// the fallback instead of an error.
    pub fn get_or(&self, alias: &str, fallback: Value) -> Value {
        self.get_if_exists(alias).unwrap_or(fallback)
    }

    /// Returns the value if the full path resolves, `None` otherwise.
    ///
    /// An explicitly stored `null` is present and comes back as
    /// `Some(Value::Null)`, distinct from the `None` no-item sentinel.
    pub fn get_if_exists(&self, alias: &str) -> Option<Value> {
        let path: ItemPath = alias.parse().ok()?;
        get_in_object(&self.root, path.segments()).cloned()
    }

    /// Stores `value` at `alias`, creating intermediate mappings as needed
    /// and unconditionally overwriting whatever sits at the final segment.
    pub fn set(&mut self, alias: &str, value: Value) -> Result<()> {
        let path: ItemPath = alias.parse()?;
        set_in_object(&mut self.root, path.segments(), value);
        Ok(())
    }

    /// Like [`set`](Self::set), except the final node is merged instead of
    /// replaced when both sides agree on a shape: mappings merge recursively
    /// (later values win at leaf conflicts, sibling keys survive), arrays
    /// append. Mismatched shapes overwrite.
    pub fn add(&mut self, alias: &str, value: Value) -> Result<()> {
        let path: ItemPath = alias.parse()?;
        add_in_object(&mut self.root, path.segments(), value);
        Ok(())
    }

    /// True iff traversal reaches the final segment, regardless of the value
    /// stored there. Malformed aliases count as absent.
    pub fn exists(&self, alias: &str) -> bool {
        let Ok(path) = alias.parse::<ItemPath>() else {
            return false;
        };
        get_in_object(&self.root, path.segments()).is_some()
    }

    pub fn has(&self, alias: &str) -> bool {
        self.exists(alias)
    }

    /// Deletes the entry at `alias`. A missing segment anywhere along the
    /// path is a no-op, not an error.
    pub fn remove(&mut self, alias: &str) -> Result<()> {
        let path: ItemPath = alias.parse()?;
        remove_in_object(&mut self.root, path.segments());
        Ok(())
    }

    pub fn clear(&mut self) {
        self.root = Map::new();
    }

    /// Replaces the root wholesale. Anything other than a mapping is a usage
    /// error.
    pub fn reset(&mut self, items: Value) -> Result<()> {
        match items {
            Value::Object(map) => {
                self.root = map;
                Ok(())
            }
            other => Err(Error::ResetType(format!(
                "expected a mapping, got {}",
                value_kind(&other)
            ))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn all(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.root)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }
}

/// Merges `incoming` into `target`: object/object merges recursively,
/// array/array appends, every other combination overwrites.
pub(crate) fn merge_values(target: &mut Value, incoming: Value) {
    match (target, incoming) {
        (Value::Object(existing), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match existing.get_mut(&key) {
                    Some(slot) => merge_values(slot, value),
                    None => {
                        existing.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(existing), Value::Array(mut incoming)) => {
            existing.append(&mut incoming);
        }
        (target, incoming) => *target = incoming,
    }
}

fn get_in_object<'a>(object: &'a Map<String, Value>, segments: &[String]) -> Option<&'a Value> {
    let (first, rest) = segments.split_first()?;
    let value = object.get(first)?;
    if rest.is_empty() {
        return Some(value);
    }
    value.as_object().and_then(|child| get_in_object(child, rest))
}

fn set_in_object(object: &mut Map<String, Value>, segments: &[String], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        object.insert(first.clone(), value);
        return;
    }

    let child = descend_or_create(object, first);
    set_in_object(child, rest, value);
}

fn add_in_object(object: &mut Map<String, Value>, segments: &[String], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        match object.get_mut(first) {
            Some(slot) => merge_values(slot, value),
            None => {
                object.insert(first.clone(), value);
            }
        }
        return;
    }

    let child = descend_or_create(object, first);
    add_in_object(child, rest, value);
}

/// Returns the child mapping under `key`, creating it (and overwriting any
/// non-mapping value already there) when necessary.
fn descend_or_create<'a>(
    object: &'a mut Map<String, Value>,
    key: &str,
) -> &'a mut Map<String, Value> {
    let entry = object
        .entry(key.to_owned())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    match entry {
        Value::Object(child) => child,
        _ => unreachable!("entry was just replaced with an object"),
    }
}

fn remove_in_object(object: &mut Map<String, Value>, segments: &[String]) -> bool {
    let Some((first, rest)) = segments.split_first() else {
        return false;
    };
    if rest.is_empty() {
        return object.remove(first).is_some();
    }

    let Some(child) = object.get_mut(first).and_then(Value::as_object_mut) else {
        return false;
    };
    remove_in_object(child, rest)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::NestedStore;
    use crate::error::Error;

    fn sample_store() -> NestedStore {
        let mut store = NestedStore::new();
        store
            .set("one.two.three", json!("three-value"))
            .expect("set should succeed");
        store
            .set("one.six", json!({"seven": "seven-value"}))
            .expect("set should succeed");
        store.set("top", json!("top-value")).expect("set should succeed");
        store
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut store = NestedStore::new();
        let value = json!({"x": 1, "y": [1, 2, {"z": null}]});
        store.set("a.b.c", value.clone()).expect("set should succeed");

        assert_eq!(store.get("a.b.c").expect("item exists"), value);
        assert_eq!(store.get("a.b").expect("item exists"), json!({"c": value}));
    }

    #[test]
    fn strict_get_fails_on_missing_item() {
        let store = sample_store();
        let error = store.get("one.two.missing").expect_err("lookup should fail");
        assert!(matches!(error, Error::ItemNotFound(_)));
    }

    #[test]
    fn get_or_returns_fallback_on_any_miss() {
        let store = sample_store();
        assert_eq!(store.get_or("nope", json!("fallback")), json!("fallback"));
        assert_eq!(store.get_or("bad..alias", json!(0)), json!(0));
        assert_eq!(store.get_or("top", json!(0)), json!("top-value"));
    }

    #[test]
    fn get_if_exists_distinguishes_null_from_absent() {
        let mut store = NestedStore::new();
        store.set("present", Value::Null).expect("set should succeed");

        assert_eq!(store.get_if_exists("present"), Some(Value::Null));
        assert_eq!(store.get_if_exists("absent"), None);
    }

    #[test]
    fn set_overwrites_mapping_with_scalar() {
        let mut store = sample_store();
        store.set("one.two", json!(5)).expect("set should succeed");
        assert_eq!(store.get("one.two").expect("item exists"), json!(5));
    }

    #[test]
    fn set_overwrites_scalar_intermediate_with_mapping() {
        let mut store = NestedStore::new();
        store.set("a", json!("scalar")).expect("set should succeed");
        store.set("a.b", json!(1)).expect("set should succeed");
        assert_eq!(store.get("a").expect("item exists"), json!({"b": 1}));
    }

    #[test]
    fn add_merges_sibling_keys() {
        let mut store = NestedStore::new();
        store.add("a.b", json!({"x": 1})).expect("add should succeed");
        store.add("a.b", json!({"y": 2})).expect("add should succeed");

        assert_eq!(store.get("a.b").expect("item exists"), json!({"x": 1, "y": 2}));
    }

    #[test]
    fn add_merges_recursively_with_later_values_winning() {
        let mut store = NestedStore::new();
        store
            .add("cfg", json!({"db": {"host": "old", "port": 5432}}))
            .expect("add should succeed");
        store
            .add("cfg", json!({"db": {"host": "new"}, "debug": true}))
            .expect("add should succeed");

        assert_eq!(
            store.get("cfg").expect("item exists"),
            json!({"db": {"host": "new", "port": 5432}, "debug": true})
        );
    }

    #[test]
    fn add_appends_arrays() {
        let mut store = NestedStore::new();
        store.add("list", json!([1, 2])).expect("add should succeed");
        store.add("list", json!([3])).expect("add should succeed");

        assert_eq!(store.get("list").expect("item exists"), json!([1, 2, 3]));
    }

    #[test]
    fn add_overwrites_on_shape_mismatch() {
        let mut store = NestedStore::new();
        store.add("a.b", json!({"x": 1})).expect("add should succeed");
        store.add("a.b", json!(5)).expect("add should succeed");

        assert_eq!(store.get("a.b").expect("item exists"), json!(5));
    }

    #[test]
    fn exists_tracks_presence_not_truthiness() {
        let mut store = NestedStore::new();
        assert!(!store.exists("a.b"));

        store.set("a.b", Value::Null).expect("set should succeed");
        assert!(store.exists("a.b"));
        assert!(store.has("a.b"));
        assert!(!store.exists("a..b"));

        store.remove("a.b").expect("remove should succeed");
        assert!(!store.exists("a.b"));
    }

    #[test]
    fn remove_on_missing_path_is_a_noop() {
        let mut store = sample_store();
        let before = store.all().clone();

        store.remove("one.two.missing.deeper").expect("remove is a no-op");
        store.remove("never.there").expect("remove is a no-op");

        assert_eq!(store.all(), &before);
    }

    #[test]
    fn remove_rejects_malformed_alias() {
        let mut store = sample_store();
        let error = store.remove("one..two").expect_err("alias should fail");
        assert!(matches!(error, Error::InvalidPath(_)));
    }

    #[test]
    fn clear_and_reset_lifecycle() {
        let mut store = sample_store();
        assert!(!store.is_empty());

        store.clear();
        assert!(store.is_empty());

        store
            .reset(json!({"fresh": {"start": true}}))
            .expect("reset should succeed");
        assert!(store.exists("fresh.start"));

        store.reset(json!({})).expect("reset should succeed");
        assert!(store.is_empty());
    }

    #[test]
    fn reset_rejects_non_mapping() {
        let mut store = NestedStore::new();
        let error = store.reset(json!([1, 2])).expect_err("reset should fail");
        assert!(matches!(error, Error::ResetType(_)));
        assert!(store.is_empty(), "failed reset must not disturb the root");
    }

    #[test]
    fn to_json_serializes_the_root() {
        let mut store = NestedStore::new();
        store.set("a.b", json!(1)).expect("set should succeed");

        let rendered = store.to_json().expect("serialization should succeed");
        let parsed: Value = serde_json::from_str(&rendered).expect("valid JSON");
        assert_eq!(parsed, json!({"a": {"b": 1}}));
    }
}
