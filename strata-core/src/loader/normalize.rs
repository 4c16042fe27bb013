use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::loader::handle::{FileBag, FileHandle};

/// One caller-supplied file entry, before normalization.
///
/// The loader accepts several shapes at its boundary; everything downstream
/// only ever sees the canonical [`FileReference`].
#[derive(Debug, Clone)]
pub enum FileSource {
    Path(PathBuf),
    PathWithNamespace(PathBuf, String),
    Handle(FileHandle),
    HandleWithNamespace(FileHandle, String),
    Bag(FileBag),
}

impl FileSource {
    /// A path with an explicit namespace override.
    pub fn with_namespace(path: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self::PathWithNamespace(path.into(), namespace.into())
    }
}

impl From<&str> for FileSource {
    fn from(value: &str) -> Self {
        Self::Path(PathBuf::from(value))
    }
}

impl From<String> for FileSource {
    fn from(value: String) -> Self {
        Self::Path(PathBuf::from(value))
    }
}

impl From<PathBuf> for FileSource {
    fn from(value: PathBuf) -> Self {
        Self::Path(value)
    }
}

impl From<&Path> for FileSource {
    fn from(value: &Path) -> Self {
        Self::Path(value.to_path_buf())
    }
}

impl From<FileHandle> for FileSource {
    fn from(value: FileHandle) -> Self {
        Self::Handle(value)
    }
}

impl From<FileBag> for FileSource {
    fn from(value: FileBag) -> Self {
        Self::Bag(value)
    }
}

impl<S: Into<String>> From<(&str, S)> for FileSource {
    fn from((path, namespace): (&str, S)) -> Self {
        Self::PathWithNamespace(PathBuf::from(path), namespace.into())
    }
}

impl<S: Into<String>> From<(PathBuf, S)> for FileSource {
    fn from((path, namespace): (PathBuf, S)) -> Self {
        Self::PathWithNamespace(path, namespace.into())
    }
}

impl<S: Into<String>> From<(FileHandle, S)> for FileSource {
    fn from((handle, namespace): (FileHandle, S)) -> Self {
        Self::HandleWithNamespace(handle, namespace.into())
    }
}

/// A resolved `(file, namespace)` pair, the only shape the loader processes.
#[derive(Debug, Clone)]
pub struct FileReference {
    handle: FileHandle,
    namespace: String,
}

impl FileReference {
    pub fn path(&self) -> &Path {
        self.handle.path()
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn extension(&self) -> Option<&str> {
        self.handle.extension()
    }

    pub fn read(&self) -> Result<String> {
        self.handle.read()
    }
}

/// Resolves heterogeneous sources into an ordered sequence of references.
/// Input order is preserved; it determines last-writer-wins behavior when
/// namespaces collide during `process`.
pub fn normalize(sources: Vec<FileSource>) -> Result<Vec<FileReference>> {
    let mut references = Vec::new();
    for source in sources {
        match source {
            FileSource::Path(path) => {
                references.push(resolve_reference(FileHandle::new(path)?, None)?);
            }
            FileSource::PathWithNamespace(path, namespace) => {
                references.push(resolve_reference(FileHandle::new(path)?, Some(namespace))?);
            }
            FileSource::Handle(handle) => {
                references.push(resolve_reference(handle, None)?);
            }
            FileSource::HandleWithNamespace(handle, namespace) => {
                references.push(resolve_reference(handle, Some(namespace))?);
            }
            FileSource::Bag(bag) => {
                for handle in bag.into_handles() {
                    references.push(resolve_reference(handle, None)?);
                }
            }
        }
    }
    Ok(references)
}

fn resolve_reference(handle: FileHandle, namespace: Option<String>) -> Result<FileReference> {
    let raw = namespace.unwrap_or_else(|| handle.file_stem().to_owned());
    let namespace = sanitize_namespace(&raw);
    if namespace.is_empty() {
        return Err(Error::InvalidFileReference(format!(
            "namespace for '{}' is empty after sanitization",
            handle.path().display()
        )));
    }
    Ok(FileReference { handle, namespace })
}

/// Derives a namespace from a file stem or explicit override.
///
/// Each maximal run of `.`, `-`, and whitespace becomes a single underscore;
/// every other character that is not alphanumeric or underscore is deleted
/// outright (a deleted character terminates a run).
pub fn sanitize_namespace(name: &str) -> String {
    let mut sanitized = String::with_capacity(name.len());
    let mut in_separator_run = false;
    for ch in name.chars() {
        if ch == '.' || ch == '-' || ch.is_whitespace() {
            if !in_separator_run {
                sanitized.push('_');
                in_separator_run = true;
            }
        } else {
            in_separator_run = false;
            if ch.is_alphanumeric() || ch == '_' {
                sanitized.push(ch);
            }
        }
    }
    sanitized
}
