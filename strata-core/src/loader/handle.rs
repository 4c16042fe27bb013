use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// An opaque, validated reference to a readable file.
///
/// Construction only checks shape (the path must actually name a file);
/// existence and readability are checked when content is read, during
/// `process`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    path: PathBuf,
}

impl FileHandle {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.file_name().is_none() {
            return Err(Error::InvalidFileReference(format!(
                "'{}' does not name a file",
                path.display()
            )));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without its final extension.
    pub fn file_stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
    }

    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|ext| ext.to_str())
    }

    pub fn read(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|source| Error::FileAccess {
            path: self.path.clone(),
            source,
        })
    }
}

/// An ordered collection of validated file handles.
///
/// Every element is validated before the bag exists; the first invalid entry
/// fails construction, so a bag is never partially populated.
#[derive(Debug, Clone, Default)]
pub struct FileBag {
    handles: Vec<FileHandle>,
}

impl FileBag {
    pub fn new<I, P>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut handles = Vec::new();
        for path in paths {
            handles.push(FileHandle::new(path)?);
        }
        Ok(Self { handles })
    }

    pub fn from_handles(handles: Vec<FileHandle>) -> Self {
        Self { handles }
    }

    pub fn handles(&self) -> &[FileHandle] {
        &self.handles
    }

    pub fn into_handles(self) -> Vec<FileHandle> {
        self.handles
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn clear(&mut self) {
        self.handles.clear();
    }
}
