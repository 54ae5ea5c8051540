use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::DatasetStore;

/// File-system snapshot store.
///
/// Resource names are paths resolved against `root`. Absolute names are used
/// as-is.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// A store rooted at the current directory.
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path for a resource name.
    pub fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::current_dir()
    }
}

impl DatasetStore for FileStore {
    fn read_text(&self, name: &str) -> StoreResult<String> {
        let path = self.resolve(name);
        let name = path.display().to_string();
        let text = fs::read_to_string(&path).map_err(|source| match source.kind() {
            // Not UTF-8: the file exists but its content is not a snapshot.
            io::ErrorKind::InvalidData => StoreError::Format {
                name: name.clone(),
                source: serde_json::Error::io(source),
            },
            _ => StoreError::Resource {
                name: name.clone(),
                source,
            },
        })?;
        debug!(path = %path.display(), bytes = text.len(), "read snapshot file");
        Ok(text)
    }
}
