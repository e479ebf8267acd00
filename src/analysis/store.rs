//! Resolution of requested filenames to layout sources.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::parser::{LayoutSource, LopdfSource};

/// Opens the documents named in a request.
pub trait DocumentStore: Send + Sync {
    /// Open a document by filename.
    fn open(&self, filename: &str) -> Result<Box<dyn LayoutSource>>;
}

/// Resolves filenames relative to a directory and parses them with lopdf.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Create a store rooted at `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of a filename.
    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }
}

impl DocumentStore for DirectoryStore {
    fn open(&self, filename: &str) -> Result<Box<dyn LayoutSource>> {
        let source = LopdfSource::load_file(self.path_of(filename))?;
        Ok(Box::new(source))
    }
}
