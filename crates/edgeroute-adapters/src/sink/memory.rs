//! In-memory sink for testing.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use edgeroute_core::{
    application::{ApplicationError, ports::DocumentSink},
    domain::ConfigDocument,
    error::EdgeRouteResult,
};

/// Records written documents under a virtual root.
///
/// Clones share storage, so a test can keep one handle and give the other
/// to the service.
#[derive(Debug, Clone)]
pub struct MemoryDocumentSink {
    root: PathBuf,
    inner: Arc<RwLock<BTreeMap<PathBuf, String>>>,
}

impl MemoryDocumentSink {
    pub fn new() -> Self {
        Self::with_root("/memory")
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            inner: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Read a document's contents (testing helper).
    pub fn read(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.get(path).cloned()
    }

    /// Paths written so far.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryDocumentSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSink for MemoryDocumentSink {
    fn write(&self, document: &ConfigDocument) -> EdgeRouteResult<PathBuf> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::SinkLockError)?;

        let path = self.root.join(&document.file_name);
        inner.insert(path.clone(), document.contents.clone());
        Ok(path)
    }
}
