//! Local filesystem sink using std::fs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use edgeroute_core::{
    application::{ApplicationError, ports::DocumentSink},
    domain::ConfigDocument,
    error::{EdgeRouteError, EdgeRouteResult},
};

/// Production sink writing `<dir>/<file_name>`.
///
/// The document is written to a sibling temp file and renamed into place,
/// so readers never observe a half-written config.
#[derive(Debug, Clone)]
pub struct LocalDocumentSink {
    dir: PathBuf,
}

impl LocalDocumentSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DocumentSink for LocalDocumentSink {
    fn write(&self, document: &ConfigDocument) -> EdgeRouteResult<PathBuf> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| map_io_error(&self.dir, e, "create directory"))?;

        let path = self.dir.join(&document.file_name);
        let staging = self.dir.join(format!(".{}.tmp", document.file_name));

        fs::write(&staging, &document.contents)
            .map_err(|e| map_io_error(&staging, e, "write file"))?;
        if let Err(e) = fs::rename(&staging, &path) {
            let _ = fs::remove_file(&staging);
            return Err(map_io_error(&path, e, "replace file"));
        }

        debug!(path = %path.display(), bytes = document.size(), "Document written");
        Ok(path)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> EdgeRouteError {
    ApplicationError::SinkFailed {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
