//! JSON manifest file adapter.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use edgeroute_core::{
    application::{ApplicationError, ports::ManifestSource},
    domain::BuildManifest,
    error::EdgeRouteResult,
};

/// Reads a `{ "routes": [...], "artifacts": {...} }` document from disk.
#[derive(Debug, Clone)]
pub struct JsonManifestFile {
    path: PathBuf,
}

impl JsonManifestFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse manifest text. Shared with [`crate::InMemoryManifest::from_json`].
    pub(crate) fn parse(origin: &str, text: &str) -> EdgeRouteResult<BuildManifest> {
        serde_json::from_str(text).map_err(|e| {
            ApplicationError::ManifestLoad {
                origin: origin.to_string(),
                reason: format!("invalid manifest JSON: {e}"),
            }
            .into()
        })
    }
}

impl ManifestSource for JsonManifestFile {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> EdgeRouteResult<BuildManifest> {
        let text = fs::read_to_string(&self.path).map_err(|e| ApplicationError::ManifestLoad {
            origin: self.describe(),
            reason: e.to_string(),
        })?;
        let manifest = Self::parse(&self.describe(), &text)?;
        debug!(routes = manifest.routes.len(), "Manifest parsed");
        Ok(manifest)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
