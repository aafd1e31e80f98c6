//! In-memory manifest source for testing and embedding.

use edgeroute_core::{
    application::ports::ManifestSource, domain::BuildManifest, error::EdgeRouteResult,
};

use super::JsonManifestFile;

#[derive(Debug, Clone, Default)]
pub struct InMemoryManifest {
    manifest: BuildManifest,
}

impl InMemoryManifest {
    pub fn new(manifest: BuildManifest) -> Self {
        Self { manifest }
    }

    /// Parse manifest JSON held in memory.
    pub fn from_json(text: &str) -> EdgeRouteResult<Self> {
        JsonManifestFile::parse("memory", text).map(Self::new)
    }
}

impl ManifestSource for InMemoryManifest {
    fn load(&self) -> EdgeRouteResult<BuildManifest> {
        Ok(self.manifest.clone())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
