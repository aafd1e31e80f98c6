//! Catalog backed by the manifest's own `artifacts` block.

use edgeroute_core::{
    application::{ApplicationError, ports::ArtifactCatalog},
    domain::{BuildManifest, BuildOutputs},
    error::EdgeRouteResult,
};

/// Trusts the artifact list the build wrote next to its routes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredArtifacts;

impl DeclaredArtifacts {
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactCatalog for DeclaredArtifacts {
    fn inventory(&self, manifest: &BuildManifest) -> EdgeRouteResult<BuildOutputs> {
        manifest.artifacts.clone().ok_or_else(|| {
            ApplicationError::ManifestLoad {
                origin: "manifest".into(),
                reason: "no `artifacts` block; scan the build output instead (--scan-output)"
                    .into(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_declared_artifacts() {
        let manifest =
            BuildManifest::new().with_artifacts(BuildOutputs::new().with_file("/a.html"));
        let outputs = DeclaredArtifacts::new().inventory(&manifest).unwrap();
        assert!(outputs.has_file("/a.html"));
    }

    #[test]
    fn missing_block_is_an_error() {
        let err = DeclaredArtifacts::new()
            .inventory(&BuildManifest::new())
            .unwrap_err();
        assert!(err.to_string().contains("--scan-output"));
    }
}
