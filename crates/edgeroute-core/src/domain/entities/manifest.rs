//! The build manifest: what the build produced and where each route points.
//!
//! This is the only input the core consumes. It is fully materialised by the
//! time the collector sees it.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::value_objects::RouteKind;

/// Enumeration of the routes a build produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildManifest {
    pub routes: Vec<ManifestEntry>,
    /// Artifacts the build claims to have written. Optional; the output
    /// directory can be scanned instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<BuildOutputs>,
}

impl BuildManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, entry: ManifestEntry) -> Self {
        self.routes.push(entry);
        self
    }

    pub fn with_artifacts(mut self, artifacts: BuildOutputs) -> Self {
        self.artifacts = Some(artifacts);
        self
    }
}

/// One produced route as reported by the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub pattern: String,
    pub kind: RouteKind,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ManifestEntry {
    pub fn new(pattern: impl Into<String>, kind: RouteKind, target: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            kind,
            target: target.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

/// Inventory of what actually exists in the build output.
///
/// File paths are stored rooted (`/about.html`) regardless of how they were
/// supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOutputs {
    #[serde(default, deserialize_with = "rooted_set")]
    files: BTreeSet<String>,
    #[serde(default)]
    functions: BTreeSet<String>,
}

impl BuildOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, path: impl AsRef<str>) {
        self.files.insert(rooted(path.as_ref()));
    }

    pub fn add_function(&mut self, name: impl Into<String>) {
        self.functions.insert(name.into());
    }

    pub fn with_file(mut self, path: impl AsRef<str>) -> Self {
        self.add_file(path);
        self
    }

    pub fn with_function(mut self, name: impl Into<String>) -> Self {
        self.add_function(name);
        self
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.files.contains(&rooted(path))
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains(name)
    }

    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }

    pub fn functions(&self) -> impl Iterator<Item = &str> {
        self.functions.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.functions.is_empty()
    }
}

fn rooted_set<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw.iter().map(|path| rooted(path)).collect())
}

/// Normalise a file path to a single leading `/` and forward slashes.
pub fn rooted(path: &str) -> String {
    let path = path.replace('\\', "/");
    format!("/{}", path.trim_start_matches('/'))
}
