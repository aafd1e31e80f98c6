//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `edgeroute-adapters` crate provides implementations.

use std::path::PathBuf;

#[cfg(test)]
use mockall::automock;

use crate::domain::{BuildManifest, BuildOutputs, ConfigDocument, Platform, ResolvedRoutes};
use crate::error::EdgeRouteResult;

/// Port for reading the build's route manifest.
///
/// Implemented by:
/// - `edgeroute_adapters::manifest::JsonManifestFile` (production)
/// - `edgeroute_adapters::manifest::InMemoryManifest` (testing)
///
/// Manifests are small and bounded, so loading is a single synchronous call
/// returning the whole thing.
#[cfg_attr(test, automock)]
pub trait ManifestSource: Send + Sync {
    /// Load the complete manifest.
    fn load(&self) -> EdgeRouteResult<BuildManifest>;

    /// Human-readable origin for logs and errors (a path, "memory", ...).
    fn describe(&self) -> String;
}

/// Port for discovering what the build actually produced.
///
/// Implemented by:
/// - `edgeroute_adapters::catalog::DeclaredArtifacts` (manifest's own list)
/// - `edgeroute_adapters::catalog::OutputDirCatalog` (scans the output dir)
#[cfg_attr(test, automock)]
pub trait ArtifactCatalog: Send + Sync {
    /// Inventory the build output. The loaded manifest is passed along for
    /// catalogs that read its declared artifacts.
    fn inventory(&self, manifest: &BuildManifest) -> EdgeRouteResult<BuildOutputs>;
}

/// Port for serialising a resolved table into one platform's dialect.
///
/// One implementation per platform; the service never branches on the
/// platform itself.
///
/// Implemented by:
/// - `edgeroute_adapters::emitter::VercelEmitter`
/// - `edgeroute_adapters::emitter::NetlifyEmitter`
///
/// ## Contract
///
/// - Pure: no filesystem or network access
/// - Deterministic: the same routes always produce byte-identical output
#[cfg_attr(test, automock)]
pub trait ConfigEmitter: Send + Sync {
    /// Which platform this emitter targets.
    fn platform(&self) -> Platform;

    /// File name the document is conventionally stored under.
    fn file_name(&self) -> &'static str;

    /// Serialise the resolved routes.
    fn emit(&self, routes: &ResolvedRoutes) -> EdgeRouteResult<ConfigDocument>;
}

/// Port for persisting an emitted document.
///
/// Implemented by:
/// - `edgeroute_adapters::sink::LocalDocumentSink` (production)
/// - `edgeroute_adapters::sink::MemoryDocumentSink` (testing)
#[cfg_attr(test, automock)]
pub trait DocumentSink: Send + Sync {
    /// Write the document and return where it landed.
    fn write(&self, document: &ConfigDocument) -> EdgeRouteResult<PathBuf>;
}
