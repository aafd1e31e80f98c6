//! Infrastructure adapters for edgeroute.
//!
//! This crate implements the ports defined in `edgeroute-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod catalog;
pub mod emitter;
pub mod manifest;
pub mod sink;

// Re-export commonly used adapters
pub use catalog::{DeclaredArtifacts, OutputDirCatalog};
pub use emitter::{NetlifyEmitter, VercelEmitter, all_emitters, emitter_for};
pub use manifest::{InMemoryManifest, JsonManifestFile};
pub use sink::{LocalDocumentSink, MemoryDocumentSink};
