//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `edgeroute-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `ManifestSource`: Route manifest ingestion
//!   - `ArtifactCatalog`: Build output inventory
//!   - `ConfigEmitter`: Platform-specific serialisation
//!   - `DocumentSink`: Persisting the emitted document
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{ArtifactCatalog, ConfigEmitter, DocumentSink, ManifestSource};
