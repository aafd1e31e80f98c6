//! Application layer for edgeroute.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (RoutingService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! routing logic itself. All routing rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{RouteInfo, RoutingService};

// Re-export port traits (for adapter implementation)
pub use ports::{ArtifactCatalog, ConfigEmitter, DocumentSink, ManifestSource};

pub use error::ApplicationError;
