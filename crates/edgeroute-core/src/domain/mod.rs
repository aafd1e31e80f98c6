// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for edgeroute.
//!
//! This module contains the pure routing logic with no I/O. Loading
//! manifests, scanning build outputs, serialising documents and writing them
//! are handled via ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No external crates**: Only std library + thiserror, serde, tracing
//! - **Immutable entities**: Descriptors are never edited after collection
//!
// Public API - what the world sees
pub mod collector;
pub mod entities;
pub mod error;
pub mod resolver;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use collector::RouteCollector;
pub use entities::{
    BuildManifest, BuildOutputs, ConfigDocument, ManifestEntry, PatternShape, ResolvedRoutes,
    RouteDescriptor, RoutePattern, Segment, Specificity,
};
pub use error::{AmbiguousRouteError, DomainError, ErrorCategory, ManifestError};
pub use resolver::{DEFAULT_FALLBACK_TARGET, PriorityResolver, ResolverPolicy};
pub use validation::DomainValidator;
pub use value_objects::{Platform, RouteKind, TieBreak};

/// Collect and resolve a manifest in one pure step.
pub fn plan_routes(
    manifest: &BuildManifest,
    outputs: &BuildOutputs,
    policy: ResolverPolicy,
) -> Result<ResolvedRoutes, DomainError> {
    let descriptors = RouteCollector::new(outputs).collect(&manifest.routes)?;
    let resolved = PriorityResolver::new(policy).resolve(descriptors)?;
    DomainValidator::validate_resolved(&resolved)?;
    Ok(resolved)
}
