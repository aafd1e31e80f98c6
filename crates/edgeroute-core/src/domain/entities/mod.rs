pub mod descriptor;
pub mod document;
pub mod manifest;
pub mod pattern;
pub mod resolved;

pub use crate::domain::DomainError;
pub use descriptor::RouteDescriptor;
pub use document::ConfigDocument;
pub use manifest::{BuildManifest, BuildOutputs, ManifestEntry};
pub use pattern::{PatternShape, RoutePattern, Segment, Specificity};
pub use resolved::ResolvedRoutes;
