use std::fmt;

use crate::domain::entities::pattern::{RoutePattern, Specificity};
use crate::domain::value_objects::RouteKind;

/// Normalised representation of one route entry.
///
/// Immutable once built: the resolver reorders descriptors and may build new
/// ones (widened fallbacks, the synthesized catch-all), but never edits one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pattern: RoutePattern,
    kind: RouteKind,
    target: String,
    status: Option<u16>,
    specificity: Specificity,
}

impl RouteDescriptor {
    pub fn new(
        pattern: RoutePattern,
        kind: RouteKind,
        target: impl Into<String>,
        status: Option<u16>,
    ) -> Self {
        let specificity = pattern.specificity();
        Self {
            pattern,
            kind,
            target: target.into(),
            status,
            specificity,
        }
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn kind(&self) -> RouteKind {
        self.kind
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn specificity(&self) -> Specificity {
        self.specificity
    }

    /// 404-class fallbacks are widened to their scope by the resolver.
    pub fn is_not_found_fallback(&self) -> bool {
        self.kind.is_fallback() && self.status.unwrap_or(404) == 404
    }
}

impl fmt::Display for RouteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.pattern, self.target, self.kind)?;
        if let Some(status) = self.status {
            write!(f, " [{status}]")?;
        }
        Ok(())
    }
}
