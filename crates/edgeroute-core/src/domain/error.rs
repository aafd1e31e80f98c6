// ============================================================================
// domain/error.rs - ROUTING ERROR DOMAIN
// ============================================================================

use thiserror::Error;

use crate::domain::value_objects::RouteKind;

/// A malformed or dangling manifest entry.
///
/// Always fatal: the deploy step aborts and no config document is produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ManifestError {
    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("route '{pattern}' has an empty target")]
    EmptyTarget { pattern: String },

    #[error("route '{pattern}' has invalid status {status} (expected 100-599)")]
    InvalidStatus { pattern: String, status: u16 },

    #[error(
        "route '{pattern}' references {kind} target '{target}' which does not exist in the build output"
    )]
    DanglingTarget {
        pattern: String,
        kind: RouteKind,
        target: String,
    },
}

/// Two entries claim the same pattern but point at different targets.
///
/// Both sides are named so the user can find them in the manifest.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error(
    "ambiguous route '{pattern}': '{first_target}' ({first_kind}) conflicts with '{second_target}' ({second_kind})"
)]
pub struct AmbiguousRouteError {
    pub pattern: String,
    pub first_target: String,
    pub first_kind: RouteKind,
    pub second_target: String,
    pub second_kind: RouteKind,
}

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("unknown {what}: {value}")]
    UnknownValue { what: &'static str, value: String },

    // ========================================================================
    // Conflict Errors
    // ========================================================================
    #[error(transparent)]
    AmbiguousRoute(#[from] AmbiguousRouteError),

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("routing invariant violated: {0}")]
    InvariantViolated(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Manifest(ManifestError::InvalidPattern { pattern, .. }) => vec![
                format!("Fix the pattern '{}' in the route manifest", pattern),
                "Patterns start with '/', e.g. /about, /posts/[id], /blog/*".into(),
            ],
            Self::Manifest(ManifestError::DanglingTarget { target, kind, .. }) => vec![
                format!("'{}' was not produced by the build", target),
                if kind.serves_file() {
                    "Check that the file exists in the static output directory".into()
                } else {
                    "Check that the function was bundled into the output".into()
                },
                "Re-run the build before generating the routing config".into(),
            ],
            Self::Manifest(_) => vec!["Check the route manifest produced by the build".into()],
            Self::AmbiguousRoute(err) => vec![
                format!("Two routes claim '{}'", err.pattern),
                format!("  • {} ({})", err.first_target, err.first_kind),
                format!("  • {} ({})", err.second_target, err.second_kind),
                "Remove one of them or give them distinct patterns".into(),
            ],
            Self::UnknownValue { what, .. } => {
                vec![format!("Use a supported {}; see --help", what)]
            }
            Self::InvariantViolated(_) => vec![
                "This appears to be a bug in edgeroute".into(),
                "Please report it together with the manifest".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Manifest(_) | Self::UnknownValue { .. } => ErrorCategory::Validation,
            Self::AmbiguousRoute(_) => ErrorCategory::Conflict,
            Self::InvariantViolated(_) => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    Internal,
}
