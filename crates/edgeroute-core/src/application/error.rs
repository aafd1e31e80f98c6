//! Application layer errors.
//!
//! These errors represent failures in orchestration and at the ports, not
//! routing logic. Routing errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::Platform;
use crate::error::ErrorCategory;

/// Errors that occur while driving the routing pipeline.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The manifest could not be read or parsed.
    #[error("Failed to load manifest from {origin}: {reason}")]
    ManifestLoad { origin: String, reason: String },

    /// The build output could not be inventoried.
    #[error("Failed to scan build output at {path}: {reason}")]
    ArtifactScan { path: PathBuf, reason: String },

    /// A platform emitter could not serialise the routes.
    #[error("Failed to emit {platform} routing config: {reason}")]
    EmissionFailed { platform: Platform, reason: String },

    /// Writing the document failed.
    #[error("Failed to write config document to {path}: {reason}")]
    SinkFailed { path: PathBuf, reason: String },

    /// In-memory adapter state is unusable (lock poisoned).
    #[error("Document sink lock poisoned")]
    SinkLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ManifestLoad { origin, .. } => vec![
                format!("Could not read the manifest at: {}", origin),
                "Check that the build completed and wrote its route manifest".into(),
                "The manifest must be JSON: { \"routes\": [ ... ] }".into(),
            ],
            Self::ArtifactScan { path, .. } => vec![
                format!("Could not inspect: {}", path.display()),
                "Check that --output-dir points at the build output".into(),
            ],
            Self::EmissionFailed { platform, .. } => vec![
                format!("The {} emitter rejected the route table", platform),
                "This is likely a bug; please report it with the manifest".into(),
            ],
            Self::SinkFailed { path, .. } => vec![
                format!("Failed to write: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the output directory exists".into(),
            ],
            Self::SinkLockError => vec!["Retry the command".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ManifestLoad { .. } => ErrorCategory::NotFound,
            Self::ArtifactScan { .. } => ErrorCategory::NotFound,
            Self::EmissionFailed { .. } => ErrorCategory::Internal,
            Self::SinkFailed { .. } | Self::SinkLockError => ErrorCategory::Internal,
        }
    }
}
