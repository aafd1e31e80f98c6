//! Error handling for the edgeroute CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;
use std::fmt::Write as _;

use owo_colors::OwoColorize;
use thiserror::Error;

use edgeroute_core::error::EdgeRouteError;

pub use edgeroute_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// A configuration file could not be read, parsed, or written, or holds
    /// an unusable value.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from the routing pipeline.
    #[error("Routing failed: {0}")]
    Core(#[from] EdgeRouteError),

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Rendering command output failed.
    #[error("Failed to render output: {message}")]
    Output { message: String },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// What the user can try next.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigError { .. } => vec![
                "Show the active file with 'edgeroute config path'".into(),
                "Regenerate defaults with 'edgeroute init --force'".into(),
                "Check EDGEROUTE__* environment variables".into(),
            ],
            Self::Core(core_err) => core_err.suggestions(),
            Self::IoError { .. } => vec![
                "Check permissions on the output directory".into(),
                "Pass a writable location with --output-dir".into(),
            ],
            Self::Output { .. } => vec!["Retry with --output-format plain".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Conflict => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } | Self::Output { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// The report printed to stderr: headline, cause chain when `verbose`,
    /// then suggestions. `colour` adds ANSI styling.
    pub fn render(&self, verbose: bool, colour: bool) -> String {
        let paint = |text: &str, style: fn(&str) -> String| {
            if colour { style(text) } else { text.to_string() }
        };

        let mut out = String::new();
        let mark = if colour {
            format!("{} ", "✗".red().bold())
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            "\n{mark}{} {}",
            paint("Error:", |t| t.red().bold().to_string()),
            paint(&self.to_string(), |t| t.red().to_string())
        );

        if verbose {
            for cause in self.causes() {
                let _ = writeln!(
                    out,
                    "  {}",
                    paint(&format!("Caused by: {cause}"), |t| t.dimmed().to_string())
                );
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let _ = writeln!(
                out,
                "\n{}",
                paint("Suggestions:", |t| t.yellow().bold().to_string())
            );
            for suggestion in &suggestions {
                let _ = writeln!(out, "  - {suggestion}");
            }
        }

        if !verbose {
            let _ = writeln!(
                out,
                "\n{}",
                paint("Use -v / --verbose for more details.", |t| t
                    .dimmed()
                    .to_string())
            );
        }

        out
    }

    fn causes(&self) -> impl Iterator<Item = &(dyn Error + 'static)> {
        std::iter::successors(self.source(), |err| (*err).source())
    }

    /// Record the failure on the tracing subscriber.
    pub fn log(&self) {
        let code = self.exit_code();
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(code, category = ?self.category(), error = %self, "Command rejected")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(code, category = ?self.category(), error = %self, "Command failed")
            }
        }
        for cause in self.causes() {
            tracing::debug!(%cause, "Caused by");
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input: malformed or ambiguous manifest, bad arguments.
    UserError,
    /// Manifest or build output missing.
    NotFound,
    Configuration,
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Convert foreign errors into [`CliError`] at call-sites with a context
/// message.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, serde_json::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::Output {
            message: format!("{}: {e}", f().into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    use edgeroute_core::{
        application::ApplicationError,
        domain::{AmbiguousRouteError, DomainError, ManifestError, RouteKind},
    };

    fn ambiguous() -> CliError {
        CliError::Core(EdgeRouteError::Domain(DomainError::AmbiguousRoute(
            AmbiguousRouteError {
                pattern: "/shop".into(),
                first_target: "/shop.html".into(),
                first_kind: RouteKind::StaticFile,
                second_target: "shop".into(),
                second_kind: RouteKind::DynamicFunction,
            },
        )))
    }

    #[test]
    fn manifest_and_ambiguity_errors_exit_2() {
        let manifest = CliError::Core(
            ManifestError::EmptyTarget {
                pattern: "/".into(),
            }
            .into(),
        );
        assert_eq!(manifest.exit_code(), 2);
        assert_eq!(ambiguous().exit_code(), 2);
    }

    #[test]
    fn missing_manifest_exits_3() {
        let err = CliError::Core(
            ApplicationError::ManifestLoad {
                origin: "routes.json".into(),
                reason: "No such file or directory".into(),
            }
            .into(),
        );
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
    }

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn report_names_both_targets() {
        let s = ambiguous().render(false, false);
        assert!(s.contains("Error:"));
        assert!(s.contains("/shop.html"));
        assert!(s.contains("'shop'"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn uncoloured_report_has_no_escape_codes() {
        assert!(!ambiguous().render(true, false).contains('\u{1b}'));
    }

    #[test]
    fn verbose_report_shows_cause() {
        let err = CliError::ConfigError {
            message: "bad".into(),
            source: Some(Box::new(io::Error::other("root cause"))),
        };
        let s = err.render(true, false);
        assert!(s.contains("Caused by: root cause"));
        assert!(!s.contains("--verbose"));
    }

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading config");
        assert!(matches!(cli, Err(CliError::IoError { .. })));
    }
}
