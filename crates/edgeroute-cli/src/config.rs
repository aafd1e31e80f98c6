//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the [`ResolverPolicy`]
//! built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `EDGEROUTE__ROUTING__TIE_BREAK=lexicographic`
//! 3. Config file (`--config`, or the platform config dir)
//! 4. Built-in defaults (always present)
//!
//! A `.env` file in the working directory is loaded before any of this.

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use edgeroute_core::domain::{DEFAULT_FALLBACK_TARGET, Platform, ResolverPolicy, TieBreak};

use crate::error::{CliError, CliResult};

const ENV_PREFIX: &str = "EDGEROUTE";
const ENV_SEPARATOR: &str = "__";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Defaults for `build`.
    pub defaults: Defaults,
    /// Resolver policy.
    pub routing: RoutingConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    pub platform: String,
    /// When unset, the platform's conventional directory is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    pub fallback_target: String,
    pub tie_break: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults {
                platform: Platform::Vercel.to_string(),
                output_dir: None,
            },
            routing: RoutingConfig {
                fallback_target: DEFAULT_FALLBACK_TARGET.into(),
                tie_break: TieBreak::default().to_string(),
            },
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
        }
    }
}

impl AppConfig {
    /// Layer defaults, the config file and the environment.
    ///
    /// An explicitly named file must exist when `require_file` is set; the
    /// default location is always optional.
    pub fn load(config_file: Option<&Path>, require_file: bool) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), require_file),
            None => (Self::config_path(), false),
        };

        let defaults =
            Config::try_from(&Self::default()).context("Failed to encode built-in defaults")?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path.as_path()).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.edgeroute.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "edgeroute", "edgeroute")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".edgeroute.toml"))
    }

    /// Default platform, validated.
    pub fn platform(&self) -> CliResult<Platform> {
        self.defaults
            .platform
            .parse()
            .map_err(|e| invalid("defaults.platform", e))
    }

    /// Output directory for a platform, from config or the platform default.
    pub fn output_dir(&self, platform: Platform) -> PathBuf {
        self.defaults
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(platform))
    }

    /// Resolver policy from the `[routing]` section.
    pub fn policy(&self) -> CliResult<ResolverPolicy> {
        let tie_break = self
            .routing
            .tie_break
            .parse()
            .map_err(|e| invalid("routing.tie_break", e))?;
        ResolverPolicy {
            tie_break,
            ..ResolverPolicy::default()
        }
        .with_fallback_target(&self.routing.fallback_target)
        .map_err(|e| invalid("routing.fallback_target", e.into()))
    }
}

/// Where each platform expects its routing file.
pub fn default_output_dir(platform: Platform) -> PathBuf {
    match platform {
        Platform::Vercel => PathBuf::from(".vercel/output"),
        Platform::Netlify => PathBuf::from("."),
    }
}

fn invalid(key: &str, err: edgeroute_core::domain::DomainError) -> CliError {
    CliError::ConfigError {
        message: format!("{key}: {err}"),
        source: Some(Box::new(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_target_vercel() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.platform().unwrap(), Platform::Vercel);
        assert_eq!(cfg.output_dir(Platform::Vercel), PathBuf::from(".vercel/output"));
    }

    #[test]
    fn default_policy_matches_resolver_default() {
        assert_eq!(AppConfig::default().policy().unwrap(), ResolverPolicy::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("edgeroute.toml");
        fs::write(
            &path,
            "[defaults]\nplatform = \"netlify\"\noutput_dir = \"dist\"\n\n[routing]\ntie_break = \"lexicographic\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path), true).unwrap();
        assert_eq!(cfg.platform().unwrap(), Platform::Netlify);
        assert_eq!(cfg.output_dir(Platform::Netlify), PathBuf::from("dist"));
        assert_eq!(cfg.policy().unwrap().tie_break, TieBreak::Lexicographic);
        assert_eq!(cfg.routing.fallback_target, DEFAULT_FALLBACK_TARGET);
    }

    #[test]
    fn missing_explicit_file_is_an_error_when_required() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path), true).is_err());
        assert!(AppConfig::load(Some(&path), false).is_ok());
    }

    #[test]
    fn unknown_platform_is_a_config_error() {
        let mut cfg = AppConfig::default();
        cfg.defaults.platform = "heroku".into();
        assert!(matches!(cfg.platform(), Err(CliError::ConfigError { .. })));
    }

    #[test]
    fn fallback_target_is_validated_and_rooted() {
        let mut cfg = AppConfig::default();
        cfg.routing.fallback_target = "404.html".into();
        assert_eq!(cfg.policy().unwrap().fallback_target, "/404.html");

        cfg.routing.fallback_target = String::new();
        assert!(matches!(cfg.policy(), Err(CliError::ConfigError { .. })));
    }

    #[test]
    fn defaults_serialise_to_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(text.contains("[routing]"));
        assert!(text.contains("tie_break = \"manifest-order\""));
    }
}
