//! Command handlers. Each translates arguments into adapters and calls the
//! routing service; none of them contain routing logic.

pub mod build;
pub mod completions;
pub mod config;
pub mod init;
pub mod inspect;
pub mod platforms;

use std::path::PathBuf;

use tracing::debug;

use edgeroute_adapters::{DeclaredArtifacts, JsonManifestFile, OutputDirCatalog, emitter_for};
use edgeroute_core::{
    application::{ArtifactCatalog, RoutingService},
    domain::{Platform, ResolverPolicy},
    error::EdgeRouteError,
};

use crate::{cli::RoutingArgs, config::AppConfig, error::CliResult};

/// Flags override config for the resolver policy.
fn resolve_policy(args: &RoutingArgs, config: &AppConfig) -> CliResult<ResolverPolicy> {
    let mut policy = config.policy()?;
    if let Some(fallback) = &args.fallback {
        policy = policy
            .with_fallback_target(fallback)
            .map_err(EdgeRouteError::from)?;
    }
    if let Some(tie_break) = args.tie_break {
        policy.tie_break = tie_break.into();
    }
    Ok(policy)
}

/// Assemble the service for one invocation.
fn routing_service(
    args: &RoutingArgs,
    platform: Platform,
    output_dir: PathBuf,
    config: &AppConfig,
) -> CliResult<RoutingService> {
    let policy = resolve_policy(args, config)?;
    debug!(
        manifest = %args.manifest.display(),
        %platform,
        scan_output = args.scan_output,
        tie_break = %policy.tie_break,
        "Routing service configured"
    );

    let catalog: Box<dyn ArtifactCatalog> = if args.scan_output {
        Box::new(OutputDirCatalog::new(output_dir))
    } else {
        Box::new(DeclaredArtifacts::new())
    };

    Ok(RoutingService::new(
        Box::new(JsonManifestFile::new(&args.manifest)),
        catalog,
        emitter_for(platform),
    )
    .with_policy(policy))
}
