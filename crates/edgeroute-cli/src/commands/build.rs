//! `edgeroute build`: resolve the manifest and write the platform config.

use serde_json::json;
use tracing::{info, instrument};

use edgeroute_adapters::LocalDocumentSink;

use crate::{
    cli::{BuildArgs, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(manifest = %args.routing.manifest.display()))]
pub fn execute(args: BuildArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let platform = match args.platform {
        Some(platform) => platform.into(),
        None => config.platform()?,
    };
    let output_dir = args
        .routing
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output_dir(platform));

    let service = super::routing_service(&args.routing, platform, output_dir.clone(), &config)?;

    if args.dry_run {
        let document = service.render()?;
        info!(
            path = %output_dir.join(&document.file_name).display(),
            "Dry run: nothing written"
        );
        output.data(&document.contents)?;
        return Ok(());
    }

    let path = service.deploy(&LocalDocumentSink::new(&output_dir))?;

    if output.format() == OutputFormat::Json {
        output.json(&json!({
            "platform": platform.as_str(),
            "path": path.display().to_string(),
        }))?;
    } else if !output.is_quiet() {
        output.success(&format!(
            "Wrote {} routing config to {}",
            platform,
            path.display()
        ))?;
    }

    Ok(())
}
