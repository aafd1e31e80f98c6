//! `edgeroute platforms`: list supported platforms.

use serde_json::json;

use edgeroute_adapters::all_emitters;

use crate::{cli::OutputFormat, config::AppConfig, error::CliResult, output::OutputManager};

pub fn execute(config: AppConfig, output: OutputManager) -> CliResult<()> {
    let emitters = all_emitters();

    if output.format() == OutputFormat::Json {
        let listing: Vec<_> = emitters
            .iter()
            .map(|e| {
                json!({
                    "name": e.platform().as_str(),
                    "file": e.file_name(),
                    "output_dir": config.output_dir(e.platform()).display().to_string(),
                })
            })
            .collect();
        return output.json(&listing);
    }

    output.header("Supported platforms:")?;
    for emitter in &emitters {
        let platform = emitter.platform();
        output.data(&format!(
            "  {:<8} {:<14} {}\n",
            platform.as_str(),
            emitter.file_name(),
            output.dim(&config.output_dir(platform).display().to_string())
        ))?;
    }
    Ok(())
}
