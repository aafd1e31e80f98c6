//! `edgeroute inspect`: show the resolved rule order.

use tracing::instrument;

use edgeroute_core::application::RouteInfo;

use crate::{
    cli::{InspectArgs, InspectFormat, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(manifest = %args.routing.manifest.display()))]
pub fn execute(args: InspectArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let platform = config.platform()?;
    let output_dir = args
        .routing
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output_dir(platform));

    let service = super::routing_service(&args.routing, platform, output_dir, &config)?;
    let routes = service.plan()?;
    let rows = RouteInfo::from_resolved(&routes);

    let format = if output.format() == OutputFormat::Json {
        InspectFormat::Json
    } else {
        args.format
    };

    if let Some(path) = &args.path {
        // The table always ends in a catch-all, so every path has a rule.
        let matched = routes.first_match(path).map(|(position, _)| &rows[position]);
        return match (format, matched) {
            (InspectFormat::Json, matched) => output.json(&matched),
            (_, Some(row)) => {
                output.data(&format!(
                    "{} -> {} (rule {}: {})\n",
                    path, row.target, row.position, row.pattern
                ))?;
                Ok(())
            }
            (_, None) => {
                output.warning(&format!("No rule serves {path}"))?;
                Ok(())
            }
        };
    }

    match format {
        InspectFormat::Json => output.json(&rows)?,
        InspectFormat::List => {
            for row in &rows {
                output.data(&format!("{} -> {}\n", row.pattern, row.target))?;
            }
        }
        InspectFormat::Table => {
            output.header(&format!("Resolved routes ({}):", rows.len()))?;
            output.data(&render_table(&rows, &output))?;
        }
    }

    Ok(())
}

fn render_table(rows: &[RouteInfo], output: &OutputManager) -> String {
    let pattern_w = column_width(rows.iter().map(|r| r.pattern.as_str()), "PATTERN");
    let target_w = column_width(rows.iter().map(|r| r.target.as_str()), "TARGET");
    let kind_w = column_width(rows.iter().map(|r| r.kind.as_str()), "KIND");

    let mut table = format!(
        "{:>3}  {:<pattern_w$}  {:<target_w$}  {:<kind_w$}  STATUS\n",
        "#", "PATTERN", "TARGET", "KIND"
    );
    for row in rows {
        let status = row
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| output.dim("-"));
        table.push_str(&format!(
            "{:>3}  {:<pattern_w$}  {:<target_w$}  {:<kind_w$}  {}\n",
            row.position, row.pattern, row.target, row.kind, status
        ));
    }
    table
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values
        .map(console::measure_text_width)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_width_covers_header_and_values() {
        assert_eq!(column_width(["/a", "/blog/[slug]"].into_iter(), "PATTERN"), 12);
        assert_eq!(column_width(std::iter::empty(), "KIND"), 4);
    }
}
