//! Flags shared by every subcommand.
//!
//! Flattened into [`super::Cli`] with `global = true`, so
//! `edgeroute build -v` and `edgeroute -v build` mean the same thing.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase logging verbosity.
    ///
    /// `-v` logs each resolved rule set, `-vv` every collected route,
    /// `-vvv` everything. `RUST_LOG` overrides this.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Increase logging verbosity:
    (none)  - Warnings only (e.g. shadowed fallbacks)
    -v      - Info level (resolved rule counts, written paths)
    -vv     - Debug level (each collected and emitted route)
    -vvv    - Trace level"
    )]
    pub verbose: u8,

    /// Only print errors.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes.
    ///
    /// Honours `NO_COLOR` (see <https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Configuration file path. Must exist when given, except for `init`.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// How to render command output.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Output format"
    )]
    pub output_format: OutputFormat,
}

/// How the CLI should render its output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain otherwise (or `output.format` from config).
    #[default]
    Auto,
    /// Coloured, with status symbols.
    Human,
    /// No colour; stable for scripts.
    Plain,
    /// JSON on stdout.
    Json,
}
