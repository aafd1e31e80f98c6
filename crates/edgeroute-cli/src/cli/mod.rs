//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use edgeroute_core::domain::{Platform, TieBreak};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "edgeroute",
    bin_name = "edgeroute",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Deterministic routing config for static and hybrid site deploys",
    long_about = "edgeroute reads a build's route manifest, orders the routes so the \
                  most specific rule always wins, and writes the routing config a \
                  deployment platform expects.",
    after_help = "EXAMPLES:\n\
        \x20 edgeroute build   --manifest dist/routes.json\n\
        \x20 edgeroute build   --manifest dist/routes.json --platform netlify --output-dir dist\n\
        \x20 edgeroute inspect --manifest dist/routes.json --path /blog/hello\n\
        \x20 edgeroute completions bash > /usr/share/bash-completion/completions/edgeroute",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve the manifest and write the platform routing config.
    #[command(
        visible_alias = "b",
        about = "Write the routing config for a build",
        after_help = "EXAMPLES:\n\
            \x20 edgeroute build -m routes.json\n\
            \x20 edgeroute build -m routes.json --scan-output --output-dir .vercel/output\n\
            \x20 edgeroute build -m routes.json --platform netlify --dry-run"
    )]
    Build(BuildArgs),

    /// Print the resolved rule table.
    #[command(
        visible_alias = "i",
        about = "Show the resolved route order",
        after_help = "EXAMPLES:\n\
            \x20 edgeroute inspect -m routes.json\n\
            \x20 edgeroute inspect -m routes.json --format json\n\
            \x20 edgeroute inspect -m routes.json --path /blog/hello"
    )]
    Inspect(InspectArgs),

    /// List supported platforms.
    #[command(about = "List supported platforms")]
    Platforms,

    /// Initialise an edgeroute configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 edgeroute init                 # default location\n\
            \x20 edgeroute init --force         # overwrite\n\
            \x20 edgeroute -c ./edgeroute.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 edgeroute completions bash > ~/.local/share/bash-completion/completions/edgeroute\n\
            \x20 edgeroute completions zsh  > ~/.zfunc/_edgeroute\n\
            \x20 edgeroute completions fish > ~/.config/fish/completions/edgeroute.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the edgeroute configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 edgeroute config get routing.tie_break\n\
            \x20 edgeroute config list\n\
            \x20 edgeroute config path"
    )]
    Config(ConfigCommands),
}

// ── shared routing inputs ─────────────────────────────────────────────────────

/// Where routes come from and how ties are settled.
#[derive(Debug, Args)]
pub struct RoutingArgs {
    /// Route manifest written by the build.
    #[arg(
        short = 'm',
        long = "manifest",
        value_name = "FILE",
        help = "Route manifest (JSON)"
    )]
    pub manifest: PathBuf,

    /// Build output directory. Scanned with `--scan-output`, and where
    /// `build` writes the config.
    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        help = "Build output directory"
    )]
    pub output_dir: Option<PathBuf>,

    /// Inventory artifacts from the output directory instead of trusting
    /// the manifest's `artifacts` block.
    #[arg(long = "scan-output", help = "Scan the output directory for artifacts")]
    pub scan_output: bool,

    /// Target of the generated 404 catch-all.
    #[arg(
        long = "fallback",
        value_name = "TARGET",
        help = "Fallback target when the build has no 404 page"
    )]
    pub fallback: Option<String>,

    /// Ordering of equally specific dynamic routes.
    #[arg(long = "tie-break", value_enum, help = "Tie-break for equal dynamic routes")]
    pub tie_break: Option<TieBreakArg>,
}

// ── build ─────────────────────────────────────────────────────────────────────

/// Arguments for `edgeroute build`.
#[derive(Debug, Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub routing: RoutingArgs,

    /// Deployment platform.
    #[arg(
        short = 'p',
        long = "platform",
        value_enum,
        help = "Deployment platform (default from config)"
    )]
    pub platform: Option<PlatformArg>,

    /// Print the document instead of writing it.
    #[arg(long = "dry-run", help = "Print the config without writing it")]
    pub dry_run: bool,
}

// ── inspect ───────────────────────────────────────────────────────────────────

/// Arguments for `edgeroute inspect`.
#[derive(Debug, Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub routing: RoutingArgs,

    /// Show which rule serves this request path.
    #[arg(long = "path", value_name = "PATH", help = "Show the rule serving PATH")]
    pub path: Option<String>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: InspectFormat,
}

/// Output format for the `inspect` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InspectFormat {
    /// Human-readable table.
    Table,
    /// `pattern -> target` per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `edgeroute init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `edgeroute completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `edgeroute config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `routing.tie_break`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Supported deployment platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum PlatformArg {
    Vercel,
    Netlify,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Vercel => Platform::Vercel,
            PlatformArg::Netlify => Platform::Netlify,
        }
    }
}

/// Tie-break policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TieBreakArg {
    /// Keep the order the manifest lists them in.
    #[value(alias = "manifest")]
    ManifestOrder,
    /// Sort by pattern text.
    Lexicographic,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::ManifestOrder => TieBreak::ManifestOrder,
            TieBreakArg::Lexicographic => TieBreak::Lexicographic,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
