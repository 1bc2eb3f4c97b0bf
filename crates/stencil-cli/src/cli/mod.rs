//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stencil",
    bin_name = "stencil",
    version  = env!("CARGO_PKG_VERSION"),
    about    = "CRUD scaffolding from document definitions",
    long_about = "Stencil resolves the template set of every document in a project \
                  definition and renders UI components, SQL model files and \
                  project infrastructure into the output tree.",
    after_help = "EXAMPLES:\n\
        \x20 stencil generate demos/tracker/stencil.toml\n\
        \x20 stencil generate stencil.toml --out ./build --yes\n\
        \x20 stencil plan stencil.toml --format json\n\
        \x20 stencil completions bash > /usr/share/bash-completion/completions/stencil",
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
    /// Render every template of a project definition.
    #[command(
        visible_alias = "gen",
        about = "Generate the project output tree",
        after_help = "EXAMPLES:\n\
            \x20 stencil generate stencil.toml\n\
            \x20 stencil generate stencil.toml --templates ./templates --out ./dist\n\
            \x20 stencil generate stencil.toml --dry-run"
    )]
    Generate(GenerateArgs),

    /// Show what `generate` would write.
    #[command(
        about = "Show the resolved template plan",
        after_help = "EXAMPLES:\n\
            \x20 stencil plan stencil.toml\n\
            \x20 stencil plan stencil.toml --format json"
    )]
    Plan(PlanArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stencil completions bash > ~/.local/share/bash-completion/completions/stencil\n\
            \x20 stencil completions zsh  > ~/.zfunc/_stencil\n\
            \x20 stencil completions fish > ~/.config/fish/completions/stencil.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Stencil configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stencil config get templates.dir\n\
            \x20 stencil config list\n\
            \x20 stencil config path"
    )]
    Config(ConfigCommands),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// Where the project definition and the template catalog live.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Project definition file (`.toml` or `.json`).
    #[arg(value_name = "PROJECT", help = "Project definition file")]
    pub project: PathBuf,

    /// Shared template catalog directory.
    #[arg(
        short = 't',
        long = "templates",
        value_name = "DIR",
        help = "Template catalog directory (default: discovered)"
    )]
    pub templates: Option<PathBuf>,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `stencil generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Override the definition's `distPath`.
    #[arg(
        short = 'o',
        long = "out",
        value_name = "DIR",
        help = "Output directory (overrides distPath)"
    )]
    pub out: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation and write immediately")]
    pub yes: bool,

    /// Resolve and parse everything but write nothing.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,
}

// ── plan ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil plan`.
#[derive(Debug, Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: PlanFormat,
}

/// Output format for the `plan` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlanFormat {
    /// Grouped, human-readable listing.
    Table,
    /// One destination path per line.
    List,
    /// JSON document.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stencil completions`.
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

/// Subcommands for `stencil config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `templates.dir`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
