//! Flags accepted by every subcommand.
//!
//! Flattened into [`super::Cli`] with `global = true`, so `stencil plan p.toml -v`
//! and `stencil -v plan p.toml` mean the same thing.

use clap::{ArgAction, Args, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace).
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        long_help = "Increase logging verbosity:
    (none)  - warnings and errors
    -v      - resolution summary
    -vv     - every template and written file
    -vvv    - everything"
    )]
    pub verbose: u8,

    /// Suppress non-error output.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (also honours `NO_COLOR`).
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Configuration file (default: the platform config directory).
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How results are printed.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,
}

/// How the CLI should render its output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human when stdout is a terminal, plain otherwise.
    #[default]
    Auto,
    /// Colors and symbols.
    Human,
    /// No colors; stable for scripts and logs.
    Plain,
    /// JSON where a command supports it (`plan`).
    Json,
}
