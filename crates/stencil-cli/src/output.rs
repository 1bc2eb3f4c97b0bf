//! Terminal output: status lines, plan listings, JSON and progress.

use std::io::{self, IsTerminal};

use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Status line flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Success,
    Error,
    Warning,
    Info,
}

impl Tone {
    fn icon(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}", // ✓
            Self::Error => "\u{2717}",   // ✗
            Self::Warning => "\u{26a0}", // ⚠
            Self::Info => "\u{2139}",    // ℹ
        }
    }

    fn paint(self, text: &str) -> String {
        match self {
            Self::Success => text.green().to_string(),
            Self::Error => text.red().to_string(),
            Self::Warning => text.yellow().to_string(),
            Self::Info => text.blue().to_string(),
        }
    }
}

/// Writes user-facing output to stdout, honouring `--quiet`, `--no-color`
/// and the output format.
pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = match args.output_format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            explicit => explicit,
        };

        Self {
            format,
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color || format == OutputFormat::Plain,
            term: Term::stdout(),
        }
    }

    fn status(&self, tone: Tone, msg: &str) -> io::Result<()> {
        // Errors stay visible in quiet mode.
        if self.quiet && tone != Tone::Error {
            return Ok(());
        }
        let line = if self.no_color {
            format!("{} {msg}", tone.icon())
        } else {
            format!("{} {}", tone.paint(tone.icon()).bold(), tone.paint(msg))
        };
        self.term.write_line(&line)
    }

    /// Plain line; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Success, msg)
    }

    pub fn error(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Error, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Warning, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Info, msg)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.no_color {
            self.term.write_line(text)
        } else {
            self.term.write_line(&text.cyan().bold().to_string())
        }
    }

    /// Indented secondary line, e.g. one template under a document.
    pub fn detail(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.no_color {
            self.term.write_line(&format!("  {msg}"))
        } else {
            self.term.write_line(&format!("  {}", msg.dimmed()))
        }
    }

    /// Pretty-printed JSON.  Not suppressed in quiet mode: it is the
    /// requested result, not commentary.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    /// Progress bar over `len` files, hidden in quiet mode and when stderr
    /// is not a terminal.
    pub fn progress(&self, len: u64) -> ProgressBar {
        if self.quiet || !io::stderr().is_terminal() {
            return ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::hidden());
        }

        let template = if self.no_color {
            "{msg} [{bar:40}] {pos}/{len}"
        } else {
            "{msg:.cyan} [{bar:40.cyan/blue}] {pos}/{len}"
        };
        let bar = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::default_bar().template(template) {
            bar.set_style(style.progress_chars("=> "));
        }
        bar
    }

    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }
}
