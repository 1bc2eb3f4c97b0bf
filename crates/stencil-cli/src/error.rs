//! Error handling for the Stencil CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use stencil_adapters::ProjectLoadError;
use stencil_core::error::{ErrorCategory as CoreCategory, StencilError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The project definition could not be loaded.
    #[error(transparent)]
    Project(#[from] ProjectLoadError),

    /// No complete template catalog was found.
    #[error("Template catalog not found")]
    TemplatesNotFound {
        /// Explicitly requested directory, if any.
        requested: Option<PathBuf>,
        /// Shared sources missing from `requested`.
        missing: Vec<&'static str>,
    },

    /// A configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from `stencil-core`.
    #[error("Generation failed: {0}")]
    Core(#[from] StencilError),

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Operation cancelled by user.
    #[error("Operation cancelled")]
    Cancelled,

    /// Feature not available (e.g., interactive mode without feature flag).
    #[error("Feature not available: {feature}")]
    FeatureNotAvailable { feature: &'static str },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message } => vec![
                format!("Check your input: {}", message),
                "Use --help for usage information".into(),
            ],

            Self::Project(ProjectLoadError::NotFound { path }) => vec![
                format!("No file at {}", path.display()),
                "Pass the path of a stencil.toml or .json project definition".into(),
            ],
            Self::Project(ProjectLoadError::UnsupportedFormat { .. }) => {
                vec!["Rename the definition to .toml or .json".into()]
            }
            Self::Project(_) => vec![
                "Check the project definition syntax".into(),
                "Field names are camelCase, e.g. distPath, uiDefaults".into(),
            ],

            Self::TemplatesNotFound { requested, missing } => {
                let mut suggestions = Vec::new();
                if let Some(dir) = requested {
                    suggestions.push(format!("{} is not a complete catalog", dir.display()));
                    for source in missing.iter().take(5) {
                        suggestions.push(format!("  • missing {source}"));
                    }
                    if missing.len() > 5 {
                        suggestions.push(format!("  • ...and {} more", missing.len() - 5));
                    }
                }
                suggestions.push("Pass --templates <DIR>".into());
                suggestions.push("Or set STENCIL_TEMPLATES_DIR".into());
                suggestions.push("Or set templates.dir in the config file".into());
                suggestions
            }

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                "Run 'stencil config path' to locate the config file".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Check available disk space".into(),
            ],

            Self::Cancelled => vec![
                "Operation was cancelled".into(),
                "No files were written".into(),
            ],

            Self::FeatureNotAvailable { feature } => vec![
                format!("The '{}' feature is not available in this build", feature),
                "Pass --yes to skip the prompt, or rebuild with --features interactive".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::Project(ProjectLoadError::NotFound { .. }) => ErrorCategory::NotFound,
            Self::Project(ProjectLoadError::Read { .. }) => ErrorCategory::Internal,
            Self::Project(_) => ErrorCategory::UserError,
            Self::TemplatesNotFound { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Io | CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::Cancelled => ErrorCategory::UserError,
            Self::FeatureNotAvailable { .. } => ErrorCategory::Configuration,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for a terminal, with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        self.render(verbose, true)
    }

    /// Same report as [`Self::format_colored`], without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        self.render(verbose, false)
    }

    fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: String, style: fn(&str) -> String| {
            if color { style(&text) } else { text }
        };
        let mut out = String::new();

        out.push_str(&format!(
            "\n{}\n  {}\n",
            paint("\u{2717} Error:".into(), |t| t.red().bold().to_string()),
            paint(self.to_string(), |t| t.red().to_string()),
        ));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                out.push_str(&format!(
                    "  {}\n",
                    paint(format!("Caused by: {err}"), |t| t.dimmed().to_string())
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str(&format!(
                "\n{}\n",
                paint("Suggestions:".into(), |t| t.yellow().bold().to_string())
            ));
            for suggestion in suggestions {
                out.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            out.push_str(&format!(
                "\n{}\n",
                paint("Use -v / --verbose for more details.".into(), |t| {
                    t.dimmed().to_string()
                })
            ));
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (invalid definition, bad arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}
