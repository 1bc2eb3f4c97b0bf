//! Application layer errors.
//!
//! These errors represent failures while loading, resolving and rendering
//! templates. Definition errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A template source does not parse.
    #[error("{template} parse template error: {reason}")]
    TemplateParse { template: String, reason: String },

    /// A template source file is missing.
    #[error("missing template source for {template}{}: {}", document_suffix(.document), .path.display())]
    MissingTemplateSource {
        document: Option<String>,
        template: String,
        path: PathBuf,
    },

    /// A template reached rendering without having been resolved.
    #[error("template is not registered for path '{}'", .path.display())]
    TemplateNotRegistered { path: PathBuf },

    /// Template rendering failed.
    #[error("rendering {template} failed: {reason}")]
    RenderingFailed { template: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Shared state lock poisoned.
    #[error("Template registry lock poisoned")]
    LockPoisoned,
}

fn document_suffix(document: &Option<String>) -> String {
    document
        .as_ref()
        .map(|d| format!(" (document '{d}')"))
        .unwrap_or_default()
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateParse { template, .. } => vec![
                format!("Fix the syntax of {}", template),
                "Document templates use [[ ]] and [% %]; infrastructure templates use {{ }} and {% %}".into(),
            ],
            Self::MissingTemplateSource { path, .. } => vec![
                format!("Create {}", path.display()),
                "Or point --templates / STENCIL_TEMPLATES_DIR at a complete template directory".into(),
            ],
            Self::TemplateNotRegistered { .. } => vec![
                "A template reached rendering without being resolved".into(),
                "This is likely a bug, please report it".into(),
            ],
            Self::RenderingFailed { .. } => vec![
                "Check the helper names and variables used by the template".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Re-run the generation; output is regenerated from scratch".into(),
            ],
            Self::LockPoisoned => vec!["Try again".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateParse { .. } | Self::RenderingFailed { .. } => {
                ErrorCategory::Configuration
            }
            Self::MissingTemplateSource { .. } => ErrorCategory::NotFound,
            Self::TemplateNotRegistered { .. } | Self::LockPoisoned => ErrorCategory::Internal,
            Self::FilesystemError { .. } => ErrorCategory::Io,
        }
    }
}
