// ============================================================================
// domain/error.rs - FIELD, PROJECT AND RESOLUTION RULE VIOLATIONS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Every variant describes a defect in the project definition itself. None of
/// them can be fixed by retrying; the definition has to change.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error(
        "document '{document}' field '{field}': row/col layout needs at least two numbers, got {given:?}"
    )]
    InvalidRowCol {
        document: String,
        field: String,
        given: Vec<u32>,
    },

    #[error("field '{field}': crop must look like '300x400', got '{crop}' ({reason})")]
    InvalidCrop {
        field: String,
        crop: String,
        reason: String,
    },

    #[error("document name '{name}' is declared more than once")]
    DuplicateDocument { name: String },

    #[error("field '{field}' has ui type 'vueComposition' but no composer attached")]
    MissingComposer { field: String },

    #[error("field '{field}' is not attached to a document")]
    DetachedField { field: String },

    #[error("field '{field}': failed to serialize {what}: {reason}")]
    Serialization {
        field: String,
        what: &'static str,
        reason: String,
    },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("menu entry refers to document '{document}' which does not exist")]
    MenuTargetNotFound { document: String },

    #[error("document '{name}' not found")]
    DocumentNotFound { name: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidRowCol { .. } => vec![
                "Pass the row and column: set_row_col(&[row, col])".into(),
                "An optional third number replaces the col-* width class".into(),
            ],
            Self::InvalidCrop { .. } => vec![
                "Use '<width>x<height>' with integer values, e.g. '300x400'".into(),
            ],
            Self::DuplicateDocument { name } => vec![
                format!("Rename one of the documents called '{}'", name),
                "Document names are used as lookup keys for references and menus".into(),
            ],
            Self::MissingComposer { field } => vec![
                format!("Attach a composer to '{}' or change its ui type", field),
            ],
            Self::MenuTargetNotFound { document } => vec![
                format!("Declare a document named '{}'", document),
                "Or remove the `document` key from the menu entry".into(),
            ],
            Self::DocumentNotFound { name } => vec![format!("Check the spelling of '{}'", name)],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidRowCol { .. }
            | Self::InvalidCrop { .. }
            | Self::DuplicateDocument { .. } => ErrorCategory::Validation,
            Self::MissingComposer { .. } | Self::DetachedField { .. } => {
                ErrorCategory::Configuration
            }
            Self::MenuTargetNotFound { .. } | Self::DocumentNotFound { .. } => {
                ErrorCategory::NotFound
            }
            Self::Serialization { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    NotFound,
    Internal,
}
