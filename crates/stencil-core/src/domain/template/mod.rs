//! Template identities, delimiter syntaxes and resolution results.
//!
//! Parsing and rendering live behind the
//! [`TemplateRegistry`](crate::application::ports::TemplateRegistry) port;
//! this module only describes *which* template goes *where*.

pub mod catalog;
pub mod destination;

use std::{collections::BTreeMap, fmt, sync::Arc};

use serde::Serialize;

pub use destination::Destination;

use crate::domain::project::{Document, Project};

// ============================================================================
// Syntax
// ============================================================================

/// Delimiters of one template group.
///
/// Infrastructure templates use the familiar `{{ }}` markers. Document
/// templates generate UI markup that itself contains `{{ }}`, so they use
/// square brackets instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Syntax {
    pub block: (String, String),
    pub variable: (String, String),
    pub comment: (String, String),
}

impl Syntax {
    pub fn new(
        block: (&str, &str),
        variable: (&str, &str),
        comment: (&str, &str),
    ) -> Self {
        Self {
            block: (block.0.into(), block.1.into()),
            variable: (variable.0.into(), variable.1.into()),
            comment: (comment.0.into(), comment.1.into()),
        }
    }

    /// `{% %}`, `{{ }}`, `{# #}`.
    pub fn infrastructure() -> Self {
        Self::new(("{%", "%}"), ("{{", "}}"), ("{#", "#}"))
    }

    /// `[% %]`, `[[ ]]`, `[# #]`.
    pub fn document() -> Self {
        Self::new(("[%", "%]"), ("[[", "]]"), ("[#", "#]"))
    }
}

// ============================================================================
// Keys and resolution results
// ============================================================================

/// Registry key of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TemplateKey {
    /// Parsed once, shared by every document.
    Shared(String),
    /// Parsed for one document only.
    Document { document: String, name: String },
}

impl TemplateKey {
    pub fn shared(name: impl Into<String>) -> Self {
        Self::Shared(name.into())
    }

    pub fn document(document: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Document {
            document: document.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shared(name) => f.write_str(name),
            Self::Document { document, name } => write!(f, "doc: {document} tmpl: {name}"),
        }
    }
}

/// Where a resolved template came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Declared on the document.
    Explicit,
    /// Default scaffold attached by the resolver.
    Default,
    /// Default scaffold whose source was overridden by the document.
    Override,
    /// Recursive child list.
    Standalone,
    /// Project-wide infrastructure template.
    Project,
    /// File from the source tree.
    SourceTree,
}

/// A template bound to its output location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTemplate {
    /// Logical template name, e.g. `sql_function_list.sql`.
    pub name: String,
    pub key: TemplateKey,
    pub destination: Destination,
    /// Zero-argument helpers visible only to this template.
    pub helpers: BTreeMap<String, String>,
    pub origin: Origin,
}

/// Final template set of one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedDocument {
    pub document: String,
    pub position: usize,
    /// Logical name to template.
    pub templates: BTreeMap<String, ResolvedTemplate>,
    /// Templates resolved outside the logical-name map.
    pub standalone: Vec<ResolvedTemplate>,
}

impl ResolvedDocument {
    pub fn new(document: impl Into<String>, position: usize) -> Self {
        Self {
            document: document.into(),
            position,
            templates: BTreeMap::new(),
            standalone: Vec::new(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Map templates in logical-name order, then standalone ones.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedTemplate> {
        self.templates.values().chain(self.standalone.iter())
    }
}

// ============================================================================
// Render model
// ============================================================================

/// Everything a template sees while rendering.
///
/// Carried explicitly into every render call; helpers reach the project
/// through it rather than through process state.
#[derive(Debug, Clone)]
pub struct RenderModel {
    pub project: Arc<Project>,
    /// Index of the current document, absent for project-scope templates.
    pub document: Option<usize>,
    pub helpers: BTreeMap<String, String>,
}

impl RenderModel {
    pub fn for_project(project: Arc<Project>) -> Self {
        Self {
            project,
            document: None,
            helpers: BTreeMap::new(),
        }
    }

    pub fn for_document(
        project: Arc<Project>,
        position: usize,
        helpers: BTreeMap<String, String>,
    ) -> Self {
        Self {
            project,
            document: Some(position),
            helpers,
        }
    }

    pub fn current_document(&self) -> Option<&Document> {
        self.document.and_then(|i| self.project.documents.get(i))
    }
}
