//! Project definition loader.
//!
//! Reads a project definition from a TOML or JSON file and turns it into a
//! domain [`Project`]. Document templates referenced by the definition are
//! resolved relative to the directory holding the file.
//!
//! # Layout
//!
//! ```text
//! tracker/
//! ├── stencil.toml          ← project definition
//! ├── documents/            ← optional, one document per file
//! │   └── deal.toml
//! └── task/
//!     └── tmpl/
//!         └── webClient_comp_card.vue
//! ```
//!
//! # Definition format
//!
//! ```toml
//! name     = "tracker"
//! distPath = "out"            # relative to this file
//! documentsDir = "documents"  # optional
//!
//! [config]
//! appName = "Tracker"
//! webPort = 8080
//!
//! [[documents]]
//! name  = "task"
//! label = "Task"
//! flags = { uiDefaults = true, storageDefaults = true }
//!
//! [[documents.fields]]
//! name = "title"
//! label = "Title"
//! type = "string"
//! storage = { required = true, size = 150 }
//!
//! [[documents.tabCounters]]
//! tab      = "files"
//! pgMethod = "file_list"
//! pgParams = "{doc_id: this.id}"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use stencil_core::{
    domain::{Document, Project},
    error::StencilError,
};
use thiserror::Error;
use tracing::{debug, instrument};
use walkdir::WalkDir;

/// Failure to read or parse a project definition.
#[derive(Debug, Error)]
pub enum ProjectLoadError {
    #[error("project definition not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse '{}': {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("unsupported definition format '{}': expected .toml or .json", .path.display())]
    UnsupportedFormat { path: PathBuf },
}

impl From<ProjectLoadError> for StencilError {
    fn from(e: ProjectLoadError) -> Self {
        StencilError::Configuration {
            message: e.to_string(),
        }
    }
}

// ── Definition types ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectManifest {
    #[serde(default)]
    documents: Vec<DocumentEntry>,
    /// Directory of additional single-document files.
    documents_dir: Option<PathBuf>,
    #[serde(flatten)]
    project: Project,
}

/// A document plus the conveniences only available through builders.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentEntry {
    #[serde(default)]
    tab_counters: Vec<TabCounterEntry>,
    #[serde(flatten)]
    document: Document,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TabCounterEntry {
    tab: String,
    pg_method: String,
    #[serde(default)]
    pg_params: String,
}

impl DocumentEntry {
    fn into_document(self) -> Document {
        self.tab_counters
            .into_iter()
            .fold(self.document, |doc, counter| {
                doc.with_tab_counter(&counter.tab, &counter.pg_method, &counter.pg_params)
            })
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// A parsed project and the directory its definition lives in.
#[derive(Debug, Clone)]
pub struct LoadedProject {
    pub project: Project,
    /// Base directory for relative document template sources.
    pub root: PathBuf,
}

/// Load a project definition file.
///
/// A relative `distPath` is resolved against the definition's directory; an
/// empty one defaults to `<dir>/dist`. Documents found under `documentsDir`
/// are appended after the inline ones, in file name order.
///
/// # Errors
///
/// Missing or unreadable files, unknown extensions and parse failures.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_project(path: &Path) -> Result<LoadedProject, ProjectLoadError> {
    if !path.is_file() {
        return Err(ProjectLoadError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let root = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let manifest: ProjectManifest = parse_file(path)?;
    let mut project = manifest.project;
    project.documents = manifest
        .documents
        .into_iter()
        .map(DocumentEntry::into_document)
        .collect();

    if let Some(dir) = manifest.documents_dir {
        project.documents.extend(load_documents_dir(&root.join(dir))?);
    }

    if project.dist_path.as_os_str().is_empty() {
        project.dist_path = root.join("dist");
    } else if project.dist_path.is_relative() {
        project.dist_path = root.join(&project.dist_path);
    }

    debug!(
        project = %project.name,
        documents = project.documents.len(),
        "project definition loaded"
    );
    Ok(LoadedProject { project, root })
}

fn load_documents_dir(dir: &Path) -> Result<Vec<Document>, ProjectLoadError> {
    let mut documents = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| ProjectLoadError::Read {
            path: dir.to_path_buf(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() || format_of(entry.path()).is_none() {
            continue;
        }
        let doc: DocumentEntry = parse_file(entry.path())?;
        debug!(document = %doc.document.name, file = %entry.path().display(), "document loaded");
        documents.push(doc.into_document());
    }
    Ok(documents)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
}

fn format_of(path: &Path) -> Option<Format> {
    match path.extension()?.to_str()? {
        "toml" => Some(Format::Toml),
        "json" => Some(Format::Json),
        _ => None,
    }
}

fn parse_file<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ProjectLoadError> {
    let format = format_of(path).ok_or_else(|| ProjectLoadError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let raw = fs::read_to_string(path).map_err(|source| ProjectLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = match format {
        Format::Toml => toml::from_str(&raw).map_err(|e| e.to_string()),
        Format::Json => serde_json::from_str(&raw).map_err(|e| e.to_string()),
    };
    parsed.map_err(|reason| ProjectLoadError::Parse {
        path: path.to_path_buf(),
        reason,
    })
}
