//! Shared template catalog discovery.
//!
//! The catalog is searched in this priority order, stopping at the first
//! directory that holds a complete catalog:
//!
//! 1. an explicit directory (`--templates` or configuration);
//! 2. **`$STENCIL_TEMPLATES_DIR`**;
//! 3. **`./templates`** relative to the current working directory;
//! 4. **`<executable-dir>/templates`**;
//! 5. **`../templates`**, convenient when running from `target/debug/`.
//!
//! A directory counts as a catalog when every shared source exists in it.

use std::path::{Path, PathBuf};

use stencil_core::domain::catalog;
use tracing::{debug, info, instrument, warn};

/// Environment variable overriding the catalog location.
pub const TEMPLATES_DIR_ENV: &str = "STENCIL_TEMPLATES_DIR";

/// Find the template catalog, preferring `explicit` when given.
///
/// Returns `None` when no candidate holds a complete catalog.
#[instrument(skip_all)]
pub fn discover(explicit: Option<&Path>) -> Option<PathBuf> {
    for candidate in candidate_paths(explicit) {
        debug!(path = %candidate.display(), "checking candidate templates path");
        let missing = missing_sources(&candidate);
        if missing.is_empty() {
            info!(path = %candidate.display(), "template catalog found");
            return Some(candidate);
        }
        debug!(
            path = %candidate.display(),
            missing = missing.len(),
            "incomplete catalog, trying next"
        );
    }

    warn!(
        "no template catalog found; checked --templates, ${TEMPLATES_DIR_ENV}, \
         ./templates, <exe>/templates, and ../templates"
    );
    None
}

/// Shared sources absent from `dir`, as catalog-relative paths.
pub fn missing_sources(dir: &Path) -> Vec<&'static str> {
    catalog::SHARED
        .iter()
        .map(|entry| entry.source)
        .filter(|source| !dir.join(source).is_file())
        .collect()
}

fn candidate_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(5);

    if let Some(dir) = explicit {
        paths.push(dir.to_path_buf());
    }

    if let Ok(env_dir) = std::env::var(TEMPLATES_DIR_ENV) {
        let p = PathBuf::from(env_dir);
        debug!(path = %p.display(), "candidate from ${}", TEMPLATES_DIR_ENV);
        paths.push(p);
    }

    paths.push(PathBuf::from("templates"));

    if let Some(exe_sibling) = exe_sibling_templates() {
        paths.push(exe_sibling);
    }

    paths.push(PathBuf::from("../templates"));

    paths
}

/// `<directory of current executable>/templates`, when it can be determined.
fn exe_sibling_templates() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("templates")))
}
