//! Output location derivation.
//!
//! Destinations are a pure function of the dist root, the document (its name,
//! route override and path prefix), its ordinal position and the logical
//! template name. Regeneration relies on this being stable.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::project::Document;

/// Output directory and file name of one rendered template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Destination {
    pub dir: PathBuf,
    pub file: String,
}

impl Destination {
    pub fn new(dir: impl Into<PathBuf>, file: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file: file.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file)
    }
}

const UI_COMPONENTS: &str = "webClient/src/app/components";
const SQL_MODEL: &str = "sql/model";

/// Destination of a document-scope template.
///
/// | logical name          | directory                                         | file          |
/// |-----------------------|---------------------------------------------------|---------------|
/// | `webClient_comp_<f>`  | `<dist>/webClient/src/app/components/<p/><route>/comp`   | `<f>`  |
/// | `webClient_mixin_<f>` | `<dist>/webClient/src/app/components/<p/><route>/mixins` | `<f>`  |
/// | `webClient_<f>`       | `<dist>/webClient/src/app/components/<p/><route>`        | `<f>`  |
/// | `sql_function_<f>`    | `<dist>/sql/model/<p/><NN>_<name>/function`       | `<name>_<f>`  |
/// | `sql_<f>`             | `<dist>/sql/model/<p/><NN>_<name>`                | `<f>`         |
/// | anything else         | `<dist>/<p/><name>`                               | logical name  |
pub fn for_document(
    dist: &Path,
    document: &Document,
    position: usize,
    logical_name: &str,
) -> Destination {
    let prefixed = |root: PathBuf, segment: &str| -> PathBuf {
        let mut dir = root;
        if let Some(prefix) = document.path_prefix() {
            dir.push(prefix);
        }
        dir.push(segment);
        dir
    };
    let route_dir = || prefixed(dist.join(UI_COMPONENTS), document.route());
    let model_dir = || {
        prefixed(
            dist.join(SQL_MODEL),
            &format!("{:02}_{}", position, document.name),
        )
    };

    if let Some(file) = logical_name.strip_prefix("webClient_comp_") {
        Destination::new(route_dir().join("comp"), file)
    } else if let Some(file) = logical_name.strip_prefix("webClient_mixin_") {
        Destination::new(route_dir().join("mixins"), file)
    } else if let Some(file) = logical_name.strip_prefix("webClient_") {
        Destination::new(route_dir(), file)
    } else if let Some(file) = logical_name.strip_prefix("sql_function_") {
        Destination::new(
            model_dir().join("function"),
            format!("{}_{}", document.name, file),
        )
    } else if let Some(file) = logical_name.strip_prefix("sql_") {
        Destination::new(model_dir(), file)
    } else {
        Destination::new(prefixed(dist.to_path_buf(), &document.name), logical_name)
    }
}

/// Destination of a project-scope infrastructure template:
/// `project_<f>` renders to `<dist>/<f>`.
pub fn for_project(dist: &Path, logical_name: &str) -> Destination {
    let file = logical_name.strip_prefix("project_").unwrap_or(logical_name);
    Destination::new(dist, file)
}

/// Destination of a source-tree file: same relative path under `dist`.
pub fn for_source_file(dist: &Path, relative: &Path) -> Destination {
    let dir = relative
        .parent()
        .map_or_else(|| dist.to_path_buf(), |p| dist.join(p));
    let file = relative
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    Destination::new(dir, file)
}
