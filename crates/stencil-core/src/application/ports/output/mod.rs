//! Driven (output) ports - implemented by infrastructure.
//!
//! The `stencil-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{RenderModel, Syntax, TemplateKey};
use crate::error::StencilResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stencil_adapters::filesystem::LocalFilesystem` (production)
/// - `stencil_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StencilResult<()>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> StencilResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> StencilResult<String>;

    /// Every regular file below `root`, sorted, as paths relative to `root`.
    ///
    /// A missing `root` yields an empty list.
    fn list_files(&self, root: &Path) -> StencilResult<Vec<PathBuf>>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for template parsing and rendering.
///
/// Implemented by:
/// - `stencil_adapters::registry::MiniJinjaRegistry`
///
/// Registration happens before rendering starts; `render` takes `&self` so a
/// filled registry can be shared read-only.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRegistry: Send + Sync {
    /// Parse `source` with `syntax` and store it under `key`.
    ///
    /// A parse failure is an `ApplicationError::TemplateParse` naming the key.
    fn register(&mut self, key: TemplateKey, syntax: &Syntax, source: String)
    -> StencilResult<()>;

    /// Whether `key` has been registered.
    fn contains(&self, key: &TemplateKey) -> bool;

    /// Render the template under `key` against `model`.
    fn render(&self, key: &TemplateKey, model: &RenderModel) -> StencilResult<String>;
}
