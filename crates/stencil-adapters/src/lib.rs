//! Infrastructure adapters for Stencil.
//!
//! This crate implements the ports defined in `stencil-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod project_loader;
pub mod registry;
pub mod templates_dir;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use project_loader::{LoadedProject, ProjectLoadError, load_project};
pub use registry::MiniJinjaRegistry;
