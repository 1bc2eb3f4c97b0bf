//! Application ports (traits) for external dependencies.
//!
//! Adapters in `stencil-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: source reads and output writes
//!   - `TemplateRegistry`: template parsing and rendering

pub mod output;

pub use output::{Filesystem, TemplateRegistry};

#[cfg(test)]
pub use output::{MockFilesystem, MockTemplateRegistry};
