//! Application layer for Stencil.
//!
//! This layer contains:
//! - **Services**: the document template resolver and the generation service
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! Resolution rules live in `crate::domain`; this layer feeds them sources
//! through the ports and drives rendering.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    DocumentTemplateResolver, GenerateService, GenerationPlan, GenerationReport, SourceRoots,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, TemplateRegistry};

pub use error::ApplicationError;
