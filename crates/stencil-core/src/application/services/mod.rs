//! Application services - orchestrate use cases.
//!
//! - [`DocumentTemplateResolver`]: per-document template sets
//! - [`GenerateService`]: plan and render a whole project

pub mod generate_service;
pub mod resolver;

pub use generate_service::{GenerateService, GenerationPlan, GenerationReport};
pub use resolver::{DocumentTemplateResolver, SourceRoots};
