//! Stencil Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers of the Stencil CRUD
//! scaffolding generator: it turns a declarative project definition into a
//! rendered tree of UI components, SQL functions and deployment files.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           stencil-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (GenerateService, DocumentTemplate-     │
//! │  Resolver)                              │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │    (Filesystem, TemplateRegistry)       │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     stencil-adapters (Infrastructure)   │
//! │ (LocalFilesystem, MiniJinjaRegistry)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Field, Document, Project, catalog,     │
//! │  destinations)                          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stencil_core::{
//!     application::{GenerateService, SourceRoots},
//!     domain::{Document, DocumentFlags, Project, shortcuts},
//! };
//!
//! let project = Project::new("tracker", "./out").with_document(
//!     Document::new("task", "Task")
//!         .with_fields(vec![shortcuts::title()])
//!         .with_flags(DocumentFlags { storage_defaults: true, ..Default::default() }),
//! );
//!
//! let mut service = GenerateService::new(filesystem, registry);
//! service.generate(project, &SourceRoots::new("./templates", ".")).unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        DocumentTemplateResolver, GenerateService, GenerationPlan, GenerationReport, SourceRoots,
        ports::{Filesystem, TemplateRegistry},
    };
    pub use crate::domain::{
        Document, DocumentFlags, Field, FieldType, Project, RenderModel, Syntax, TemplateKey,
        UiType, shortcuts,
    };
    pub use crate::error::{StencilError, StencilResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
