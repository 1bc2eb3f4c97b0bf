//! Core domain layer for Stencil.
//!
//! Pure logic: the field model and its projections, the project/document
//! model with its fill-in passes, the template catalog and destination rules.
//! All I/O and template parsing happen behind ports in the application layer.
//!
//! - **No I/O**: nothing here touches the filesystem
//! - **Value semantics**: fields and documents are `Clone + PartialEq`
//! - **Fatal definition errors**: every [`DomainError`] means the project
//!   definition must change

pub mod error;
pub mod field;
pub mod project;
pub mod template;

pub use error::{DomainError, ErrorCategory};
pub use field::{
    Composition, Field, FieldOwner, FieldType, JsonListSpec, SelectOption, StorageProjection,
    UiComposer, UiProjection, UiType, projector, shortcuts,
};
pub use project::{
    Document, DocumentFlags, DocumentUi, I18n, MenuEntry, Mixin, Project, ProjectConfig, Tab,
    TemplateBinding, TemplateOverride,
};
pub use template::{
    Destination, Origin, RenderModel, ResolvedDocument, ResolvedTemplate, Syntax, TemplateKey,
    catalog,
};
