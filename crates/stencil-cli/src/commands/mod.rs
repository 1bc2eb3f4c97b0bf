//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments into core calls and print results. The
//! project and catalog lookup shared by `generate` and `plan` lives here.

pub mod completions;
pub mod config;
pub mod generate;
pub mod plan;

use std::path::{Path, PathBuf};

use stencil_adapters::{
    LoadedProject, LocalFilesystem, MiniJinjaRegistry, load_project, templates_dir,
};
use stencil_core::application::{GenerateService, GenerationPlan, SourceRoots};
use tracing::debug;

use crate::{
    cli::SourceArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Pick the template catalog: `--templates`, then `templates.dir` from the
/// configuration, then discovery.
///
/// An explicitly requested directory must be complete; discovery silently
/// skips incomplete candidates.
pub(crate) fn resolve_templates(flag: Option<&Path>, config: &AppConfig) -> CliResult<PathBuf> {
    if let Some(dir) = flag.or(config.templates.dir.as_deref()) {
        let missing = templates_dir::missing_sources(dir);
        if !missing.is_empty() {
            return Err(CliError::TemplatesNotFound {
                requested: Some(dir.to_path_buf()),
                missing,
            });
        }
        return Ok(dir.to_path_buf());
    }

    templates_dir::discover(None).ok_or(CliError::TemplatesNotFound {
        requested: None,
        missing: Vec::new(),
    })
}

/// Load the definition and resolve its full template plan.
///
/// `dist` replaces the definition's `distPath` when given.
pub(crate) fn plan_project(
    source: &SourceArgs,
    dist: Option<PathBuf>,
    config: &AppConfig,
) -> CliResult<(GenerateService, GenerationPlan)> {
    let LoadedProject { mut project, root } = load_project(&source.project)?;
    let templates = resolve_templates(source.templates.as_deref(), config)?;

    if let Some(dist) = dist {
        if dist.is_file() {
            return Err(CliError::InvalidInput {
                message: format!("output path {} is a file", dist.display()),
            });
        }
        debug!(dist = %dist.display(), "output directory overridden");
        project.dist_path = dist;
    }

    let mut service = GenerateService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(MiniJinjaRegistry::new()),
    );
    let plan = service.plan(project, &SourceRoots::new(templates, root))?;
    Ok((service, plan))
}
