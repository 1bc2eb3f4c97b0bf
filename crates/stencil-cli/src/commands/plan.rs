//! Implementation of the `stencil plan` command.
//!
//! Resolves and parses every template without writing anything, then prints
//! where each one would land.

use std::path::{Path, PathBuf};

use serde::Serialize;
use stencil_core::{
    application::GenerationPlan,
    domain::{Origin, ResolvedDocument, ResolvedTemplate},
};
use tracing::instrument;

use crate::{
    cli::{OutputFormat, PlanArgs, PlanFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `stencil plan` command.
#[instrument(skip_all, fields(project = %args.source.project.display()))]
pub fn execute(args: PlanArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let (_, plan) = super::plan_project(&args.source, config.generate.out_dir.clone(), &config)?;

    let format = if output.format() == OutputFormat::Json {
        PlanFormat::Json
    } else {
        args.format
    };

    match format {
        PlanFormat::Table => print_table(&plan, &output)?,
        PlanFormat::List => {
            for template in plan.templates() {
                output.print(&template.destination.path().display().to_string())?;
            }
        }
        PlanFormat::Json => output.json(&PlanView::from(&plan))?,
    }
    Ok(())
}

/// Human-readable plan, grouped by scope.  Also used by `generate --dry-run`.
pub fn print_table(plan: &GenerationPlan, output: &OutputManager) -> CliResult<()> {
    let dist = &plan.project.dist_path;
    output.header(&format!(
        "{} → {} ({} files)",
        plan.project.name,
        dist.display(),
        plan.file_count()
    ))?;

    output.print("")?;
    output.print("project")?;
    for template in &plan.project_templates {
        output.detail(&row(template, dist))?;
    }

    for document in &plan.documents {
        output.print("")?;
        output.print(&format!("{:02} {}", document.position, document.document))?;
        for template in document.iter() {
            output.detail(&row(template, dist))?;
        }
    }
    Ok(())
}

fn row(template: &ResolvedTemplate, dist: &Path) -> String {
    let path = template.destination.path();
    let shown = path.strip_prefix(dist).unwrap_or(&path);
    format!(
        "{:<40} {:<12} {}",
        template.name,
        origin_label(template.origin),
        shown.display()
    )
}

fn origin_label(origin: Origin) -> &'static str {
    match origin {
        Origin::Explicit => "explicit",
        Origin::Default => "default",
        Origin::Override => "override",
        Origin::Standalone => "standalone",
        Origin::Project => "project",
        Origin::SourceTree => "source-tree",
    }
}

/// JSON shape of a plan.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanView<'a> {
    project: &'a str,
    dist_path: &'a Path,
    file_count: usize,
    project_templates: &'a [ResolvedTemplate],
    documents: &'a [ResolvedDocument],
    files: Vec<PathBuf>,
}

impl<'a> From<&'a GenerationPlan> for PlanView<'a> {
    fn from(plan: &'a GenerationPlan) -> Self {
        Self {
            project: &plan.project.name,
            dist_path: &plan.project.dist_path,
            file_count: plan.file_count(),
            project_templates: &plan.project_templates,
            documents: &plan.documents,
            files: plan.templates().map(|t| t.destination.path()).collect(),
        }
    }
}
