//! Implementation of the `stencil generate` command.
//!
//! Responsibility: translate CLI arguments into a generation plan, confirm,
//! render, and display results. No resolution logic lives here.

use std::io::IsTerminal as _;

use tracing::{debug, info, instrument};

use crate::{
    cli::{GenerateArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `stencil generate` command.
///
/// Dispatch sequence:
/// 1. Load the definition and resolve the plan (nothing written yet)
/// 2. Early-exit with the plan if `--dry-run`
/// 3. Confirm with the user unless `--yes`, `--quiet` or configuration
///    says otherwise
/// 4. Render every template, ticking a progress bar per file
#[instrument(skip_all, fields(project = %args.source.project.display()))]
pub fn execute(
    args: GenerateArgs,
    global: &GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let dist = args.out.clone().or_else(|| config.generate.out_dir.clone());
    let (service, plan) = super::plan_project(&args.source, dist, &config)?;
    let dist = plan.project.dist_path.clone();

    debug!(
        files = plan.file_count(),
        documents = plan.documents.len(),
        dist = %dist.display(),
        "Plan resolved"
    );

    if args.dry_run {
        super::plan::print_table(&plan, &output)?;
        output.info(&format!(
            "Dry run: {} files would be written",
            plan.file_count()
        ))?;
        return Ok(());
    }

    if dist.is_dir() {
        output.warning(&format!(
            "Existing files under {} will be overwritten",
            dist.display()
        ))?;
    }

    if needs_confirmation(&args, global, &config) {
        output.header(&format!(
            "{} files will be written into {}",
            plan.file_count(),
            dist.display()
        ))?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    info!(project = %plan.project.name, dist = %dist.display(), "Generation started");
    let progress = output.progress(plan.file_count() as u64);
    progress.set_message("Rendering");

    let report = service.render_plan(&plan, |path| {
        let shown = path.strip_prefix(&dist).unwrap_or(path);
        progress.set_message(shown.display().to_string());
        progress.inc(1);
    });
    progress.finish_and_clear();
    let report = report?;

    output.success(&format!(
        "Generated {} files into {}",
        report.files.len(),
        dist.display()
    ))?;
    if global.verbose > 0 {
        for file in &report.files {
            let shown = file.strip_prefix(&dist).unwrap_or(file);
            output.detail(&shown.display().to_string())?;
        }
    }
    Ok(())
}

fn needs_confirmation(args: &GenerateArgs, global: &GlobalArgs, config: &AppConfig) -> bool {
    if args.yes || global.quiet || !config.generate.confirm {
        return false;
    }
    // Scripts and pipes cannot answer a prompt.
    if !std::io::stdin().is_terminal() {
        debug!("stdin is not a terminal, skipping confirmation");
        return false;
    }
    true
}

#[cfg(feature = "interactive")]
fn confirm() -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt("Continue?")
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm() -> CliResult<bool> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}
