//! Generate Service - main application orchestrator.
//!
//! This service coordinates the whole generation run:
//! 1. Prepare the project (fill-in passes)
//! 2. Parse the shared catalog
//! 3. Resolve project-scope and document templates
//! 4. Render every resolved template to its destination
//!
//! Output files are overwritten. There is no rollback: a failed run is
//! recovered by running it again.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRegistry},
    },
    domain::{Project, RenderModel, ResolvedDocument, ResolvedTemplate, TemplateKey},
    error::StencilResult,
};

use super::resolver::{DocumentTemplateResolver, SourceRoots};

/// Everything a run would write, computed without touching the output tree.
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub project: Arc<Project>,
    /// Infrastructure and source-tree templates, rendered once.
    pub project_templates: Vec<ResolvedTemplate>,
    /// One entry per document, in definition order.
    pub documents: Vec<ResolvedDocument>,
}

impl GenerationPlan {
    /// Number of files the plan renders.
    pub fn file_count(&self) -> usize {
        self.project_templates.len()
            + self
                .documents
                .iter()
                .map(|d| d.templates.len() + d.standalone.len())
                .sum::<usize>()
    }

    /// Every template in render order.
    pub fn templates(&self) -> impl Iterator<Item = &ResolvedTemplate> {
        self.project_templates
            .iter()
            .chain(self.documents.iter().flat_map(ResolvedDocument::iter))
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Written files, in render order.
    pub files: Vec<PathBuf>,
}

/// Main generation service.
pub struct GenerateService {
    filesystem: Box<dyn Filesystem>,
    registry: Box<dyn TemplateRegistry>,
}

impl GenerateService {
    pub fn new(filesystem: Box<dyn Filesystem>, registry: Box<dyn TemplateRegistry>) -> Self {
        Self {
            filesystem,
            registry,
        }
    }

    /// Prepare `project` and resolve every template it will render.
    ///
    /// Parses templates into the registry but writes nothing.
    #[instrument(skip_all, fields(project = %project.name))]
    pub fn plan(&mut self, mut project: Project, roots: &SourceRoots) -> StencilResult<GenerationPlan> {
        project.prepare()?;

        let resolver = DocumentTemplateResolver::new(self.filesystem.as_ref(), roots);
        resolver.load_shared(self.registry.as_mut())?;
        let project_templates = resolver.resolve_project(self.registry.as_mut(), &project)?;
        let documents = resolver.resolve_all(self.registry.as_mut(), &project)?;

        let plan = GenerationPlan {
            project: Arc::new(project),
            project_templates,
            documents,
        };
        info!(files = plan.file_count(), "Generation planned");
        Ok(plan)
    }

    /// Plan and render `project` in one go.
    #[instrument(skip_all, fields(project = %project.name, dist = %project.dist_path.display()))]
    pub fn generate(&mut self, project: Project, roots: &SourceRoots) -> StencilResult<GenerationReport> {
        let plan = self.plan(project, roots)?;
        self.render_plan(&plan, |_| {})
    }

    /// Render a plan, calling `on_file` after each written file.
    pub fn render_plan(
        &self,
        plan: &GenerationPlan,
        mut on_file: impl FnMut(&Path),
    ) -> StencilResult<GenerationReport> {
        let mut report = GenerationReport::default();

        for template in &plan.project_templates {
            let model = RenderModel::for_project(plan.project.clone());
            let path = self.render_to_file(
                Some(&template.key),
                &model,
                &template.destination.dir,
                &template.destination.file,
            )?;
            on_file(&path);
            report.files.push(path);
        }

        for document in &plan.documents {
            debug!(document = %document.document, "rendering document");
            for template in document.iter() {
                let model = RenderModel::for_document(
                    plan.project.clone(),
                    document.position,
                    template.helpers.clone(),
                );
                let path = self.render_to_file(
                    Some(&template.key),
                    &model,
                    &template.destination.dir,
                    &template.destination.file,
                )?;
                on_file(&path);
                report.files.push(path);
            }
        }

        info!(files = report.files.len(), "Generation completed successfully");
        Ok(report)
    }

    /// Render one template into `dir/file`, creating `dir` and overwriting
    /// any existing file.
    ///
    /// # Errors
    ///
    /// A missing template is fatal, as are render and write failures.
    pub fn render_to_file(
        &self,
        template: Option<&TemplateKey>,
        model: &RenderModel,
        dir: &Path,
        file: &str,
    ) -> StencilResult<PathBuf> {
        let path = dir.join(file);
        let Some(key) = template else {
            return Err(ApplicationError::TemplateNotRegistered { path }.into());
        };

        self.filesystem.create_dir_all(dir)?;
        let content = self.registry.render(key, model)?;
        self.filesystem.write_file(&path, &content)?;
        debug!(template = %key, path = %path.display(), "file written");
        Ok(path)
    }
}
