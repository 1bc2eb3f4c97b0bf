//! Document template resolution.
//!
//! For each document, builds the final map of logical template name to
//! [`ResolvedTemplate`]:
//!
//! 1. parse every explicit template with the document syntax;
//! 2. compute the candidate defaults from the document's flags;
//! 3. attach each candidate that is not explicit (explicit always wins);
//! 4. derive destinations, letting the override table redirect them first;
//! 5. resolve the recursive child list outside the map when requested.
//!
//! Resolution is all-or-nothing: a missing source or a parse failure stops
//! the run and names the document and template.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRegistry},
    },
    domain::{
        Destination, Document, Origin, Project, ResolvedDocument, ResolvedTemplate, Syntax,
        TemplateKey,
        catalog::{self, TemplateGroup},
        template::destination,
    },
    error::StencilResult,
};

/// Directories template sources are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRoots {
    /// Shared template catalog.
    pub templates: PathBuf,
    /// Directory of the project definition; document templates live here.
    pub project: PathBuf,
}

impl SourceRoots {
    pub fn new(templates: impl Into<PathBuf>, project: impl Into<PathBuf>) -> Self {
        Self {
            templates: templates.into(),
            project: project.into(),
        }
    }
}

/// Where a relative source path is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceBase {
    /// Project root first, then the templates root.
    Project,
    /// Templates root only.
    Templates,
}

pub struct DocumentTemplateResolver<'a> {
    filesystem: &'a dyn Filesystem,
    roots: &'a SourceRoots,
}

impl<'a> DocumentTemplateResolver<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, roots: &'a SourceRoots) -> Self {
        Self { filesystem, roots }
    }

    /// Parse the shared catalog into `registry`.
    #[instrument(skip_all, fields(templates = %self.roots.templates.display()))]
    pub fn load_shared(&self, registry: &mut dyn TemplateRegistry) -> StencilResult<()> {
        for entry in catalog::SHARED {
            let source = self.load(None, entry.name, Path::new(entry.source), SourceBase::Templates)?;
            registry.register(TemplateKey::shared(entry.name), &entry.group.syntax(), source)?;
        }
        info!(count = catalog::SHARED.len(), "shared templates parsed");
        Ok(())
    }

    /// Project-scope templates: infrastructure files and the source tree.
    #[instrument(skip_all)]
    pub fn resolve_project(
        &self,
        registry: &mut dyn TemplateRegistry,
        project: &Project,
    ) -> StencilResult<Vec<ResolvedTemplate>> {
        let mut resolved: Vec<ResolvedTemplate> = catalog::infrastructure()
            .map(|entry| ResolvedTemplate {
                name: entry.name.to_string(),
                key: TemplateKey::shared(entry.name),
                destination: destination::for_project(&project.dist_path, entry.name),
                helpers: Default::default(),
                origin: Origin::Project,
            })
            .collect();

        let tree_root = self.roots.templates.join(catalog::SOURCE_TREE_DIR);
        let syntax = TemplateGroup::SourceTree.syntax();
        for relative in self.filesystem.list_files(&tree_root)? {
            let name = format!(
                "{}/{}",
                catalog::SOURCE_TREE_DIR,
                relative.to_string_lossy().replace('\\', "/")
            );
            let source = self.filesystem.read_to_string(&tree_root.join(&relative))?;
            let key = TemplateKey::shared(name.clone());
            registry.register(key.clone(), &syntax, source)?;
            resolved.push(ResolvedTemplate {
                name,
                key,
                destination: destination::for_source_file(&project.dist_path, &relative),
                helpers: Default::default(),
                origin: Origin::SourceTree,
            });
        }

        debug!(count = resolved.len(), "project templates resolved");
        Ok(resolved)
    }

    /// Resolve every document in order.
    #[instrument(skip_all, fields(documents = project.documents.len()))]
    pub fn resolve_all(
        &self,
        registry: &mut dyn TemplateRegistry,
        project: &Project,
    ) -> StencilResult<Vec<ResolvedDocument>> {
        project
            .documents
            .iter()
            .enumerate()
            .map(|(position, document)| self.resolve(registry, project, document, position))
            .collect()
    }

    /// Resolve one document's template set.
    #[instrument(skip(self, registry, project, document), fields(document = %document.name))]
    pub fn resolve(
        &self,
        registry: &mut dyn TemplateRegistry,
        project: &Project,
        document: &Document,
        position: usize,
    ) -> StencilResult<ResolvedDocument> {
        let dist = &project.dist_path;
        let mut resolved = ResolvedDocument::new(&document.name, position);

        // 1. Explicit templates
        for (name, binding) in &document.templates {
            let source = binding
                .source
                .clone()
                .unwrap_or_else(|| document.template_dir().join(name));
            let key = TemplateKey::document(&document.name, name);
            let text = self.load(Some(document.name.as_str()), name, &source, SourceBase::Project)?;
            registry.register(key.clone(), &Syntax::document(), text)?;

            let computed = destination::for_document(dist, document, position, name);
            let destination = Destination::new(
                binding.dist_path.clone().unwrap_or(computed.dir),
                binding.dist_filename.clone().unwrap_or(computed.file),
            );
            resolved.templates.insert(
                name.clone(),
                ResolvedTemplate {
                    name: name.clone(),
                    key,
                    destination,
                    helpers: binding.helpers.clone(),
                    origin: Origin::Explicit,
                },
            );
        }

        // 2-4. Defaults
        for name in catalog::candidate_defaults(&document.flags) {
            if resolved.contains(name) {
                debug!(template = name, "explicit template shadows default");
                continue;
            }
            let over = document.template_overrides.get(name);
            let mut destination = destination::for_document(dist, document, position, name);
            if let Some(over) = over {
                if let Some(dir) = &over.dist_path {
                    destination.dir = dir.clone();
                }
                if let Some(file) = &over.dist_filename {
                    destination.file = file.clone();
                }
            }

            let (key, origin) = match over.and_then(|o| o.source.as_deref()) {
                Some(source) => {
                    let key = TemplateKey::document(&document.name, name);
                    let syntax = catalog::shared_entry(name)
                        .map_or_else(Syntax::document, |e| e.group.syntax());
                    let text = self.load(Some(document.name.as_str()), name, source, SourceBase::Project)?;
                    registry.register(key.clone(), &syntax, text)?;
                    (key, Origin::Override)
                }
                None => {
                    let key = TemplateKey::shared(name);
                    if !registry.contains(&key) {
                        return Err(ApplicationError::MissingTemplateSource {
                            document: Some(document.name.clone()),
                            template: name.to_string(),
                            path: catalog::shared_entry(name)
                                .map(|e| self.roots.templates.join(e.source))
                                .unwrap_or_default(),
                        }
                        .into());
                    }
                    (key, Origin::Default)
                }
            };

            resolved.templates.insert(
                name.to_string(),
                ResolvedTemplate {
                    name: name.to_string(),
                    key,
                    destination,
                    helpers: Default::default(),
                    origin,
                },
            );
        }

        // 5. Recursive child list
        if document.flags.recursion {
            let template = self.recursive_child_list(registry, project, document, position)?;
            resolved.standalone.push(template);
        }

        debug!(
            templates = resolved.templates.len(),
            standalone = resolved.standalone.len(),
            "document resolved"
        );
        Ok(resolved)
    }

    fn recursive_child_list(
        &self,
        registry: &mut dyn TemplateRegistry,
        project: &Project,
        document: &Document,
        position: usize,
    ) -> StencilResult<ResolvedTemplate> {
        let name = catalog::RECURSIVE_CHILD_LIST_NAME;
        let over = document.template_overrides.get(catalog::RECURSIVE_CHILD_LIST);

        let text = match over.and_then(|o| o.source.as_deref()) {
            Some(source) => self.load(Some(document.name.as_str()), name, source, SourceBase::Project)?,
            None => {
                let source = PathBuf::from(format!(
                    "webClient/quasar_{}/doc/comp/{}",
                    project.quasar_version(),
                    catalog::RECURSIVE_CHILD_LIST
                ));
                self.load(Some(document.name.as_str()), name, &source, SourceBase::Templates)?
            }
        };
        let key = TemplateKey::document(&document.name, name);
        registry.register(key.clone(), &Syntax::document(), text)?;

        let mut destination =
            destination::for_document(&project.dist_path, document, position, name);
        if let Some(file) = over.and_then(|o| o.dist_filename.clone()) {
            destination.file = file;
        }

        Ok(ResolvedTemplate {
            name: name.to_string(),
            key,
            destination,
            helpers: Default::default(),
            origin: Origin::Standalone,
        })
    }

    // -------------------------------------------------------------------------
    // Source loading
    // -------------------------------------------------------------------------

    fn load(
        &self,
        document: Option<&str>,
        template: &str,
        source: &Path,
        base: SourceBase,
    ) -> StencilResult<String> {
        let path = self
            .locate(source, base)
            .ok_or_else(|| ApplicationError::MissingTemplateSource {
                document: document.map(str::to_string),
                template: template.to_string(),
                path: match base {
                    SourceBase::Project if source.is_relative() => self.roots.project.join(source),
                    SourceBase::Templates if source.is_relative() => {
                        self.roots.templates.join(source)
                    }
                    _ => source.to_path_buf(),
                },
            })?;
        debug!(template, path = %path.display(), "reading template source");
        self.filesystem.read_to_string(&path)
    }

    fn locate(&self, source: &Path, base: SourceBase) -> Option<PathBuf> {
        if source.is_absolute() {
            return self
                .filesystem
                .exists(source)
                .then(|| source.to_path_buf());
        }
        let mut roots = vec![self.roots.templates.as_path()];
        if base == SourceBase::Project {
            roots.insert(0, self.roots.project.as_path());
        }
        roots
            .into_iter()
            .map(|root| root.join(source))
            .find(|candidate| self.filesystem.exists(candidate))
    }
}
