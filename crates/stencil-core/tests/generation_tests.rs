//! Generation through the public API with in-test port implementations.

use std::{
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use stencil_core::{
    application::{ApplicationError, Filesystem, GenerateService, SourceRoots, TemplateRegistry},
    domain::{
        Document, DocumentFlags, DomainError, MenuEntry, Origin, Project, RenderModel, Syntax,
        TemplateBinding, TemplateKey, catalog, shortcuts,
    },
    error::{StencilError, StencilResult},
};

// ── Fakes ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
struct FakeFs {
    files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
}

impl FakeFs {
    fn with(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), content.to_string());
        self
    }

    fn get(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(Path::new(path)).cloned()
    }

    fn under(&self, root: &str) -> Vec<PathBuf> {
        self.files
            .lock()
            .unwrap()
            .keys()
            .filter(|p| p.starts_with(root))
            .cloned()
            .collect()
    }
}

impl Filesystem for FakeFs {
    fn create_dir_all(&self, _path: &Path) -> StencilResult<()> {
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> StencilResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> StencilResult<String> {
        self.files.lock().unwrap().get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "not found".into(),
            }
            .into()
        })
    }

    fn list_files(&self, root: &Path) -> StencilResult<Vec<PathBuf>> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .keys()
            .filter_map(|p| p.strip_prefix(root).ok().map(Path::to_path_buf))
            .collect())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}

/// Renders `<source>@<document>` so tests can see which source reached
/// which document.
#[derive(Default)]
struct EchoRegistry {
    sources: HashMap<TemplateKey, String>,
}

impl TemplateRegistry for EchoRegistry {
    fn register(&mut self, key: TemplateKey, _syntax: &Syntax, source: String) -> StencilResult<()> {
        self.sources.insert(key, source);
        Ok(())
    }

    fn contains(&self, key: &TemplateKey) -> bool {
        self.sources.contains_key(key)
    }

    fn render(&self, key: &TemplateKey, model: &RenderModel) -> StencilResult<String> {
        let source = self.sources.get(key).ok_or_else(|| ApplicationError::RenderingFailed {
            template: key.to_string(),
            reason: "unknown".into(),
        })?;
        let scope = model
            .document
            .map(|i| model.project.documents[i].name.clone())
            .unwrap_or_else(|| "project".into());
        Ok(format!("{source}@{scope}"))
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn catalog_fs() -> FakeFs {
    catalog::SHARED
        .iter()
        .fold(FakeFs::default(), |fs, entry| {
            fs.with(Path::new("/tpl").join(entry.source), entry.name)
        })
}

fn service(fs: &FakeFs) -> GenerateService {
    GenerateService::new(Box::new(fs.clone()), Box::<EchoRegistry>::default())
}

fn roots() -> SourceRoots {
    SourceRoots::new("/tpl", "/proj")
}

fn order() -> Document {
    Document::new("order", "Order")
        .with_fields(vec![shortcuts::title()])
        .with_flags(DocumentFlags {
            storage_defaults: true,
            before_trigger: true,
            ..DocumentFlags::default()
        })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn explicit_template_replaces_default_under_path_prefix() {
    let fs = catalog_fs().with("/proj/shop/order/tmpl/sql_function_list.sql", "custom list");
    let mut doc = order().with_template("sql_function_list.sql", TemplateBinding::default());
    doc.path_prefix = Some("shop".into());
    let project = Project::new("shop", "/out").with_document(doc);

    let mut service = service(&fs);
    let plan = service.plan(project, &roots()).unwrap();
    let resolved = &plan.documents[0];
    assert_eq!(
        resolved.templates["sql_function_list.sql"].origin,
        Origin::Explicit
    );
    assert_eq!(resolved.templates["sql_main.toml"].origin, Origin::Default);
    assert!(resolved.contains("sql_function_trigger_before.sql"));
    assert!(!resolved.contains("sql_function_trigger_after.sql"));
    assert!(!resolved.contains("webClient_item.vue"));

    let report = service.render_plan(&plan, |_| {}).unwrap();
    assert_eq!(report.files.len(), plan.file_count());

    let function = "/out/sql/model/shop/00_order/function";
    assert_eq!(
        fs.get(&format!("{function}/order_list.sql")).as_deref(),
        Some("custom list@order")
    );
    assert_eq!(
        fs.get(&format!("{function}/order_trigger_before.sql")).as_deref(),
        Some("sql_function_trigger_before.sql@order")
    );
    assert_eq!(
        fs.get("/out/sql/model/shop/00_order/main.toml").as_deref(),
        Some("sql_main.toml@order")
    );
    assert_eq!(
        fs.get("/out/docker-compose.yml").as_deref(),
        Some("project_docker-compose.yml@project")
    );
}

#[test]
fn source_tree_files_keep_their_relative_path() {
    let fs = catalog_fs().with("/tpl/sourceFiles/webClient/src/boot/api.js", "api");
    let project = Project::new("shop", "/out");

    service(&fs).generate(project, &roots()).unwrap();

    assert_eq!(
        fs.get("/out/webClient/src/boot/api.js").as_deref(),
        Some("api@project")
    );
}

#[test]
fn positions_number_documents_in_definition_order() {
    let fs = catalog_fs();
    let project = Project::new("shop", "/out")
        .with_document(order())
        .with_document(Document::new("customer", "Customer").with_flags(DocumentFlags {
            storage_defaults: true,
            ..DocumentFlags::default()
        }));

    service(&fs).generate(project, &roots()).unwrap();

    assert!(fs.get("/out/sql/model/00_order/main.toml").is_some());
    assert!(fs.get("/out/sql/model/01_customer/main.toml").is_some());
    assert_eq!(fs.under("/out/sql/model/01_customer/function").len(), 3);
}

#[test]
fn missing_menu_target_fails_before_writing() {
    let fs = catalog_fs();
    let mut project = Project::new("shop", "/out").with_document(order());
    project.menu.push(MenuEntry {
        document: Some("ghost".into()),
        ..MenuEntry::default()
    });

    let err = service(&fs).generate(project, &roots()).unwrap_err();
    assert!(matches!(
        err,
        StencilError::Domain(DomainError::MenuTargetNotFound { ref document }) if document == "ghost"
    ));
    assert!(err.is_fatal());
    assert!(fs.under("/out").is_empty());
}

#[test]
fn generation_is_repeatable() {
    let fs = catalog_fs();
    let project = Project::new("shop", "/out").with_document(order());

    let snapshot = |fs: &FakeFs| -> BTreeMap<PathBuf, String> {
        fs.files
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p.starts_with("/out"))
            .map(|(p, c)| (p.clone(), c.clone()))
            .collect()
    };

    service(&fs).generate(project.clone(), &roots()).unwrap();
    let first = snapshot(&fs);
    fs.write_file(Path::new("/out/config.toml"), "edited").unwrap();
    service(&fs).generate(project, &roots()).unwrap();
    let second = snapshot(&fs);

    assert_eq!(first, second);
}
