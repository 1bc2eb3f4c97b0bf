//! Project and document model.
//!
//! A [`Project`] is built once (in code or from a definition file), then
//! [`Project::prepare`] runs the fill-in passes in a fixed order. After that
//! the model is read-only for the rest of the run.

use std::{
    collections::{BTreeMap, HashSet},
    path::PathBuf,
};

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::{
    error::DomainError,
    field::{Field, FieldOwner, UiType, shortcuts},
    template::{catalog, destination},
};

// ============================================================================
// Project
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    /// Root directory of the generated tree.
    pub dist_path: PathBuf,
    pub documents: Vec<Document>,
    pub config: ProjectConfig,
    pub menu: Vec<MenuEntry>,
    pub i18n: I18n,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectConfig {
    pub app_name: String,
    pub web_port: u16,
    /// Public host of the deployed app, without scheme.
    pub url: String,
    /// UI framework major version; `0` means the default (1).
    pub quasar_version: u8,
}

/// Side menu entry. Entries naming a document inherit its icon, url, text and
/// roles when they leave them empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MenuEntry {
    pub document: Option<String>,
    pub icon: String,
    pub text: String,
    pub url: String,
    pub is_folder: bool,
    pub links: Vec<MenuEntry>,
    pub roles: Vec<String>,
}

/// Translation table: `lang -> prefix -> key -> value`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct I18n {
    pub default_lang: String,
    pub langs: Vec<String>,
    pub data: BTreeMap<String, BTreeMap<String, BTreeMap<String, String>>>,
}

impl Project {
    pub fn new(name: impl Into<String>, dist_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dist_path: dist_path.into(),
            ..Self::default()
        }
    }

    pub fn with_document(mut self, document: Document) -> Self {
        self.documents.push(document);
        self
    }

    /// Look up a document by name.
    pub fn document(&self, name: &str) -> Result<&Document, DomainError> {
        self.documents
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| DomainError::DocumentNotFound {
                name: name.to_string(),
            })
    }

    pub fn quasar_version(&self) -> u8 {
        match self.config.quasar_version {
            0 => 1,
            v => v,
        }
    }

    pub fn add_i18n(&mut self, lang: &str, prefix: &str, key: &str, value: &str) {
        self.i18n
            .data
            .entry(lang.to_string())
            .or_default()
            .entry(prefix.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    /// Top-level template variables shared by every render.
    pub fn globals(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("appName", self.config.app_name.clone()),
            ("webPort", self.config.web_port.to_string()),
            ("url", self.config.url.clone()),
            ("projectName", self.name.clone()),
            ("quasarVersion", self.quasar_version().to_string()),
        ])
    }

    // ------------------------------------------------------------------------
    // Fill-in passes
    // ------------------------------------------------------------------------

    /// Run every fill-in pass in order.
    ///
    /// # Errors
    ///
    /// Duplicate document names, malformed image crop sizes and menu entries
    /// naming unknown documents.
    #[instrument(skip_all, fields(project = %self.name, documents = self.documents.len()))]
    pub fn prepare(&mut self) -> Result<(), DomainError> {
        self.check_unique_names()?;
        self.attach_fields();
        self.check_image_crops()?;
        self.fill_ui_fields();
        self.fill_grid();
        self.fill_template_paths();
        self.fill_side_menu()?;
        debug!("project prepared");
        Ok(())
    }

    fn check_unique_names(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for doc in &self.documents {
            if !seen.insert(doc.name.as_str()) {
                return Err(DomainError::DuplicateDocument {
                    name: doc.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Image widgets loaded from a definition bypass the image constructors,
    /// so their crop size is checked here.
    fn check_image_crops(&self) -> Result<(), DomainError> {
        for field in self.documents.iter().flat_map(|d| &d.fields) {
            if !matches!(field.effective_ui_type(), UiType::Img | UiType::ImgList) {
                continue;
            }
            if let Some(crop) = field.ui.ext.get("crop").filter(|c| !c.is_empty()) {
                shortcuts::validate_crop(&field.name, crop)?;
            }
        }
        Ok(())
    }

    fn fill_grid(&mut self) {
        for doc in &mut self.documents {
            doc.ui.grid = doc.grid();
        }
    }

    /// Set each field's owner back-reference.
    fn attach_fields(&mut self) {
        for doc in &mut self.documents {
            for (position, field) in doc.fields.iter_mut().enumerate() {
                field.owner = Some(FieldOwner {
                    document: doc.name.clone(),
                    position,
                });
            }
        }
    }

    /// Default UI label/required flags and resolve reference link keys.
    fn fill_ui_fields(&mut self) {
        let routes: BTreeMap<String, (String, String)> = self
            .documents
            .iter()
            .map(|d| {
                (
                    d.name.clone(),
                    (d.route_name().to_string(), d.ui.menu_icon.clone()),
                )
            })
            .collect();

        for field in self.documents.iter_mut().flat_map(|d| d.fields.iter_mut()) {
            if field.ui.label.as_deref().is_none_or(str::is_empty) {
                field.ui.label = Some(field.label.clone());
            }
            if field.storage.required {
                field.ui.required = true;
            }
            let Some(target) = field.reference().map(str::to_string) else {
                continue;
            };
            if field.ui.ext.contains_key("pathUrl") {
                if let Some((route, icon)) = routes.get(&target) {
                    field.ui.ext.insert("pathUrl".into(), format!("/{route}"));
                    field.ui.ext.insert("avatar".into(), icon.clone());
                }
                if target == "user" {
                    field.ui.ext.insert("pathUrl".into(), "/users".into());
                    field.ui.ext.insert("avatar".into(), "image/users.svg".into());
                }
            }
            if field.ui.ext.contains_key("addNewUrl") {
                if let Some((route, _)) = routes.get(&target) {
                    field.ui.ext.insert("addNewUrl".into(), format!("/{route}/new"));
                }
            }
        }
    }

    /// Complete explicit bindings: default source under the document's `tmpl`
    /// directory, default destination from the logical name.
    fn fill_template_paths(&mut self) {
        let dist = self.dist_path.clone();
        for (position, doc) in self.documents.iter_mut().enumerate() {
            let source_dir = doc.template_dir();
            let computed: Vec<(String, destination::Destination)> = {
                let doc: &Document = doc;
                doc.templates
                    .keys()
                    .map(|name| {
                        (
                            name.clone(),
                            destination::for_document(&dist, doc, position, name),
                        )
                    })
                    .collect()
            };
            for (name, dest) in computed {
                let Some(binding) = doc.templates.get_mut(&name) else {
                    continue;
                };
                if binding.source.is_none() {
                    binding.source = Some(source_dir.join(&name));
                }
                if binding.dist_path.is_none() {
                    binding.dist_path = Some(dest.dir);
                    binding.dist_filename = Some(dest.file);
                }
            }
        }
    }

    fn fill_side_menu(&mut self) -> Result<(), DomainError> {
        let mut menu = std::mem::take(&mut self.menu);
        let filled = menu.iter_mut().try_for_each(|entry| -> Result<(), DomainError> {
            self.fill_menu_entry(entry)?;
            if entry.is_folder {
                for link in &mut entry.links {
                    self.fill_menu_entry(link)?;
                }
            }
            Ok(())
        });
        self.menu = menu;
        filled
    }

    fn fill_menu_entry(&self, entry: &mut MenuEntry) -> Result<(), DomainError> {
        let Some(name) = entry.document.as_deref().filter(|n| !n.is_empty()) else {
            return Ok(());
        };
        let doc = self
            .document(name)
            .map_err(|_| DomainError::MenuTargetNotFound {
                document: name.to_string(),
            })?;
        if entry.icon.is_empty() {
            entry.icon = doc.ui.menu_icon.clone();
        }
        if entry.url.is_empty() {
            entry.url = doc.route_name().to_string();
        }
        if entry.text.is_empty() {
            entry.text = format!("i18n_menu.{}", doc.name);
        }
        if entry.roles.is_empty() {
            entry.roles = doc.ui.roles.clone();
        }
        Ok(())
    }
}

// ============================================================================
// Document
// ============================================================================

/// Feature flags deciding which default scaffolds a document receives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentFlags {
    pub ui_defaults: bool,
    pub storage_defaults: bool,
    pub before_trigger: bool,
    pub after_trigger: bool,
    /// Needs the recursive child list component.
    pub recursion: bool,
}

/// Declared template of one document. Missing paths are filled by
/// [`Project::prepare`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplateBinding {
    pub source: Option<PathBuf>,
    pub dist_path: Option<PathBuf>,
    pub dist_filename: Option<String>,
    /// Zero-argument helpers visible only to this template.
    pub helpers: BTreeMap<String, String>,
}

/// Redirects a default scaffold's source and/or destination for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplateOverride {
    pub source: Option<PathBuf>,
    pub dist_path: Option<PathBuf>,
    pub dist_filename: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mixin {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tab {
    pub title: String,
    pub html_params: String,
    pub html_inner: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentUi {
    /// Route segment overriding the document name in UI paths.
    pub path: Option<String>,
    pub route_name: Option<String>,
    pub menu_icon: String,
    pub roles: Vec<String>,
    /// Mixin group to mixins, e.g. `docItemWithTabs`.
    pub mixins: BTreeMap<String, Vec<Mixin>>,
    pub tabs: Vec<Tab>,
    /// Form layout as rows of field indices, filled by [`Project::prepare`].
    #[serde(skip_deserializing)]
    pub grid: Vec<Vec<usize>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Document {
    pub name: String,
    pub label: String,
    pub fields: Vec<Field>,
    /// Logical template name to binding.
    pub templates: BTreeMap<String, TemplateBinding>,
    pub flags: DocumentFlags,
    pub template_overrides: BTreeMap<String, TemplateOverride>,
    /// Parent folder for nested documents.
    pub path_prefix: Option<String>,
    pub ui: DocumentUi,
}

const TAB_MIXIN_GROUP: &str = "docItemWithTabs";

impl Document {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_flags(mut self, flags: DocumentFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_template(mut self, name: impl Into<String>, binding: TemplateBinding) -> Self {
        self.templates.insert(name.into(), binding);
        self
    }

    pub fn with_override(mut self, name: impl Into<String>, over: TemplateOverride) -> Self {
        self.template_overrides.insert(name.into(), over);
        self
    }

    /// Route segment used in UI paths.
    pub fn route(&self) -> &str {
        self.ui.path.as_deref().filter(|p| !p.is_empty()).unwrap_or(&self.name)
    }

    /// Router name used in links and menus.
    pub fn route_name(&self) -> &str {
        self.ui
            .route_name
            .as_deref()
            .filter(|r| !r.is_empty())
            .unwrap_or(&self.name)
    }

    pub fn path_prefix(&self) -> Option<&str> {
        self.path_prefix.as_deref().filter(|p| !p.is_empty())
    }

    /// Directory holding the document's own templates: `<prefix/><name>/tmpl`
    /// with the name in lower camel case.
    pub fn template_dir(&self) -> PathBuf {
        let mut dir = PathBuf::new();
        if let Some(prefix) = self.path_prefix() {
            dir.push(prefix);
        }
        dir.push(self.name.to_case(Case::Camel));
        dir.push("tmpl");
        dir
    }

    /// Form layout: positioned fields grouped by row and ordered by column,
    /// then one trailing row holding the fields without a position.
    pub fn grid(&self) -> Vec<Vec<usize>> {
        let mut rows: BTreeMap<u32, Vec<(u32, usize)>> = BTreeMap::new();
        let mut loose = Vec::new();
        for (index, field) in self.fields.iter().enumerate() {
            match field.ui.row_col.first() {
                Some(&[row, col]) => rows.entry(row).or_default().push((col, index)),
                None => loose.push(index),
            }
        }

        let mut grid: Vec<Vec<usize>> = rows
            .into_values()
            .map(|mut cells| {
                cells.sort_by_key(|&(col, _)| col);
                cells.into_iter().map(|(_, index)| index).collect()
            })
            .collect();
        if !loose.is_empty() {
            grid.push(loose);
        }
        grid
    }

    /// Add a tab counter: a mixin loading `pg_method` with `pg_params` whose
    /// length becomes the badge of tab `tab`.
    pub fn with_tab_counter(mut self, tab: &str, pg_method: &str, pg_params: &str) -> Self {
        let tab_name = upper_case_first(tab);
        let var_name = format!("tabCounter{tab_name}");
        let file = format!("{var_name}.js");

        self.ui
            .mixins
            .entry(TAB_MIXIN_GROUP.to_string())
            .or_default()
            .push(Mixin {
                name: var_name.clone(),
                path: format!("./mixins/{file}"),
            });

        let helpers = BTreeMap::from([
            ("VarName".to_string(), var_name.clone()),
            ("PgMethod".to_string(), pg_method.to_string()),
            ("PgParams".to_string(), pg_params.to_string()),
        ]);
        self.templates.insert(
            format!("webClient_mixin_{file}"),
            TemplateBinding {
                source: Some(PathBuf::from(catalog::TAB_COUNTER_SOURCE)),
                dist_path: None,
                dist_filename: None,
                helpers,
            },
        );

        if let Some(t) = self.ui.tabs.iter_mut().find(|t| t.title == tab) {
            t.html_params
                .push_str(&format!(" @updateCount='v => {var_name} = v'"));
            t.html_inner.push_str(&format!(
                " <q-badge v-if='{var_name}>0' color='red' floating>{{{{{var_name}}}}}</q-badge>"
            ));
        }
        self
    }
}

/// Uppercase the first character, leave the rest untouched.
pub fn upper_case_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::field::{FieldType, shortcuts};

    fn task() -> Document {
        Document::new("task", "Task").with_fields(vec![
            shortcuts::title(),
            Field::new("assignee", "Assignee", FieldType::Int)
                .set_reference("user")
                .set_ext("pathUrl", "")
                .set_ext("avatar", ""),
        ])
    }

    #[test]
    fn prepare_attaches_owner_positions() {
        let mut p = Project::new("p", "/out").with_document(task());
        p.prepare().unwrap();
        let owner = p.documents[0].fields[1].owner.clone().unwrap();
        assert_eq!(owner.document, "task");
        assert_eq!(owner.position, 1);
    }

    #[test]
    fn duplicate_documents_are_rejected() {
        let mut p = Project::new("p", "/out")
            .with_document(task())
            .with_document(task());
        assert_eq!(
            p.prepare().unwrap_err(),
            DomainError::DuplicateDocument { name: "task".into() }
        );
    }

    #[test]
    fn ui_label_and_required_are_defaulted() {
        let mut p = Project::new("p", "/out").with_document(task());
        p.prepare().unwrap();
        let title = &p.documents[0].fields[0];
        assert_eq!(title.ui.label.as_deref(), Some("title"));
        assert!(title.ui.required);
    }

    #[test]
    fn user_reference_links_use_fixed_route() {
        let mut p = Project::new("p", "/out").with_document(task());
        p.prepare().unwrap();
        let ext = &p.documents[0].fields[1].ui.ext;
        assert_eq!(ext["pathUrl"], "/users");
        assert_eq!(ext["avatar"], "image/users.svg");
    }

    #[test]
    fn reference_links_follow_target_document() {
        let mut client = Document::new("client", "Client");
        client.ui.route_name = Some("clients".into());
        client.ui.menu_icon = "image/client.svg".into();
        let deal = Document::new("deal", "Deal").with_fields(vec![
            Field::new("client_id", "Client", FieldType::Int)
                .set_reference("client")
                .set_ext("pathUrl", "")
                .set_ext("addNewUrl", ""),
        ]);

        let mut p = Project::new("p", "/out")
            .with_document(client)
            .with_document(deal);
        p.prepare().unwrap();

        let ext = &p.documents[1].fields[0].ui.ext;
        assert_eq!(ext["pathUrl"], "/clients");
        assert_eq!(ext["avatar"], "image/client.svg");
        assert_eq!(ext["addNewUrl"], "/clients/new");
    }

    #[test]
    fn explicit_templates_get_default_paths() {
        let mut doc = Document::new("task_item", "Task item")
            .with_template("webClient_comp_card.vue", TemplateBinding::default());
        doc.path_prefix = Some("crm".into());
        let mut p = Project::new("p", "/out").with_document(doc);
        p.prepare().unwrap();

        let binding = &p.documents[0].templates["webClient_comp_card.vue"];
        assert_eq!(
            binding.source.as_deref(),
            Some(PathBuf::from("crm/taskItem/tmpl/webClient_comp_card.vue").as_path())
        );
        assert_eq!(
            binding.dist_path.as_deref(),
            Some(PathBuf::from("/out/webClient/src/app/components/crm/task_item/comp").as_path())
        );
        assert_eq!(binding.dist_filename.as_deref(), Some("card.vue"));
    }

    #[test]
    fn explicit_destination_is_kept() {
        let doc = Document::new("task", "Task").with_template(
            "sql_main.toml",
            TemplateBinding {
                dist_path: Some("/custom".into()),
                dist_filename: Some("model.toml".into()),
                ..TemplateBinding::default()
            },
        );
        let mut p = Project::new("p", "/out").with_document(doc);
        p.prepare().unwrap();
        let binding = &p.documents[0].templates["sql_main.toml"];
        assert_eq!(binding.dist_path.as_deref(), Some(PathBuf::from("/custom").as_path()));
        assert_eq!(binding.dist_filename.as_deref(), Some("model.toml"));
    }

    #[test]
    fn menu_entries_inherit_document_data() {
        let mut doc = task();
        doc.ui.menu_icon = "image/task.svg".into();
        doc.ui.roles = vec!["admin".into()];
        let mut p = Project::new("p", "/out").with_document(doc);
        p.menu = vec![
            MenuEntry {
                document: Some("task".into()),
                ..MenuEntry::default()
            },
            MenuEntry {
                is_folder: true,
                links: vec![MenuEntry {
                    document: Some("task".into()),
                    text: "Mine".into(),
                    ..MenuEntry::default()
                }],
                ..MenuEntry::default()
            },
        ];
        p.prepare().unwrap();

        assert_eq!(p.menu[0].icon, "image/task.svg");
        assert_eq!(p.menu[0].url, "task");
        assert_eq!(p.menu[0].text, "i18n_menu.task");
        assert_eq!(p.menu[0].roles, vec!["admin"]);
        assert_eq!(p.menu[1].links[0].text, "Mine");
        assert_eq!(p.menu[1].links[0].icon, "image/task.svg");
    }

    #[test]
    fn grid_groups_rows_and_orders_columns() {
        let doc = Document::new("task", "Task").with_fields(vec![
            Field::new("note", "Note", FieldType::Text),
            Field::new("due", "Due", FieldType::Date).set_row_col(&[2, 1]).unwrap(),
            Field::new("state", "State", FieldType::String).set_row_col(&[1, 2]).unwrap(),
            shortcuts::title(),
            Field::new("amount", "Amount", FieldType::Double).set_row_col(&[2, 2]).unwrap(),
        ]);
        assert_eq!(doc.grid(), vec![vec![3, 2], vec![1, 4], vec![0]]);
    }

    #[test]
    fn prepare_fills_the_grid() {
        let mut p = Project::new("p", "/out").with_document(task());
        p.prepare().unwrap();
        assert_eq!(p.documents[0].ui.grid, vec![vec![0], vec![1]]);
    }

    #[test]
    fn malformed_image_crop_is_fatal() {
        for ui_type in ["img", "imgList"] {
            let photo = Field::new("photo", "Photo", FieldType::String)
                .set_ui_type(ui_type)
                .set_ext("crop", "300");
            let mut p = Project::new("p", "/out")
                .with_document(Document::new("task", "Task").with_fields(vec![photo]));
            assert!(
                matches!(p.prepare(), Err(DomainError::InvalidCrop { ref field, .. }) if field == "photo"),
                "{ui_type}"
            );
        }
    }

    #[test]
    fn crop_is_only_checked_on_image_widgets() {
        let ok = Field::new("photo", "Photo", FieldType::String)
            .set_ui_type("img")
            .set_ext("crop", "300x400");
        let other = Field::new("note", "Note", FieldType::String).set_ext("crop", "axb");
        let mut p = Project::new("p", "/out")
            .with_document(Document::new("task", "Task").with_fields(vec![ok, other]));
        assert!(p.prepare().is_ok());
    }

    #[test]
    fn menu_entry_for_unknown_document_is_fatal() {
        let mut p = Project::new("p", "/out").with_document(task());
        p.menu = vec![MenuEntry {
            document: Some("invoice".into()),
            ..MenuEntry::default()
        }];
        assert_eq!(
            p.prepare().unwrap_err(),
            DomainError::MenuTargetNotFound { document: "invoice".into() }
        );
    }

    #[test]
    fn add_i18n_creates_nested_tables() {
        let mut p = Project::new("p", "/out");
        p.add_i18n("en-US", "menu", "task", "Tasks");
        p.add_i18n("en-US", "menu", "deal", "Deals");
        assert_eq!(p.i18n.data["en-US"]["menu"].len(), 2);
    }

    #[test]
    fn quasar_version_defaults_to_one() {
        let mut p = Project::new("p", "/out");
        assert_eq!(p.quasar_version(), 1);
        p.config.quasar_version = 2;
        assert_eq!(p.quasar_version(), 2);
    }

    #[test]
    fn tab_counter_registers_mixin_template() {
        let mut doc = Document::new("deal", "Deal");
        doc.ui.tabs.push(Tab {
            title: "files".into(),
            ..Tab::default()
        });
        let doc = doc.with_tab_counter("files", "file_list", "{deal_id: this.id}");

        let binding = &doc.templates["webClient_mixin_tabCounterFiles.js"];
        assert_eq!(binding.helpers["VarName"], "tabCounterFiles");
        assert_eq!(binding.helpers["PgMethod"], "file_list");
        assert_eq!(doc.ui.mixins["docItemWithTabs"][0].path, "./mixins/tabCounterFiles.js");
        assert!(doc.ui.tabs[0].html_inner.contains("{{tabCounterFiles}}"));
    }

    #[test]
    fn upper_case_first_handles_empty() {
        assert_eq!(upper_case_first("files"), "Files");
        assert_eq!(upper_case_first(""), "");
    }
}
