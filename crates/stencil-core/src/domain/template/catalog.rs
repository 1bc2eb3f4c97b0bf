//! Fixed template catalog.
//!
//! Logical names are part of the generated layout contract: default wiring and
//! destination derivation both match on these exact strings.

use super::Syntax;
use crate::domain::project::DocumentFlags;

pub const UI_ITEM: &str = "webClient_item.vue";
pub const UI_INDEX: &str = "webClient_index.vue";

pub const SQL_MAIN: &str = "sql_main.toml";
pub const SQL_GET_BY_ID: &str = "sql_function_get_by_id.sql";
pub const SQL_LIST: &str = "sql_function_list.sql";
pub const SQL_UPDATE: &str = "sql_function_update.sql";
pub const SQL_TRIGGER_BEFORE: &str = "sql_function_trigger_before.sql";
pub const SQL_TRIGGER_AFTER: &str = "sql_function_trigger_after.sql";

/// Override-table key and file name of the recursive child list.
pub const RECURSIVE_CHILD_LIST: &str = "recursiveChildList.vue";
/// Logical name of the recursive child list.
pub const RECURSIVE_CHILD_LIST_NAME: &str = "webClient_comp_recursiveChildList.vue";

/// Tab counter mixin source, relative to the templates root.
pub const TAB_COUNTER_SOURCE: &str = "webClient/doc/mixins/tabCounter.js";

/// Project-scope files copied through the document syntax.
pub const SOURCE_TREE_DIR: &str = "sourceFiles";

/// Source group of a shared template. Decides its delimiter syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateGroup {
    /// Project-wide deployment files.
    Infrastructure,
    /// Default UI scaffold.
    UiScaffold,
    /// Default storage scaffold.
    StorageScaffold,
    /// Files under [`SOURCE_TREE_DIR`].
    SourceTree,
}

impl TemplateGroup {
    pub fn syntax(self) -> Syntax {
        match self {
            Self::Infrastructure | Self::StorageScaffold => Syntax::infrastructure(),
            Self::UiScaffold | Self::SourceTree => Syntax::document(),
        }
    }
}

/// One shared template: logical name, source path under the templates root,
/// and group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub source: &'static str,
    pub group: TemplateGroup,
}

const fn entry(name: &'static str, source: &'static str, group: TemplateGroup) -> CatalogEntry {
    CatalogEntry {
        name,
        source,
        group,
    }
}

/// Every shared template parsed before resolution starts.
pub const SHARED: &[CatalogEntry] = &[
    entry("project_config.toml", "project/config.toml", TemplateGroup::Infrastructure),
    entry("project_docker-compose.yml", "project/docker-compose.yml", TemplateGroup::Infrastructure),
    entry(
        "project_docker-compose.dev.yml",
        "project/docker-compose.dev.yml",
        TemplateGroup::Infrastructure,
    ),
    entry("project_restoreDump.sh", "project/restoreDump.sh", TemplateGroup::Infrastructure),
    entry("project_deploy.ps1", "project/deploy.ps1", TemplateGroup::Infrastructure),
    entry(UI_INDEX, "webClient/doc/index.vue", TemplateGroup::UiScaffold),
    entry(UI_ITEM, "webClient/doc/item.vue", TemplateGroup::UiScaffold),
    entry(SQL_MAIN, "sql/main.toml", TemplateGroup::StorageScaffold),
    entry(SQL_GET_BY_ID, "sql/function/get_by_id.sql", TemplateGroup::StorageScaffold),
    entry(SQL_LIST, "sql/function/list.sql", TemplateGroup::StorageScaffold),
    entry(SQL_UPDATE, "sql/function/update.sql", TemplateGroup::StorageScaffold),
    entry(SQL_TRIGGER_BEFORE, "sql/function/trigger_before.sql", TemplateGroup::StorageScaffold),
    entry(SQL_TRIGGER_AFTER, "sql/function/trigger_after.sql", TemplateGroup::StorageScaffold),
];

/// Look up a shared entry by logical name.
pub fn shared_entry(name: &str) -> Option<&'static CatalogEntry> {
    SHARED.iter().find(|e| e.name == name)
}

/// Project-scope entries (rendered once per run).
pub fn infrastructure() -> impl Iterator<Item = &'static CatalogEntry> {
    SHARED
        .iter()
        .filter(|e| e.group == TemplateGroup::Infrastructure)
}

/// Default scaffolds a document with `flags` is entitled to.
///
/// Trigger templates are conditional: a storage opt-in alone does not bring
/// them in.
pub fn candidate_defaults(flags: &DocumentFlags) -> Vec<&'static str> {
    let mut names = Vec::new();
    if flags.ui_defaults {
        names.extend([UI_ITEM, UI_INDEX]);
    }
    if flags.storage_defaults {
        names.extend([SQL_MAIN, SQL_GET_BY_ID, SQL_LIST, SQL_UPDATE]);
        if flags.before_trigger {
            names.push(SQL_TRIGGER_BEFORE);
        }
        if flags.after_trigger {
            names.push(SQL_TRIGGER_AFTER);
        }
    }
    names
}
