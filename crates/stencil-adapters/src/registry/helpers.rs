//! Helper namespace and render context.

use std::{collections::BTreeMap, sync::Arc};

use convert_case::{Case, Casing};
use minijinja::{Environment, Error, ErrorKind, State, Value, value::Object};
use serde::Serialize;
use stencil_core::domain::{Field, Project, RenderModel, projector, project::upper_case_first};

/// Context key holding the project handle used by field helpers.
const PROJECT_HANDLE: &str = "__project";

/// The current project, reachable from helpers through the render state.
#[derive(Debug)]
pub(crate) struct ProjectHandle(pub(crate) Arc<Project>);

impl Object for ProjectHandle {}

/// Register the shared helper functions on `env`.
pub(crate) fn register_builtins(env: &mut Environment<'static>) {
    env.add_function("ToUpper", |s: String| s.to_uppercase());
    env.add_function("ToLower", |s: String| s.to_lowercase());
    env.add_function("UpperCaseFirst", |s: String| upper_case_first(&s));
    env.add_function("ToLowerCamel", |s: String| s.to_case(Case::Camel));
    env.add_function("PrintVueFldTemplate", print_vue_fld_template);
}

/// `PrintVueFldTemplate(fld)`: UI widget markup of a field of the project.
fn print_vue_fld_template(state: &State, fld: Value) -> Result<String, Error> {
    let handle = state
        .lookup(PROJECT_HANDLE)
        .ok_or_else(|| Error::new(ErrorKind::InvalidOperation, "no project in render context"))?;
    let project = handle
        .downcast_object_ref::<ProjectHandle>()
        .ok_or_else(|| Error::new(ErrorKind::InvalidOperation, "malformed project handle"))?;

    let field = lookup_field(&project.0, &fld)?;
    projector::ui_markup(&project.0, field)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))
}

/// Find the project field a serialized field value stands for, via its owner.
fn lookup_field<'p>(project: &'p Project, fld: &Value) -> Result<&'p Field, Error> {
    let owner = fld.get_attr("owner").unwrap_or_default();
    let document = owner.get_attr("document").unwrap_or_default();
    let position = owner.get_attr("position").unwrap_or_default();

    let (Some(document), Some(position)) = (document.as_str(), position.as_usize()) else {
        let name = fld.get_attr("name").unwrap_or_default();
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("field {name} is not attached to a document"),
        ));
    };

    project
        .document(document)
        .ok()
        .and_then(|doc| doc.fields.get(position))
        .ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("document '{document}' has no field #{position}"),
            )
        })
}

/// Per-field values computed for templates.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldView<'a> {
    #[serde(flatten)]
    field: &'a Field,
    ui_type: String,
    schema_declaration: String,
    insert_type: &'static str,
    update_type: &'static str,
    backend_type: &'static str,
    class_print: String,
    class_print_only_col: String,
}

impl<'a> From<&'a Field> for FieldView<'a> {
    fn from(field: &'a Field) -> Self {
        Self {
            field,
            ui_type: field.effective_ui_type().to_string(),
            schema_declaration: field.schema_declaration(),
            insert_type: field.insert_type(),
            update_type: field.update_type(),
            backend_type: field.backend_type(),
            class_print: field.ui.class_print(),
            class_print_only_col: field.ui.class_print_only_col(),
        }
    }
}

/// Build the top-level render context for `model`.
///
/// - `project`: the whole project
/// - `doc` / `fields`: the current document and its computed field views
/// - `grid`: the same field views laid out in form rows
/// - `appName`, `webPort`, `url`, `projectName`, `quasarVersion`
/// - one zero-argument function per template helper
pub(crate) fn context(model: &RenderModel) -> Value {
    let project = &model.project;
    let mut ctx: BTreeMap<String, Value> = project
        .globals()
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::from(v)))
        .collect();

    ctx.insert("project".into(), Value::from_serialize(project.as_ref()));
    if let Some(doc) = model.current_document() {
        let fields: Vec<FieldView<'_>> = doc.fields.iter().map(FieldView::from).collect();
        let grid: Vec<Vec<&FieldView<'_>>> = doc
            .ui
            .grid
            .iter()
            .map(|row| row.iter().filter_map(|&i| fields.get(i)).collect())
            .collect();
        ctx.insert("doc".into(), Value::from_serialize(doc));
        ctx.insert("grid".into(), Value::from_serialize(&grid));
        ctx.insert("fields".into(), Value::from_serialize(&fields));
    }
    for (name, value) in &model.helpers {
        let value = value.clone();
        ctx.insert(name.clone(), Value::from_function(move || value.clone()));
    }
    ctx.insert(
        PROJECT_HANDLE.into(),
        Value::from_object(ProjectHandle(project.clone())),
    );

    ctx.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::domain::{Document, FieldType};

    fn env() -> Environment<'static> {
        let mut env = Environment::new();
        register_builtins(&mut env);
        env
    }

    fn project() -> Arc<Project> {
        let mut project = Project::new("tracker", "/out").with_document(
            Document::new("task", "Task").with_fields(vec![
                Field::new("title", "Title", FieldType::String),
                Field::new("assignee", "Assignee", FieldType::Int).set_reference("user"),
            ]),
        );
        project.config.app_name = "Tracker".into();
        project.prepare().unwrap();
        Arc::new(project)
    }

    #[test]
    fn string_helpers() {
        let env = env();
        let out = env
            .render_str(
                "{{ ToUpper('ab') }} {{ ToLower('AB') }} {{ UpperCaseFirst('task') }} {{ ToLowerCamel('user_role') }}",
                minijinja::context! {},
            )
            .unwrap();
        assert_eq!(out, "AB ab Task userRole");
    }

    #[test]
    fn print_vue_fld_template_renders_reference_widget() {
        let env = env();
        let model = RenderModel::for_document(project(), 0, BTreeMap::new());
        let out = env
            .render_str(
                "{% for f in doc.fields %}{{ PrintVueFldTemplate(f) }}\n{% endfor %}",
                context(&model),
            )
            .unwrap();
        assert!(out.contains(r#"v-model="item.title""#), "{out}");
        assert!(out.contains(r#"pgMethod="user_list""#), "{out}");
    }

    #[test]
    fn print_vue_fld_template_rejects_detached_field() {
        let env = env();
        let model = RenderModel::for_document(project(), 0, BTreeMap::new());
        let mut ctx: BTreeMap<String, Value> = BTreeMap::new();
        ctx.insert("__project".into(), context(&model).get_attr("__project").unwrap());
        ctx.insert(
            "f".into(),
            Value::from_serialize(Field::new("loose", "Loose", FieldType::String)),
        );
        let ctx: Value = ctx.into_iter().collect();

        let err = env.render_str("{{ PrintVueFldTemplate(f) }}", ctx).unwrap_err();
        assert!(err.to_string().contains("not attached"), "{err}");
    }

    #[test]
    fn context_exposes_globals_fields_and_helpers() {
        let env = env();
        let helpers = BTreeMap::from([("VarName".to_string(), "tabCounterFiles".to_string())]);
        let model = RenderModel::for_document(project(), 0, helpers);
        let out = env
            .render_str(
                "{{ appName }}|{{ VarName() }}|{% for f in fields %}{{ f.name }}:{{ f.insertType }}:{{ f.uiType }};{% endfor %}",
                context(&model),
            )
            .unwrap();
        assert_eq!(out, "Tracker|tabCounterFiles|title:text:string;assignee:int:ref;");
    }

    #[test]
    fn grid_lists_field_views_by_row() {
        let mut project = Project::new("tracker", "/out").with_document(
            Document::new("task", "Task").with_fields(vec![
                Field::new("state", "State", FieldType::String).set_row_col(&[2, 1]).unwrap(),
                Field::new("title", "Title", FieldType::String).set_row_col(&[1, 1]).unwrap(),
                Field::new("due", "Due", FieldType::Date).set_row_col(&[1, 2]).unwrap(),
            ]),
        );
        project.prepare().unwrap();
        let model = RenderModel::for_document(Arc::new(project), 0, BTreeMap::new());

        let out = env()
            .render_str(
                "{% for row in grid %}[{% for f in row %}{{ f.name }}:{{ f.uiType }} {% endfor %}]{% endfor %}",
                context(&model),
            )
            .unwrap();
        assert_eq!(out, "[title:string due:date ][state:string ]");
    }

    #[test]
    fn project_scope_context_has_no_document() {
        let env = env();
        let model = RenderModel::for_project(project());
        let out = env
            .render_str("{{ projectName }}-{{ doc is defined }}", context(&model))
            .unwrap();
        assert_eq!(out, "tracker-false");
    }
}
