//! UI markup projection.
//!
//! Turns a [`Field`] into the widget snippet inserted into generated forms.
//! Dispatch runs on [`Field::effective_ui_type`]; a type without a widget
//! yields a visible placeholder instead of an error so a misconfigured field
//! is easy to spot in the generated file.

use serde::Serialize;
use tracing::trace;

use super::{Field, UiType};
use crate::domain::{error::DomainError, project::Project};

/// Render the UI widget markup for `field`.
///
/// `project` is only consulted for fields rendered by a composer, which
/// receive the project and the field's owning document.
///
/// # Errors
///
/// - [`DomainError::MissingComposer`] when the effective type is a
///   composition but no composer is attached.
/// - [`DomainError::DetachedField`] / [`DomainError::DocumentNotFound`] when a
///   composer needs the owning document and it cannot be found.
pub fn ui_markup(project: &Project, field: &Field) -> Result<String, DomainError> {
    let name = field.ui.name.as_deref().unwrap_or(&field.name);
    let label = field.ui.label.as_deref().unwrap_or(&field.label);
    let ui_type = field.effective_ui_type();
    trace!(field = %field.name, %ui_type, "projecting field");

    let markup = match &ui_type {
        UiType::String | UiType::Text => format!(
            r#"<q-input outlined type='text' v-model="item.{name}" label="{label}" autogrow/>"#
        ),
        UiType::Int | UiType::Double => format!(
            r#"<q-input outlined type='number' v-model="item.{name}" label="{label}"/>"#
        ),
        UiType::Date => format!(
            r#"<comp-fld-date label="{label}" :date-string="$utils.formatPgDate(item.{name})" @update="v=> item.{name} = v"/>"#
        ),
        UiType::Datetime => format!(
            r#"<comp-fld-date-time label="{label}" :date-string="$utils.formatPgDateTime(item.{name})" @update="v=> item.{name} = v"/>"#
        ),
        UiType::Ref => reference_markup(field, name, label)?,
        UiType::Select | UiType::MultipleSelect => {
            // An unset option list is `null` in the generated markup.
            let options = if field.ui.options.is_empty() {
                "null".to_string()
            } else {
                attr_json(field, "options", &field.ui.options)?
            };
            let multiple = if ui_type == UiType::MultipleSelect {
                "multiple"
            } else {
                ""
            };
            format!(
                "<q-select outlined label=\"{label}\" v-model='item.{name}' :options='{options}' {multiple}/>"
            )
        }
        UiType::VueComposition => compose(project, field)?,
        other => format!("not found vueFldTemplate for type `{}`", other),
    };
    Ok(markup)
}

fn reference_markup(field: &Field, name: &str, label: &str) -> Result<String, DomainError> {
    let target = field.reference().unwrap_or_default();
    let title_key = field
        .ui
        .ext
        .get("ajaxSelectTitle")
        .cloned()
        .unwrap_or_else(|| format!("{target}_title"));
    let pg_method = field
        .ui
        .ext
        .get("pgMethod")
        .cloned()
        .unwrap_or_else(|| format!("{target}_list"));
    let ext = attr_json(field, "ext", &field.ui.ext)?;

    Ok(format!(
        r#"<comp-fld-ref-search pgMethod="{pg_method}" label="{label}" :item='item.{title_key}' :ext='{ext}' @update="v=> item.{name} = v.id" />"#
    ))
}

/// Compact JSON for an HTML attribute value, with `<`, `>` and `&` written
/// as `\u003c`, `\u003e` and `\u0026`.
fn attr_json<T: Serialize + ?Sized>(
    field: &Field,
    what: &'static str,
    value: &T,
) -> Result<String, DomainError> {
    let json = serde_json::to_string(value).map_err(|e| DomainError::Serialization {
        field: field.name.clone(),
        what,
        reason: e.to_string(),
    })?;
    // The three characters can only occur inside JSON strings.
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

fn compose(project: &Project, field: &Field) -> Result<String, DomainError> {
    let composition = field
        .ui
        .composition
        .as_ref()
        .ok_or_else(|| DomainError::MissingComposer {
            field: field.name.clone(),
        })?;
    let owner = field.owner.as_ref().ok_or_else(|| DomainError::DetachedField {
        field: field.name.clone(),
    })?;
    let document = project.document(&owner.document)?;
    Ok(composition.compose(project, document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        field::{FieldType, SelectOption},
        project::{Document, Project},
    };

    fn project_with(fields: Vec<Field>) -> Project {
        let mut project = Project::new("demo", "/out");
        project
            .documents
            .push(Document::new("task", "Task").with_fields(fields));
        project.prepare().unwrap();
        project
    }

    fn markup(field: Field) -> String {
        let project = project_with(vec![field]);
        ui_markup(&project, &project.documents[0].fields[0]).unwrap()
    }

    #[test]
    fn text_input_for_strings() {
        let out = markup(Field::new("title", "Title", FieldType::String));
        assert_eq!(
            out,
            r#"<q-input outlined type='text' v-model="item.title" label="Title" autogrow/>"#
        );
    }

    #[test]
    fn ui_name_and_label_overrides_are_used() {
        let mut fld = Field::new("title", "Title", FieldType::Double).set_ui_name("amount");
        fld.ui.label = Some("Amount".into());
        assert_eq!(
            markup(fld),
            r#"<q-input outlined type='number' v-model="item.amount" label="Amount"/>"#
        );
    }

    #[test]
    fn date_and_datetime_pickers() {
        let date = markup(Field::new("due", "Due", FieldType::Date));
        assert_eq!(
            date,
            r#"<comp-fld-date label="Due" :date-string="$utils.formatPgDate(item.due)" @update="v=> item.due = v"/>"#
        );
        let dt = markup(Field::new("at", "At", FieldType::Datetime));
        assert!(dt.starts_with("<comp-fld-date-time label=\"At\""));
        assert!(dt.contains("$utils.formatPgDateTime(item.at)"));
    }

    #[test]
    fn override_wins_over_semantic_type() {
        let fld = Field::new("title", "Title", FieldType::String).set_ui_type("date");
        assert!(markup(fld).starts_with("<comp-fld-date label=\"Title\""));
    }

    #[test]
    fn reference_uses_default_lookup_names() {
        let fld = Field::new("assignee", "Assignee", FieldType::Int).set_reference("user");
        assert_eq!(
            markup(fld),
            r#"<comp-fld-ref-search pgMethod="user_list" label="Assignee" :item='item.user_title' :ext='{}' @update="v=> item.assignee = v.id" />"#
        );
    }

    #[test]
    fn reference_ext_overrides_are_verbatim() {
        let fld = Field::new("assignee", "Assignee", FieldType::Int)
            .set_reference("user")
            .set_ext("pgMethod", "user_list_active")
            .set_ext("ajaxSelectTitle", "assignee_name");
        let out = markup(fld);
        assert!(out.contains(r#"pgMethod="user_list_active""#));
        assert!(out.contains(":item='item.assignee_name'"));
        assert!(out.contains(
            r#":ext='{"ajaxSelectTitle":"assignee_name","pgMethod":"user_list_active"}'"#
        ));
    }

    #[test]
    fn select_serializes_options() {
        let fld = Field::new("state", "State", FieldType::String)
            .set_ui_type("select")
            .set_options(vec![SelectOption::new("Open", "open")]);
        assert_eq!(
            markup(fld),
            r#"<q-select outlined label="State" v-model='item.state' :options='[{"label":"Open","value":"open"}]' />"#
        );
    }

    #[test]
    fn multiple_select_adds_flag() {
        let fld = Field::new("tags", "Tags", FieldType::TextArray).set_ui_type("multipleSelect");
        assert!(markup(fld).ends_with(":options='null' multiple/>"));
    }

    #[test]
    fn attribute_json_escapes_markup_characters() {
        let fld = Field::new("client_id", "Client", FieldType::Int)
            .set_reference("client")
            .set_ext("ajaxSelectTitle", "<b>name</b> & co")
            .set_ext("pgMethod", "client_list");
        assert!(markup(fld).contains(
            r#":ext='{"ajaxSelectTitle":"\u003cb\u003ename\u003c/b\u003e \u0026 co","pgMethod":"client_list"}'"#
        ));

        let fld = Field::new("kind", "Kind", FieldType::String)
            .set_ui_type("select")
            .set_options(vec![SelectOption::new("A & B", "a<b")]);
        assert!(markup(fld).contains(
            r#":options='[{"label":"A \u0026 B","value":"a\u003cb"}]'"#
        ));
    }

    #[test]
    fn composer_receives_owning_document() {
        let fld = Field::new("data", "Data", FieldType::Jsonb)
            .set_composer(|p: &Project, d: &Document| format!("<x p='{}' d='{}'/>", p.name, d.name));
        assert_eq!(markup(fld), "<x p='demo' d='task'/>");
    }

    #[test]
    fn composition_without_composer_is_fatal() {
        let project = project_with(vec![Field::new("h", "H", FieldType::VueComposition)]);
        let err = ui_markup(&project, &project.documents[0].fields[0]).unwrap_err();
        assert_eq!(err, DomainError::MissingComposer { field: "h".into() });
    }

    #[test]
    fn unknown_types_yield_placeholder() {
        assert_eq!(
            markup(Field::new("n", "N", FieldType::Int64)),
            "not found vueFldTemplate for type `int64`"
        );
        let fld = Field::new("c", "C", FieldType::String).set_ui_type("colorPicker");
        assert_eq!(markup(fld), "not found vueFldTemplate for type `colorPicker`");
    }
}
