//! Field model.
//!
//! A [`Field`] describes one attribute of a document together with its two
//! projections: how it is edited in the UI ([`UiProjection`]) and how it is
//! stored ([`StorageProjection`]).
//!
//! Fields are plain values. Every builder consumes `self` and returns the
//! modified copy, so a field literal cloned into several documents never
//! aliases.

pub mod projector;
pub mod shortcuts;

use std::{collections::BTreeMap, fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    project::{Document, Project},
};

// ============================================================================
// Semantic type
// ============================================================================

/// Semantic type of a field. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    #[serde(rename = "string")]
    String,
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "int64")]
    Int64,
    #[serde(rename = "double")]
    Double,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "datetime")]
    Datetime,
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "jsonb")]
    Jsonb,
    #[serde(rename = "uuid")]
    Uuid,
    #[serde(rename = "text[]")]
    TextArray,
    #[serde(rename = "int[]")]
    IntArray,
    #[serde(rename = "vueComposition")]
    VueComposition,
}

impl FieldType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Int => "int",
            Self::Int64 => "int64",
            Self::Double => "double",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Bool => "bool",
            Self::Jsonb => "jsonb",
            Self::Uuid => "uuid",
            Self::TextArray => "text[]",
            Self::IntArray => "int[]",
            Self::VueComposition => "vueComposition",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// UI type
// ============================================================================

/// Widget type used by the UI projection.
///
/// Covers the semantic types (a field without an override falls back to its
/// semantic type), the widget-only types, and `Other` for anything unknown.
/// Unknown types are kept verbatim so the projector can print them in its
/// placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UiType {
    String,
    Text,
    Int,
    Int64,
    Double,
    Date,
    Datetime,
    Bool,
    Jsonb,
    Uuid,
    TextArray,
    IntArray,
    VueComposition,
    Ref,
    Select,
    MultipleSelect,
    Tags,
    Checkbox,
    Radio,
    DadataAddress,
    JsonList,
    Files,
    ImgList,
    Img,
    Other(String),
}

impl UiType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Int => "int",
            Self::Int64 => "int64",
            Self::Double => "double",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Bool => "bool",
            Self::Jsonb => "jsonb",
            Self::Uuid => "uuid",
            Self::TextArray => "text[]",
            Self::IntArray => "int[]",
            Self::VueComposition => "vueComposition",
            Self::Ref => "ref",
            Self::Select => "select",
            Self::MultipleSelect => "multipleSelect",
            Self::Tags => "tags",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::DadataAddress => "dadataAddress",
            Self::JsonList => "jsonList",
            Self::Files => "files",
            Self::ImgList => "imgList",
            Self::Img => "img",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for UiType {
    fn from(s: &str) -> Self {
        match s {
            "string" => Self::String,
            "text" => Self::Text,
            "int" => Self::Int,
            "int64" => Self::Int64,
            "double" => Self::Double,
            "date" => Self::Date,
            "datetime" => Self::Datetime,
            "bool" => Self::Bool,
            "jsonb" => Self::Jsonb,
            "uuid" => Self::Uuid,
            "text[]" => Self::TextArray,
            "int[]" => Self::IntArray,
            "vueComposition" => Self::VueComposition,
            "ref" => Self::Ref,
            "select" => Self::Select,
            "multipleSelect" => Self::MultipleSelect,
            "tags" => Self::Tags,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "dadataAddress" => Self::DadataAddress,
            "jsonList" => Self::JsonList,
            "files" => Self::Files,
            "imgList" => Self::ImgList,
            "img" => Self::Img,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for UiType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<UiType> for String {
    fn from(t: UiType) -> Self {
        t.as_str().to_string()
    }
}

impl From<FieldType> for UiType {
    fn from(t: FieldType) -> Self {
        Self::from(t.as_str())
    }
}

impl fmt::Display for UiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Custom composition
// ============================================================================

/// Strategy that renders a field's UI markup itself.
///
/// Any `Fn(&Project, &Document) -> String` closure is a composer.
pub trait UiComposer: Send + Sync {
    fn compose(&self, project: &Project, document: &Document) -> String;
}

impl<F> UiComposer for F
where
    F: Fn(&Project, &Document) -> String + Send + Sync,
{
    fn compose(&self, project: &Project, document: &Document) -> String {
        self(project, document)
    }
}

/// Shared handle to a [`UiComposer`].
///
/// Cloning a field clones the handle, not the strategy. Two compositions are
/// equal only when they point at the same strategy.
#[derive(Clone)]
pub struct Composition(Arc<dyn UiComposer>);

impl Composition {
    pub fn new(composer: impl UiComposer + 'static) -> Self {
        Self(Arc::new(composer))
    }

    pub fn compose(&self, project: &Project, document: &Document) -> String {
        self.0.compose(project, document)
    }
}

impl fmt::Debug for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Composition(..)")
    }
}

impl PartialEq for Composition {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

// ============================================================================
// Projections
// ============================================================================

/// One entry of a select/radio options list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: serde_json::Value,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Nested field list edited by a `jsonList` widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonListSpec {
    pub fields: Vec<Field>,
    pub icon: String,
}

/// How a field is edited in the generated UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiProjection {
    /// Model attribute name when it differs from the field name.
    pub name: Option<String>,
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub ui_type: Option<UiType>,
    pub row_col: Vec<[u32; 2]>,
    pub class: Vec<String>,
    pub options: Vec<SelectOption>,
    pub required: bool,
    pub borderless: bool,
    /// `"true"`, `"false"` or a JS expression.
    pub readonly: Option<String>,
    pub ext: BTreeMap<String, String>,
    pub v_if: Option<String>,
    pub json_list: Option<JsonListSpec>,
    #[serde(skip)]
    pub composition: Option<Composition>,
}

impl UiProjection {
    /// All classes joined by a space.
    pub fn class_print(&self) -> String {
        self.class.join(" ")
    }

    /// Only the `col-*` width classes, joined by a space.
    pub fn class_print_only_col(&self) -> String {
        self.class
            .iter()
            .filter(|c| c.starts_with("col-"))
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// How a field is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageProjection {
    pub size: u32,
    pub required: bool,
    pub unique: bool,
    pub default: Option<String>,
    /// Name of the referenced document.
    pub reference: Option<String>,
    pub search: bool,
    /// Stored inside the `options` json column instead of its own column.
    pub option_field: bool,
    pub not_updatable: bool,
    /// Expression evaluated by the before-write trigger, e.g. `new.fullname`.
    pub trigger_value: Option<String>,
}

/// Non-owning back-reference to the document a field belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOwner {
    pub document: String,
    pub position: usize,
}

// ============================================================================
// Field
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    #[serde(default)]
    pub ui: UiProjection,
    #[serde(default)]
    pub storage: StorageProjection,
    /// Set by [`Project::prepare`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<FieldOwner>,
}

impl Field {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            ui: UiProjection::default(),
            storage: StorageProjection::default(),
            owner: None,
        }
    }

    pub fn kind(&self) -> FieldType {
        self.kind
    }

    /// Referenced document, if any.
    pub fn reference(&self) -> Option<&str> {
        self.storage.reference.as_deref().filter(|r| !r.is_empty())
    }

    fn owner_name(&self) -> &str {
        self.owner.as_ref().map_or("", |o| o.document.as_str())
    }

    // ------------------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------------------

    /// Set the layout position. A third number replaces every `col-*` class
    /// with `col-<n>`.
    pub fn set_row_col(mut self, numbers: &[u32]) -> Result<Self, DomainError> {
        let [row, col, rest @ ..] = numbers else {
            return Err(DomainError::InvalidRowCol {
                document: self.owner_name().to_string(),
                field: self.name.clone(),
                given: numbers.to_vec(),
            });
        };
        self.ui.row_col = vec![[*row, *col]];
        if let Some(width) = rest.first() {
            self.ui.class = self
                .ui
                .class
                .into_iter()
                .map(|c| {
                    if c.starts_with("col-") {
                        format!("col-{width}")
                    } else {
                        c
                    }
                })
                .collect();
        }
        Ok(self)
    }

    /// Required in both storage and UI.
    pub fn set_required(mut self) -> Self {
        self.storage.required = true;
        self.ui.required = true;
        self
    }

    pub fn set_unique(mut self) -> Self {
        self.storage.unique = true;
        self
    }

    pub fn set_search(mut self) -> Self {
        self.storage.search = true;
        self
    }

    pub fn set_option_field(mut self) -> Self {
        self.storage.option_field = true;
        self
    }

    pub fn set_default(mut self, expr: impl Into<String>) -> Self {
        self.storage.default = Some(expr.into());
        self
    }

    pub fn set_size(mut self, size: u32) -> Self {
        self.storage.size = size;
        self
    }

    pub fn set_reference(mut self, document: impl Into<String>) -> Self {
        self.storage.reference = Some(document.into());
        self
    }

    pub fn set_not_updatable(mut self) -> Self {
        self.storage.not_updatable = true;
        self
    }

    pub fn set_trigger_value(mut self, expr: impl Into<String>) -> Self {
        self.storage.trigger_value = Some(expr.into());
        self
    }

    pub fn set_borderless(mut self) -> Self {
        self.ui.borderless = true;
        self
    }

    pub fn add_class(mut self, class: impl Into<String>) -> Self {
        self.ui.class.push(class.into());
        self
    }

    /// Either `"true"`/`"false"` or an expression like `() => item !== 'a'`.
    pub fn set_readonly(mut self, expr: impl Into<String>) -> Self {
        self.ui.readonly = Some(expr.into());
        self
    }

    pub fn set_v_if(mut self, expr: impl Into<String>) -> Self {
        self.ui.v_if = Some(expr.into());
        self
    }

    pub fn set_ui_type(mut self, ui_type: impl Into<UiType>) -> Self {
        self.ui.ui_type = Some(ui_type.into());
        self
    }

    pub fn set_ui_name(mut self, name: impl Into<String>) -> Self {
        self.ui.name = Some(name.into());
        self
    }

    pub fn set_ext(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.ui.ext.insert(key.into(), value.into());
        self
    }

    pub fn set_options(mut self, options: Vec<SelectOption>) -> Self {
        self.ui.options = options;
        self
    }

    pub fn set_composer(mut self, composer: impl UiComposer + 'static) -> Self {
        self.ui.composition = Some(Composition::new(composer));
        self
    }

    // ------------------------------------------------------------------------
    // Projections
    // ------------------------------------------------------------------------

    /// UI type after override and fallback resolution.
    ///
    /// Priority: explicit override, then an attached composer, then the
    /// semantic type (an `int` carrying a reference becomes `ref`).
    pub fn effective_ui_type(&self) -> UiType {
        if let Some(ui_type) = &self.ui.ui_type {
            return ui_type.clone();
        }
        if self.ui.composition.is_some() {
            return UiType::VueComposition;
        }
        if self.kind == FieldType::Int && self.reference().is_some() {
            return UiType::Ref;
        }
        UiType::from(self.kind)
    }

    /// Column line for the storage model file.
    pub fn schema_declaration(&self) -> String {
        let type_token = match self.kind {
            FieldType::String if self.storage.size > 0 => {
                format!("type=\"char\",\tsize={}", self.storage.size)
            }
            FieldType::String => r#"type="text""#.to_string(),
            FieldType::Int64 => r#"type="int""#.to_string(),
            FieldType::Date | FieldType::Datetime => r#"type="timestamp""#.to_string(),
            other => format!("type=\"{}\"", other),
        };

        let mut clause = String::new();
        if self.storage.required {
            clause.push_str("not null");
        }
        if let Some(default) = self.storage.default.as_deref().filter(|d| !d.is_empty()) {
            clause.push_str(" default ");
            clause.push_str(default);
        }
        let ext = if clause.is_empty() {
            String::new()
        } else {
            format!(" \text=\"{}\",", clause)
        };

        format!(
            "\t{{name=\"{}\",\t\t\t\t\t{},{}\t comment=\"{}\"}}",
            self.name, type_token, ext, self.label
        )
    }

    /// Argument type of the insert procedure.
    pub fn insert_type(&self) -> &'static str {
        match self.kind {
            FieldType::Double => "double precision",
            FieldType::String => "text",
            FieldType::Date | FieldType::Datetime => "timestamp",
            FieldType::Int64 => "int",
            other => other.as_str(),
        }
    }

    /// Argument type of the update procedure.
    ///
    /// Unlike [`Field::insert_type`], arrays collapse to the json array
    /// tokens the update procedure expects.
    pub fn update_type(&self) -> &'static str {
        match self.kind {
            FieldType::Int | FieldType::Int64 | FieldType::Double => "number",
            FieldType::String => "text",
            FieldType::Date | FieldType::Datetime => "timestamp",
            FieldType::TextArray => "jsonArrayText",
            FieldType::IntArray => "jsonArrayInt",
            other => other.as_str(),
        }
    }

    /// Type of the field in the generated backend model.
    pub fn backend_type(&self) -> &'static str {
        match self.kind {
            FieldType::Double => "float64",
            FieldType::IntArray => "[]int",
            FieldType::TextArray => "[]string",
            FieldType::Date | FieldType::Datetime => "string",
            other => other.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title() -> Field {
        Field::new("title", "Title", FieldType::String)
    }

    #[test]
    fn builders_return_copies() {
        let base = title().add_class("col-4");
        let required = base.clone().set_required();

        assert!(!base.storage.required);
        assert!(required.storage.required);
        assert!(required.ui.required);
    }

    #[test]
    fn set_row_col_needs_two_numbers() {
        let err = title().set_row_col(&[1]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidRowCol { ref given, .. } if given == &[1]));
        assert!(title().set_row_col(&[]).is_err());
    }

    #[test]
    fn set_row_col_third_number_replaces_width_class() {
        let fld = title()
            .add_class("col-4")
            .add_class("q-mb-md")
            .set_row_col(&[2, 3, 6])
            .unwrap();

        assert_eq!(fld.ui.row_col, vec![[2, 3]]);
        assert_eq!(fld.ui.class, vec!["col-6", "q-mb-md"]);
    }

    #[test]
    fn class_print_variants() {
        let fld = title().add_class("col-4").add_class("bordered");
        assert_eq!(fld.ui.class_print(), "col-4 bordered");
        assert_eq!(fld.ui.class_print_only_col(), "col-4");
        assert_eq!(title().ui.class_print(), "");
    }

    #[test]
    fn effective_ui_type_prefers_override() {
        let fld = Field::new("status", "Status", FieldType::Int)
            .set_reference("user")
            .set_ui_type("select");
        assert_eq!(fld.effective_ui_type(), UiType::Select);
    }

    #[test]
    fn effective_ui_type_int_with_reference_is_ref() {
        let fld = Field::new("assignee", "Assignee", FieldType::Int).set_reference("user");
        assert_eq!(fld.effective_ui_type(), UiType::Ref);

        let empty = Field::new("n", "N", FieldType::Int).set_reference("");
        assert_eq!(empty.effective_ui_type(), UiType::Int);
    }

    #[test]
    fn effective_ui_type_composer_beats_semantic_type() {
        let fld = Field::new("data", "Data", FieldType::Jsonb)
            .set_composer(|_: &Project, _: &Document| "<x/>".to_string());
        assert_eq!(fld.effective_ui_type(), UiType::VueComposition);
    }

    #[test]
    fn schema_declaration_sized_string() {
        let fld = title().set_size(150).set_required();
        assert_eq!(
            fld.schema_declaration(),
            "\t{name=\"title\",\t\t\t\t\ttype=\"char\",\tsize=150, \text=\"not null\",\t comment=\"Title\"}"
        );
    }

    #[test]
    fn schema_declaration_default_without_required() {
        let fld = Field::new("count", "Count", FieldType::Int64).set_default("0");
        assert_eq!(
            fld.schema_declaration(),
            "\t{name=\"count\",\t\t\t\t\ttype=\"int\", \text=\" default 0\",\t comment=\"Count\"}"
        );
    }

    #[test]
    fn schema_declaration_dates_and_plain_types() {
        let date = Field::new("due", "Due", FieldType::Datetime);
        assert!(date.schema_declaration().contains(r#"type="timestamp","#));

        let text = title();
        assert!(text.schema_declaration().contains(r#"type="text","#));

        let flag = Field::new("done", "Done", FieldType::Bool);
        assert_eq!(
            flag.schema_declaration(),
            "\t{name=\"done\",\t\t\t\t\ttype=\"bool\",\t comment=\"Done\"}"
        );
    }

    #[test]
    fn insert_and_update_types() {
        let cases = [
            (FieldType::Double, "double precision", "number"),
            (FieldType::String, "text", "text"),
            (FieldType::Date, "timestamp", "timestamp"),
            (FieldType::Int64, "int", "number"),
            (FieldType::Int, "int", "number"),
            (FieldType::TextArray, "text[]", "jsonArrayText"),
            (FieldType::IntArray, "int[]", "jsonArrayInt"),
            (FieldType::Jsonb, "jsonb", "jsonb"),
        ];
        for (kind, insert, update) in cases {
            let fld = Field::new("f", "F", kind);
            assert_eq!(fld.insert_type(), insert, "insert type of {kind}");
            assert_eq!(fld.update_type(), update, "update type of {kind}");
        }
    }

    #[test]
    fn backend_types() {
        assert_eq!(Field::new("f", "F", FieldType::Double).backend_type(), "float64");
        assert_eq!(Field::new("f", "F", FieldType::IntArray).backend_type(), "[]int");
        assert_eq!(Field::new("f", "F", FieldType::Date).backend_type(), "string");
        assert_eq!(Field::new("f", "F", FieldType::Bool).backend_type(), "bool");
    }

    #[test]
    fn ui_type_round_trips_unknown_names() {
        let t = UiType::from("colorPicker");
        assert_eq!(t, UiType::Other("colorPicker".into()));
        assert_eq!(t.as_str(), "colorPicker");
        assert_eq!(UiType::from("multipleSelect"), UiType::MultipleSelect);
    }

    #[test]
    fn field_deserializes_from_json() {
        let fld: Field = serde_json::from_str(
            r#"{"name":"tags","label":"Tags","type":"text[]","ui":{"type":"tags","ext":{"onlyExistTags":"true"}}}"#,
        )
        .unwrap();
        assert_eq!(fld.kind(), FieldType::TextArray);
        assert_eq!(fld.effective_ui_type(), UiType::Tags);
        assert_eq!(fld.ui.ext["onlyExistTags"], "true");
    }
}
