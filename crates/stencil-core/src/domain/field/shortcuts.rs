//! Convenience constructors for the common field shapes.
//!
//! Every constructor starts from the `col-4` width class and no layout
//! position; chain [`Field::set_row_col`] to place the field.

use std::collections::BTreeMap;

use super::{Field, FieldType, JsonListSpec, SelectOption, UiType};
use crate::domain::{
    error::DomainError,
    project::{Document, Project},
};

pub const DEFAULT_CLASS: &str = "col-4";

fn base(name: &str, label: &str, kind: FieldType) -> Field {
    Field::new(name, label, kind).add_class(DEFAULT_CLASS)
}

/// Required, unique, searchable `title` column.
pub fn title() -> Field {
    let mut fld = base("title", "title", FieldType::String)
        .set_required()
        .set_unique()
        .set_search()
        .set_size(150);
    fld.ui.row_col = vec![[1, 1]];
    fld
}

/// `title` filled by the before-write trigger from `expr`.
pub fn title_computed(expr: &str) -> Field {
    Field::new("title", "title", FieldType::String)
        .set_search()
        .set_trigger_value(expr)
}

pub fn string(name: &str, label: &str, size: u32) -> Field {
    base(name, label, FieldType::String)
        .set_size(size)
        .set_readonly("false")
}

pub fn text(name: &str, label: &str) -> Field {
    base(name, label, FieldType::Text)
}

pub fn int(name: &str, label: &str) -> Field {
    base(name, label, FieldType::Int)
}

pub fn int64(name: &str, label: &str) -> Field {
    base(name, label, FieldType::Int64)
}

pub fn double(name: &str, label: &str) -> Field {
    base(name, label, FieldType::Double)
}

pub fn uuid(name: &str, label: &str) -> Field {
    base(name, label, FieldType::Uuid)
}

pub fn date(name: &str, label: &str) -> Field {
    base(name, label, FieldType::Date)
}

pub fn datetime(name: &str, label: &str) -> Field {
    base(name, label, FieldType::Datetime)
}

pub fn checkbox(name: &str, label: &str) -> Field {
    base(name, label, FieldType::Bool)
        .set_ui_type(UiType::Checkbox)
        .set_readonly("false")
}

pub fn radio(name: &str, label: &str, options: Vec<SelectOption>) -> Field {
    base(name, label, FieldType::String)
        .set_size(50)
        .set_ui_type(UiType::Radio)
        .set_options(options)
        .set_readonly("false")
}

/// Options for [`reference`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RefOptions {
    /// Show an avatar linking to the referenced document. The link target
    /// is filled in by [`Project::prepare`].
    pub show_link: bool,
    pub clearable: bool,
}

/// Integer foreign key to `target`.
pub fn reference(name: &str, label: &str, target: &str, options: RefOptions) -> Field {
    let mut fld = base(name, label, FieldType::Int)
        .set_reference(target)
        .set_search();
    if options.show_link {
        fld = fld.set_ext("pathUrl", "").set_ext("avatar", "");
    }
    if options.clearable {
        fld = fld.set_ext("isClearable", "true");
    }
    fld
}

/// Json field edited by a custom component `component`.
///
/// With `option_field` the component binds to `item.options.<name>`.
pub fn jsonb_composition(
    name: &str,
    label: &str,
    component: &str,
    params: &[&str],
    option_field: bool,
) -> Field {
    let prefix = if option_field { "options." } else { "" };
    let markup = format!(
        "<{component} :fld='item.{prefix}{name}' :item='item' @update='item.{prefix}{name} = $event' label='{label}' {}/>",
        params.join(" ")
    );
    let fld = base(name, label, FieldType::Jsonb)
        .set_composer(move |_: &Project, _: &Document| markup.clone());
    if option_field {
        fld.set_option_field()
    } else {
        fld
    }
}

/// Static html inserted into the form as is.
pub fn simple_html(class: &str, html: &str) -> Field {
    let html = html.to_string();
    Field::new("", "", FieldType::VueComposition)
        .add_class(class)
        .set_composer(move |_: &Project, _: &Document| html.clone())
}

pub fn select(
    name: &str,
    label: &str,
    size: u32,
    options: Vec<SelectOption>,
    clearable: bool,
) -> Field {
    let fld = base(name, label, FieldType::String)
        .set_size(size)
        .set_ui_type(UiType::Select)
        .set_options(options)
        .set_readonly("false");
    if clearable {
        fld.set_ext("isClearable", "true")
    } else {
        fld
    }
}

pub fn multi_select(name: &str, label: &str, options: Vec<SelectOption>, clearable: bool) -> Field {
    let fld = base(name, label, FieldType::TextArray)
        .set_ui_type(UiType::MultipleSelect)
        .set_options(options)
        .set_readonly("false");
    if clearable {
        fld.set_ext("isClearable", "true")
    } else {
        fld
    }
}

/// Tag list. With `only_existing` users may not create new tags.
pub fn tags(name: &str, label: &str, only_existing: bool) -> Field {
    base(name, label, FieldType::TextArray)
        .set_ui_type(UiType::Tags)
        .set_ext("onlyExistTags", only_existing.to_string())
}

pub fn dadata_address(name: &str, label: &str) -> Field {
    base(name, label, FieldType::Jsonb).set_ui_type(UiType::DadataAddress)
}

pub fn json_list(name: &str, label: &str, list: JsonListSpec) -> Field {
    let mut fld = base(name, label, FieldType::Jsonb).set_ui_type(UiType::JsonList);
    fld.ui.json_list = Some(list);
    fld
}

/// Upload constraints for [`files`].
#[derive(Debug, Clone, Default)]
pub struct FileParams {
    pub accept: String,
    pub max_file_size: u64,
}

pub fn files(name: &str, label: &str, params: &FileParams) -> Field {
    let mut fld = base(name, label, FieldType::Jsonb).set_ui_type(UiType::Files);
    fld.ui.ext = upload_ext(&params.accept, params.max_file_size);
    fld
}

/// Upload constraints for [`image`] and [`image_list`].
#[derive(Debug, Clone, Default)]
pub struct ImageParams {
    pub accept: String,
    pub max_file_size: u64,
    /// `"<width>x<height>"`, e.g. `"300x400"`.
    pub crop: String,
    pub width: u32,
    pub can_add_urls: bool,
}

/// Gallery stored as json.
///
/// # Errors
///
/// [`DomainError::InvalidCrop`] when `params.crop` is set but malformed.
pub fn image_list(name: &str, label: &str, params: &ImageParams) -> Result<Field, DomainError> {
    let mut fld = base(name, label, FieldType::Jsonb).set_ui_type(UiType::ImgList);
    fld.ui.ext = image_ext(name, params)?;
    Ok(fld)
}

/// Single image stored as its url.
///
/// # Errors
///
/// [`DomainError::InvalidCrop`] when `params.crop` is set but malformed.
pub fn image(name: &str, label: &str, params: &ImageParams) -> Result<Field, DomainError> {
    let mut fld = base(name, label, FieldType::String)
        .set_size(500)
        .set_ui_type(UiType::Img);
    fld.ui.ext = image_ext(name, params)?;
    Ok(fld)
}

fn upload_ext(accept: &str, max_file_size: u64) -> BTreeMap<String, String> {
    let mut ext = BTreeMap::new();
    if !accept.is_empty() {
        ext.insert("accept".to_string(), accept.to_string());
    }
    if max_file_size > 0 {
        ext.insert("maxFileSize".to_string(), max_file_size.to_string());
    }
    ext
}

fn image_ext(field: &str, params: &ImageParams) -> Result<BTreeMap<String, String>, DomainError> {
    let mut ext = upload_ext(&params.accept, params.max_file_size);
    if params.can_add_urls {
        ext.insert("canAddUrls".to_string(), "true".to_string());
    }
    if !params.crop.is_empty() {
        validate_crop(field, &params.crop)?;
        ext.insert("crop".to_string(), params.crop.clone());
    }
    if params.width > 0 {
        ext.insert("width".to_string(), params.width.to_string());
    }
    Ok(ext)
}

/// Check that `crop` is `"<int>x<int>"`.
pub fn validate_crop(field: &str, crop: &str) -> Result<(), DomainError> {
    let invalid = |reason: String| DomainError::InvalidCrop {
        field: field.to_string(),
        crop: crop.to_string(),
        reason,
    };
    let parts: Vec<&str> = crop.split('x').collect();
    let [width, height] = parts.as_slice() else {
        return Err(invalid(format!("expected 2 parts, got {}", parts.len())));
    };
    for part in [width, height] {
        part.parse::<i64>()
            .map_err(|_| invalid(format!("'{part}' is not a number")))?;
    }
    Ok(())
}
