//! Kind-specific markup for a single field.

use crate::field::{FieldKind, FieldModel};
use crate::render::markup::{Markup, Tag};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const FRACTIONAL_TYPES: &[&str] = &["float", "decimal", "double"];

/// MySQL `YEAR` range.
const YEAR_MIN: &str = "1901";
const YEAR_MAX: &str = "2155";

pub fn render_field(out: &mut Markup, field: &FieldModel) {
    match field.kind {
        FieldKind::Text => text_field(out, field),
        FieldKind::TextArea => text_area(out, field),
        FieldKind::Number => number_field(out, field),
        FieldKind::Dropdown => dropdown(out, field),
        FieldKind::Radio => radio_group(out, field),
        FieldKind::Date => date_field(out, field),
        FieldKind::Checkbox => checkbox(out, field),
        FieldKind::Password => password_field(out, field),
    }
}

fn base_input(field: &FieldModel, type_: &str) -> Tag {
    Tag::new("input")
        .attr("type", type_)
        .attr("id", &field.name)
        .attr("name", &field.name)
}

fn text_field(out: &mut Markup, field: &FieldModel) {
    out.void(
        &base_input(field, "text")
            .attr("maxlength", field.max_length.to_string())
            .attr_opt("value", field.default_value.as_deref())
            .flag("multiple", field.accepts_multiple)
            .flag("required", field.required),
    );
}

fn text_area(out: &mut Markup, field: &FieldModel) {
    let tag = Tag::new("textarea")
        .attr("id", &field.name)
        .attr("name", &field.name)
        .attr("maxlength", field.max_length.to_string())
        .flag("required", field.required);
    out.element(&tag, field.default_value.as_deref().unwrap_or(""));
}

fn number_field(out: &mut Markup, field: &FieldModel) {
    out.void(
        &base_input(field, "number")
            .attr_opt(
                "step",
                FRACTIONAL_TYPES.contains(&field.base_type.as_str()).then_some("any"),
            )
            .attr_opt("value", field.default_value.as_deref())
            .flag("required", field.required),
    );
}

fn options(field: &FieldModel) -> &[String] {
    field.possible_values.as_deref().unwrap_or(&[])
}

fn is_default(field: &FieldModel, value: &str) -> bool {
    field.default_value.as_deref() == Some(value)
}

fn dropdown(out: &mut Markup, field: &FieldModel) {
    out.open(
        &Tag::new("select")
            .attr("id", &field.name)
            .attr("name", &field.name)
            .flag("required", field.required),
    );
    if !field.required {
        out.element(&Tag::new("option").attr("value", ""), "");
    }
    for value in options(field) {
        out.element(
            &Tag::new("option")
                .attr("value", value)
                .flag("selected", is_default(field, value)),
            value,
        );
    }
    out.close("select");
}

fn radio_group(out: &mut Markup, field: &FieldModel) {
    for (i, value) in options(field).iter().enumerate() {
        let id = format!("{}_{}", field.name, i);
        out.void(
            &Tag::new("input")
                .attr("type", "radio")
                .attr("id", &id)
                .attr("name", &field.name)
                .attr("value", value)
                .flag("checked", is_default(field, value))
                .flag("required", field.required),
        );
        out.element(&Tag::new("label").attr("for", &id), value);
    }
}

fn date_field(out: &mut Markup, field: &FieldModel) {
    let value = field
        .default_value
        .as_deref()
        .and_then(|v| date_display_value(field, v));
    let tag = if field.base_type == "year" && !field.unix_timestamp {
        base_input(field, "number").attr("min", YEAR_MIN).attr("max", YEAR_MAX)
    } else {
        base_input(field, date_input_type(field))
    };
    out.void(&tag.attr_opt("value", value).flag("required", field.required));
}

/// HTML input type for a date-kind field.
pub fn date_input_type(field: &FieldModel) -> &'static str {
    if field.unix_timestamp {
        return "datetime-local";
    }
    match field.base_type.as_str() {
        "date" => "date",
        "time" => "time",
        "year" => "number",
        _ => "datetime-local",
    }
}

/// Column default converted to what the date input expects; `None` for
/// expressions such as `CURRENT_TIMESTAMP`.
fn date_display_value(field: &FieldModel, raw: &str) -> Option<String> {
    if field.unix_timestamp {
        let secs: i64 = raw.trim().parse().ok()?;
        return DateTime::<Utc>::from_timestamp(secs, 0).map(|d| d.format("%Y-%m-%dT%H:%M").to_string());
    }
    match field.base_type.as_str() {
        "date" => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .map(|d| d.format("%Y-%m-%d").to_string()),
        "time" => NaiveTime::parse_from_str(raw, "%H:%M:%S")
            .ok()
            .map(|t| t.format("%H:%M:%S").to_string()),
        "year" => raw.parse::<u16>().ok().map(|y| y.to_string()),
        _ => NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|d| d.format("%Y-%m-%dT%H:%M:%S").to_string()),
    }
}

fn checkbox(out: &mut Markup, field: &FieldModel) {
    let checked = field
        .default_value
        .as_deref()
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "on" | "yes"))
        .unwrap_or(false);
    out.void(&base_input(field, "checkbox").attr("value", "1").flag("checked", checked));
}

fn password_field(out: &mut Markup, field: &FieldModel) {
    out.void(
        &base_input(field, "password")
            .attr("maxlength", field.max_length.to_string())
            .flag("required", field.required),
    );
}
