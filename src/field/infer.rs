//! Column descriptor → field model. Pure; first matching rule wins.

use crate::error::FormError;
use crate::field::model::{FieldKind, FieldModel, DEFAULT_MAX_LENGTH};
use crate::schema::ColumnDescriptor;

/// SQL types rendered as date/time inputs.
pub const DATE_TYPES: &[&str] = &["date", "datetime", "timestamp", "time", "year"];

const NUMBER_TYPES: &[&str] = &[
    "int", "smallint", "mediumint", "bigint", "tinyint", "float", "decimal", "double",
];

/// Types whose argument is a character length used as `maxlength`.
const LENGTH_TYPES: &[&str] = &["varchar", "char"];

/// SQL type keyword without arguments or modifiers, lower-cased.
/// `enum('a','b')` → `enum`, `int(10) unsigned` → `int`, `bigint unsigned` → `bigint`.
pub fn base_type(raw_type: &str) -> String {
    let head = match raw_type.find('(') {
        Some(i) => &raw_type[..i],
        None => raw_type,
    };
    head.split_whitespace().next().unwrap_or("").to_lowercase()
}

/// Options of an `enum(...)` type in declaration order. `None` when there is no `(`.
pub fn parse_possible_values(raw_type: &str) -> Option<Vec<String>> {
    let start = raw_type.find('(')?;
    let args = raw_type[start..].trim();
    let args = args.strip_prefix('(').unwrap_or(args);
    let args = args.strip_suffix(')').unwrap_or(args);
    Some(
        args.split(',')
            .map(|v| {
                let v = v.trim();
                let v = v.strip_prefix('\'').unwrap_or(v);
                let v = v.strip_suffix('\'').unwrap_or(v);
                v.replace("''", "'")
            })
            .collect(),
    )
}

fn length_argument(raw_type: &str) -> Option<u32> {
    let start = raw_type.find('(')?;
    let end = raw_type[start..].find(')')? + start;
    raw_type[start + 1..end].trim().parse().ok()
}

/// Derive the field model for one column.
///
/// Fails only with [`FormError::MalformedEnumSpec`] when an `enum` type has no
/// argument list; every other column resolves to some kind, `Text` at worst.
pub fn infer(column: &ColumnDescriptor) -> Result<FieldModel, FormError> {
    let base = base_type(&column.raw_type);
    let enum_values = if base == "enum" {
        Some(parse_possible_values(&column.raw_type).ok_or_else(|| FormError::MalformedEnumSpec {
            column: column.name.clone(),
            raw_type: column.raw_type.clone(),
        })?)
    } else {
        None
    };

    let kind = classify(column, &base, enum_values.as_deref());
    let possible_values = if kind.has_options() {
        Some(enum_values.unwrap_or_default())
    } else {
        None
    };
    let max_length = if LENGTH_TYPES.contains(&base.as_str()) {
        length_argument(&column.raw_type).unwrap_or(DEFAULT_MAX_LENGTH)
    } else {
        DEFAULT_MAX_LENGTH
    };

    Ok(FieldModel {
        name: column.name.clone(),
        kind,
        label: None,
        required: !column.nullable,
        max_length,
        default_value: column.default_value.clone(),
        possible_values,
        accepts_multiple: base == "json" || column.flags.json,
        unix_timestamp: kind == FieldKind::Date && is_unix(column, &base),
        base_type: base,
    })
}

fn is_unix(column: &ColumnDescriptor, base: &str) -> bool {
    column.flags.unix && base == "bigint"
}

fn classify(column: &ColumnDescriptor, base: &str, enum_values: Option<&[String]>) -> FieldKind {
    if enum_values.map(|v| v.len() == 2).unwrap_or(false) {
        return FieldKind::Radio;
    }
    if column.name.to_lowercase().contains("password") {
        return FieldKind::Password;
    }
    if is_unix(column, base) || DATE_TYPES.contains(&base) {
        return FieldKind::Date;
    }
    if column.flags.boolean {
        return FieldKind::Checkbox;
    }
    match base {
        b if NUMBER_TYPES.contains(&b) => FieldKind::Number,
        "varchar" | "json" => FieldKind::Text,
        "text" | "longtext" => FieldKind::TextArea,
        "enum" => FieldKind::Dropdown,
        "bool" | "boolean" => FieldKind::Checkbox,
        _ => FieldKind::Text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnFlags;

    fn kind_of(col: ColumnDescriptor) -> FieldKind {
        infer(&col).unwrap().kind
    }

    #[test]
    fn test_base_type_strips_arguments_and_modifiers() {
        assert_eq!(base_type("enum('a','b')"), "enum");
        assert_eq!(base_type("INT(10) UNSIGNED"), "int");
        assert_eq!(base_type("bigint unsigned"), "bigint");
        assert_eq!(base_type("json"), "json");
    }

    #[test]
    fn test_two_valued_enum_is_radio() {
        let f = infer(&ColumnDescriptor::new("status", "enum('a','b')")).unwrap();
        assert_eq!(f.kind, FieldKind::Radio);
        assert_eq!(f.possible_values, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_three_valued_enum_is_dropdown_in_order() {
        let f = infer(&ColumnDescriptor::new("size", "enum('s','m','l')")).unwrap();
        assert_eq!(f.kind, FieldKind::Dropdown);
        assert_eq!(
            f.possible_values,
            Some(vec!["s".to_string(), "m".to_string(), "l".to_string()])
        );
    }

    #[test]
    fn test_enum_values_keep_duplicates_and_escaped_quotes() {
        let values = parse_possible_values("enum('it''s','x','x')").unwrap();
        assert_eq!(values, vec!["it's", "x", "x"]);
    }

    #[test]
    fn test_enum_without_arguments_is_malformed() {
        let err = infer(&ColumnDescriptor::new("size", "enum")).unwrap_err();
        assert!(matches!(err, FormError::MalformedEnumSpec { .. }));
    }

    #[test]
    fn test_password_name_wins_over_sql_type() {
        assert_eq!(kind_of(ColumnDescriptor::new("password", "varchar(60)")), FieldKind::Password);
        assert_eq!(kind_of(ColumnDescriptor::new("User_PASSWORD_hash", "text")), FieldKind::Password);
        assert_eq!(kind_of(ColumnDescriptor::new("passwordVersion", "int")), FieldKind::Password);
    }

    #[test]
    fn test_two_valued_enum_beats_password_name() {
        assert_eq!(
            kind_of(ColumnDescriptor::new("password_set", "enum('yes','no')")),
            FieldKind::Radio
        );
    }

    #[test]
    fn test_unix_flag_on_bigint_is_date() {
        let f = infer(&ColumnDescriptor::new("created_at", "bigint").comment("[unix]")).unwrap();
        assert_eq!(f.kind, FieldKind::Date);
        assert!(f.unix_timestamp);
    }

    #[test]
    fn test_unix_flag_on_int_is_number() {
        let f = infer(&ColumnDescriptor::new("created_at", "int").comment("[unix]")).unwrap();
        assert_eq!(f.kind, FieldKind::Number);
        assert!(!f.unix_timestamp);
    }

    #[test]
    fn test_date_types() {
        for t in ["date", "datetime", "timestamp", "time", "year", "DATETIME(6)"] {
            assert_eq!(kind_of(ColumnDescriptor::new("at", t)), FieldKind::Date, "{}", t);
        }
    }

    #[test]
    fn test_boolean_flag_is_checkbox() {
        let col = ColumnDescriptor::new("active", "tinyint(1)").with_flags(ColumnFlags {
            boolean: true,
            ..ColumnFlags::default()
        });
        assert_eq!(kind_of(col), FieldKind::Checkbox);
        assert_eq!(kind_of(ColumnDescriptor::new("active", "boolean")), FieldKind::Checkbox);
    }

    #[test]
    fn test_type_dispatch() {
        assert_eq!(kind_of(ColumnDescriptor::new("n", "decimal(10,2)")), FieldKind::Number);
        assert_eq!(kind_of(ColumnDescriptor::new("n", "varchar(20)")), FieldKind::Text);
        assert_eq!(kind_of(ColumnDescriptor::new("n", "longtext")), FieldKind::TextArea);
        assert_eq!(kind_of(ColumnDescriptor::new("n", "geometry")), FieldKind::Text);
    }

    #[test]
    fn test_age_tinyint_not_null() {
        let f = infer(&ColumnDescriptor::new("age", "tinyint").nullable(false)).unwrap();
        assert_eq!(f.kind, FieldKind::Number);
        assert!(f.required);
        assert_eq!(f.possible_values, None);
    }

    #[test]
    fn test_bio_text_nullable() {
        let f = infer(&ColumnDescriptor::new("bio", "text").nullable(true)).unwrap();
        assert_eq!(f.kind, FieldKind::TextArea);
        assert!(!f.required);
    }

    #[test]
    fn test_json_accepts_multiple_values() {
        let f = infer(&ColumnDescriptor::new("tags", "json")).unwrap();
        assert_eq!(f.kind, FieldKind::Text);
        assert!(f.accepts_multiple);
        assert!(f.is_json());
    }

    #[test]
    fn test_json_flag_on_text_column_accepts_multiple_values() {
        let f = infer(&ColumnDescriptor::new("keywords", "varchar(200)").comment("[json]")).unwrap();
        assert_eq!(f.kind, FieldKind::Text);
        assert!(f.accepts_multiple);
        assert!(f.is_json());
        let plain = infer(&ColumnDescriptor::new("keywords", "varchar(200)")).unwrap();
        assert!(!plain.is_json());
    }

    #[test]
    fn test_max_length() {
        assert_eq!(infer(&ColumnDescriptor::new("n", "varchar(50)")).unwrap().max_length, 50);
        assert_eq!(infer(&ColumnDescriptor::new("n", "text")).unwrap().max_length, DEFAULT_MAX_LENGTH);
        assert_eq!(infer(&ColumnDescriptor::new("n", "int(11)")).unwrap().max_length, DEFAULT_MAX_LENGTH);
    }
}
