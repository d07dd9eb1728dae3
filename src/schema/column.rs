//! Column metadata as reported by `SHOW FULL COLUMNS`, plus typed per-column flags.

/// Per-column overrides that change how a column is presented.
///
/// Tables usually carry these as bracketed tags in the column comment
/// (`[unix]`, `[boolean]`, `[json]`); [`ColumnFlags::from_comment`] reads them
/// once at ingestion so inference never looks at free text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColumnFlags {
    /// `bigint` column holding a unix epoch timestamp.
    pub unix: bool,
    /// Column rendered as a checkbox.
    pub boolean: bool,
    /// Column stores a JSON list even though its type is text, e.g. `varchar`.
    pub json: bool,
}

impl ColumnFlags {
    pub fn from_comment(comment: &str) -> Self {
        let lower = comment.to_lowercase();
        ColumnFlags {
            unix: lower.contains("[unix]"),
            boolean: lower.contains("[boolean]"),
            json: lower.contains("[json]"),
        }
    }
}

/// One table column. Read-only input to the form engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Full SQL type, e.g. `enum('a','b')` or `varchar(50)`.
    pub raw_type: String,
    pub nullable: bool,
    pub default_value: Option<String>,
    pub is_auto_increment: bool,
    pub comment: String,
    pub flags: ColumnFlags,
}

impl ColumnDescriptor {
    /// Non-nullable column with no default, comment or flags.
    pub fn new(name: impl Into<String>, raw_type: impl Into<String>) -> Self {
        ColumnDescriptor {
            name: name.into(),
            raw_type: raw_type.into(),
            nullable: false,
            default_value: None,
            is_auto_increment: false,
            comment: String::new(),
            flags: ColumnFlags::default(),
        }
    }

    /// Build from the raw string columns of a `SHOW FULL COLUMNS` row.
    pub fn from_describe_row(
        field: &str,
        type_: &str,
        null: &str,
        default: Option<&str>,
        extra: &str,
        comment: &str,
    ) -> Self {
        ColumnDescriptor {
            name: field.to_string(),
            raw_type: type_.to_string(),
            nullable: null.eq_ignore_ascii_case("YES"),
            default_value: default.map(str::to_string),
            is_auto_increment: extra.to_lowercase().contains("auto_increment"),
            comment: comment.to_string(),
            flags: ColumnFlags::from_comment(comment),
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.is_auto_increment = true;
        self
    }

    /// Sets the comment and re-derives flags from it.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self.flags = ColumnFlags::from_comment(&self.comment);
        self
    }

    pub fn with_flags(mut self, flags: ColumnFlags) -> Self {
        self.flags = flags;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_from_comment_ignore_case() {
        let flags = ColumnFlags::from_comment("Created at [UNIX] and [Boolean]");
        assert!(flags.unix);
        assert!(flags.boolean);
        assert!(!flags.json);
    }

    #[test]
    fn test_flags_need_brackets() {
        assert_eq!(ColumnFlags::from_comment("unix time"), ColumnFlags::default());
    }

    #[test]
    fn test_from_describe_row() {
        let col = ColumnDescriptor::from_describe_row("id", "int(11)", "NO", None, "AUTO_INCREMENT", "");
        assert!(col.is_auto_increment);
        assert!(!col.nullable);

        let col = ColumnDescriptor::from_describe_row("created", "bigint", "YES", Some("0"), "", "[unix]");
        assert!(col.nullable);
        assert!(col.flags.unix);
        assert_eq!(col.default_value.as_deref(), Some("0"));
    }
}
