//! Builds the parameterized INSERT for a form submission.

use crate::error::FormError;
use regex::Regex;
use serde_json::Value;

/// Quote identifier for MySQL.
pub fn quoted(s: &str) -> String {
    format!("`{}`", s.replace('`', "``"))
}

const IDENTIFIER_PATTERN: &str = r"^[A-Za-z0-9_$]+$";

/// Table names come from callers; only plain identifiers are accepted.
pub fn check_identifier(table: &str) -> Result<(), FormError> {
    let re = Regex::new(IDENTIFIER_PATTERN).map_err(|e| FormError::SchemaIngestion {
        table: table.to_string(),
        reason: format!("invalid identifier pattern: {}", e),
    })?;
    if re.is_match(table) {
        Ok(())
    } else {
        Err(FormError::SchemaIngestion {
            table: table.to_string(),
            reason: "table name must be a plain identifier".into(),
        })
    }
}

/// One INSERT with values bound by column name.
#[derive(Clone, Debug, PartialEq)]
pub struct WriteCommand {
    pub table: String,
    /// `(column, value)` in field-set order; each column is bound as `:column`.
    pub params: Vec<(String, Value)>,
}

impl WriteCommand {
    pub fn insert(table: impl Into<String>, params: Vec<(String, Value)>) -> Self {
        WriteCommand {
            table: table.into(),
            params,
        }
    }

    fn column_list(&self) -> String {
        self.params
            .iter()
            .map(|(c, _)| quoted(c))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// ``INSERT INTO `t` (`a`,`b`) VALUES(:a,:b);``
    pub fn sql(&self) -> String {
        let placeholders = self
            .params
            .iter()
            .map(|(c, _)| format!(":{}", c))
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "INSERT INTO {} ({}) VALUES({});",
            quoted(&self.table),
            self.column_list(),
            placeholders
        )
    }

    /// Same statement with `?` placeholders, bound in `params` order.
    pub fn positional_sql(&self) -> String {
        let placeholders = vec!["?"; self.params.len()].join(",");
        format!(
            "INSERT INTO {} ({}) VALUES({})",
            quoted(&self.table),
            self.column_list(),
            placeholders
        )
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.params.iter().find(|(c, _)| c == column).map(|(_, v)| v)
    }
}
