//! Submission: CSRF check, per-field value transforms, one INSERT.

use crate::csrf::{CsrfTokenManager, Session, CSRF_FIELD_NAME};
use crate::error::FormError;
use crate::field::{FieldKind, FieldModel, FieldSet};
use crate::sql::WriteCommand;
use crate::store::FormStore;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::collections::HashMap;

/// Message shown after a successful submission.
pub const SUCCESS_MESSAGE: &str = "Form submitted!";

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub rows_affected: u64,
}

pub struct SubmissionPipeline<'a> {
    table: &'a str,
    fields: &'a FieldSet,
    csrf: bool,
}

impl<'a> SubmissionPipeline<'a> {
    pub fn new(table: &'a str, fields: &'a FieldSet, csrf: bool) -> Self {
        SubmissionPipeline { table, fields, csrf }
    }

    /// Check the token and turn form data into the INSERT. Nothing is written.
    pub fn prepare<S: Session + ?Sized>(
        &self,
        session: &mut S,
        mut data: HashMap<String, String>,
    ) -> Result<WriteCommand, FormError> {
        if self.csrf {
            let submitted = data.remove(CSRF_FIELD_NAME).unwrap_or_default();
            if !CsrfTokenManager::new(session).validate(&submitted) {
                tracing::warn!(table = %self.table, "csrf token mismatch, submission rejected");
                return Err(FormError::CsrfMismatch);
            }
        }
        let params = self
            .fields
            .iter()
            .map(|f| (f.name.clone(), transform(f, data.get(&f.name).map(String::as_str))))
            .collect();
        Ok(WriteCommand::insert(self.table, params))
    }

    /// Run the INSERT. Storage errors are logged and replaced by [`FormError::WriteFailure`].
    pub async fn execute(store: &dyn FormStore, command: &WriteCommand) -> Result<SubmitOutcome, FormError> {
        match store.execute(command).await {
            Ok(rows_affected) => {
                tracing::info!(table = %command.table, rows_affected, "form submitted");
                Ok(SubmitOutcome { rows_affected })
            }
            Err(e) => {
                tracing::error!(table = %command.table, error = %e, "form submission failed");
                Err(FormError::WriteFailure)
            }
        }
    }
}

/// Submitted string → value written for `field`. Missing fields write NULL.
pub fn transform(field: &FieldModel, raw: Option<&str>) -> Value {
    if field.kind == FieldKind::Checkbox {
        let on = raw.map(is_truthy).unwrap_or(false);
        return Value::from(u8::from(on));
    }
    let Some(raw) = raw else {
        return Value::Null;
    };
    if field.is_json() {
        return Value::Array(split_list(raw));
    }
    if raw.trim().is_empty() && !field.required && !field.kind.is_textual() {
        return Value::Null;
    }
    if field.unix_timestamp {
        // Unparseable input goes through as-is and is rejected by the database.
        return parse_epoch(raw)
            .map(Value::from)
            .unwrap_or_else(|| Value::String(raw.to_string()));
    }
    Value::String(raw.to_string())
}

/// `"x, y,,z"` → `["x","y","z"]`.
fn split_list(raw: &str) -> Vec<Value> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Value::String(s.to_string()))
        .collect()
}

fn is_truthy(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "1" | "on" | "true" | "yes")
}

/// Epoch seconds from raw digits, a datetime-local value, or a date (midnight UTC).
pub fn parse_epoch(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(secs) = raw.parse::<i64>() {
        return Some(secs);
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.and_utc().timestamp());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csrf::CSRF_SESSION_KEY;
    use crate::schema::ColumnDescriptor;
    use serde_json::json;

    fn fields() -> FieldSet {
        FieldSet::build_all(&[
            ColumnDescriptor::new("id", "int").auto_increment(),
            ColumnDescriptor::new("title", "varchar(100)"),
            ColumnDescriptor::new("tags", "json"),
            ColumnDescriptor::new("stars", "int").nullable(true),
            ColumnDescriptor::new("active", "tinyint(1)").comment("[boolean]"),
            ColumnDescriptor::new("published", "bigint").comment("[unix]").nullable(true),
        ])
        .unwrap()
    }

    fn data(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn session_with_token(token: &str) -> HashMap<String, String> {
        let mut session = HashMap::new();
        session.insert(CSRF_SESSION_KEY.to_string(), token.to_string());
        session
    }

    #[test]
    fn test_prepare_builds_insert_in_field_order() {
        let fields = fields();
        let pipeline = SubmissionPipeline::new("projects", &fields, true);
        let mut session = session_with_token("tok");
        let cmd = pipeline
            .prepare(
                &mut session,
                data(&[
                    ("csrf_token", "tok"),
                    ("title", "Forms"),
                    ("tags", "x,y,z"),
                    ("stars", ""),
                    ("active", "1"),
                    ("published", "1970-01-02"),
                    ("unrelated", "ignored"),
                ]),
            )
            .unwrap();
        assert_eq!(
            cmd.sql(),
            "INSERT INTO `projects` (`title`,`tags`,`stars`,`active`,`published`) VALUES(:title,:tags,:stars,:active,:published);"
        );
        assert_eq!(cmd.get("title"), Some(&json!("Forms")));
        assert_eq!(cmd.get("tags"), Some(&json!(["x", "y", "z"])));
        assert_eq!(cmd.get("stars"), Some(&Value::Null));
        assert_eq!(cmd.get("active"), Some(&json!(1)));
        assert_eq!(cmd.get("published"), Some(&json!(86400)));
        assert!(cmd.get("csrf_token").is_none());
    }

    #[test]
    fn test_csrf_mismatch_aborts() {
        let fields = fields();
        let pipeline = SubmissionPipeline::new("projects", &fields, true);
        let mut session = session_with_token("tok");
        let err = pipeline
            .prepare(&mut session, data(&[("csrf_token", "other"), ("title", "x")]))
            .unwrap_err();
        assert!(matches!(err, FormError::CsrfMismatch));

        let err = pipeline.prepare(&mut session, data(&[("title", "x")])).unwrap_err();
        assert!(matches!(err, FormError::CsrfMismatch));
    }

    #[test]
    fn test_csrf_disabled_skips_validation() {
        let fields = fields();
        let pipeline = SubmissionPipeline::new("projects", &fields, false);
        let mut session: HashMap<String, String> = HashMap::new();
        let cmd = pipeline.prepare(&mut session, data(&[("title", "x")])).unwrap();
        assert_eq!(cmd.get("title"), Some(&json!("x")));
        assert!(session.is_empty());
    }

    #[test]
    fn test_transform_missing_values() {
        let fields = fields();
        assert_eq!(transform(fields.get("title").unwrap(), None), Value::Null);
        assert_eq!(transform(fields.get("active").unwrap(), None), json!(0));
        assert_eq!(transform(fields.get("tags").unwrap(), Some("")), json!([]));
        assert_eq!(transform(fields.get("title").unwrap(), Some("")), json!(""));
    }

    #[test]
    fn test_json_flagged_text_column_is_split() {
        let column = ColumnDescriptor::new("keywords", "text").comment("[json]");
        let field = crate::field::infer(&column).unwrap();
        assert_eq!(transform(&field, Some("rust, sql")), json!(["rust", "sql"]));
    }

    #[test]
    fn test_split_list_trims() {
        assert_eq!(split_list(" a, b ,,c"), vec![json!("a"), json!("b"), json!("c")]);
    }

    #[test]
    fn test_parse_epoch() {
        assert_eq!(parse_epoch("1700000000"), Some(1_700_000_000));
        assert_eq!(parse_epoch("1970-01-01T00:01"), Some(60));
        assert_eq!(parse_epoch("1970-01-01T00:00:30"), Some(30));
        assert_eq!(parse_epoch("1970-01-01 01:00:00"), Some(3600));
        assert_eq!(parse_epoch("soon"), None);
    }
}
