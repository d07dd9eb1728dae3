//! Storage seam: schema introspection and the submission INSERT.

use crate::schema::ColumnDescriptor;
use crate::sql::{BindValue, WriteCommand};
use async_trait::async_trait;
use sqlx::MySqlPool;
use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

/// Where column metadata comes from and where submissions go.
#[async_trait]
pub trait FormStore: Send + Sync {
    /// Columns of `table` in ordinal order.
    async fn describe(&self, table: &str) -> Result<Vec<ColumnDescriptor>, sqlx::Error>;

    /// Run one INSERT; returns rows affected.
    async fn execute(&self, command: &WriteCommand) -> Result<u64, sqlx::Error>;
}

/// Same data as `SHOW FULL COLUMNS`, read from information_schema so the table name is bound.
const DESCRIBE_SQL: &str = r#"
    SELECT CAST(COLUMN_NAME AS CHAR), CAST(COLUMN_TYPE AS CHAR), CAST(IS_NULLABLE AS CHAR),
           CAST(COLUMN_DEFAULT AS CHAR), CAST(EXTRA AS CHAR), CAST(COLUMN_COMMENT AS CHAR)
    FROM information_schema.COLUMNS
    WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?
    ORDER BY ORDINAL_POSITION
"#;

type DescribeRow = (String, String, String, Option<String>, String, String);

#[async_trait]
impl FormStore for MySqlPool {
    async fn describe(&self, table: &str) -> Result<Vec<ColumnDescriptor>, sqlx::Error> {
        tracing::debug!(sql = %DESCRIBE_SQL.trim(), table = %table, "query");
        let rows: Vec<DescribeRow> = sqlx::query_as(DESCRIBE_SQL).bind(table).fetch_all(self).await?;
        Ok(rows
            .into_iter()
            .map(|(field, type_, null, default, extra, comment)| {
                ColumnDescriptor::from_describe_row(&field, &type_, &null, default.as_deref(), &extra, &comment)
            })
            .collect())
    }

    async fn execute(&self, command: &WriteCommand) -> Result<u64, sqlx::Error> {
        let sql = command.positional_sql();
        tracing::debug!(sql = %command.sql(), params = ?command.params, "query");
        let mut query = sqlx::query(&sql);
        for (_, value) in &command.params {
            query = BindValue::from_json(value).bind(query);
        }
        let result = query.execute(self).await?;
        Ok(result.rows_affected())
    }
}

/// In-process store: fixed schemas, records every INSERT. For tests and demos without MySQL.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Vec<ColumnDescriptor>>>,
    written: Mutex<Vec<WriteCommand>>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Every `execute` fails with a pool error.
    pub fn failing() -> Self {
        MemoryStore {
            fail_writes: true,
            ..MemoryStore::default()
        }
    }

    pub fn with_table(self, table: &str, columns: Vec<ColumnDescriptor>) -> Self {
        if let Ok(mut tables) = self.tables.write() {
            tables.insert(table.to_string(), columns);
        }
        self
    }

    pub fn written(&self) -> Vec<WriteCommand> {
        self.written.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl FormStore for MemoryStore {
    async fn describe(&self, table: &str) -> Result<Vec<ColumnDescriptor>, sqlx::Error> {
        let tables = self
            .tables
            .read()
            .map_err(|e| sqlx::Error::Protocol(e.to_string()))?;
        tables
            .get(table)
            .cloned()
            .ok_or_else(|| sqlx::Error::Protocol(format!("Table '{}' doesn't exist", table)))
    }

    async fn execute(&self, command: &WriteCommand) -> Result<u64, sqlx::Error> {
        if self.fail_writes {
            return Err(sqlx::Error::PoolClosed);
        }
        let mut written = self
            .written
            .lock()
            .map_err(|e| sqlx::Error::Protocol(e.to_string()))?;
        written.push(command.clone());
        Ok(1)
    }
}
