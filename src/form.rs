//! A form bound to one table: its fields, presentation config, render and submit.

use crate::config::{validate, FormConfig};
use crate::csrf::{CsrfTokenManager, Session};
use crate::error::FormError;
use crate::field::FieldSet;
use crate::render::{render_form, RenderContext, RenderPass};
use crate::schema::ColumnDescriptor;
use crate::sql::{check_identifier, WriteCommand};
use crate::store::FormStore;
use crate::submit::{SubmissionPipeline, SubmitOutcome};
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct Form {
    table: String,
    fields: FieldSet,
    config: FormConfig,
}

impl Form {
    /// Read the table schema from `store` and build the form.
    pub async fn load(store: &dyn FormStore, table: &str, config: FormConfig) -> Result<Self, FormError> {
        check_identifier(table)?;
        let columns = store.describe(table).await.map_err(|e| {
            tracing::error!(table = %table, error = %e, "schema introspection failed");
            FormError::SchemaIngestion {
                table: table.to_string(),
                reason: e.to_string(),
            }
        })?;
        if columns.is_empty() {
            return Err(FormError::SchemaIngestion {
                table: table.to_string(),
                reason: "table has no columns".into(),
            });
        }
        Self::from_columns(table, &columns, config)
    }

    pub fn from_columns(table: &str, columns: &[ColumnDescriptor], config: FormConfig) -> Result<Self, FormError> {
        check_identifier(table)?;
        validate(&config)?;
        let mut fields = FieldSet::build_all(columns)?;
        for (name, label) in &config.field_labels {
            match fields.get_mut(name) {
                Some(field) => field.label = Some(label.clone()),
                None => tracing::debug!(column = %name, "label for unknown column ignored"),
            }
        }
        tracing::debug!(table = %table, fields = ?fields.names(), "form built");
        Ok(Form {
            table: table.to_string(),
            fields,
            config,
        })
    }

    /// Keep only `names`, in that order.
    pub fn restrict_to(mut self, names: &[&str]) -> Result<Self, FormError> {
        self.fields = self.fields.restrict_to(names)?;
        Ok(self)
    }

    /// Drop `names`; unknown names are ignored.
    pub fn omit(mut self, names: &[&str]) -> Result<Self, FormError> {
        self.fields = self.fields.omit(names)?;
        Ok(self)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Render this form as a standalone page fragment.
    pub fn render<S: Session + ?Sized>(&self, session: &mut S, title: Option<&str>) -> String {
        let mut pass = RenderPass::new();
        self.render_into(&mut pass, session, title);
        pass.into_string()
    }

    /// Render into a shared pass, e.g. several forms on one page.
    pub fn render_into<S: Session + ?Sized>(&self, pass: &mut RenderPass, session: &mut S, title: Option<&str>) {
        let token = self
            .config
            .csrf
            .then(|| CsrfTokenManager::new(session).current_token());
        let ctx = RenderContext {
            title,
            csrf_token: token.as_deref(),
        };
        render_form(pass, &self.fields, &self.config, ctx);
    }

    /// Validate the token and build the INSERT without touching storage.
    pub fn prepare_submission<S: Session + ?Sized>(
        &self,
        session: &mut S,
        data: HashMap<String, String>,
    ) -> Result<WriteCommand, FormError> {
        SubmissionPipeline::new(&self.table, &self.fields, self.config.csrf).prepare(session, data)
    }

    pub async fn submit<S: Session + Send + ?Sized>(
        &self,
        store: &dyn FormStore,
        session: &mut S,
        data: HashMap<String, String>,
    ) -> Result<SubmitOutcome, FormError> {
        let command = self.prepare_submission(session, data)?;
        SubmissionPipeline::execute(store, &command).await
    }
}
