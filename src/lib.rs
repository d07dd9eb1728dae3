//! Schema Form: HTML forms derived from MySQL table schemas.
//!
//! Columns are read once, turned into typed fields, and rendered as a plain
//! or htmx form. Submissions are CSRF-checked and written with one
//! parameterized INSERT.

pub mod config;
pub mod csrf;
pub mod error;
pub mod extractors;
pub mod field;
pub mod form;
pub mod handlers;
pub mod render;
pub mod response;
pub mod routes;
pub mod schema;
pub mod session;
pub mod sql;
pub mod state;
pub mod store;
pub mod submit;

pub use config::{load_form_config, FormConfig, HtmxConfig, HtmxTarget, RequestMethod, ServerSettings, SwapMode};
pub use csrf::{CsrfTokenManager, Session};
pub use error::{ConfigError, FormError};
pub use field::{infer, FieldKind, FieldModel, FieldSet};
pub use form::Form;
pub use render::RenderPass;
pub use routes::{common_routes, form_routes};
pub use schema::{ColumnDescriptor, ColumnFlags};
pub use session::MemorySessionStore;
pub use state::AppState;
pub use store::{FormStore, MemoryStore};
pub use submit::{SubmissionPipeline, SubmitOutcome};
