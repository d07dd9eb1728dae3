//! Shared application state for all routes. The form is built once at startup.

use crate::form::Form;
use crate::session::MemorySessionStore;
use crate::store::FormStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FormStore>,
    pub form: Arc<Form>,
    pub sessions: MemorySessionStore,
    /// Heading rendered above the form on GET.
    pub title: Option<String>,
}
