//! Form routes: `GET /` renders, `POST /` submits.

use crate::handlers::{show_form, submit_form};
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::limit::RequestBodyLimitLayer;

/// Largest accepted form body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn form_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit_form))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}
