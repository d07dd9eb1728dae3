//! Operational routes: health, readiness, version, and the inferred field list.

use crate::field::FieldModel;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct StatusBody {
    status: &'static str,
    table: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    schema: Option<&'static str>,
}

#[derive(Serialize)]
struct FieldsBody {
    table: String,
    fields: Vec<FieldModel>,
}

async fn health(State(state): State<AppState>) -> Json<StatusBody> {
    Json(StatusBody {
        status: "ok",
        table: state.form.table().to_string(),
        schema: None,
    })
}

/// The form's table can still be introspected.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<StatusBody>) {
    let table = state.form.table().to_string();
    match state.store.describe(&table).await {
        Ok(columns) if !columns.is_empty() => (
            StatusCode::OK,
            Json(StatusBody {
                status: "ok",
                table,
                schema: Some("ok"),
            }),
        ),
        Ok(_) | Err(_) => {
            tracing::warn!(table = %table, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(StatusBody {
                    status: "degraded",
                    table,
                    schema: Some("unavailable"),
                }),
            )
        }
    }
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn fields(State(state): State<AppState>) -> Json<FieldsBody> {
    Json(FieldsBody {
        table: state.form.table().to_string(),
        fields: state.form.fields().iter().cloned().collect(),
    })
}

/// GET /health, GET /ready, GET /version, GET /fields.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .route("/fields", get(fields))
        .with_state(state)
}
