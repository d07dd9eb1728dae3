//! Example server: builds a form from `FORM_TABLE` in the MySQL database at
//! `DATABASE_URL` and serves it at `/` (GET renders, POST inserts).

use schema_form::{
    common_routes, form_routes, load_form_config, AppState, Form, FormConfig, FormStore, MemorySessionStore,
    ServerSettings,
};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("schema_form=info")),
        )
        .init();

    let settings = ServerSettings::from_env()?;
    let pool = sqlx::mysql::MySqlPoolOptions::new()
        .max_connections(5)
        .connect(&settings.database_url)
        .await?;
    let store: Arc<dyn FormStore> = Arc::new(pool);

    let config = match &settings.form_config {
        Some(path) => load_form_config(path).await?,
        None => FormConfig::default(),
    };
    let form = Form::load(store.as_ref(), &settings.table, config).await?;
    tracing::info!(table = %form.table(), fields = form.fields().len(), "form ready");

    let state = AppState {
        store,
        form: Arc::new(form),
        sessions: MemorySessionStore::with_limits(settings.session_capacity, settings.session_ttl),
        title: Some(settings.title.clone()),
    };

    let app = Router::new()
        .merge(common_routes(state.clone()))
        .merge(form_routes(state));

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
