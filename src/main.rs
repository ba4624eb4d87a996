use anyhow::Context;
use axum::Router;
use axum::extract::State;
use dotenv::dotenv;
use std::env;
use std::sync::Arc;
use tracing::info;

mod api;
mod app_env;
mod db;
mod domain;
mod dto;
mod external_connections;
mod logging;
mod persistence;
mod routing_utils;


/// State shared across every request handler
pub struct SharedData {
    pub ext_cxn: persistence::ExternalConnectivity,
}

/// Extractor alias for the application's shared state
pub type AppState = State<Arc<SharedData>>;

/// Builds the application's full route table on top of the given shared state
pub fn app_router(shared_data: Arc<SharedData>) -> Router {
    let router = Router::new()
        .merge(api::todo::todo_routes())
        .merge(api::swagger_main::build_documentation())
        .with_state(shared_data);

    logging::attach_tracing_http(router)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let otel_exporters = match (
        env::var(app_env::OTEL_SPAN_EXPORT_URL),
        env::var(app_env::OTEL_METRIC_EXPORT_URL),
    ) {
        (Ok(span_url), Ok(metric_url)) => Some(logging::init_exporters(&span_url, &metric_url)),
        _ => None,
    };
    logging::setup_logging_and_tracing(logging::init_env_filter(), otel_exporters);

    let db_url = env::var(app_env::DB_URL)
        .context("DATABASE_URL must be set to reach the todo store")?;
    let db_pool = db::connect_sqlx(&db_url)
        .await
        .context("connecting to the todo store")?;
    sqlx::migrate!()
        .run(&db_pool)
        .await
        .context("preparing the todo collection")?;

    let shared_data = Arc::new(SharedData {
        ext_cxn: persistence::ExternalConnectivity::new(db_pool),
    });
    let app = app_router(shared_data);

    info!("Starting server.");
    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .context("binding the server port")?;
    axum::serve(listener, app)
        .await
        .context("serving HTTP traffic")?;

    Ok(())
}
