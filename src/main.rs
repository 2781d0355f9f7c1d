use dotenvy::dotenv;
use instacart_crud::{
    api::{self, AppState},
    config,
    core::report::ReportingEngine,
    errors::Result,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Application settings, then the mandatory connection string
    let app_config = config::app::load_default_config()
        .inspect_err(|e| error!("Failed to load application configuration: {e}"))?;
    let database_url = config::database::get_database_url()
        .inspect_err(|e| error!("Refusing to start: {e}"))?;

    // 4. Connect and make sure every collection exists
    let db = config::database::create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 5. Wire the store and the reporting engine into the router
    let db = Arc::new(db);
    let reports = ReportingEngine::new(Arc::clone(&db), app_config.reports.clone());
    let app = api::router(AppState::new(db, reports));

    let listener = tokio::net::TcpListener::bind(app_config.server.bind_address.as_str()).await?;
    info!("Listening on {}", app_config.server.bind_address);
    axum::serve(listener, app).await?;

    Ok(())
}
