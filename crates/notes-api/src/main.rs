mod config;
mod error;
mod routes;

use std::sync::Arc;

use config::AppConfig;
use notes_core::services::DatabaseService;
use routes::{app_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Only load .env in development; production uses platform-native env injection.
    #[cfg(debug_assertions)]
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("notes_api=info".parse().expect("valid directive"))
                .add_directive("notes_core=info".parse().expect("valid directive")),
        )
        .init();

    let config = Arc::new(AppConfig::from_env()?);
    tracing::info!("Starting notes-api with config: {:?}", config);

    let db = match tokio::time::timeout(
        config.connect_timeout,
        DatabaseService::open(&config.database),
    )
    .await
    {
        Ok(Ok(db)) => db,
        Ok(Err(error)) => {
            tracing::error!("Database connection error: {}", error);
            return Err(error.into());
        }
        Err(_) => {
            tracing::error!(
                "Database connection timed out after {:?}",
                config.connect_timeout
            );
            return Err("database connection timed out".into());
        }
    };
    tracing::info!("Connected to database");

    let state = AppState::new(config, db);
    let bind_addr = state.config.bind_addr.clone();
    let router = app_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("notes-api listening on {}", bind_addr);
    axum::serve(listener, router).await?;
    Ok(())
}
