use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chat_tasks::config::{AppConfig, LogFormat, StoreBackend};
use chat_tasks::db::{init_database_schema, PgTaskStore};
use chat_tasks::server::{start_web_server, AppState};
use chat_tasks::store::{MemoryTaskStore, TaskStore};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn open_store(config: &AppConfig) -> Result<Arc<dyn TaskStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            info!("Using in-memory task store");
            Ok(Arc::new(MemoryTaskStore::new()))
        }
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set")?;

            info!("Connecting to Postgres task store");
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;

            init_database_schema(&pool)
                .await
                .context("Failed to initialize database schema")?;

            Ok(Arc::new(PgTaskStore::new(pool)))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(config.log_format);

    info!(
        store_backend = ?config.store_backend,
        render_mode = ?config.render_mode,
        "Starting chat task webhook"
    );

    let store = open_store(&config).await?;
    let state = AppState::new(store, config.render_mode);

    start_web_server(&config.listen_addr, state).await
}
