use axum::Router;
use configs::{AppConfig, LogFormat};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, auth};
use common::utils::logging::{init_logging_default, init_logging_json};

fn init_logging(format: LogFormat) {
    match format {
        LogFormat::Compact => init_logging_default(),
        LogFormat::Json => init_logging_json(),
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router over an already-connected database.
pub fn build_app(db: sea_orm::DatabaseConnection, cfg: &AppConfig) -> Router {
    let state = auth::ServerState::new(db, (&cfg.auth).into());
    routes::build_router(state, build_cors())
}

/// Public entry: load config, connect, migrate and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    init_logging(cfg.logging.format);

    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.run_migrations {
        models::db::migrate(&db).await?;
        info!("migrations applied");
    }

    let app = build_app(db, &cfg);
    let addr = cfg.server.bind_addr();
    info!(%addr, "starting marketplace server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
