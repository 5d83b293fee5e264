use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::auth::{repo::SeaOrmAuthRepository, repository::AuthRepository, service::AuthConfig, AuthService};
use service::posting::{domain::PostingConfig, repo::SeaOrmPostingRepository, repository::PostingRepository, PostingService};

use crate::errors::StartupError;
use crate::routes::{self, auth};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// `config.toml` (or `CONFIG_PATH`) when readable, otherwise env-only defaults
pub fn load_config() -> Result<AppConfig, StartupError> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(file_err) => {
            warn!(error = %file_err, "config file unusable, falling back to environment");
            AppConfig::from_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
        }
    }
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Wire SeaORM repositories into the services held by the router state
pub fn build_state(db: DatabaseConnection, cfg: &AppConfig) -> auth::ServerState {
    let auth_repo: Arc<dyn AuthRepository> = Arc::new(SeaOrmAuthRepository::new(db.clone()));
    let posting_repo: Arc<dyn PostingRepository> = Arc::new(SeaOrmPostingRepository::new(db));
    auth::ServerState {
        auth: Arc::new(AuthService::new(auth_repo, AuthConfig::from(&cfg.auth))),
        postings: Arc::new(PostingService::new(posting_repo, PostingConfig::from(&cfg.posting))),
        jwt_secret: Arc::from(cfg.auth.jwt_secret.as_str()),
    }
}

/// Build the app from an already validated config and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    // DB connection + schema
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    let state = build_state(db, &cfg);
    let app: Router = routes::build_router(state, build_cors());

    // Bind and serve
    let addr = bind_addr(&cfg)?;
    info!(%addr, quota_window_days = cfg.posting.quota_window_days, "starting board server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;
    Ok(())
}
