//! Members API entry-point: loads settings, prepares storage, and serves HTTP.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use members_api::inbound::http::health::HealthState;
use members_api::outbound::persistence::{DbPool, run_pending_migrations};

use server::{MembersSettings, ServerConfig, create_server};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

async fn migrate(database_url: String) -> Result<()> {
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .wrap_err("migration task panicked")??;
    info!(applied, "database migrations applied");
    Ok(())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings =
        MembersSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    info!(settings = ?settings, "settings loaded");
    if settings.api_key().is_none() {
        warn!("MEMBERS_API_KEY is unset; only bearer-token requests are admitted");
    }

    let mut config = ServerConfig::new(settings.host(), settings.port(), settings.api_key());
    if let Some(pool_config) = settings.pool_config() {
        migrate(pool_config.database_url().to_owned()).await?;
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("failed to start server")?;
    info!(host = settings.host(), port = settings.port(), "members api listening");
    server.await.wrap_err("server terminated with an error")
}
