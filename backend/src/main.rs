#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), forbid(clippy::expect_used))]
//! Backend entry-point: loads settings, wires storage and starts the server.

mod server;
mod settings;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_config::{
    BuildMode, key_fingerprint, session_settings_from_env,
};
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server};
use settings::AppSettings;

fn init_tracing() {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }
}

async fn connect_database(settings: &AppSettings, url: &str) -> std::io::Result<DbPool> {
    if settings.run_migrations {
        run_pending_migrations(url)
            .await
            .map_err(std::io::Error::other)?;
    }
    let config = PoolConfig::new(url).with_max_size(settings.db_max_connections());
    DbPool::new(config).await.map_err(std::io::Error::other)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|error| std::io::Error::other(format!("failed to load settings: {error}")))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session signing key loaded"
    );

    let bind_addr = settings.bind_addr()?;
    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    );
    if let Some(url) = settings.database_url() {
        config = config.with_db_pool(connect_database(&settings, url).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "listening");
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
