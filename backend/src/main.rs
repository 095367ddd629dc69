//! Calculator service entry point: settings, database, migrations and the
//! HTTP server.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use calculator::inbound::http::health::HealthState;
use calculator::outbound::persistence::{DbPool, run_pending_migrations};

use server::{AppSettings, CredentialConfig, ServerConfig, create_server, fail_liveness_on};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let pool_config = settings.pool_config()?;

    if settings.run_migrations() {
        let applied = run_pending_migrations(pool_config.database_url())
            .await
            .wrap_err("failed to apply database migrations")?;
        info!(applied, "database schema up to date");
    }

    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("failed to build database pool")?;
    let credentials = CredentialConfig::new(settings.jwt_secret()?)
        .with_token_ttl(settings.token_ttl()?)
        .with_bcrypt_cost(settings.bcrypt_cost());
    let bind_addr = settings.bind_addr()?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(bind_addr, pool, credentials),
    )?;
    fail_liveness_on(shutdown_requested(), health_state);
    info!(%bind_addr, "calculator listening");

    server.await.wrap_err("server terminated abnormally")
}

/// Resolves on SIGINT or SIGTERM.
#[cfg(unix)]
async fn shutdown_requested() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

/// Resolves on Ctrl-C.
#[cfg(not(unix))]
async fn shutdown_requested() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
