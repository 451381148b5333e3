//! Users service entry-point: resolves settings, prepares the configured
//! store, and serves the HTTP API.

mod server;

use std::io;

use actix_web::web;
use clap::Parser;
use mockable::DefaultEnv;
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use users_backend::config::{StoreProfile, service_settings_from_env};
use users_backend::inbound::http::health::HealthState;

/// `users-backend` command arguments. Flags override the environment.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "users-backend",
    about = "HTTP service for creating, listing, and fetching users",
    version
)]
struct CliArgs {
    /// Store profile. Falls back to `USERS_STORE` when omitted.
    #[arg(long, value_enum, value_name = "profile")]
    store: Option<StoreProfile>,
    /// Listening socket. Falls back to `USERS_BIND_ADDR` when omitted.
    #[arg(long = "bind-addr", value_name = "host:port")]
    bind_addr: Option<SocketAddr>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    let settings = service_settings_from_env(&DefaultEnv::new())
        .map_err(io::Error::other)?
        .with_overrides(args.store, args.bind_addr);
    info!(
        store = %settings.store,
        bind_addr = %settings.bind_addr,
        version = env!("CARGO_PKG_VERSION"),
        "users service starting"
    );

    let config = ServerConfig::from_settings(&settings).await?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(bind_addr = %settings.bind_addr, "listening");

    let outcome = server.await;
    health_state.mark_unhealthy();
    info!("users service stopped");
    outcome
}
