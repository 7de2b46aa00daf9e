//! Relay entry-point: resolves settings, wires the directory client and
//! serves the lookup endpoint.

mod server;

use std::sync::Arc;

use actix_web::web;
use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use handle_relay::domain::HandleResolver;
use handle_relay::inbound::http::health::HealthState;
use handle_relay::inbound::http::state::HttpState;
use handle_relay::outbound::twitter::TwitterHttpDirectory;
use handle_relay::settings::{CliArgs, load_env_file, relay_settings_from_env};

use server::{ServerConfig, create_server};

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

    let args = CliArgs::parse();
    load_env_file(&args.env_file())?;
    let settings = relay_settings_from_env(&mockable::DefaultEnv::new(), &args)?;

    let directory = TwitterHttpDirectory::new(
        settings.api_base_url,
        settings.token,
        settings.upstream_timeout,
    )
    .wrap_err("failed to build directory client")?;
    info!(base_url = %directory.base_url(), "directory client ready");

    let resolver = HandleResolver::new(Arc::new(directory));
    let config = ServerConfig::new(settings.bind_addr, HttpState::new(Arc::new(resolver)));
    let bind_addr = config.bind_addr();

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "listening");

    server.await.wrap_err("server terminated abnormally")
}
