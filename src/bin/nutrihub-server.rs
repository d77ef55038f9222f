// ABOUTME: Server binary entry point for the nutrihub aggregation service
// ABOUTME: Parses CLI arguments, loads configuration, and runs the HTTP server
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! NutriHub server binary.

use anyhow::Result;
use clap::Parser;
use nutrihub::config::ServerConfig;
use nutrihub::providers::http_client::initialize_shared_client;
use nutrihub::providers::FoodProviderRegistry;
use nutrihub::server::{serve, AppState};
use tracing::info;

#[derive(Parser)]
#[command(name = "nutrihub-server")]
#[command(about = "Food-data aggregation server for calorie tracking")]
#[command(version)]
struct Args {
    /// Override the HTTP listen port from configuration
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    nutrihub::logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.http_port {
        config.http_port = port;
    }

    info!("{}", config.summary());

    initialize_shared_client(&config);

    let registry = FoodProviderRegistry::from_config(&config).await;
    let state = AppState::new(config, registry);

    serve(state).await
}
