//! TMS Worker - Backend service for transport activity reordering
//!
//! This worker connects to NATS and handles reorder requests from the frontend,
//! persisting the rebuilt segments through the transport REST API.

mod cli;
mod config;
mod error;
mod handlers;
mod services;
mod types;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use crate::cli::{Cli, Command};
use crate::services::reorder::{plan_reorder, ReorderPlan, ReorderService};
use crate::services::transport_api::{HttpTransportApi, TransportApi};
use crate::types::{ReorderMove, Transport};

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tms_worker=debug".into()),
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Plan { input, group, from, to } => {
            // stdout carries the payload; logs go to stderr
            tracing_subscriber::registry()
                .with(env_filter())
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
            plan(&input, ReorderMove { group_index: group, from_index: from, to_index: to })
        }
    }
}

async fn serve() -> Result<()> {
    // Logs directory - use LOGS_DIR env var or default to ../logs (relative to worker)
    let logs_dir = std::env::var("LOGS_DIR")
        .unwrap_or_else(|_| "../logs".to_string());
    std::fs::create_dir_all(&logs_dir).ok();

    // File appender for persistent logs (daily rotation)
    let file_appender = RollingFileAppender::new(
        Rotation::DAILY,
        &logs_dir,
        "worker.log",
    );
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Initialize logging - both stdout and file
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer())  // stdout
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))  // file
        .init();

    info!("Starting TMS Worker...");

    // Load configuration
    let config = config::Config::from_env()?;
    info!("Configuration loaded");

    let api: Arc<dyn TransportApi> = Arc::new(HttpTransportApi::new(&config.transport_api)?);
    info!("Transport API client initialized: {} ({})", api.name(), config.transport_api.base_url);
    let service = Arc::new(ReorderService::new(api));

    // Connect to NATS (supports optional NATS_USER/NATS_PASSWORD auth).
    let nats_client = match (&config.nats_user, &config.nats_password) {
        (Some(user), Some(password)) => {
            async_nats::ConnectOptions::new()
                .user_and_password(user.clone(), password.clone())
                .connect(&config.nats_url)
                .await?
        }
        _ => async_nats::connect(&config.nats_url).await?,
    };
    info!("Connected to NATS at {}", config.nats_url);

    // Start message handlers
    let handler_result = handlers::start_handlers(nats_client, &config, service).await;

    if let Err(e) = handler_result {
        error!("Handler error: {}", e);
        return Err(e);
    }

    Ok(())
}

fn plan(input: &std::path::Path, movement: ReorderMove) -> Result<()> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let transport: Transport = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse transport from {}", input.display()))?;

    match plan_reorder(&transport, &movement) {
        Ok(ReorderPlan::NoOp) => {
            info!("Nothing to reorder");
            println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "segments": transport.segments }))?);
        }
        Ok(ReorderPlan::Update { segments, .. }) => {
            println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "segments": segments }))?);
        }
        Err(e) => {
            error!("Reorder refused ({}): {}", e.code(), e);
            anyhow::bail!("{}: {}", e.code(), e);
        }
    }

    Ok(())
}
