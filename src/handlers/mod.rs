//! NATS message handlers

pub mod ping;
pub mod transport;

use std::sync::Arc;
use anyhow::Result;
use async_nats::Client;
use tracing::{info, error};
use tokio::select;

use crate::config::Config;
use crate::services::reorder::ReorderService;

/// Start all message handlers
pub async fn start_handlers(client: Client, config: &Config, service: Arc<ReorderService>) -> Result<()> {
    info!("Starting message handlers...");

    let ping_subject = config.subject("ping");
    let reorder_subject = config.subject("transport.reorder");
    let preview_subject = config.subject("transport.reorder.preview");

    let ping_sub = client.subscribe(ping_subject.clone()).await?;
    let reorder_sub = client.subscribe(reorder_subject.clone()).await?;
    let preview_sub = client.subscribe(preview_subject.clone()).await?;

    info!(
        "Subscribed to NATS subjects: {}, {}, {}",
        ping_subject, reorder_subject, preview_subject
    );

    let client_ping = client.clone();
    let client_reorder = client.clone();
    let client_preview = client.clone();

    let service_reorder = Arc::clone(&service);
    let service_preview = Arc::clone(&service);

    let ping_handle = tokio::spawn(async move {
        ping::handle_ping(client_ping, ping_sub).await
    });

    let reorder_handle = tokio::spawn(async move {
        transport::handle_reorder(client_reorder, reorder_sub, service_reorder).await
    });

    let preview_handle = tokio::spawn(async move {
        transport::handle_preview(client_preview, preview_sub, service_preview).await
    });

    info!("All handlers started");

    // Wait for any handler to finish (which means an error occurred)
    select! {
        result = ping_handle => {
            error!("Ping handler finished: {:?}", result);
        }
        result = reorder_handle => {
            error!("Reorder handler finished: {:?}", result);
        }
        result = preview_handle => {
            error!("Reorder preview handler finished: {:?}", result);
        }
    }

    Ok(())
}
