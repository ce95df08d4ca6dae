//! Transport reorder message handlers

use std::sync::Arc;

use anyhow::Result;
use async_nats::{Client, Message, Subscriber};
use futures::StreamExt;
use serde_json::json;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::error::ReorderError;
use crate::services::activities::{group_timeline, mean_groups};
use crate::services::reorder::{ReorderOutcome, ReorderPlan, ReorderService};
use crate::types::{
    ErrorResponse, ReorderPreviewRequest, ReorderPreviewResponse, ReorderRequest,
    ReorderResponse, ReorderStatus, Request, SuccessResponse,
};

/// Map a reorder error to its NATS error response
pub fn reorder_error_response(request_id: Uuid, err: &ReorderError) -> ErrorResponse {
    let response = ErrorResponse::new(request_id, err.code(), err.to_string());
    match err {
        ReorderError::Precedence(violation) => {
            response.with_details(json!({ "rule": violation.rule() }))
        }
        ReorderError::IndexOutOfRange { index, len } => {
            response.with_details(json!({ "index": index, "len": len }))
        }
        _ => response,
    }
}

impl From<ReorderOutcome> for ReorderResponse {
    fn from(outcome: ReorderOutcome) -> Self {
        match outcome {
            ReorderOutcome::Unchanged => ReorderResponse {
                status: ReorderStatus::Unchanged,
                transport: None,
                reason: None,
            },
            ReorderOutcome::Applied(transport) => ReorderResponse {
                status: ReorderStatus::Applied,
                transport: Some(transport),
                reason: None,
            },
            ReorderOutcome::RolledBack { transport, reason } => ReorderResponse {
                status: ReorderStatus::RolledBack,
                transport: Some(transport),
                reason: Some(reason),
            },
        }
    }
}

/// Preview payload; an unchanged plan echoes the current segments and group.
pub fn preview_response(plan: ReorderPlan, request: &ReorderPreviewRequest) -> ReorderPreviewResponse {
    let transport = &request.transport;
    let group = mean_groups(transport)
        .into_iter()
        .nth(request.movement.group_index);

    let (changed, segments, activities) = match plan {
        ReorderPlan::NoOp => (
            false,
            transport.segments.clone(),
            group.as_ref().map(|g| g.activities.clone()).unwrap_or_default(),
        ),
        ReorderPlan::Update { segments, activities } => (true, segments, activities),
    };
    let timeline = match &group {
        Some(group) => group_timeline(group, &activities, transport),
        None => activities.clone(),
    };

    ReorderPreviewResponse {
        changed,
        segments,
        activities,
        timeline,
    }
}

async fn reply_json<T: serde::Serialize>(client: &Client, reply: async_nats::Subject, body: &T) -> Result<()> {
    client.publish(reply, serde_json::to_vec(body)?.into()).await?;
    Ok(())
}

async fn process_reorder(client: Client, msg: Message, service: Arc<ReorderService>) -> Result<()> {
    let Some(reply) = msg.reply.clone() else {
        warn!("transport.reorder: message without reply subject");
        return Ok(());
    };

    let request: Request<ReorderRequest> = match serde_json::from_slice(&msg.payload) {
        Ok(req) => req,
        Err(e) => {
            error!("transport.reorder: failed to parse request: {}", e);
            let error = ErrorResponse::new(Uuid::nil(), "INVALID_REQUEST", e.to_string());
            return reply_json(&client, reply, &error).await;
        }
    };

    let payload = &request.payload;
    debug!(
        "transport.reorder: transport={} group={} from={} to={:?}",
        payload.transport_uid, payload.movement.group_index, payload.movement.from_index, payload.movement.to_index
    );

    match service.reorder(&payload.transport_uid, &payload.movement).await {
        Ok(outcome) => {
            let response = SuccessResponse::new(request.id, ReorderResponse::from(outcome));
            reply_json(&client, reply, &response).await
        }
        Err(e) => {
            warn!("transport.reorder: transport {} refused: {}", payload.transport_uid, e);
            reply_json(&client, reply, &reorder_error_response(request.id, &e)).await
        }
    }
}

/// Handle transport.reorder messages
///
/// Each message is processed on its own task so that a slow transport API
/// call does not hold up reorders of other transports.
pub async fn handle_reorder(
    client: Client,
    mut subscriber: Subscriber,
    service: Arc<ReorderService>,
) -> Result<()> {
    while let Some(msg) = subscriber.next().await {
        debug!("Received transport.reorder message");
        let client = client.clone();
        let service = Arc::clone(&service);
        tokio::spawn(async move {
            if let Err(e) = process_reorder(client, msg, service).await {
                error!("transport.reorder: failed to reply: {}", e);
            }
        });
    }

    Ok(())
}

/// Handle transport.reorder.preview messages
pub async fn handle_preview(
    client: Client,
    mut subscriber: Subscriber,
    service: Arc<ReorderService>,
) -> Result<()> {
    while let Some(msg) = subscriber.next().await {
        debug!("Received transport.reorder.preview message");

        let reply = match msg.reply {
            Some(ref reply) => reply.clone(),
            None => {
                warn!("transport.reorder.preview: message without reply subject");
                continue;
            }
        };

        let request: Request<ReorderPreviewRequest> = match serde_json::from_slice(&msg.payload) {
            Ok(req) => req,
            Err(e) => {
                error!("transport.reorder.preview: failed to parse request: {}", e);
                let error = ErrorResponse::new(Uuid::nil(), "INVALID_REQUEST", e.to_string());
                let _ = reply_json(&client, reply, &error).await;
                continue;
            }
        };

        let result = service.preview(&request.payload.transport, &request.payload.movement);
        let sent = match result {
            Ok(plan) => {
                let response = SuccessResponse::new(request.id, preview_response(plan, &request.payload));
                reply_json(&client, reply, &response).await
            }
            Err(e) => reply_json(&client, reply, &reorder_error_response(request.id, &e)).await,
        };
        if let Err(e) = sent {
            error!("transport.reorder.preview: failed to reply: {}", e);
        }
    }

    Ok(())
}
