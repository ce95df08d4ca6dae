//! Transport REST API client
//!
//! The transport API is the source of truth: it serves a transport with its
//! segments and status log, and re-derives activities after a segment update.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::debug;

use crate::error::TransportApiError;
use crate::types::{Segment, Transport};

/// Read/update access to transports
#[async_trait]
pub trait TransportApi: Send + Sync {
    /// Fetch the current state of a transport
    async fn get_transport(&self, uid: &str) -> Result<Transport, TransportApiError>;

    /// Replace the transport's segments, returning the canonical transport
    async fn update_segments(
        &self,
        uid: &str,
        segments: &[Segment],
    ) -> Result<Transport, TransportApiError>;

    /// Get service name for logging
    fn name(&self) -> &str;
}

/// Connection settings for [`HttpTransportApi`]
#[derive(Debug, Clone)]
pub struct TransportApiConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Option<Duration>,
}

#[derive(Serialize)]
struct UpdateSegmentsBody<'a> {
    segments: &'a [Segment],
}

/// reqwest-backed transport API client
pub struct HttpTransportApi {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpTransportApi {
    pub fn new(config: &TransportApiConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent("tms-worker/0.1");
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            client,
        })
    }

    fn transport_url(&self, uid: &str) -> String {
        format!("{}/transports/{}", self.base_url, urlencoding::encode(uid))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn read_transport(
        uid: &str,
        response: reqwest::Response,
    ) -> Result<Transport, TransportApiError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(TransportApiError::NotFound(uid.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl TransportApi for HttpTransportApi {
    async fn get_transport(&self, uid: &str) -> Result<Transport, TransportApiError> {
        let url = self.transport_url(uid);
        debug!("GET {}", url);
        let response = self.authorize(self.client.get(&url)).send().await?;
        Self::read_transport(uid, response).await
    }

    async fn update_segments(
        &self,
        uid: &str,
        segments: &[Segment],
    ) -> Result<Transport, TransportApiError> {
        let url = self.transport_url(uid);
        debug!("PATCH {} ({} segments)", url, segments.len());
        let response = self
            .authorize(self.client.patch(&url))
            .json(&UpdateSegmentsBody { segments })
            .send()
            .await?;
        Self::read_transport(uid, response).await
    }

    fn name(&self) -> &str {
        "http"
    }
}
