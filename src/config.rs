//! Configuration management

use std::time::Duration;

use anyhow::{self, Context, Result};

use crate::services::transport_api::TransportApiConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// NATS server URL
    pub nats_url: String,

    /// Optional NATS credentials (both must be set)
    pub nats_user: Option<String>,
    pub nats_password: Option<String>,

    /// Prefix of every subscribed subject (`<prefix>.transport.reorder`, ...)
    pub subject_prefix: String,

    /// Transport REST API connection
    pub transport_api: TransportApiConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from a variable lookup
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let nats_url = var("NATS_URL").unwrap_or_else(|| "nats://localhost:4222".to_string());

        let nats_user = var("NATS_USER").filter(|u| !u.is_empty());
        let nats_password = var("NATS_PASSWORD");

        let subject_prefix = var("NATS_SUBJECT_PREFIX")
            .map(|p| p.trim_end_matches('.').to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "tms".to_string());

        let base_url = var("TRANSPORT_API_URL").context("TRANSPORT_API_URL must be set")?;

        let token = var("TRANSPORT_API_TOKEN").filter(|t| !t.is_empty());

        let timeout = match var("TRANSPORT_API_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("TRANSPORT_API_TIMEOUT_SECS is not a number: {raw}"))?;
                if secs == 0 {
                    anyhow::bail!("TRANSPORT_API_TIMEOUT_SECS must be positive");
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        if token.is_none() {
            tracing::warn!("TRANSPORT_API_TOKEN not set, transport API requests are unauthenticated");
        }

        Ok(Self {
            nats_url,
            nats_user,
            nats_password,
            subject_prefix,
            transport_api: TransportApiConfig {
                base_url,
                token,
                timeout,
            },
        })
    }

    /// Full subject name for `suffix`
    pub fn subject(&self, suffix: &str) -> String {
        format!("{}.{}", self.subject_prefix, suffix)
    }
}
