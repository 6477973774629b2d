//! HTTP client for the remote analytics collector.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use aggregate::UsageAggregate;
use tracker_core::{AnalyticsEvent, Error, Result};

use crate::config::CollectorConfig;

/// Result of a successful push.
#[derive(Debug, Clone, Copy)]
pub struct PushResult {
    pub events_sent: usize,
}

/// Seam for the remote collector (HTTP in production, mock in tests).
#[async_trait]
pub trait Collector: Send + Sync {
    /// Transmits a batch of events plus the current usage snapshot.
    /// Any non-2xx response or transport failure is an error; the caller
    /// decides what stays pending.
    async fn push(&self, events: &[AnalyticsEvent], usage: &UsageAggregate) -> Result<PushResult>;
}

/// Wire body for `POST /analytics/events`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PushRequest<'a> {
    events: &'a [AnalyticsEvent],
    usage_data: &'a UsageAggregate,
}

/// Production collector client.
pub struct HttpCollector {
    base_url: String,
    api_token: String,
    http_client: reqwest::Client,
}

impl HttpCollector {
    /// Creates the client, validating the endpoint and building a
    /// reqwest client with the configured timeout so a hung collector can
    /// never hold a sync slot indefinitely.
    pub fn new(config: CollectorConfig) -> Result<Self> {
        config.validate()?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token,
            http_client,
        })
    }
}

#[async_trait]
impl Collector for HttpCollector {
    async fn push(&self, events: &[AnalyticsEvent], usage: &UsageAggregate) -> Result<PushResult> {
        let url = format!("{}/analytics/events", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .json(&PushRequest {
                events,
                usage_data: usage,
            })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Collector request failed");
                Error::transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Collector rejected push");
            return Err(Error::CollectorStatus {
                status: status.as_u16(),
            });
        }

        debug!(count = events.len(), "Pushed events to collector");
        Ok(PushResult {
            events_sent: events.len(),
        })
    }
}
