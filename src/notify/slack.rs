//! A destination posting to a Slack incoming webhook.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info};

use crate::notify::{Notifier, SinkError};
use crate::table::TableStyle;

/// Slack caps messages at 3000 characters; stay under it with headroom for
/// the title line.
pub const MAX_BODY_LEN: usize = 2950;

/// A client for sending messages to a Slack webhook.
pub struct SlackSink {
    webhook_url: String,
    client: reqwest::Client,
}

impl SlackSink {
    /// Creates a new `SlackSink`.
    pub fn new(webhook_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap();
        Self {
            webhook_url,
            client,
        }
    }
}

#[async_trait]
impl Notifier for SlackSink {
    fn name(&self) -> &'static str {
        "slack"
    }

    fn style(&self) -> TableStyle {
        TableStyle::Monospace
    }

    fn max_body_len(&self) -> usize {
        MAX_BODY_LEN
    }

    async fn send(
        &self,
        title: &str,
        body: &str,
        _tags: &BTreeMap<String, String>,
    ) -> Result<(), SinkError> {
        let text = if body.is_empty() {
            format!("*{title}*")
        } else {
            format!("*{title}*\n{body}")
        };
        let payload = json!({ "text": text });

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|source| SinkError::Transport {
                name: "slack",
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Failed to send Slack notification");
            return Err(SinkError::Rejected {
                name: "slack",
                status,
                body,
            });
        }
        info!("Successfully sent notification to Slack.");
        Ok(())
    }
}
