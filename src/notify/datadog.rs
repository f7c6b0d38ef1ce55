//! A destination posting to the Datadog Events API.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::{error, info};

use crate::notify::{Notifier, SinkError};
use crate::table::TableStyle;

pub const DEFAULT_API_BASE: &str = "https://api.datadoghq.com";

/// Datadog rejects event text over 4000 characters; stay under it with
/// headroom for the markdown sentinels.
pub const MAX_BODY_LEN: usize = 3950;

/// A client for posting events to Datadog.
pub struct DatadogSink {
    api_base: String,
    api_key: String,
    client: reqwest::Client,
}

impl DatadogSink {
    /// Creates a new `DatadogSink`. `api_base` is the scheme-and-host part
    /// of the Events API endpoint, without a trailing slash.
    pub fn new(api_base: String, api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap();
        Self {
            api_base,
            api_key,
            client,
        }
    }
}

#[async_trait]
impl Notifier for DatadogSink {
    fn name(&self) -> &'static str {
        "datadog"
    }

    fn style(&self) -> TableStyle {
        TableStyle::Markdown
    }

    fn max_body_len(&self) -> usize {
        MAX_BODY_LEN
    }

    async fn send(
        &self,
        title: &str,
        body: &str,
        tags: &BTreeMap<String, String>,
    ) -> Result<(), SinkError> {
        let tag_list: Vec<String> =
            tags.iter().map(|(key, value)| format!("{key}:{value}")).collect();
        let payload = json!({
            "title": title,
            "text": body,
            "tags": tag_list,
            "alert_type": "info",
            "source_type_name": "topicctl",
            "date_happened": Utc::now().timestamp(),
        });

        let response = self
            .client
            .post(format!("{}/api/v1/events", self.api_base))
            .header("DD-API-KEY", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|source| SinkError::Transport {
                name: "datadog",
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Failed to post Datadog event");
            return Err(SinkError::Rejected {
                name: "datadog",
                status,
                body,
            });
        }
        info!("Successfully posted event to Datadog.");
        Ok(())
    }
}
