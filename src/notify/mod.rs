//! Notification destinations.
//!
//! Each destination implements [`Notifier`]. The dispatch loop renders one
//! body per destination in that destination's table style, applies its byte
//! cap, and hands the result off together with the shared title and tag set.

pub mod datadog;
pub mod slack;

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::table::TableStyle;

/// Errors surfaced by notification destinations. There is no retry policy;
/// a failed delivery aborts the run.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("request to {name} failed")]
    Transport {
        name: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{name} rejected the notification: status {status}, body: {body}")]
    Rejected {
        name: &'static str,
        status: StatusCode,
        body: String,
    },
}

/// A notification destination.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// A unique, descriptive name for the destination, used in logs.
    fn name(&self) -> &'static str;

    /// The table style this destination renders.
    fn style(&self) -> TableStyle;

    /// Maximum accepted body length in bytes.
    fn max_body_len(&self) -> usize;

    /// Delivers one notification.
    async fn send(
        &self,
        title: &str,
        body: &str,
        tags: &BTreeMap<String, String>,
    ) -> Result<(), SinkError>;
}
