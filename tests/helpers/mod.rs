#![allow(dead_code)]
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use topicwatch::notify::{Notifier, SinkError};
use topicwatch::table::TableStyle;

/// One delivery as a sink saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct SentNotification {
    pub title: String,
    pub body: String,
    pub tags: BTreeMap<String, String>,
}

/// A sink that records everything it is asked to deliver.
pub struct RecordingSink {
    style: TableStyle,
    max_body_len: usize,
    sent: Arc<Mutex<Vec<SentNotification>>>,
}

impl RecordingSink {
    pub fn new(style: TableStyle, max_body_len: usize) -> Self {
        Self {
            style,
            max_body_len,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn markdown() -> Self {
        Self::new(TableStyle::Markdown, 3950)
    }

    pub fn monospace() -> Self {
        Self::new(TableStyle::Monospace, 2950)
    }

    /// A handle that stays valid after the sink is boxed away.
    pub fn sent_handle(&self) -> Arc<Mutex<Vec<SentNotification>>> {
        self.sent.clone()
    }
}

#[async_trait]
impl Notifier for RecordingSink {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn style(&self) -> TableStyle {
        self.style
    }

    fn max_body_len(&self) -> usize {
        self.max_body_len
    }

    async fn send(
        &self,
        title: &str,
        body: &str,
        tags: &BTreeMap<String, String>,
    ) -> Result<(), SinkError> {
        self.sent.lock().unwrap().push(SentNotification {
            title: title.to_string(),
            body: body.to_string(),
            tags: tags.clone(),
        });
        Ok(())
    }
}

/// A sink that rejects every delivery.
pub struct FailingSink;

#[async_trait]
impl Notifier for FailingSink {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn style(&self) -> TableStyle {
        TableStyle::Markdown
    }

    fn max_body_len(&self) -> usize {
        3950
    }

    async fn send(
        &self,
        _title: &str,
        _body: &str,
        _tags: &BTreeMap<String, String>,
    ) -> Result<(), SinkError> {
        Err(SinkError::Rejected {
            name: "failing",
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "nope".to_string(),
        })
    }
}
