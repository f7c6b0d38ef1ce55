//! Normalizes raw apply events into ordered change sets.
//!
//! A [`TopicChange`] is built fresh for every input line, rendered once per
//! destination, and discarded. Row order follows detection order: the action
//! marker first, then scalar changes, then config entries in input order.

use itertools::Itertools;
use serde_json::Value;

use crate::event::{CreateEvent, UpdateEvent};
use crate::table::{make_table, TableStyle};

const ACTION_MARKER: &str = "Action (create/update)";

/// The normalized payload shared by both change variants.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeSet {
    pub topic: String,
    pub dry_run: bool,
    pub error: bool,
    pub error_message: Option<String>,
    /// Ordered change rows; empty when nothing substantive changed.
    pub rows: Vec<Vec<String>>,
}

/// One topic's worth of apply output.
#[derive(Debug, Clone, PartialEq)]
pub enum TopicChange {
    Created(ChangeSet),
    Updated(ChangeSet),
}

impl TopicChange {
    /// Builds the created variant. Each row is conditional on its raw field
    /// being present and non-zero; a marker-only change set collapses to
    /// empty so "no changes" renders distinctly from "changes exist".
    pub fn from_create(event: CreateEvent) -> Self {
        let mut rows =
            vec![vec![ACTION_MARKER.to_string(), "create".to_string()]];
        if let Some(partitions) = event.num_partitions.filter(|&n| n != 0) {
            rows.push(vec!["Partition Count".to_string(), partitions.to_string()]);
        }
        if let Some(replication) = event.replication_factor.filter(|&n| n != 0) {
            rows.push(vec![
                "Replication Factor".to_string(),
                replication.to_string(),
            ]);
        }
        for entry in event.config_entries.unwrap_or_default() {
            rows.push(vec![entry.name, text_cell(&entry.value)]);
        }
        if rows.len() == 1 {
            rows.clear();
        }

        TopicChange::Created(ChangeSet {
            topic: event.topic,
            dry_run: event.dry_run,
            error: event.error || event.error_message.is_some(),
            error_message: event.error_message,
            rows,
        })
    }

    /// Builds the updated variant. The partition-count diff is only included
    /// when the nested object is present with both sides set; some producer
    /// versions emit the object with null members and those are dropped.
    pub fn from_update(event: UpdateEvent) -> Self {
        let mut rows = vec![vec![
            ACTION_MARKER.to_string(),
            "update".to_string(),
            String::new(),
        ]];

        if let Some(diff) = &event.num_partitions {
            let current = diff.current.filter(|&n| n != 0);
            let updated = diff.updated.filter(|&n| n != 0);
            if let (Some(current), Some(updated)) = (current, updated) {
                rows.push(vec![
                    "Partition Count".to_string(),
                    current.to_string(),
                    updated.to_string(),
                ]);
            }
        }

        for entry in event.new_config_entries.unwrap_or_default() {
            rows.push(vec![entry.name, String::new(), text_cell(&entry.value)]);
        }
        for entry in event.updated_config_entries.unwrap_or_default() {
            rows.push(vec![
                entry.name,
                text_cell(&entry.current),
                text_cell(&entry.updated),
            ]);
        }
        for key in event.missing_keys.unwrap_or_default() {
            rows.push(vec![key, String::new(), "REMOVED".to_string()]);
        }
        for assignment in event.replica_assignments.unwrap_or_default() {
            rows.push(vec![
                format!("Partition {} assignments", assignment.partition),
                replica_list(&assignment.current_replicas),
                replica_list(&assignment.updated_replicas),
            ]);
        }

        if rows.len() == 1 {
            rows.clear();
        }

        TopicChange::Updated(ChangeSet {
            topic: event.topic,
            dry_run: event.dry_run,
            error: event.error || event.error_message.is_some(),
            error_message: event.error_message,
            rows,
        })
    }

    pub fn details(&self) -> &ChangeSet {
        match self {
            TopicChange::Created(details) | TopicChange::Updated(details) => {
                details
            }
        }
    }

    fn headers(&self) -> &'static [&'static str] {
        match self {
            TopicChange::Created(_) => &["Parameter", "Value"],
            TopicChange::Updated(_) => &["Parameter", "Old Value", "New Value"],
        }
    }

    /// Renders the change table in the given style, with the error overlay
    /// when the event carried an upstream failure.
    pub fn render_table(&self, style: TableStyle) -> String {
        let details = self.details();
        let error_message = details
            .error
            .then(|| details.error_message.as_deref().unwrap_or(""));
        make_table(self.headers(), &details.rows, error_message, style)
    }
}

/// Stringifies a JSON scalar for a table cell. Strings render bare; anything
/// else keeps its JSON form.
fn text_cell(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn replica_list(replicas: &[i64]) -> String {
    format!("[{}]", replicas.iter().join(", "))
}
