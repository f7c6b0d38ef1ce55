//! Serde models for the topicctl `--json-output` event stream.
//!
//! One JSON object per input line. The key set varies with the `action`
//! field; both shapes use the producer's camelCase names. Scalar change
//! fields are nullable across producer versions, so they are all modelled as
//! `Option` and filtered at build time.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::changes::TopicChange;

/// A topic-creation event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    pub topic: String,
    pub dry_run: bool,
    #[serde(default)]
    pub error: bool,
    pub error_message: Option<String>,
    pub num_partitions: Option<i64>,
    pub replication_factor: Option<i64>,
    pub config_entries: Option<Vec<ConfigEntry>>,
}

/// A topic-update event carrying before/after diffs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvent {
    pub topic: String,
    pub dry_run: bool,
    #[serde(default)]
    pub error: bool,
    pub error_message: Option<String>,
    pub num_partitions: Option<PartitionCountDiff>,
    pub new_config_entries: Option<Vec<ConfigEntry>>,
    pub updated_config_entries: Option<Vec<ConfigDiff>>,
    pub missing_keys: Option<Vec<String>>,
    pub replica_assignments: Option<Vec<ReplicaAssignmentDiff>>,
}

/// A config key set to a single value (creates and newly-added entries).
#[derive(Debug, Deserialize)]
pub struct ConfigEntry {
    pub name: String,
    pub value: Value,
}

/// A config key whose value changed.
#[derive(Debug, Deserialize)]
pub struct ConfigDiff {
    pub name: String,
    pub current: Value,
    pub updated: Value,
}

/// Partition-count before/after pair. Some producer versions emit the object
/// with null members, so both sides are nullable.
#[derive(Debug, Deserialize)]
pub struct PartitionCountDiff {
    pub current: Option<i64>,
    pub updated: Option<i64>,
}

/// Replica reassignment for a single partition.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaAssignmentDiff {
    pub partition: i64,
    pub current_replicas: Vec<i64>,
    pub updated_replicas: Vec<i64>,
}

/// Decodes one line of topicctl JSON output into a [`TopicChange`].
///
/// `"create"` selects the created variant; every other action value selects
/// the updated variant, which is what older producers expect for actions
/// like `"delete"`. A line that is not valid JSON, or that is missing a
/// required key, is fatal to the run.
pub fn parse_event(line: &str) -> Result<TopicChange> {
    let value: Value =
        serde_json::from_str(line).context("malformed JSON event")?;
    let action = value
        .get("action")
        .and_then(Value::as_str)
        .map(str::to_owned);
    match action.as_deref() {
        None => bail!("event is missing the `action` key"),
        Some("create") => {
            let event: CreateEvent =
                serde_json::from_value(value).context("invalid create event")?;
            Ok(TopicChange::from_create(event))
        }
        Some(_) => {
            let event: UpdateEvent =
                serde_json::from_value(value).context("invalid update event")?;
            Ok(TopicChange::from_update(event))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_action_selects_created_variant() {
        let change = parse_event(
            r#"{"action": "create", "topic": "t1", "dryRun": false,
                "numPartitions": null, "replicationFactor": null,
                "configEntries": [], "errorMessage": null}"#,
        )
        .unwrap();
        assert!(matches!(change, TopicChange::Created(_)));
    }

    #[test]
    fn test_any_other_action_selects_updated_variant() {
        for action in ["update", "delete", "noop"] {
            let line = format!(
                r#"{{"action": "{action}", "topic": "t1", "dryRun": false}}"#
            );
            let change = parse_event(&line).unwrap();
            assert!(matches!(change, TopicChange::Updated(_)), "action {action}");
        }
    }

    #[test]
    fn test_missing_action_key_is_fatal() {
        let err = parse_event(r#"{"topic": "t1", "dryRun": false}"#).unwrap_err();
        assert!(err.to_string().contains("action"));
    }

    #[test]
    fn test_missing_dry_run_key_is_fatal() {
        let result = parse_event(r#"{"action": "update", "topic": "t1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_topic_key_is_fatal() {
        let result = parse_event(r#"{"action": "update", "dryRun": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let err = parse_event("{not json").unwrap_err();
        assert!(err.to_string().contains("malformed JSON"));
    }
}
