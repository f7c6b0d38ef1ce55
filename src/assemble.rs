//! Builds notification titles, tags, and size-capped bodies.

use std::collections::BTreeMap;

use crate::changes::TopicChange;
use crate::table::TableStyle;

/// Replacement body for renderings that exceed a destination's size limit.
pub const OVERSIZE_FALLBACK: &str =
    "Changes exceed notification length limit, check topicctl logs for details on changes";

/// The notification title, shared by every destination.
pub fn title(change: &TopicChange, region: &str) -> String {
    let details = change.details();
    let dry_run = if details.dry_run { "Dry run: " } else { "" };
    format!(
        "{dry_run}Topicctl ran apply on topic {} in region {}",
        details.topic, region
    )
}

/// The tag set attached to every notification for this event.
pub fn tags(change: &TopicChange, region: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("source".to_string(), "topicctl".to_string()),
        ("source_category".to_string(), "infra-tools".to_string()),
        ("region".to_string(), region.to_string()),
        ("topic".to_string(), change.details().topic.clone()),
    ])
}

/// Renders the body for one destination and applies its byte cap. An
/// oversized table is replaced outright, never cut mid-row.
pub fn body(change: &TopicChange, style: TableStyle, max_len: usize) -> String {
    let body = change.render_table(style);
    if body.len() > max_len {
        OVERSIZE_FALLBACK.to_string()
    } else {
        body
    }
}
