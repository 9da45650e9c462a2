//! Payload normalization for the backend's list endpoints.
//!
//! The backend's two list-emitting endpoints ("popular" and the debug status
//! dump) do not share an item schema: an item may arrive as a bare string, or
//! as an object carrying the text under one of several field names (a raw
//! Redis ZSET member leaks through as `{"member": ..., "score": ...}`).
//! Everything here decodes by attempt, never by assumption:
//!
//! - bare string → the string itself
//! - object → first present field from [`VALUE_FIELDS`], in priority order
//! - anything else → empty text (rendered as an empty row, not dropped)
//!
//! Scores are read only from a numeric-or-numeric-text `score` field; a
//! missing or wrong-typed score is omitted from the render, never shown as 0.

use serde_json::Value;

/// Field names that may carry an item's display value, in resolution order.
pub const VALUE_FIELDS: [&str; 3] = ["value", "member", "element"];

/// Normalized list item displayed in either ranked list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordEntry {
    pub value: String,
    pub score: Option<String>,
}

impl KeywordEntry {
    #[must_use]
    pub fn from_value(item: &Value) -> Self {
        Self { value: extract_value(item), score: extract_score(item) }
    }
}

/// Extract the display value from one list item.
///
/// A valid entry always yields non-empty text; an entry that yields nothing
/// normalizes to the empty string rather than failing the whole list.
#[must_use]
pub fn extract_value(item: &Value) -> String {
    if let Some(s) = item.as_str() {
        return s.to_string();
    }
    if let Some(obj) = item.as_object() {
        // String fields first, in priority order.
        for field in VALUE_FIELDS {
            if let Some(s) = obj.get(field).and_then(Value::as_str) {
                return s.to_string();
            }
        }
        // Best-effort textual coercion of whichever field is present.
        for field in VALUE_FIELDS {
            if let Some(v) = obj.get(field) {
                if !v.is_null() {
                    return coerce_text(v);
                }
            }
        }
    }
    String::new()
}

/// Extract the rank score, if the item carries one in a usable type.
#[must_use]
pub fn extract_score(item: &Value) -> Option<String> {
    match item.get("score")? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Decode a whole list payload; non-array bodies degrade to the empty list.
#[must_use]
pub fn entries_from(payload: &Value) -> Vec<KeywordEntry> {
    payload
        .as_array()
        .map(|items| items.iter().map(KeywordEntry::from_value).collect())
        .unwrap_or_default()
}

fn coerce_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Backing-store introspection payload (debug status dump).
///
/// Decoded field-by-field so one malformed field degrades alone: missing
/// counts render as 0, missing lists as empty, matching the render contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusPayload {
    pub popular_keywords: Vec<KeywordEntry>,
    pub recent_keywords: Vec<KeywordEntry>,
    pub total_popular_count: u64,
    pub total_recent_count: u64,
}

impl StatusPayload {
    #[must_use]
    pub fn from_value(payload: &Value) -> Self {
        Self {
            popular_keywords: payload
                .get("popularKeywords")
                .map(entries_from)
                .unwrap_or_default(),
            recent_keywords: payload
                .get("recentKeywords")
                .map(entries_from)
                .unwrap_or_default(),
            total_popular_count: count_field(payload, "totalPopularCount"),
            total_recent_count: count_field(payload, "totalRecentCount"),
        }
    }
}

fn count_field(payload: &Value, field: &str) -> u64 {
    payload.get(field).and_then(Value::as_u64).unwrap_or(0)
}

/// Two-store latency/result comparison payload. Result lists are assumed to
/// already be plain text and are rendered verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonPayload {
    pub redis_result: Vec<String>,
    pub db_result: Vec<String>,
    pub redis_time: String,
    pub db_time: String,
    pub performance_improvement: String,
}

impl ComparisonPayload {
    #[must_use]
    pub fn from_value(payload: &Value) -> Self {
        Self {
            redis_result: text_list(payload, "redisResult"),
            db_result: text_list(payload, "dbResult"),
            redis_time: text_field(payload, "redisTime"),
            db_time: text_field(payload, "dbTime"),
            performance_improvement: text_field(payload, "performanceImprovement"),
        }
    }
}

fn text_list(payload: &Value, field: &str) -> Vec<String> {
    payload
        .get(field)
        .and_then(Value::as_array)
        .map(|items| items.iter().map(coerce_text).collect())
        .unwrap_or_default()
}

fn text_field(payload: &Value, field: &str) -> String {
    match payload.get(field) {
        None | Some(Value::Null) => "-".to_string(),
        Some(v) => coerce_text(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_string_normalizes_to_itself() {
        let entry = KeywordEntry::from_value(&json!("foo"));
        assert_eq!(entry.value, "foo");
        assert_eq!(entry.score, None);
    }

    #[test]
    fn value_field_with_numeric_score() {
        let entry = KeywordEntry::from_value(&json!({"value": "foo", "score": 42}));
        assert_eq!(entry.value, "foo");
        assert_eq!(entry.score.as_deref(), Some("42"));
    }

    #[test]
    fn member_field_without_score() {
        let entry = KeywordEntry::from_value(&json!({"member": "bar"}));
        assert_eq!(entry.value, "bar");
        assert_eq!(entry.score, None);
    }

    #[test]
    fn empty_object_normalizes_to_empty_text() {
        let entry = KeywordEntry::from_value(&json!({}));
        assert_eq!(entry.value, "");
        assert_eq!(entry.score, None);
    }

    #[test]
    fn value_takes_priority_over_member_and_element() {
        let item = json!({"element": "c", "member": "b", "value": "a"});
        assert_eq!(extract_value(&item), "a");
    }

    #[test]
    fn numeric_value_field_is_coerced_to_text() {
        assert_eq!(extract_value(&json!({"member": 7})), "7");
    }

    #[test]
    fn score_as_numeric_text_is_kept() {
        assert_eq!(extract_score(&json!({"score": "3.5"})).as_deref(), Some("3.5"));
    }

    #[test]
    fn wrong_typed_score_is_omitted() {
        assert_eq!(extract_score(&json!({"score": [1, 2]})), None);
        assert_eq!(extract_score(&json!({"score": null})), None);
    }

    #[test]
    fn non_array_payload_decodes_as_empty_list() {
        assert!(entries_from(&json!({"oops": true})).is_empty());
        assert!(entries_from(&Value::Null).is_empty());
    }

    #[test]
    fn mixed_shape_list_decodes_item_by_item() {
        let entries = entries_from(&json!(["plain", {"value": "v", "score": 1}, {}]));
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].value, "plain");
        assert_eq!(entries[1].score.as_deref(), Some("1"));
        assert_eq!(entries[2].value, "");
    }

    #[test]
    fn status_payload_defaults_missing_fields() {
        let status = StatusPayload::from_value(&json!({}));
        assert_eq!(status.total_popular_count, 0);
        assert_eq!(status.total_recent_count, 0);
        assert!(status.popular_keywords.is_empty());
        assert!(status.recent_keywords.is_empty());
    }

    #[test]
    fn status_payload_tolerates_one_malformed_field() {
        let status = StatusPayload::from_value(&json!({
            "popularKeywords": "not-a-list",
            "recentKeywords": [{"member": "shoes"}],
            "totalPopularCount": 3,
            "totalRecentCount": -1,
        }));
        assert!(status.popular_keywords.is_empty());
        assert_eq!(status.recent_keywords[0].value, "shoes");
        assert_eq!(status.total_popular_count, 3);
        // Negative counts are out of contract; render as 0, not blank.
        assert_eq!(status.total_recent_count, 0);
    }

    #[test]
    fn comparison_payload_keeps_result_lists_verbatim() {
        let cmp = ComparisonPayload::from_value(&json!({
            "redisResult": ["a", "b"],
            "dbResult": ["a"],
            "redisTime": "5ms",
            "dbTime": "120ms",
            "performanceImprovement": "24x",
        }));
        assert_eq!(cmp.redis_result, vec!["a", "b"]);
        assert_eq!(cmp.db_result, vec!["a"]);
        assert_eq!(cmp.redis_time, "5ms");
        assert_eq!(cmp.performance_improvement, "24x");
    }

    #[test]
    fn comparison_payload_placeholders_for_missing_times() {
        let cmp = ComparisonPayload::from_value(&json!({}));
        assert_eq!(cmp.redis_time, "-");
        assert_eq!(cmp.db_time, "-");
        assert!(cmp.redis_result.is_empty());
    }
}
