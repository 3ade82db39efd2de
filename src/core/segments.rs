use crate::core::fragments::is_truthy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Normalized category identifier attached as first party data.
/// Any other fields of the category detail, including an upper case
/// `ID`, are carried along untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Segment {
    /// Normalizes one category detail. The lower case `id` wins when
    /// truthy, otherwise `ID` is copied over. Returns `None` for entries
    /// that are not mappings or end up without a truthy id.
    pub fn from_detail(detail: &Value) -> Option<Segment> {
        let mut extra = detail.as_object()?.clone();

        let id = match extra.remove("id") {
            Some(id) if is_truthy(&id) => id,
            _ => extra.get("ID").cloned().unwrap_or(Value::Null),
        };

        if !is_truthy(&id) {
            return None;
        }

        let id = match id {
            Value::String(s) => s,
            other => other.to_string(),
        };

        Some(Segment { id, extra })
    }
}

/// Maps a sequence of category details to segments, preserving order.
/// Non-sequence input yields no segments, duplicates are kept.
pub fn pick_segments(normalizable: &Value) -> Vec<Segment> {
    match normalizable {
        Value::Array(details) => details.iter().filter_map(Segment::from_detail).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pick_segments_drops_entries_without_id() {
        let segments = pick_segments(&json!([{"ID": "a"}, {"id": "b"}, {}, null, {"ID": ""}]));

        assert_eq!(
            serde_json::to_value(&segments).unwrap(),
            json!([{"id": "a", "ID": "a"}, {"id": "b"}])
        );
    }

    #[test]
    fn test_pick_segments_non_array() {
        assert!(pick_segments(&json!({"id": "a"})).is_empty());
        assert!(pick_segments(&json!("IAB1")).is_empty());
        assert!(pick_segments(&json!(null)).is_empty());
    }

    #[test]
    fn test_lower_case_id_wins() {
        let segments = pick_segments(&json!([{"id": "lower", "ID": "upper", "label": "Sports"}]));

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].id, "lower");
        assert_eq!(segments[0].extra.get("ID"), Some(&json!("upper")));
        assert_eq!(segments[0].extra.get("label"), Some(&json!("Sports")));
    }

    #[test]
    fn test_falsy_lower_case_id_falls_back() {
        let segments = pick_segments(&json!([{"id": "", "ID": "IAB7"}, {"id": null, "ID": null}]));

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].id, "IAB7");
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let segments = pick_segments(&json!([{"id": "b"}, {"id": "a"}, {"id": "b"}]));
        let ids: Vec<&str> = segments.iter().map(|s| s.id.as_str()).collect();

        assert_eq!(ids, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_numeric_id_is_stringified() {
        let segments = pick_segments(&json!([{"ID": 42}, {"id": 0}, "IAB1"]));

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].id, "42");
    }
}
