use serde_json::{Map, Value};

/// Walks `path` inside `value` and returns the node found there, if any.
/// Only mappings are traversed; hitting a sequence or scalar before the
/// path is exhausted yields `None`.
pub fn deep_get<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |node, key| node.as_object().and_then(|m| m.get(*key)))
}

/// Sets `addition` at `path` inside `base`, creating intermediate mappings
/// as required. Non-mapping nodes along the way are replaced by empty
/// mappings so the write always lands. An empty path replaces `base`.
pub fn deep_set(base: &mut Value, path: &[&str], addition: Value) {
    let Some((last, parents)) = path.split_last() else {
        *base = addition;
        return;
    };

    let mut node = base;
    for key in parents {
        node = ensure_object(node)
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    ensure_object(node).insert(last.to_string(), addition);
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }

    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just coerced to an object"),
    }
}

/// Merges `source` into `base` key by key.
///
/// # Behavior
/// - both sides sequences: the source entries are appended to the base
/// - both sides mappings: merged recursively
/// - anything else: the source value replaces the base value
///
/// Repeated merges therefore accumulate into sibling branches instead of
/// clobbering them.
pub fn merge_deep(base: &mut Value, source: Value) {
    match (base, source) {
        (Value::Object(base_map), Value::Object(source_map)) => {
            for (key, source_value) in source_map {
                match base_map.get_mut(&key) {
                    Some(base_value) => merge_deep(base_value, source_value),
                    None => {
                        base_map.insert(key, source_value);
                    }
                }
            }
        }
        (Value::Array(base_items), Value::Array(source_items)) => {
            base_items.extend(source_items);
        }
        (base, source) => *base = source,
    }
}

/// Places `addition` at `path` inside a fresh container and deep merges
/// that container into `base`
pub fn add_fragment(base: &mut Value, path: &[&str], addition: Value) {
    let mut container = Value::Object(Map::new());
    deep_set(&mut container, path, addition);
    merge_deep(base, container);
}

/// Concatenates `base` with the sequence found at `key` inside `source`.
/// A non-sequence base starts out empty, a missing or non-sequence value
/// at `key` is discarded and the base returned as is.
pub fn combine_array(base: Value, source: &Value, key: &[&str]) -> Vec<Value> {
    let mut combined = match base {
        Value::Array(items) => items,
        _ => Vec::new(),
    };

    if let Some(Value::Array(addition)) = deep_get(source, key) {
        combined.extend(addition.iter().cloned());
    }

    combined
}

/// Javascript style truthiness of a tree value, the original wire
/// contract drops falsy identifiers this way
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deep_get() {
        let value = json!({"a": {"b": {"c": 1}}, "list": [1, 2]});

        assert_eq!(deep_get(&value, &["a", "b", "c"]), Some(&json!(1)));
        assert_eq!(deep_get(&value, &["a", "missing"]), None);
        assert_eq!(deep_get(&value, &["list", "0"]), None);
        assert_eq!(deep_get(&value, &[]), Some(&value));
    }

    #[test]
    fn test_deep_set_creates_path() {
        let mut value = json!({});
        deep_set(&mut value, &["site", "content", "data"], json!([1]));

        assert_eq!(value, json!({"site": {"content": {"data": [1]}}}));
    }

    #[test]
    fn test_deep_set_replaces_scalar_parent() {
        let mut value = json!({"site": "oops"});
        deep_set(&mut value, &["site", "pagecat"], json!(["IAB1"]));

        assert_eq!(value, json!({"site": {"pagecat": ["IAB1"]}}));
    }

    #[test]
    fn test_merge_deep_concatenates_and_recurses() {
        let mut base = json!({
            "site": {"page": "https://p", "pagecat": ["IAB0"]},
            "user": {"id": "u"}
        });

        merge_deep(
            &mut base,
            json!({"site": {"pagecat": ["IAB1"], "content": {"language": "en"}}}),
        );

        assert_eq!(
            base,
            json!({
                "site": {
                    "page": "https://p",
                    "pagecat": ["IAB0", "IAB1"],
                    "content": {"language": "en"}
                },
                "user": {"id": "u"}
            })
        );
    }

    #[test]
    fn test_merge_deep_overwrites_mismatched_kinds() {
        let mut base = json!({"site": {"pagecat": "IAB0", "keywords": ["a"]}});
        merge_deep(&mut base, json!({"site": {"pagecat": ["IAB1"], "keywords": "b"}}));

        assert_eq!(base, json!({"site": {"pagecat": ["IAB1"], "keywords": "b"}}));
    }

    #[test]
    fn test_add_fragment_accumulates() {
        let mut base = json!({"site": {"content": {"data": [{"name": "other"}]}}});

        add_fragment(&mut base, &["site", "content", "data"], json!([{"name": "a"}]));
        add_fragment(&mut base, &["site", "content", "data"], json!([{"name": "a"}]));
        add_fragment(&mut base, &["site", "pagecat"], json!(["IAB1"]));

        assert_eq!(
            base,
            json!({"site": {
                "content": {"data": [{"name": "other"}, {"name": "a"}, {"name": "a"}]},
                "pagecat": ["IAB1"]
            }})
        );
    }

    #[test]
    fn test_combine_array() {
        assert_eq!(
            combine_array(json!([1, 2]), &json!({"x": [3, 4]}), &["x"]),
            vec![json!(1), json!(2), json!(3), json!(4)]
        );
        assert_eq!(
            combine_array(json!([1, 2]), &json!({"x": "not-array"}), &["x"]),
            vec![json!(1), json!(2)]
        );
        assert_eq!(
            combine_array(json!("not-array"), &json!({"x": [3]}), &["x"]),
            vec![json!(3)]
        );
        assert_eq!(
            combine_array(json!([1]), &json!({}), &["x", "y"]),
            vec![json!(1)]
        );
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!("IAB1")));
        assert!(is_truthy(&json!(12)));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([])));
    }
}
