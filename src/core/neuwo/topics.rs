use crate::core::fragments::{add_fragment, combine_array};
use crate::core::models::BidRequestConfig;
use crate::core::neuwo::DATA_PROVIDER;
use crate::core::segments::{Segment, pick_segments};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

const RESPONSE_IAB_TIER_1: &[&str] = &["marketing_categories", "iab_tier_1"];
const RESPONSE_IAB_TIER_2: &[&str] = &["marketing_categories", "iab_tier_2"];
const SITE_CONTENT_DATA: &[&str] = &["site", "content", "data"];
const SITE_PAGECAT: &[&str] = &["site", "pagecat"];

/// Openrtb `content.data` entry carrying the classification segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentData {
    pub name: String,
    pub segment: Vec<Segment>,
}

/// Builds the global first party data fragment for a classification
/// response. Tier 1 categories come first, then tier 2.
///
/// The `content.data` descriptor is always present, even with no
/// segments, while `site.pagecat` is only written when at least one
/// segment was found.
pub fn topics_fragment(topics: &Value) -> Value {
    let combined_tiers = combine_array(
        Value::Array(combine_array(Value::Array(Vec::new()), topics, RESPONSE_IAB_TIER_1)),
        topics,
        RESPONSE_IAB_TIER_2,
    );

    let segment = pick_segments(&Value::Array(combined_tiers));
    let pagecat: Vec<Value> = segment.iter().map(|s| Value::String(s.id.clone())).collect();

    let content_data = ContentData {
        name: DATA_PROVIDER.to_string(),
        segment,
    };

    let mut fragment = Value::Object(Map::new());
    add_fragment(
        &mut fragment,
        SITE_CONTENT_DATA,
        Value::Array(vec![to_value(&content_data)]),
    );

    if !pagecat.is_empty() {
        add_fragment(&mut fragment, SITE_PAGECAT, Value::Array(pagecat));
    }

    fragment
}

fn to_value(content_data: &ContentData) -> Value {
    let segment = content_data
        .segment
        .iter()
        .map(|s| {
            let mut entry = s.extra.clone();
            entry.insert("id".to_string(), Value::String(s.id.clone()));
            Value::Object(entry)
        })
        .collect();

    let mut entry = Map::new();
    entry.insert("name".to_string(), Value::String(content_data.name.clone()));
    entry.insert("segment".to_string(), Value::Array(segment));
    Value::Object(entry)
}

/// Merges the classification of `topics` into the request's global
/// first party data. Repeated calls append further descriptors.
pub fn inject_topics(topics: &Value, request: &mut BidRequestConfig) {
    request.merge_global(topics_fragment(topics));

    debug!(
        global = %request.ortb2_fragments.global,
        "injectTopics: post-injection global fragment"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inject_both_tiers() {
        let topics = json!({"marketing_categories": {
            "iab_tier_1": [{"id": "IAB1", "label": "Arts"}],
            "iab_tier_2": [{"ID": "IAB2"}]
        }});
        let mut request = BidRequestConfig::default();

        inject_topics(&topics, &mut request);

        assert_eq!(
            request.ortb2_fragments.global,
            json!({"site": {
                "content": {"data": [{
                    "name": "neuwo.ai",
                    "segment": [{"id": "IAB1", "label": "Arts"}, {"id": "IAB2", "ID": "IAB2"}]
                }]},
                "pagecat": ["IAB1", "IAB2"]
            }})
        );
    }

    #[test]
    fn test_empty_response_adds_descriptor_only() {
        let mut request = BidRequestConfig::default();

        inject_topics(&json!({}), &mut request);

        assert_eq!(
            request.ortb2_fragments.global,
            json!({"site": {"content": {"data": [{"name": "neuwo.ai", "segment": []}]}}})
        );
    }

    #[test]
    fn test_null_topics_treated_as_empty() {
        assert_eq!(topics_fragment(&Value::Null), topics_fragment(&json!({})));
    }

    #[test]
    fn test_non_array_tiers_ignored() {
        let topics = json!({"marketing_categories": {
            "iab_tier_1": "IAB1",
            "iab_tier_2": [{"id": "IAB2"}]
        }});

        assert_eq!(
            topics_fragment(&topics),
            json!({"site": {
                "content": {"data": [{"name": "neuwo.ai", "segment": [{"id": "IAB2"}]}]},
                "pagecat": ["IAB2"]
            }})
        );
    }

    #[test]
    fn test_inject_twice_appends() {
        let topics = json!({"marketing_categories": {"iab_tier_1": [{"id": "IAB1"}]}});
        let mut request = BidRequestConfig::default();
        request.merge_global(json!({"site": {
            "page": "https://p",
            "content": {"data": [{"name": "other", "segment": []}]},
            "pagecat": ["IAB0"]
        }}));

        inject_topics(&topics, &mut request);
        inject_topics(&topics, &mut request);

        let global = &request.ortb2_fragments.global;
        assert_eq!(global["site"]["page"], json!("https://p"));
        assert_eq!(global["site"]["content"]["data"].as_array().unwrap().len(), 3);
        assert_eq!(global["site"]["content"]["data"][0]["name"], json!("other"));
        assert_eq!(global["site"]["pagecat"], json!(["IAB0", "IAB1", "IAB1"]));
    }

    #[test]
    fn test_content_data_serializes() {
        let fragment = topics_fragment(&json!({"marketing_categories": {"iab_tier_1": [{"id": "IAB1"}]}}));
        let data: Vec<ContentData> =
            serde_json::from_value(fragment["site"]["content"]["data"].clone()).unwrap();

        assert_eq!(data[0].name, "neuwo.ai");
        assert_eq!(data[0].segment[0].id, "IAB1");
    }
}
