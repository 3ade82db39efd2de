use crate::core::fragments::merge_deep;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// First party data fragments the host merges into outgoing bid requests,
/// shaped like openrtb 2.x objects
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ortb2Fragments {
    /// Merged into every bid request regardless of bidder
    #[serde(default = "empty_object")]
    pub global: Value,
    /// Keyed by bidder code, only merged into that bidder's requests
    #[serde(default)]
    pub bidder: Map<String, Value>,
}

impl Default for Ortb2Fragments {
    fn default() -> Self {
        Self {
            global: empty_object(),
            bidder: Map::new(),
        }
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Host owned request configuration for one auction cycle.
/// Unknown top level fields survive a round trip untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BidRequestConfig {
    #[serde(default)]
    pub ortb2_fragments: Ortb2Fragments,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl BidRequestConfig {
    /// Deep merges a global fragment, sequences are appended and
    /// mappings merged key wise
    pub fn merge_global(&mut self, fragment: Value) {
        merge_deep(&mut self.ortb2_fragments.global, fragment);
    }
}

/// Details about the page the auction runs on, as detected by the host
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RefererInfo {
    /// Canonical url of the current page
    pub page: Option<String>,
}

impl RefererInfo {
    pub fn new(page: impl Into<String>) -> Self {
        Self {
            page: Some(page.into()),
        }
    }
}
