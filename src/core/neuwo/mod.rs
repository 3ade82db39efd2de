//! Neuwo.ai contextual classification provider. Classifies the page url
//! through the Neuwo api and adds the returned IAB categories as first
//! party data segments.

mod client;
mod params;
mod provider;
mod request_url;
mod topics;

pub use client::{ClassificationClient, HttpClientConfig};
pub use params::{NeuwoParams, ParamsError, ValidatedParams};
pub use provider::NeuwoRtdProvider;
pub use request_url::{build_request_url, resolve_page_url};
pub use topics::{ContentData, inject_topics, topics_fragment};

/// Name the provider registers under with the real time data module
pub const MODULE_NAME: &str = "NeuwoRTDModule";
/// Data provider name written to `site.content.data[].name`
pub const DATA_PROVIDER: &str = "neuwo.ai";
