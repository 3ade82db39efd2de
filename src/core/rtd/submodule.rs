use crate::core::events::BillingEvent;
use crate::core::models::{BidRequestConfig, RefererInfo};
use anyhow::Error;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One configured real time data provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RtdProviderConfig {
    /// Registered submodule name, e.g. `NeuwoRTDModule`
    pub name: String,
    /// Submodule specific params, interpreted by the submodule itself
    #[serde(default)]
    pub params: Value,
}

/// Result of one enrichment call. The host merges `fragment` into the
/// global first party data and forwards `billing` to its event sink.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Enrichment {
    pub fragment: Option<Value>,
    pub billing: Option<BillingEvent>,
}

impl Enrichment {
    /// Proceed unenriched
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.fragment.is_none() && self.billing.is_none()
    }
}

#[async_trait]
pub trait RtdSubmodule: Send + Sync {
    /// Name the submodule registers under
    fn name(&self) -> &str;

    /// Validates the provider config. A failure disables the submodule
    /// for the host's lifetime. Must be side effect free beyond logging.
    fn init(&self, config: &RtdProviderConfig) -> Result<(), Error>;

    /// Computes the enrichment for one auction cycle. Always resolves
    /// exactly once, failures resolve to [`Enrichment::none`].
    async fn get_bid_request_data(
        &self,
        request: &BidRequestConfig,
        config: &RtdProviderConfig,
        referer: &RefererInfo,
    ) -> Enrichment;
}
