use crate::core::events::BillingEvent;
use crate::core::fragments::{deep_get, is_truthy};
use crate::core::models::{BidRequestConfig, RefererInfo};
use crate::core::neuwo::{
    ClassificationClient, MODULE_NAME, NeuwoParams, ValidatedParams, build_request_url,
    resolve_page_url, topics_fragment,
};
use crate::core::rtd::{Enrichment, RtdProviderConfig, RtdSubmodule};
use anyhow::{Context, Error, bail};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{Instrument, Span, debug, error, info, info_span};
use uuid::Uuid;

/// Classifies the page through the Neuwo api and turns the returned
/// marketing categories into first party data segments
pub struct NeuwoRtdProvider {
    client: Arc<ClassificationClient>,
}

impl NeuwoRtdProvider {
    pub fn new(client: Arc<ClassificationClient>) -> Self {
        Self { client }
    }

    fn params(config: &RtdProviderConfig) -> Result<ValidatedParams, Error> {
        Ok(NeuwoParams::from_config(config)?.validate()?)
    }

    /// Interprets a raw response body. A billing event is raised only
    /// when the payload carries marketing categories.
    fn handle_response(body: &str, billing_id: Uuid) -> Result<Enrichment, Error> {
        let payload: Value =
            serde_json::from_str(body).context("Response to JSON parse error")?;

        if payload.is_null() {
            bail!("Response to JSON parse error: payload is null");
        }

        let billing = deep_get(&payload, &["marketing_categories"])
            .filter(|categories| is_truthy(categories))
            .map(|_| BillingEvent::request(billing_id, MODULE_NAME));

        Ok(Enrichment {
            fragment: Some(topics_fragment(&payload)),
            billing,
        })
    }

    async fn run0(
        &self,
        request: &BidRequestConfig,
        config: &RtdProviderConfig,
        referer: &RefererInfo,
    ) -> Enrichment {
        let span = Span::current();

        info!("starting getBidRequestData");

        let params = match Self::params(config) {
            Ok(params) => params,
            Err(e) => {
                error!("Cannot classify without valid params: {}", e);
                return Enrichment::none();
            }
        };

        let page_url = resolve_page_url(&params, referer, request);
        let url = build_request_url(&params, &page_url);
        let billing_id = Uuid::new_v4();

        span.record("billing_id", tracing::field::display(billing_id));
        debug!("Classification request url {}", url);

        let body = match self.client.fetch(&url).await {
            Ok(body) => body,
            Err(e) => {
                span.record("status", "transport_error");
                error!("xhr error: {}", e);
                return Enrichment::none();
            }
        };

        debug!("GetAiTopics: response {}", body);

        match Self::handle_response(&body, billing_id) {
            Ok(enrichment) => {
                span.record("status", "ok");
                if let Some(fragment) = &enrichment.fragment {
                    let segments = deep_get(fragment, &["site", "pagecat"])
                        .and_then(Value::as_array)
                        .map(Vec::len)
                        .unwrap_or(0);
                    span.record("segments", segments as u64);
                }
                enrichment
            }
            Err(e) => {
                span.record("status", "parse_error");
                error!("{:#}", e);
                Enrichment::none()
            }
        }
    }
}

#[async_trait]
impl RtdSubmodule for NeuwoRtdProvider {
    fn name(&self) -> &str {
        MODULE_NAME
    }

    fn init(&self, config: &RtdProviderConfig) -> Result<(), Error> {
        if let Err(e) = Self::params(config) {
            error!("{}: {}", MODULE_NAME, e);
            return Err(e);
        }

        Ok(())
    }

    async fn get_bid_request_data(
        &self,
        request: &BidRequestConfig,
        config: &RtdProviderConfig,
        referer: &RefererInfo,
    ) -> Enrichment {
        let span = info_span!(
            "neuwo_get_bid_request_data",
            billing_id = tracing::field::Empty,
            status = tracing::field::Empty,
            segments = tracing::field::Empty,
        );

        self.run0(request, config, referer).instrument(span).await
    }
}
