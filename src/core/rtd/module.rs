use crate::core::events::EventSink;
use crate::core::models::{BidRequestConfig, RefererInfo};
use crate::core::rtd::{Enrichment, RtdProviderConfig, RtdRegistry, RtdSubmodule};
use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Instrument, debug, error, info_span, warn};

struct ActiveProvider {
    config: RtdProviderConfig,
    submodule: Arc<dyn RtdSubmodule>,
}

/// The configured, successfully initialised providers. Built once at
/// startup, then run for every auction cycle.
pub struct RtdModule {
    providers: Vec<ActiveProvider>,
    auction_delay: Duration,
}

impl RtdModule {
    /// Initialises every configured provider. Unknown names and
    /// providers failing init are logged and left out entirely.
    pub fn new(
        registry: &RtdRegistry,
        configs: &[RtdProviderConfig],
        auction_delay: Duration,
    ) -> Self {
        let mut providers = Vec::with_capacity(configs.len());

        for config in configs {
            let submodule = match registry.get(&config.name) {
                Some(submodule) => submodule,
                None => {
                    warn!("No real time data submodule named {}, skipping", config.name);
                    continue;
                }
            };

            match submodule.init(config) {
                Ok(_) => {
                    debug!("Real time data submodule {} initialised", config.name);
                    providers.push(ActiveProvider {
                        config: config.clone(),
                        submodule,
                    });
                }
                Err(e) => error!("Submodule {} failed init, disabled: {}", config.name, e),
            }
        }

        RtdModule {
            providers,
            auction_delay,
        }
    }

    pub fn active_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.config.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Runs every active provider against a snapshot of `request`, each
    /// bounded by the auction delay, then merges the results into the
    /// global fragment in provider order and forwards billing events.
    /// Returns the number of providers which contributed a fragment.
    pub async fn enrich(
        &self,
        request: &mut BidRequestConfig,
        referer: &RefererInfo,
        events: &dyn EventSink,
    ) -> usize {
        let snapshot: &BidRequestConfig = request;

        let calls = self.providers.iter().map(|provider| {
            let span = info_span!("rtd_provider", provider = %provider.config.name);

            async move {
                match tokio::time::timeout(
                    self.auction_delay,
                    provider
                        .submodule
                        .get_bid_request_data(snapshot, &provider.config, referer),
                )
                .await
                {
                    Ok(enrichment) => enrichment,
                    Err(_) => {
                        warn!(
                            "Provider {} exceeded auction delay of {:?}, continuing without it",
                            provider.config.name, self.auction_delay
                        );
                        Enrichment::none()
                    }
                }
            }
            .instrument(span)
        });

        let enrichments = join_all(calls).await;

        let mut applied = 0;
        for enrichment in enrichments {
            if let Some(billing) = enrichment.billing {
                events.emit(billing);
            }

            if let Some(fragment) = enrichment.fragment {
                request.merge_global(fragment);
                applied += 1;
            }
        }

        applied
    }
}
