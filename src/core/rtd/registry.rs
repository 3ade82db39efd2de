use crate::core::neuwo::{ClassificationClient, HttpClientConfig, NeuwoRtdProvider};
use crate::core::rtd::RtdSubmodule;
use anyhow::Error;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Submodules available to the real time data module, keyed by name
#[derive(Default)]
pub struct RtdRegistry {
    submodules: RwLock<HashMap<String, Arc<dyn RtdSubmodule>>>,
}

impl RtdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every submodule this crate ships
    pub fn with_defaults(http: &HttpClientConfig) -> Result<Self, Error> {
        let registry = Self::new();
        let client = Arc::new(ClassificationClient::new(http)?);

        registry.submodule(Arc::new(NeuwoRtdProvider::new(client)));

        Ok(registry)
    }

    /// Registers a submodule under its name, replacing any
    /// previous registration of the same name
    pub fn submodule(&self, submodule: Arc<dyn RtdSubmodule>) {
        let name = submodule.name().to_string();

        if self.submodules.write().insert(name.clone(), submodule).is_some() {
            warn!("Submodule {} registered twice, replacing", name);
        } else {
            debug!("Registered real time data submodule {}", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn RtdSubmodule>> {
        self.submodules.read().get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.submodules.read().keys().cloned().collect();
        names.sort();
        names
    }
}
