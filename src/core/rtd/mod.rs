//! Real time data extension point. Submodules register by name, the
//! host initialises the configured ones once and runs them before each
//! auction to enrich the request's first party data.

mod module;
mod registry;
mod submodule;

pub use module::RtdModule;
pub use registry::RtdRegistry;
pub use submodule::{Enrichment, RtdProviderConfig, RtdSubmodule};
