//! Real time data enrichment for header bidding: classifies the page
//! through Neuwo.ai and merges the IAB categories into the bid request's
//! first party data.

pub mod app;
pub mod core;
