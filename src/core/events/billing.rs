use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::info;
use uuid::Uuid;

/// Kind of billable action a vendor reports
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BillingEventType {
    /// A classification request was served with usable data
    Request,
}

/// Billable event raised by a real time data vendor, forwarded by the
/// host to whatever accounting sink it runs
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillingEvent {
    #[serde(rename = "type")]
    pub event_type: BillingEventType,
    pub billing_id: Uuid,
    pub vendor: String,
}

impl BillingEvent {
    /// A `request` event for `vendor` under an existing billing id
    pub fn request(billing_id: Uuid, vendor: &str) -> Self {
        BillingEvent {
            event_type: BillingEventType::Request,
            billing_id,
            vendor: vendor.to_string(),
        }
    }
}

/// Receives billing events the host chooses to publish
pub trait EventSink: Send + Sync {
    fn emit(&self, event: BillingEvent);
}

/// Sink which only records billing events to the log
pub struct LoggingEventSink;

impl EventSink for LoggingEventSink {
    fn emit(&self, event: BillingEvent) {
        info!(
            event_type = %event.event_type,
            billing_id = %event.billing_id,
            vendor = %event.vendor,
            "Billable event"
        );
    }
}
