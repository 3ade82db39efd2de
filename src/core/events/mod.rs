pub mod billing;

pub use billing::{BillingEvent, BillingEventType, EventSink, LoggingEventSink};
