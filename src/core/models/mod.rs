pub mod request;

pub use request::{BidRequestConfig, Ortb2Fragments, RefererInfo};
