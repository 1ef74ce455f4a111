//! Link health monitoring
//!
//! Classifies the telemetry link from receiver bookkeeping.

pub mod monitor;

pub use monitor::{LinkHealth, LinkMonitor, LinkStats};
