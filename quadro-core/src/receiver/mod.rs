//! Telemetry reception pipeline
//!
//! Assembles raw bus bytes into frames, decodes them into records and
//! keeps a bounded history plus link bookkeeping.

pub mod engine;
pub mod history;

pub use engine::TelemetryReceiver;
pub use history::{HistoryBuffer, HISTORY_CAPACITY};
