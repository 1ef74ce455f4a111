//! Link health assessment.
//!
//! Decides what the cluster should say about the telemetry link from
//! the receiver bookkeeping: when the last valid frame arrived and how
//! many receive errors have accumulated.

use crate::config::LinkConfig;

/// Telemetry link health
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkHealth {
    /// Fresh data is arriving
    Active,
    /// No valid frame for longer than the configured window
    Stale,
    /// No valid frame since power-on
    Down,
}

/// Receiver bookkeeping shared with the display side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    /// Time the last valid frame was received, if any
    pub last_receive_ms: Option<u64>,
    /// Receive errors since power-on
    pub error_count: u32,
}

/// Watches receiver bookkeeping and classifies link health
#[derive(Debug)]
pub struct LinkMonitor {
    stale_after_ms: u32,
    seen_errors: u32,
}

impl LinkMonitor {
    /// Create a new monitor
    pub const fn new(config: &LinkConfig) -> Self {
        Self {
            stale_after_ms: config.stale_after_ms,
            seen_errors: 0,
        }
    }

    /// Classify the link from the last receive time
    ///
    /// A record exactly at the staleness window still counts as
    /// active; only strictly older data is stale.
    pub fn assess(&self, last_receive_ms: Option<u64>, now_ms: u64) -> LinkHealth {
        match last_receive_ms {
            None => LinkHealth::Down,
            Some(received) => {
                if now_ms.saturating_sub(received) > self.stale_after_ms as u64 {
                    LinkHealth::Stale
                } else {
                    LinkHealth::Active
                }
            }
        }
    }

    /// Receive errors accumulated since the previous call
    pub fn error_delta(&mut self, error_count: u32) -> u32 {
        let delta = error_count.wrapping_sub(self.seen_errors);
        self.seen_errors = error_count;
        delta
    }
}
