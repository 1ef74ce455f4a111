//! Bounded telemetry history.

use heapless::{Deque, Vec};
use quadro_protocol::TelemetryRecord;

/// Number of records the history holds
pub const HISTORY_CAPACITY: usize = 10;

/// Fixed-capacity history of decoded records
///
/// Pushing to a full history evicts the oldest record, so the buffer
/// always holds the most recent records in arrival order.
#[derive(Debug)]
pub struct HistoryBuffer {
    records: Deque<TelemetryRecord, HISTORY_CAPACITY>,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryBuffer {
    /// Create an empty history
    pub const fn new() -> Self {
        Self {
            records: Deque::new(),
        }
    }

    /// Append a record, evicting the oldest when full
    pub fn push(&mut self, record: TelemetryRecord) {
        if self.records.is_full() {
            self.records.pop_front();
        }
        // Cannot fail: space was just ensured
        let _ = self.records.push_back(record);
    }

    /// Most recent record
    pub fn latest(&self) -> Option<&TelemetryRecord> {
        self.records.back()
    }

    /// Copy of the history, oldest first
    ///
    /// The copy is detached: later pushes do not affect it.
    pub fn snapshot(&self) -> Vec<TelemetryRecord, HISTORY_CAPACITY> {
        self.records.iter().copied().collect()
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the history holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop all records
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadro_protocol::frame::PAYLOAD_LEN;

    fn record(rpm: u16) -> TelemetryRecord {
        let mut payload = [0u8; PAYLOAD_LEN];
        payload[0..2].copy_from_slice(&rpm.to_be_bytes());
        payload[13] = 0x03;
        TelemetryRecord::decode(&payload).unwrap()
    }

    #[test]
    fn test_push_and_latest() {
        let mut history = HistoryBuffer::new();
        assert!(history.is_empty());
        assert_eq!(history.latest(), None);

        history.push(record(100));
        history.push(record(200));

        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap().motor_rpm, 200);
    }

    #[test]
    fn test_eleventh_push_evicts_oldest() {
        let mut history = HistoryBuffer::new();
        for rpm in 1..=11 {
            history.push(record(rpm));
        }

        assert_eq!(history.len(), HISTORY_CAPACITY);

        let snapshot = history.snapshot();
        let rpms: heapless::Vec<u16, HISTORY_CAPACITY> =
            snapshot.iter().map(|r| r.motor_rpm).collect();
        assert_eq!(&rpms[..], &[2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut history = HistoryBuffer::new();
        history.push(record(1));

        let snapshot = history.snapshot();
        history.push(record(2));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].motor_rpm, 1);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_clear_empties_history() {
        let mut history = HistoryBuffer::new();
        for rpm in 1..=5 {
            history.push(record(rpm));
        }

        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.latest(), None);
    }
}
