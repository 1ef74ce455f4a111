//! Telemetry receiver.
//!
//! Owns the frame assembler, the bounded history and the link
//! bookkeeping. The receiver is fed raw bytes from the bus task and
//! never blocks: complete valid frames are decoded into the history,
//! anything malformed is counted and dropped.

use heapless::Vec;
use quadro_protocol::{FrameAssembler, TelemetryRecord};

use crate::receiver::history::{HistoryBuffer, HISTORY_CAPACITY};
use crate::traits::ByteSource;

/// Chunk size used when draining a byte source
const READ_CHUNK: usize = 64;

/// Receiver for the vehicle telemetry stream
///
/// Timestamps are supplied by the caller in milliseconds so the
/// receiver itself stays clock-agnostic and testable.
#[derive(Debug)]
pub struct TelemetryReceiver {
    assembler: FrameAssembler,
    history: HistoryBuffer,
    error_count: u32,
    last_receive_ms: Option<u64>,
}

impl Default for TelemetryReceiver {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryReceiver {
    /// Create a receiver with empty history
    pub fn new() -> Self {
        Self {
            assembler: FrameAssembler::new(),
            history: HistoryBuffer::new(),
            error_count: 0,
            last_receive_ms: None,
        }
    }

    /// Feed raw bus bytes observed at `now_ms`
    ///
    /// Processing is byte-at-a-time internally, so how the stream is
    /// chunked has no effect on which records come out.
    ///
    /// Returns the number of records accepted into the history.
    pub fn feed(&mut self, bytes: &[u8], now_ms: u64) -> usize {
        let mut accepted = 0;
        for &byte in bytes {
            match self.assembler.feed(byte) {
                Ok(Some(frame)) => match TelemetryRecord::from_frame(&frame) {
                    Ok(record) => {
                        self.history.push(record);
                        self.last_receive_ms = Some(now_ms);
                        accepted += 1;
                    }
                    Err(_) => self.record_error(),
                },
                Ok(None) => {}
                Err(_) => self.record_error(),
            }
        }
        accepted
    }

    /// Drain a byte source, feeding everything it has pending
    ///
    /// Stops at the first transport error, which is counted like any
    /// other receive error.
    pub fn poll<S: ByteSource>(&mut self, source: &mut S, now_ms: u64) -> usize {
        let mut accepted = 0;
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            match source.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => accepted += self.feed(&chunk[..n], now_ms),
                Err(_) => {
                    self.record_error();
                    break;
                }
            }
        }
        accepted
    }

    /// Most recent record
    pub fn latest(&self) -> Option<&TelemetryRecord> {
        self.history.latest()
    }

    /// Copy of the record history, oldest first
    pub fn snapshot(&self) -> Vec<TelemetryRecord, HISTORY_CAPACITY> {
        self.history.snapshot()
    }

    /// Malformed candidates and transport errors seen so far
    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    /// Time the last valid frame was accepted, if any
    pub fn last_receive_time(&self) -> Option<u64> {
        self.last_receive_ms
    }

    /// Count one receive error
    ///
    /// Also called by the bus task for transport errors that never
    /// produce bytes.
    pub fn record_error(&mut self) {
        self.error_count = self.error_count.saturating_add(1);
    }

    /// Drop the record history
    ///
    /// Error count and receive time describe the link rather than the
    /// records and survive a clear.
    pub fn clear(&mut self) {
        self.history.clear();
    }
}
