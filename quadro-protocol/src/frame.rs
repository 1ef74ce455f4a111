//! Frame assembly and validation for the telemetry bus.
//!
//! Frame format:
//! - START (1 byte): 0xAA synchronization byte
//! - PAYLOAD (14 bytes): fixed-layout telemetry fields
//! - CHECKSUM (1 byte): XOR of all PAYLOAD bytes
//! - END (1 byte): 0x55 terminator byte

use heapless::Vec;

/// Frame synchronization byte
pub const START_BYTE: u8 = 0xAA;

/// Frame terminator byte
pub const END_BYTE: u8 = 0x55;

/// Payload size in bytes
pub const PAYLOAD_LEN: usize = 14;

/// Complete frame size (START + PAYLOAD + CHECKSUM + END)
pub const FRAME_LEN: usize = 1 + PAYLOAD_LEN + 1 + 1;

/// A complete frame as it appears on the wire
pub type RawFrame = [u8; FRAME_LEN];

/// Errors that can occur during frame validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// First byte is not the START marker
    InvalidStart,
    /// Last byte is not the END marker
    InvalidEnd,
    /// Checksum mismatch
    InvalidChecksum,
}

/// Calculate the XOR checksum over a payload
pub fn checksum(payload: &[u8]) -> u8 {
    let mut checksum = 0;
    for &byte in payload {
        checksum ^= byte;
    }
    checksum
}

/// Validate a candidate frame
///
/// Checks the START marker, then the END marker, then the checksum.
/// The first failed check determines the error.
pub fn validate(frame: &RawFrame) -> Result<(), FrameError> {
    if frame[0] != START_BYTE {
        return Err(FrameError::InvalidStart);
    }
    if frame[FRAME_LEN - 1] != END_BYTE {
        return Err(FrameError::InvalidEnd);
    }
    if frame[FRAME_LEN - 2] != checksum(&frame[1..1 + PAYLOAD_LEN]) {
        return Err(FrameError::InvalidChecksum);
    }
    Ok(())
}

/// Encode a payload into a complete frame
///
/// Used by the VIFC side of the bus and by tests; the cluster itself
/// only ever decodes.
pub fn encode(payload: &[u8; PAYLOAD_LEN]) -> RawFrame {
    let mut frame = [0u8; FRAME_LEN];
    frame[0] = START_BYTE;
    frame[1..1 + PAYLOAD_LEN].copy_from_slice(payload);
    frame[FRAME_LEN - 2] = checksum(payload);
    frame[FRAME_LEN - 1] = END_BYTE;
    frame
}

/// State machine for assembling incoming frames
///
/// Bytes are buffered from a START marker until a full candidate frame
/// is resident, then the candidate is validated as a whole. A failed
/// candidate costs exactly one byte: the buffer is realigned on the
/// next START marker and assembly continues, so a single corrupted
/// byte never loses more than one frame of data.
#[derive(Debug, Clone)]
pub struct FrameAssembler {
    buffer: Vec<u8, FRAME_LEN>,
}

impl Default for FrameAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameAssembler {
    /// Create a new frame assembler
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Reset the assembler state
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Number of bytes currently buffered
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed a single byte to the assembler
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is
    /// assembled, `Ok(None)` when more bytes are needed, or `Err` when
    /// a complete candidate fails validation. After an error the
    /// assembler has already realigned itself, so the caller can keep
    /// feeding without any recovery action.
    pub fn feed(&mut self, byte: u8) -> Result<Option<RawFrame>, FrameError> {
        if self.buffer.is_empty() && byte != START_BYTE {
            // Silently ignore non-START bytes while waiting
            return Ok(None);
        }

        // Cannot fail: a full buffer is always resolved below before
        // the next byte arrives
        let _ = self.buffer.push(byte);

        if self.buffer.len() < FRAME_LEN {
            return Ok(None);
        }

        let mut candidate = [0u8; FRAME_LEN];
        candidate.copy_from_slice(&self.buffer);

        match validate(&candidate) {
            Ok(()) => {
                self.buffer.clear();
                Ok(Some(candidate))
            }
            Err(err) => {
                self.drop_front();
                Err(err)
            }
        }
    }

    /// Drop the leading byte and realign on the next START marker
    ///
    /// Bytes before the next START marker cannot begin a frame, so they
    /// are discarded in the same step. This is observably identical to
    /// dropping one byte at a time: each skipped byte would have been
    /// ignored while waiting for START and raises no error.
    fn drop_front(&mut self) {
        match self.buffer[1..].iter().position(|&b| b == START_BYTE) {
            Some(offset) => {
                let start = 1 + offset;
                let len = self.buffer.len();
                self.buffer.copy_within(start..len, 0);
                self.buffer.truncate(len - start);
            }
            None => self.buffer.clear(),
        }
    }
}
