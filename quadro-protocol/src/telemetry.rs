//! Telemetry payload decoding.
//!
//! A validated frame carries one snapshot of the drive system. All
//! multi-byte fields are big-endian.
//!
//! Payload layout:
//! - 0-1: motor speed (u16, RPM)
//! - 2: motor temperature (i8, °C)
//! - 3: MCU temperature (i8, °C)
//! - 4-5: MCU status flags (u16)
//! - 6: MCU fault level (u8)
//! - 7-8: IMD isolation resistance (u16, ohms)
//! - 9-10: IMD status word (u16)
//! - 11-12: VIFC status word (u16)
//! - 13: validity flags

use crate::frame::{RawFrame, FRAME_LEN, PAYLOAD_LEN};
use crate::status::{Gear, ImdState, McuState, VifcState};

// Validity byte bits
const IMD_VALID: u8 = 1 << 0;
const MOTOR_VALID: u8 = 1 << 1;
const SELF_TEST_FAILED: u8 = 1 << 7;

/// Errors that can occur while decoding a telemetry payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Payload length does not match the fixed layout
    InvalidLength,
}

/// One decoded telemetry snapshot
///
/// A plain value type so history snapshots can hand out records
/// without borrowing into the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryRecord {
    /// Motor speed in RPM
    pub motor_rpm: u16,
    /// Motor temperature in °C
    pub motor_temp_c: i8,
    /// Motor controller temperature in °C
    pub mcu_temp_c: i8,
    /// Raw MCU status flags
    pub mcu_flags: u16,
    /// MCU fault level (0 = no fault)
    pub mcu_fault_level: u8,
    /// IMD isolation resistance in ohms
    pub imd_iso_ohms: u16,
    /// Raw IMD status word
    pub imd_status: u16,
    /// Raw VIFC status word
    pub vifc_status: u16,
    /// Motor and MCU fields carry live data
    pub motor_data_valid: bool,
    /// IMD fields carry live data
    pub imd_data_valid: bool,
    /// Drive-system self test failed
    pub self_test_failed: bool,
}

impl TelemetryRecord {
    /// Decode a telemetry payload
    ///
    /// Total over the payload contents: any 14 bytes decode to a
    /// record, only the length is checked.
    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        if payload.len() != PAYLOAD_LEN {
            return Err(DecodeError::InvalidLength);
        }

        let validity = payload[13];

        Ok(Self {
            motor_rpm: u16::from_be_bytes([payload[0], payload[1]]),
            motor_temp_c: payload[2] as i8,
            mcu_temp_c: payload[3] as i8,
            mcu_flags: u16::from_be_bytes([payload[4], payload[5]]),
            mcu_fault_level: payload[6],
            imd_iso_ohms: u16::from_be_bytes([payload[7], payload[8]]),
            imd_status: u16::from_be_bytes([payload[9], payload[10]]),
            vifc_status: u16::from_be_bytes([payload[11], payload[12]]),
            motor_data_valid: validity & MOTOR_VALID != 0,
            imd_data_valid: validity & IMD_VALID != 0,
            self_test_failed: validity & SELF_TEST_FAILED != 0,
        })
    }

    /// Decode the payload of a validated frame
    pub fn from_frame(frame: &RawFrame) -> Result<Self, DecodeError> {
        Self::decode(&frame[1..FRAME_LEN - 2])
    }

    /// Decoded IMD state
    pub fn imd_state(&self) -> ImdState {
        ImdState::from_status(self.imd_status)
    }

    /// Decoded VIFC state
    pub fn vifc_state(&self) -> VifcState {
        VifcState::from_status(self.vifc_status)
    }

    /// Decoded MCU state
    pub fn mcu_state(&self) -> McuState {
        McuState::from_flags(self.mcu_flags)
    }

    /// Selected gear, if the motor data is live and the gear field
    /// holds one of the three known encodings
    pub fn gear(&self) -> Option<Gear> {
        if self.motor_data_valid {
            Gear::from_flags(self.mcu_flags)
        } else {
            None
        }
    }
}
