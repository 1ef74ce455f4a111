//! Vehicle Telemetry Bus Protocol
//!
//! This crate defines the RS485-based telemetry protocol between the
//! vehicle interface controller (VIFC) and the instrument cluster. The
//! cluster is a pure listener: the VIFC broadcasts one fixed-size frame
//! per telemetry snapshot and never expects a reply.
//!
//! # Protocol Overview
//!
//! All frames use a fixed binary format at 115200 baud:
//! ```text
//! ┌───────┬──────────────────┬──────────┬─────┐
//! │ START │ PAYLOAD          │ CHECKSUM │ END │
//! │ 1B    │ 14B              │ 1B       │ 1B  │
//! └───────┴──────────────────┴──────────┴─────┘
//! ```
//!
//! The payload carries motor, MCU, IMD and VIFC readings in a fixed
//! big-endian layout. The checksum is the XOR of all payload bytes.
//! Frame boundaries are recovered by scanning for the START marker, so
//! the cluster can join the bus mid-stream and makes progress through
//! corrupted spans one byte at a time.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod status;
pub mod telemetry;

pub use frame::{FrameAssembler, FrameError, RawFrame, END_BYTE, FRAME_LEN, PAYLOAD_LEN, START_BYTE};
pub use status::{Gear, ImdState, McuState, VifcState};
pub use telemetry::{DecodeError, TelemetryRecord};
