//! Board-agnostic core logic for the instrument cluster firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Telemetry receiver with bounded record history
//! - Link health monitoring
//! - Odometer and trip computer
//! - Display mode state machine and view assembly
//! - Gauge scaling math
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod link;
pub mod odometer;
pub mod receiver;
pub mod traits;
pub mod ui;
