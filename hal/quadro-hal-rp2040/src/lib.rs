//! RP2040-specific HAL for the instrument cluster firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `quadro-hal` traits:
//!
//! - Flash storage driver (implements `quadro_hal::FlashStorage`)
//!
//! Gauge outputs, the wheel sensor and the telemetry UART are driven
//! directly through `embassy-rp` in the firmware crate; only persistent
//! storage sits behind a trait seam.

#![no_std]

pub mod flash;

// Re-export shared traits from quadro-hal for convenience
pub use quadro_hal::{FlashStorage as FlashStorageTrait, StorageKey};
