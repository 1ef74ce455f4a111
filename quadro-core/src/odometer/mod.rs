//! Odometer and trip computer
//!
//! Integrates wheel sensor pulses into distance and speed.

pub mod trip;

pub use trip::{OdometerReading, OdometerSnapshot, TripComputer};
