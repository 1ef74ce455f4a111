//! Wheel speed sensor task
//!
//! Counts hall sensor pulses into a shared counter. The odometer task
//! drains the counter on its own schedule.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant};
use portable_atomic::Ordering;

use crate::channels::WHEEL_PULSES;

/// Wheel sensor configuration
pub struct WheelSensorConfig {
    /// Minimum time between pulses in microseconds, anything faster is bounce
    pub debounce_us: u64,
}

impl Default for WheelSensorConfig {
    fn default() -> Self {
        // One pulse per revolution tops out around 30 ms at full speed,
        // so 2 ms rejects contact bounce without eating real pulses
        Self { debounce_us: 2000 }
    }
}

/// Wheel pulse task - counts debounced sensor edges
#[embassy_executor::task]
pub async fn wheel_pulse_task(mut sensor: Input<'static>, config: WheelSensorConfig) {
    info!("Wheel pulse task started");

    let debounce = Duration::from_micros(config.debounce_us);
    let mut last_edge = Instant::now();

    loop {
        sensor.wait_for_rising_edge().await;

        let now = Instant::now();
        if now - last_edge >= debounce {
            last_edge = now;
            WHEEL_PULSES.fetch_add(1, Ordering::Relaxed);
        }
    }
}
