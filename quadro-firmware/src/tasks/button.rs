//! Mode button task
//!
//! Debounces the cluster's single push button and classifies each
//! press by hold time.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Instant, Timer};

use quadro_core::ui::ButtonAction;

use crate::channels::BUTTON_EVENTS;

/// Button task configuration
pub struct ButtonTaskConfig {
    /// Debounce time in milliseconds
    pub debounce_ms: u32,
    /// Hold time that counts as a long press, in milliseconds
    pub long_press_ms: u32,
}

impl Default for ButtonTaskConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 50,
            long_press_ms: 2000,
        }
    }
}

/// Button task - emits classified presses
///
/// The button pulls the line low. A press is classified on release,
/// so a long press takes effect when the finger lifts.
#[embassy_executor::task]
pub async fn button_task(mut button: Input<'static>, config: ButtonTaskConfig) {
    info!("Button task started");

    loop {
        button.wait_for_low().await;

        // Debounce the falling edge
        Timer::after_millis(config.debounce_ms as u64).await;
        if button.is_high() {
            continue;
        }

        let pressed_at = Instant::now();
        button.wait_for_high().await;
        let held_ms = pressed_at.elapsed().as_millis() as u32;

        let action = ButtonAction::classify(held_ms, config.long_press_ms);
        debug!("Button: {:?} after {} ms", action, held_ms);

        // Send to the cluster task, dropping if full
        if BUTTON_EVENTS.try_send(action).is_err() {
            warn!("Button channel full, dropping press");
        }
    }
}
