//! Odometer task
//!
//! Integrates wheel pulses once a second, publishes readings for the
//! display and writes totals back to flash when the vehicle rests.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};
use portable_atomic::Ordering;

use quadro_core::config::WheelConfig;
use quadro_core::odometer::{OdometerSnapshot, TripComputer};

use crate::channels::{ODOMETER, TRIP_RESET, WHEEL_PULSES};
use crate::config::ClusterPersistence;

/// Integration interval in milliseconds
const UPDATE_INTERVAL_MS: u32 = 1000;

/// Quiet time at standstill before totals are written back
const SAVE_AFTER_IDLE_MS: u64 = 30_000;

/// Odometer task - owns the trip computer and its persistence
///
/// Totals are only saved at standstill so flash wear tracks trips
/// rather than run time.
#[embassy_executor::task]
pub async fn odometer_task(
    mut persistence: ClusterPersistence<'static>,
    wheel: WheelConfig,
    initial: OdometerSnapshot,
) {
    info!("Odometer task started");

    let mut trip = TripComputer::restore(&wheel, initial);
    let mut last_saved = initial;
    let mut stopped_since: Option<Instant> = None;

    let mut ticker = Ticker::every(Duration::from_millis(UPDATE_INTERVAL_MS as u64));

    loop {
        ticker.next().await;

        if TRIP_RESET.try_take().is_some() {
            trip.reset_trip();
            info!("Trip counter reset");
        }

        let pulses = WHEEL_PULSES.swap(0, Ordering::Relaxed);
        let speed = trip.update(pulses, UPDATE_INTERVAL_MS);

        ODOMETER.signal(trip.reading(speed));

        if speed > 0 {
            stopped_since = None;
            continue;
        }

        let idle_start = stopped_since.get_or_insert_with(Instant::now);
        let snapshot = trip.snapshot();
        if snapshot != last_saved && idle_start.elapsed().as_millis() >= SAVE_AFTER_IDLE_MS {
            match persistence.save_odometer(&snapshot).await {
                Ok(()) => {
                    last_saved = snapshot;
                    info!("Odometer saved: {} mm total", snapshot.total_mm);
                }
                Err(e) => warn!("Odometer save failed: {:?}", e),
            }
        }
    }
}
