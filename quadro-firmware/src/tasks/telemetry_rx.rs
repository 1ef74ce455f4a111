//! Telemetry UART receive task
//!
//! Drains the RS485 bus into the telemetry receiver and publishes
//! accepted records, the tachometer target and link bookkeeping.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::uart::BufferedUartRx;
use embassy_time::{Instant, Timer};
use embedded_io_async::Read;

use quadro_core::link::LinkStats;
use quadro_core::receiver::TelemetryReceiver;

use crate::channels::{LINK_STATS, TACH_RPM, TELEMETRY};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// How long to wait for bytes before republishing link bookkeeping
const IDLE_REFRESH_MS: u64 = 50;

/// Telemetry RX task - feeds bus bytes into the receiver
///
/// The read is raced against a short timer so the link stats keep
/// flowing to the cluster task while the bus is silent. A timed-out
/// read loses nothing, the buffered UART keeps collecting bytes.
#[embassy_executor::task]
pub async fn telemetry_rx_task(mut rx: BufferedUartRx) {
    info!("Telemetry RX task started");

    let mut receiver = TelemetryReceiver::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match select(rx.read(&mut buf), Timer::after_millis(IDLE_REFRESH_MS)).await {
            Either::First(Ok(n)) if n > 0 => {
                trace!("RX: {} bytes", n);

                let errors_before = receiver.error_count();
                let accepted = receiver.feed(&buf[..n], Instant::now().as_millis());

                let rejected = receiver.error_count().wrapping_sub(errors_before);
                if rejected > 0 {
                    warn!("{} malformed frame(s) on the telemetry bus", rejected);
                }

                if accepted > 0 {
                    if let Some(record) = receiver.latest() {
                        TELEMETRY.signal(*record);
                        TACH_RPM.signal(if record.motor_data_valid {
                            record.motor_rpm
                        } else {
                            0
                        });
                    }
                }
            }
            Either::First(Ok(_)) => {
                // Zero-length read, nothing to do
            }
            Either::First(Err(e)) => {
                warn!("UART read error: {:?}", e);
                receiver.record_error();
            }
            Either::Second(()) => {
                // Bus idle this interval
            }
        }

        LINK_STATS.signal(LinkStats {
            last_receive_ms: receiver.last_receive_time(),
            error_count: receiver.error_count(),
        });
    }
}
