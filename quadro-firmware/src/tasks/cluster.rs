//! Cluster display task
//!
//! The cluster's main loop. On every tick it collects the latest
//! telemetry, odometer and link state, runs the mode machine over
//! queued button presses and hands the assembled view to the panel.

use defmt::*;

use quadro_core::config::{LinkConfig, UiConfig};
use quadro_core::link::{LinkHealth, LinkMonitor, LinkStats};
use quadro_core::odometer::OdometerReading;
use quadro_core::traits::ClusterPanel;
use quadro_core::ui::{ClusterView, ModeController, Readout, UiEffect};
use quadro_protocol::TelemetryRecord;

use crate::channels::{BUTTON_EVENTS, LINK_STATS, ODOMETER, TACH_RPM, TELEMETRY, TRIP_RESET};
use crate::tasks::tick::TICK_SIGNAL;

/// Logging panel, stands in until the gauge face board driver lands
///
/// Renders each refresh as defmt output so a probe session shows what
/// the cluster face would.
pub struct LogPanel;

impl ClusterPanel for LogPanel {
    type Error = core::convert::Infallible;

    fn show(&mut self, view: &ClusterView) -> Result<(), Self::Error> {
        match view.readout {
            Readout::SpeedKmhX10(v) => trace!("SPD {}.{} km/h", v / 10, v % 10),
            Readout::TotalKmX10(v) => trace!("TOT {}.{} km", v / 10, v % 10),
            Readout::TripKmX10(v) => trace!("TRP {}.{} km", v / 10, v % 10),
            Readout::TemperatureC {
                celsius: Some(c),
                source,
            } => trace!("TMP {} C ({:?})", c, source),
            Readout::TemperatureC { celsius: None, .. } => trace!("TMP ---"),
        }

        if let Some(status) = &view.status {
            trace!(
                "{} | {} | {} | gear {}",
                status.imd.label(),
                status.vifc.label(),
                status.mcu.label(),
                view.gear.map_or("-", |g| g.label())
            );
        }

        if view.self_test_failed {
            trace!("SELF TEST FAILED");
        }

        Ok(())
    }
}

/// Cluster task - mode machine and display refresh
#[embassy_executor::task]
pub async fn cluster_task(ui: UiConfig, link_config: LinkConfig) {
    info!("Cluster task started");
    info!("{}", ui.splash.as_str());

    let mut panel = LogPanel;
    let mut controller = ModeController::new(ui.brightness);
    let mut monitor = LinkMonitor::new(&link_config);

    let mut latest: Option<TelemetryRecord> = None;
    let mut stats = LinkStats::default();
    let mut odometer = OdometerReading::default();
    let mut health = LinkHealth::Down;

    loop {
        let now_ms = TICK_SIGNAL.wait().await;

        if let Some(record) = TELEMETRY.try_take() {
            latest = Some(record);
        }
        if let Some(s) = LINK_STATS.try_take() {
            stats = s;
        }
        if let Some(reading) = ODOMETER.try_take() {
            odometer = reading;
        }

        while let Ok(action) = BUTTON_EVENTS.try_receive() {
            match controller.handle(action) {
                Some(UiEffect::ResetTrip) => {
                    info!("Trip reset requested");
                    TRIP_RESET.signal(());
                }
                Some(UiEffect::SetBrightness(level)) => {
                    info!("Brightness set to {}", level);
                }
                None => debug!("Display mode: {:?}", controller.mode()),
            }
        }

        let new_errors = monitor.error_delta(stats.error_count);
        if new_errors > 0 {
            debug!("{} receive error(s) since last tick", new_errors);
        }

        let assessed = monitor.assess(stats.last_receive_ms, now_ms);
        if assessed != health {
            match assessed {
                LinkHealth::Active => info!("Telemetry link active"),
                LinkHealth::Stale => warn!("Telemetry link stale"),
                LinkHealth::Down => warn!("Telemetry link down"),
            }
            health = assessed;

            // Park the tach needle rather than hold a dead reading
            if health != LinkHealth::Active {
                TACH_RPM.signal(0);
            }
        }

        let view = ClusterView::assemble(
            controller.mode(),
            controller.temp_source(),
            latest.as_ref(),
            health,
            &odometer,
        );

        if panel.show(&view).is_err() {
            warn!("Panel refresh failed");
        }
    }
}
