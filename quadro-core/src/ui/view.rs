//! Cluster view assembly.
//!
//! A [`ClusterView`] is everything the panel needs for one refresh:
//! the mode-dependent readout, needle positions, gear, drive-system
//! status and the link health. Validity gating happens here, so panel
//! implementations never look at raw telemetry.

use quadro_protocol::{Gear, ImdState, McuState, TelemetryRecord, VifcState};

use crate::link::LinkHealth;
use crate::odometer::OdometerReading;
use crate::traits::gauge::{SPEEDO_RANGE, TEMP_RANGE};
use crate::ui::modes::{DisplayMode, TempSource};

/// Drive-system status states for the warning line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusSummary {
    /// Insulation monitoring device
    pub imd: ImdState,
    /// Vehicle interface controller
    pub vifc: VifcState,
    /// Motor controller
    pub mcu: McuState,
}

/// Mode-dependent numeric readout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Readout {
    /// Speed in 0.1 km/h
    SpeedKmhX10(u32),
    /// Lifetime odometer in 0.1 km
    TotalKmX10(u32),
    /// Trip odometer in 0.1 km
    TripKmX10(u32),
    /// Selected temperature, blank when not available
    TemperatureC {
        celsius: Option<i16>,
        source: TempSource,
    },
}

/// One complete refresh of the cluster face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClusterView {
    /// Active display mode
    pub mode: DisplayMode,
    /// Numeric readout for the active mode
    pub readout: Readout,
    /// Speedometer needle position
    pub speedo_steps: u16,
    /// Temperature needle position, parked when no live data
    pub temp_steps: Option<u16>,
    /// Gear indicator, blank when unknown
    pub gear: Option<Gear>,
    /// Drive-system status, absent until the first record arrives
    pub status: Option<StatusSummary>,
    /// Telemetry link health
    pub link: LinkHealth,
    /// Drive-system self test failed
    pub self_test_failed: bool,
}

impl ClusterView {
    /// Assemble a view from the current cluster state
    ///
    /// `latest` is the newest telemetry record, if any has ever been
    /// received. Fields that depend on invalid or missing data come
    /// out blank rather than stale-looking.
    pub fn assemble(
        mode: DisplayMode,
        temp_source: TempSource,
        latest: Option<&TelemetryRecord>,
        link: LinkHealth,
        odometer: &OdometerReading,
    ) -> Self {
        let celsius = temperature_of(latest, temp_source);

        let readout = match mode {
            DisplayMode::Speed => Readout::SpeedKmhX10(odometer.speed_kmh_x10),
            DisplayMode::TotalKm => Readout::TotalKmX10(odometer.total_km_x10),
            DisplayMode::TripKm => Readout::TripKmX10(odometer.trip_km_x10),
            DisplayMode::Temperature => Readout::TemperatureC {
                celsius,
                source: temp_source,
            },
        };

        Self {
            mode,
            readout,
            speedo_steps: SPEEDO_RANGE.steps_for((odometer.speed_kmh_x10 / 10) as i32),
            temp_steps: celsius.map(|c| TEMP_RANGE.steps_for(c as i32)),
            gear: latest.and_then(|record| record.gear()),
            status: latest.map(|record| StatusSummary {
                imd: record.imd_state(),
                vifc: record.vifc_state(),
                mcu: record.mcu_state(),
            }),
            link,
            self_test_failed: latest.map_or(false, |record| record.self_test_failed),
        }
    }
}

/// Selected temperature when the motor data is live
fn temperature_of(latest: Option<&TelemetryRecord>, source: TempSource) -> Option<i16> {
    latest
        .filter(|record| record.motor_data_valid)
        .map(|record| match source {
            TempSource::Motor => record.motor_temp_c as i16,
            TempSource::Mcu => record.mcu_temp_c as i16,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadro_protocol::frame::PAYLOAD_LEN;

    // 1200 RPM in D, motor 25 °C, MCU 30 °C, healthy IMD, both
    // sources live
    fn nominal_record() -> TelemetryRecord {
        let payload: [u8; PAYLOAD_LEN] = [
            0x04, 0xB0, 0x19, 0x1E, 0x00, 0x08, 0x00, 0x2E, 0xE0, 0x00, 0x00, 0x00, 0x00, 0x03,
        ];
        TelemetryRecord::decode(&payload).unwrap()
    }

    fn rolling_reading() -> OdometerReading {
        OdometerReading {
            speed_kmh_x10: 360,
            total_km_x10: 1000,
            trip_km_x10: 12,
        }
    }

    #[test]
    fn test_speed_view_with_live_data() {
        let record = nominal_record();
        let view = ClusterView::assemble(
            DisplayMode::Speed,
            TempSource::Motor,
            Some(&record),
            LinkHealth::Active,
            &rolling_reading(),
        );

        assert_eq!(view.readout, Readout::SpeedKmhX10(360));
        assert_eq!(view.speedo_steps, 76); // 36 km/h on the 0-225 dial
        assert_eq!(view.temp_steps, Some(156));
        assert_eq!(view.gear, Some(Gear::Drive));
        assert_eq!(view.link, LinkHealth::Active);
        assert!(!view.self_test_failed);

        let status = view.status.unwrap();
        assert_eq!(status.imd.label(), "IMD OK");
        assert_eq!(status.vifc.label(), "VI ISO ON");
        assert_eq!(status.mcu.label(), "MCU WARN");
    }

    #[test]
    fn test_temperature_view_follows_source() {
        let record = nominal_record();

        let view = ClusterView::assemble(
            DisplayMode::Temperature,
            TempSource::Motor,
            Some(&record),
            LinkHealth::Active,
            &rolling_reading(),
        );
        assert_eq!(
            view.readout,
            Readout::TemperatureC {
                celsius: Some(25),
                source: TempSource::Motor,
            }
        );

        let view = ClusterView::assemble(
            DisplayMode::Temperature,
            TempSource::Mcu,
            Some(&record),
            LinkHealth::Active,
            &rolling_reading(),
        );
        assert_eq!(
            view.readout,
            Readout::TemperatureC {
                celsius: Some(30),
                source: TempSource::Mcu,
            }
        );
        assert_eq!(view.temp_steps, Some(168));
    }

    #[test]
    fn test_odometer_views_use_local_data() {
        let view = ClusterView::assemble(
            DisplayMode::TotalKm,
            TempSource::Motor,
            None,
            LinkHealth::Down,
            &rolling_reading(),
        );
        assert_eq!(view.readout, Readout::TotalKmX10(1000));

        let view = ClusterView::assemble(
            DisplayMode::TripKm,
            TempSource::Motor,
            None,
            LinkHealth::Down,
            &rolling_reading(),
        );
        assert_eq!(view.readout, Readout::TripKmX10(12));
    }

    #[test]
    fn test_view_blank_before_first_record() {
        let view = ClusterView::assemble(
            DisplayMode::Temperature,
            TempSource::Motor,
            None,
            LinkHealth::Down,
            &OdometerReading::default(),
        );

        assert_eq!(
            view.readout,
            Readout::TemperatureC {
                celsius: None,
                source: TempSource::Motor,
            }
        );
        assert_eq!(view.temp_steps, None);
        assert_eq!(view.gear, None);
        assert_eq!(view.status, None);
        assert_eq!(view.link, LinkHealth::Down);
    }

    #[test]
    fn test_invalid_motor_data_blanks_gear_and_temps() {
        let mut payload = [0u8; PAYLOAD_LEN];
        payload[5] = 0x08; // gear field says D
        payload[13] = 0x01; // but only IMD data is live
        let record = TelemetryRecord::decode(&payload).unwrap();

        let view = ClusterView::assemble(
            DisplayMode::Temperature,
            TempSource::Motor,
            Some(&record),
            LinkHealth::Active,
            &OdometerReading::default(),
        );

        assert_eq!(view.gear, None);
        assert_eq!(view.temp_steps, None);
        assert_eq!(
            view.readout,
            Readout::TemperatureC {
                celsius: None,
                source: TempSource::Motor,
            }
        );
        // Status still shows: the words themselves arrived
        assert!(view.status.is_some());
    }

    #[test]
    fn test_self_test_flag_surfaces() {
        let mut payload = [0u8; PAYLOAD_LEN];
        payload[13] = 0x83;
        let record = TelemetryRecord::decode(&payload).unwrap();

        let view = ClusterView::assemble(
            DisplayMode::Speed,
            TempSource::Motor,
            Some(&record),
            LinkHealth::Active,
            &OdometerReading::default(),
        );

        assert!(view.self_test_failed);
    }
}
