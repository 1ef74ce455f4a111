//! Distance and speed integration.
//!
//! Integer fixed-point throughout: distances accumulate in millimeters
//! and speeds are reported in tenths of km/h.

use crate::config::WheelConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Persisted odometer totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OdometerSnapshot {
    /// Lifetime distance in millimeters
    pub total_mm: u64,
    /// Trip distance in millimeters
    pub trip_mm: u64,
}

/// Values the display side consumes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OdometerReading {
    /// Current speed in 0.1 km/h
    pub speed_kmh_x10: u32,
    /// Lifetime distance in 0.1 km
    pub total_km_x10: u32,
    /// Trip distance in 0.1 km
    pub trip_km_x10: u32,
}

/// Integrates wheel pulses into distance and speed
#[derive(Debug)]
pub struct TripComputer {
    circumference_mm: u32,
    pulses_per_rev: u32,
    total_mm: u64,
    trip_mm: u64,
}

impl TripComputer {
    /// Start from zero totals
    pub fn new(wheel: &WheelConfig) -> Self {
        Self::restore(wheel, OdometerSnapshot::default())
    }

    /// Resume from persisted totals
    pub fn restore(wheel: &WheelConfig, snapshot: OdometerSnapshot) -> Self {
        Self {
            circumference_mm: wheel.circumference_mm,
            pulses_per_rev: wheel.pulses_per_rev.max(1) as u32,
            total_mm: snapshot.total_mm,
            trip_mm: snapshot.trip_mm,
        }
    }

    /// Integrate pulses counted over `elapsed_ms`
    ///
    /// Returns the average speed over the interval in 0.1 km/h.
    pub fn update(&mut self, pulses: u32, elapsed_ms: u32) -> u32 {
        if pulses == 0 {
            return 0;
        }

        let dist_mm =
            pulses as u64 * self.circumference_mm as u64 / self.pulses_per_rev as u64;
        self.total_mm = self.total_mm.saturating_add(dist_mm);
        self.trip_mm = self.trip_mm.saturating_add(dist_mm);

        if elapsed_ms == 0 {
            return 0;
        }

        // mm/ms * 3.6 = km/h, scaled by ten for one decimal
        u32::try_from(dist_mm * 36 / elapsed_ms as u64).unwrap_or(u32::MAX)
    }

    /// Reset the trip counter
    pub fn reset_trip(&mut self) {
        self.trip_mm = 0;
    }

    /// Totals for persistence
    pub fn snapshot(&self) -> OdometerSnapshot {
        OdometerSnapshot {
            total_mm: self.total_mm,
            trip_mm: self.trip_mm,
        }
    }

    /// Display values at the given speed
    pub fn reading(&self, speed_kmh_x10: u32) -> OdometerReading {
        OdometerReading {
            speed_kmh_x10,
            total_km_x10: (self.total_mm / 100_000) as u32,
            trip_km_x10: (self.trip_mm / 100_000) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_wheel() -> WheelConfig {
        WheelConfig {
            circumference_mm: 2000,
            pulses_per_rev: 1,
        }
    }

    #[test]
    fn test_speed_over_interval() {
        let mut trip = TripComputer::new(&test_wheel());

        // 5 revolutions of a 2 m wheel in one second: 10 m/s = 36.0 km/h
        let speed = trip.update(5, 1000);
        assert_eq!(speed, 360);

        let snapshot = trip.snapshot();
        assert_eq!(snapshot.total_mm, 10_000);
        assert_eq!(snapshot.trip_mm, 10_000);
    }

    #[test]
    fn test_default_wheel_single_pulse() {
        let mut trip = TripComputer::new(&WheelConfig::default());

        // One 1884 mm revolution per second is a walking pace
        let speed = trip.update(1, 1000);
        assert_eq!(speed, 67); // 1884 * 36 / 1000
    }

    #[test]
    fn test_multiple_pulses_per_rev() {
        let wheel = WheelConfig {
            circumference_mm: 2000,
            pulses_per_rev: 4,
        };
        let mut trip = TripComputer::new(&wheel);

        trip.update(4, 1000);
        assert_eq!(trip.snapshot().total_mm, 2000);
    }

    #[test]
    fn test_no_pulses_means_standstill() {
        let mut trip = TripComputer::new(&test_wheel());
        assert_eq!(trip.update(0, 1000), 0);
        assert_eq!(trip.snapshot().total_mm, 0);
    }

    #[test]
    fn test_zero_interval_still_accumulates() {
        let mut trip = TripComputer::new(&test_wheel());
        assert_eq!(trip.update(1, 0), 0);
        assert_eq!(trip.snapshot().total_mm, 2000);
    }

    #[test]
    fn test_trip_reset_keeps_total() {
        let mut trip = TripComputer::new(&test_wheel());
        trip.update(50, 1000);

        trip.reset_trip();
        let snapshot = trip.snapshot();
        assert_eq!(snapshot.trip_mm, 0);
        assert_eq!(snapshot.total_mm, 100_000);
    }

    #[test]
    fn test_restore_resumes_totals() {
        let saved = OdometerSnapshot {
            total_mm: 5_000_000,
            trip_mm: 250_000,
        };
        let mut trip = TripComputer::restore(&test_wheel(), saved);
        trip.update(1, 1000);

        let snapshot = trip.snapshot();
        assert_eq!(snapshot.total_mm, 5_002_000);
        assert_eq!(snapshot.trip_mm, 252_000);
    }

    #[test]
    fn test_reading_scales_to_tenth_km() {
        let saved = OdometerSnapshot {
            total_mm: 100_000_000, // 100 km
            trip_mm: 1_250_000,    // 1.25 km
        };
        let trip = TripComputer::restore(&test_wheel(), saved);

        let reading = trip.reading(360);
        assert_eq!(reading.speed_kmh_x10, 360);
        assert_eq!(reading.total_km_x10, 1000);
        assert_eq!(reading.trip_km_x10, 12);
    }

    proptest! {
        #[test]
        fn prop_total_never_decreases(
            updates in any::<[(u16, u16); 16]>(),
        ) {
            let mut trip = TripComputer::new(&test_wheel());
            let mut previous = 0;
            for (pulses, elapsed_ms) in updates {
                trip.update(pulses as u32, elapsed_ms as u32);
                let total = trip.snapshot().total_mm;
                prop_assert!(total >= previous);
                previous = total;
            }
        }
    }
}
