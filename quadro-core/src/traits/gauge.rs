//! Gauge scaling and outputs.
//!
//! The stepper-driven needles travel a fixed number of steps across
//! their printed dial faces; the tachometer is a PWM-driven air-core
//! movement. Scaling from engineering values to needle positions
//! lives here.

/// Speedometer dial: 0-225 km/h across 480 steps
pub const SPEEDO_RANGE: DialRange = DialRange::new(0, 225, 480);

/// Temperature dial: -40-150 °C across 456 steps
pub const TEMP_RANGE: DialRange = DialRange::new(-40, 150, 456);

/// Tachometer full scale in RPM
pub const TACH_FULL_SCALE_RPM: u16 = 8000;

/// Linear dial scale
///
/// Maps a value span onto a step span, clamping out-of-range values
/// to the ends of the dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DialRange {
    /// Value at the first step
    pub min_value: i32,
    /// Value at the last step
    pub max_value: i32,
    /// Steps across the dial face
    pub full_scale_steps: u16,
}

impl DialRange {
    /// Create a new dial scale
    pub const fn new(min_value: i32, max_value: i32, full_scale_steps: u16) -> Self {
        Self {
            min_value,
            max_value,
            full_scale_steps,
        }
    }

    /// Step position for a value, clamped to the dial ends
    pub fn steps_for(&self, value: i32) -> u16 {
        let span = self.max_value - self.min_value;
        if span <= 0 {
            return 0;
        }

        let clamped = value.clamp(self.min_value, self.max_value);
        let offset = (clamped - self.min_value) as i64;
        (offset * self.full_scale_steps as i64 / span as i64) as u16
    }
}

/// Convert motor RPM to tachometer PWM duty
///
/// Full scale and beyond pin the needle at maximum deflection.
pub fn rpm_to_duty(rpm: u16) -> u16 {
    let clamped = rpm.min(TACH_FULL_SCALE_RPM) as u32;
    (clamped * u16::MAX as u32 / TACH_FULL_SCALE_RPM as u32) as u16
}

/// PWM tachometer output
pub trait TachOutput {
    /// Set the output duty cycle (0 = rest, 65535 = full deflection)
    fn set_duty(&mut self, duty: u16);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speedo_scale() {
        assert_eq!(SPEEDO_RANGE.steps_for(0), 0);
        assert_eq!(SPEEDO_RANGE.steps_for(225), 480);
        assert_eq!(SPEEDO_RANGE.steps_for(36), 76); // 36 * 480 / 225
    }

    #[test]
    fn test_temp_scale() {
        assert_eq!(TEMP_RANGE.steps_for(-40), 0);
        assert_eq!(TEMP_RANGE.steps_for(150), 456);
        assert_eq!(TEMP_RANGE.steps_for(25), 156); // 65 * 456 / 190
        assert_eq!(TEMP_RANGE.steps_for(30), 168);
    }

    #[test]
    fn test_values_clamp_to_dial_ends() {
        assert_eq!(SPEEDO_RANGE.steps_for(-10), 0);
        assert_eq!(SPEEDO_RANGE.steps_for(400), 480);
        assert_eq!(TEMP_RANGE.steps_for(-60), 0);
        assert_eq!(TEMP_RANGE.steps_for(200), 456);
    }

    #[test]
    fn test_degenerate_span_parks_needle() {
        let flat = DialRange::new(10, 10, 100);
        assert_eq!(flat.steps_for(10), 0);
        assert_eq!(flat.steps_for(50), 0);
    }

    #[test]
    fn test_rpm_to_duty() {
        assert_eq!(rpm_to_duty(0), 0);
        assert_eq!(rpm_to_duty(TACH_FULL_SCALE_RPM), u16::MAX);
        assert_eq!(rpm_to_duty(4000), 32767);

        // Overspeed pins the needle instead of wrapping
        assert_eq!(rpm_to_duty(u16::MAX), u16::MAX);
    }
}
