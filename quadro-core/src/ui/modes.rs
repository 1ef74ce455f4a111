//! Display mode state machine.

use crate::ui::button::ButtonAction;

/// Brightness presets cycled by a long press
const BRIGHTNESS_PRESETS: [u8; 3] = [64, 160, 255];

/// What the cluster's numeric display shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Current speed
    #[default]
    Speed,
    /// Lifetime odometer
    TotalKm,
    /// Trip odometer
    TripKm,
    /// Motor or MCU temperature
    Temperature,
}

impl DisplayMode {
    /// Next mode in the cycle
    pub fn next(self) -> Self {
        match self {
            DisplayMode::Speed => DisplayMode::TotalKm,
            DisplayMode::TotalKm => DisplayMode::TripKm,
            DisplayMode::TripKm => DisplayMode::Temperature,
            DisplayMode::Temperature => DisplayMode::Speed,
        }
    }
}

/// Which temperature the temperature mode shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TempSource {
    /// Motor winding temperature
    #[default]
    Motor,
    /// Motor controller temperature
    Mcu,
}

impl TempSource {
    /// The other source
    pub fn toggle(self) -> Self {
        match self {
            TempSource::Motor => TempSource::Mcu,
            TempSource::Mcu => TempSource::Motor,
        }
    }
}

/// Effects a button action requests beyond mode changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiEffect {
    /// Zero the trip odometer
    ResetTrip,
    /// Apply a new display brightness
    SetBrightness(u8),
}

/// Tracks what the display shows and reacts to button input
#[derive(Debug)]
pub struct ModeController {
    mode: DisplayMode,
    temp_source: TempSource,
    brightness_idx: u8,
}

impl ModeController {
    /// Create a controller starting at the given brightness preset
    pub fn new(brightness_preset: u8) -> Self {
        Self {
            mode: DisplayMode::default(),
            temp_source: TempSource::default(),
            brightness_idx: brightness_preset.min(BRIGHTNESS_PRESETS.len() as u8 - 1),
        }
    }

    /// Current display mode
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Current temperature source
    pub fn temp_source(&self) -> TempSource {
        self.temp_source
    }

    /// Current brightness value
    pub fn brightness(&self) -> u8 {
        BRIGHTNESS_PRESETS[self.brightness_idx as usize]
    }

    /// Apply a button action
    ///
    /// A short press cycles the display mode. A long press acts within
    /// the current mode: trip reset in trip mode, temperature source
    /// toggle in temperature mode, brightness cycle otherwise.
    pub fn handle(&mut self, action: ButtonAction) -> Option<UiEffect> {
        match action {
            ButtonAction::Short => {
                self.mode = self.mode.next();
                None
            }
            ButtonAction::Long => match self.mode {
                DisplayMode::TripKm => Some(UiEffect::ResetTrip),
                DisplayMode::Temperature => {
                    self.temp_source = self.temp_source.toggle();
                    None
                }
                DisplayMode::Speed | DisplayMode::TotalKm => {
                    self.brightness_idx =
                        (self.brightness_idx + 1) % BRIGHTNESS_PRESETS.len() as u8;
                    Some(UiEffect::SetBrightness(self.brightness()))
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_press_cycles_modes() {
        let mut controller = ModeController::new(0);
        assert_eq!(controller.mode(), DisplayMode::Speed);

        assert_eq!(controller.handle(ButtonAction::Short), None);
        assert_eq!(controller.mode(), DisplayMode::TotalKm);
        controller.handle(ButtonAction::Short);
        assert_eq!(controller.mode(), DisplayMode::TripKm);
        controller.handle(ButtonAction::Short);
        assert_eq!(controller.mode(), DisplayMode::Temperature);
        controller.handle(ButtonAction::Short);
        assert_eq!(controller.mode(), DisplayMode::Speed);
    }

    #[test]
    fn test_long_press_in_trip_mode_resets_trip() {
        let mut controller = ModeController::new(0);
        controller.handle(ButtonAction::Short);
        controller.handle(ButtonAction::Short);
        assert_eq!(controller.mode(), DisplayMode::TripKm);

        assert_eq!(
            controller.handle(ButtonAction::Long),
            Some(UiEffect::ResetTrip)
        );
        // Mode is unchanged so repeated resets stay possible
        assert_eq!(controller.mode(), DisplayMode::TripKm);
    }

    #[test]
    fn test_long_press_in_temperature_mode_toggles_source() {
        let mut controller = ModeController::new(0);
        for _ in 0..3 {
            controller.handle(ButtonAction::Short);
        }
        assert_eq!(controller.mode(), DisplayMode::Temperature);
        assert_eq!(controller.temp_source(), TempSource::Motor);

        assert_eq!(controller.handle(ButtonAction::Long), None);
        assert_eq!(controller.temp_source(), TempSource::Mcu);
        controller.handle(ButtonAction::Long);
        assert_eq!(controller.temp_source(), TempSource::Motor);
    }

    #[test]
    fn test_long_press_cycles_brightness_elsewhere() {
        let mut controller = ModeController::new(0);
        assert_eq!(controller.brightness(), 64);

        assert_eq!(
            controller.handle(ButtonAction::Long),
            Some(UiEffect::SetBrightness(160))
        );
        assert_eq!(
            controller.handle(ButtonAction::Long),
            Some(UiEffect::SetBrightness(255))
        );
        // Wraps back around to the dimmest preset
        assert_eq!(
            controller.handle(ButtonAction::Long),
            Some(UiEffect::SetBrightness(64))
        );
    }

    #[test]
    fn test_out_of_range_preset_clamps() {
        let controller = ModeController::new(9);
        assert_eq!(controller.brightness(), 255);
    }
}
