//! Configuration type definitions
//!
//! These types represent the cluster configuration. Configuration is
//! stored in flash as postcard-serialized binary data.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum splash text length
pub const MAX_SPLASH_LEN: usize = 16;

/// Current configuration layout version
pub const CONFIG_VERSION: u8 = 1;

/// Wheel sensor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WheelConfig {
    /// Rolling circumference in millimeters
    pub circumference_mm: u32,
    /// Sensor pulses per wheel revolution
    pub pulses_per_rev: u8,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            circumference_mm: 1884,
            pulses_per_rev: 1,
        }
    }
}

/// Telemetry link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkConfig {
    /// Age after which the last record counts as stale (ms)
    pub stale_after_ms: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            stale_after_ms: 1500,
        }
    }
}

/// User interface configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UiConfig {
    /// Splash text shown at power-on
    pub splash: String<MAX_SPLASH_LEN>,
    /// Button hold time that counts as a long press (ms)
    pub long_press_ms: u32,
    /// Initial brightness preset index
    pub brightness: u8,
}

impl Default for UiConfig {
    fn default() -> Self {
        let mut splash = String::new();
        // Cannot fail: shorter than MAX_SPLASH_LEN
        let _ = splash.push_str("QUADRO");

        Self {
            splash,
            long_press_ms: 2000,
            brightness: 2,
        }
    }
}

/// Complete cluster configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusterConfig {
    /// Configuration layout version
    pub version: u8,
    /// Wheel sensor
    pub wheel: WheelConfig,
    /// Telemetry link
    pub link: LinkConfig,
    /// User interface
    pub ui: UiConfig,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            wheel: WheelConfig::default(),
            link: LinkConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl ClusterConfig {
    /// Check that the configuration is usable (version and ranges)
    pub fn is_valid(&self) -> bool {
        self.version == CONFIG_VERSION
            && (500..=4000).contains(&self.wheel.circumference_mm)
            && self.wheel.pulses_per_rev >= 1
            && self.link.stale_after_ms >= 100
            && (200..=10_000).contains(&self.ui.long_press_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClusterConfig::default();
        assert!(config.is_valid());
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.wheel.circumference_mm, 1884);
        assert_eq!(config.link.stale_after_ms, 1500);
        assert_eq!(config.ui.long_press_ms, 2000);
        assert_eq!(config.ui.splash.as_str(), "QUADRO");
    }

    #[test]
    fn test_version_mismatch_is_invalid() {
        let mut config = ClusterConfig::default();
        config.version = CONFIG_VERSION + 1;
        assert!(!config.is_valid());
    }

    #[test]
    fn test_out_of_range_values_are_invalid() {
        let mut config = ClusterConfig::default();
        config.wheel.circumference_mm = 120; // kart wheels are still bigger
        assert!(!config.is_valid());

        let mut config = ClusterConfig::default();
        config.wheel.pulses_per_rev = 0;
        assert!(!config.is_valid());

        let mut config = ClusterConfig::default();
        config.ui.long_press_ms = 50;
        assert!(!config.is_valid());
    }
}
