//! Configuration and odometer persistence
//!
//! Loads cluster configuration and odometer totals from flash storage.
//! Falls back to embedded defaults if flash is empty.

use defmt::*;

use quadro_core::config::{ClusterConfig, CONFIG_VERSION};
use quadro_core::odometer::OdometerSnapshot;
use quadro_hal_rp2040::flash::{FlashError, Rp2040FlashStorage, StorageKey};
// Import the FlashStorage trait to bring methods into scope
use quadro_hal_rp2040::FlashStorageTrait;

/// Maximum serialized config size
const MAX_CONFIG_SIZE: usize = 256;

/// Maximum serialized odometer record size
const MAX_ODOMETER_SIZE: usize = 32;

/// Persistence errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Flash operation failed
    Flash(FlashError),
    /// Deserialization failed
    Deserialize,
    /// Serialization failed
    Serialize,
    /// Config version mismatch
    VersionMismatch,
}

impl From<FlashError> for StoreError {
    fn from(e: FlashError) -> Self {
        StoreError::Flash(e)
    }
}

/// Persistence manager for cluster data
///
/// Handles loading the cluster configuration at boot and reading and
/// writing odometer totals on behalf of the odometer task.
pub struct ClusterPersistence<'d> {
    storage: Rp2040FlashStorage<'d>,
}

impl<'d> ClusterPersistence<'d> {
    /// Create a new persistence manager
    pub fn new(storage: Rp2040FlashStorage<'d>) -> Self {
        Self { storage }
    }

    /// Load the cluster configuration from flash
    pub async fn load_config(&mut self) -> Result<ClusterConfig, StoreError> {
        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let len = self
            .storage
            .read(StorageKey::ClusterConfig, &mut buffer)
            .await?;

        debug!("Read {} bytes of config from flash", len);

        // Deserialize with postcard
        let config: ClusterConfig =
            postcard::from_bytes(&buffer[..len]).map_err(|_| StoreError::Deserialize)?;

        // Version check
        if config.version != CONFIG_VERSION {
            warn!(
                "Config version mismatch: found {}, expected {}",
                config.version, CONFIG_VERSION
            );
            return Err(StoreError::VersionMismatch);
        }

        log_config_summary(&config);
        Ok(config)
    }

    /// Load the persisted odometer totals
    pub async fn load_odometer(&mut self) -> Result<OdometerSnapshot, StoreError> {
        let mut buffer = [0u8; MAX_ODOMETER_SIZE];
        let len = self
            .storage
            .read(StorageKey::Odometer, &mut buffer)
            .await?;

        postcard::from_bytes(&buffer[..len]).map_err(|_| StoreError::Deserialize)
    }

    /// Store the odometer totals
    pub async fn save_odometer(&mut self, snapshot: &OdometerSnapshot) -> Result<(), StoreError> {
        let mut buffer = [0u8; MAX_ODOMETER_SIZE];
        let data =
            postcard::to_slice(snapshot, &mut buffer).map_err(|_| StoreError::Serialize)?;

        self.storage.write(StorageKey::Odometer, data).await?;
        Ok(())
    }
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &ClusterConfig) {
    info!("Configuration loaded successfully");
    debug!(
        "  wheel: {} mm circumference, {} pulse(s)/rev",
        config.wheel.circumference_mm, config.wheel.pulses_per_rev
    );
    debug!("  link: stale after {} ms", config.link.stale_after_ms);
    debug!(
        "  ui: long press {} ms, brightness preset {}",
        config.ui.long_press_ms, config.ui.brightness
    );
}
