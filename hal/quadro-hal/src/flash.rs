//! Flash storage abstractions
//!
//! Key-value persistence for the records the cluster must keep across
//! power cycles. Chip-specific HALs implement the trait over their own
//! flash peripheral.

/// Storage keys for persisted cluster records
///
/// One key per record kind. The storage implementation decides where
/// and how the bytes land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Cluster configuration (postcard encoded)
    ClusterConfig = 0,
    /// Odometer totals (postcard encoded)
    Odometer = 1,
    /// Reserved for future use
    Reserved2 = 2,
}

impl StorageKey {
    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKey::ClusterConfig),
            1 => Some(StorageKey::Odometer),
            2 => Some(StorageKey::Reserved2),
            _ => None,
        }
    }
}

/// Errors from flash storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// The flash peripheral itself failed
    Flash,
    /// The storage layer failed
    Storage,
    /// No record stored under this key
    NotFound,
    /// Caller buffer too small for the stored record
    BufferTooSmall,
    /// Stored data failed its integrity check
    Corrupted,
    /// No space left in the store partition
    Full,
}

/// Flash storage trait
///
/// Wear-leveled key-value storage. The odometer record is rewritten
/// for the life of the vehicle, so implementations must spread writes
/// across their partition rather than hammer one sector.
pub trait FlashStorage {
    /// Read the record stored under `key` into `buffer`
    ///
    /// Returns the record length in bytes. `NotFound` if nothing has
    /// been stored under the key yet.
    fn read(
        &mut self,
        key: StorageKey,
        buffer: &mut [u8],
    ) -> impl core::future::Future<Output = Result<usize, FlashError>>;

    /// Store `data` under `key`, replacing any previous record
    fn write(
        &mut self,
        key: StorageKey,
        data: &[u8],
    ) -> impl core::future::Future<Output = Result<(), FlashError>>;
}

// Implement the sequential-storage Key trait when the feature is enabled
#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        let slot = buffer
            .first_mut()
            .ok_or(sequential_storage::map::SerializationError::BufferTooSmall)?;
        *slot = self.as_u8();
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        let raw = buffer
            .first()
            .ok_or(sequential_storage::map::SerializationError::BufferTooSmall)?;
        let key = StorageKey::from_u8(*raw)
            .ok_or(sequential_storage::map::SerializationError::InvalidFormat)?;
        Ok((key, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_byte_roundtrip() {
        for key in [
            StorageKey::ClusterConfig,
            StorageKey::Odometer,
            StorageKey::Reserved2,
        ] {
            assert_eq!(StorageKey::from_u8(key.as_u8()), Some(key));
        }
    }

    #[test]
    fn test_unknown_key_byte_rejected() {
        assert_eq!(StorageKey::from_u8(3), None);
        assert_eq!(StorageKey::from_u8(0xFF), None);
    }
}
