//! Configuration and odometer persistence
//!
//! Loads cluster configuration and odometer totals from flash or
//! embedded defaults.

pub mod loader;

pub use loader::{ClusterPersistence, StoreError};
