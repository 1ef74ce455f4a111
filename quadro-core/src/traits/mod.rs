//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod gauge;
pub mod panel;
pub mod source;

pub use gauge::{rpm_to_duty, DialRange, TachOutput, SPEEDO_RANGE, TACH_FULL_SCALE_RPM, TEMP_RANGE};
pub use panel::ClusterPanel;
pub use source::ByteSource;
