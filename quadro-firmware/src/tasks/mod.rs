//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod button;
pub mod cluster;
pub mod odometer;
pub mod tach;
pub mod telemetry_rx;
pub mod tick;
pub mod wheel;

pub use button::{button_task, ButtonTaskConfig};
pub use cluster::cluster_task;
pub use odometer::odometer_task;
pub use tach::tach_task;
pub use telemetry_rx::telemetry_rx_task;
pub use tick::tick_task;
pub use wheel::{wheel_pulse_task, WheelSensorConfig};
