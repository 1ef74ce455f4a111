//! Display mode and view logic
//!
//! Turns button input into display modes and assembles the views the
//! panel renders.

pub mod button;
pub mod modes;
pub mod view;

pub use button::ButtonAction;
pub use modes::{DisplayMode, ModeController, TempSource, UiEffect};
pub use view::{ClusterView, Readout, StatusSummary};
