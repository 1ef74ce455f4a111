//! Button press classification.

/// A classified press of the cluster's single button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction {
    /// Released before the long-press threshold
    Short,
    /// Held for at least the long-press threshold
    Long,
}

impl ButtonAction {
    /// Classify a press by how long the button was held
    pub fn classify(held_ms: u32, long_press_ms: u32) -> Self {
        if held_ms >= long_press_ms {
            ButtonAction::Long
        } else {
            ButtonAction::Short
        }
    }
}
