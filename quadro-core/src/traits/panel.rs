//! Cluster panel output

use crate::ui::view::ClusterView;

/// The gauge and display board behind the cluster face
///
/// Takes fully assembled views; all mode logic, gating and scaling has
/// already happened by the time `show` is called. Implementations only
/// render.
pub trait ClusterPanel {
    /// Rendering error type
    type Error;

    /// Present a view on the panel
    fn show(&mut self, view: &ClusterView) -> Result<(), Self::Error>;
}
