//! Seams to the external collaborators.
//!
//! The registry renders through a [`MapSurface`] and asks a
//! [`DirectionsProvider`] for path geometry. Applications implement both for
//! their own map widget and routing backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DirectionsError;
use crate::geo::{Bounds, LatLng};
use crate::marker::{MarkerKind, MarkerOptions};
use crate::polyline::Polyline;

/// Handle for a marker placed on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerId(pub u64);

/// The map rendering sink.
///
/// Markers and paths are only ever added; nothing in this crate removes them.
pub trait MapSurface {
    /// Renders a marker and returns a handle for later position updates.
    fn place(&mut self, options: &MarkerOptions, kind: MarkerKind) -> MarkerId;

    fn set_marker_position(&mut self, marker: MarkerId, position: LatLng);

    fn draw_path(&mut self, path: &Polyline);

    /// Applies `bounds` as the visible viewport.
    fn fit_viewport(&mut self, bounds: &Bounds);
}

/// Computes travel paths between two points.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    async fn compute_path(
        &self,
        origin: LatLng,
        destination: LatLng,
    ) -> Result<Polyline, DirectionsError>;
}
