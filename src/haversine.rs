//! Great-circle helpers and a straight-line directions provider.
//!
//! [`StraightLineDirections`] draws the direct segment between origin and
//! destination. Less useful than a routing engine (ignores roads) but
//! always available, so it doubles as an offline fallback.

use async_trait::async_trait;

use crate::error::DirectionsError;
use crate::geo::LatLng;
use crate::polyline::Polyline;
use crate::traits::DirectionsProvider;

/// Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two points in metres.
pub fn haversine_m(from: LatLng, to: LatLng) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Directions provider returning the direct segment `[origin, destination]`.
#[derive(Debug, Clone, Default)]
pub struct StraightLineDirections;

#[async_trait]
impl DirectionsProvider for StraightLineDirections {
    async fn compute_path(
        &self,
        origin: LatLng,
        destination: LatLng,
    ) -> Result<Polyline, DirectionsError> {
        Ok(Polyline::new(vec![origin, destination]))
    }
}
