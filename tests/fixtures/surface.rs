//! In-memory map surface that records every call made to it.

use route_overlay::polyline::Polyline;
use route_overlay::{Bounds, LatLng, MapSurface, MarkerId, MarkerKind, MarkerOptions};

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMarker {
    pub id: MarkerId,
    pub kind: MarkerKind,
    pub options: MarkerOptions,
    pub position: LatLng,
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub markers: Vec<PlacedMarker>,
    pub paths: Vec<Polyline>,
    pub viewports: Vec<Bounds>,
    pub position_updates: usize,
}

impl RecordingSurface {
    pub fn marker(&self, id: MarkerId) -> Option<&PlacedMarker> {
        self.markers.iter().find(|marker| marker.id == id)
    }

    pub fn last_viewport(&self) -> Option<Bounds> {
        self.viewports.last().copied()
    }
}

impl MapSurface for RecordingSurface {
    fn place(&mut self, options: &MarkerOptions, kind: MarkerKind) -> MarkerId {
        let id = MarkerId(self.markers.len() as u64);
        self.markers.push(PlacedMarker {
            id,
            kind,
            options: options.clone(),
            position: options.position,
        });
        id
    }

    fn set_marker_position(&mut self, marker: MarkerId, position: LatLng) {
        self.position_updates += 1;
        if let Some(placed) = self.markers.iter_mut().find(|placed| placed.id == marker) {
            placed.position = position;
        }
    }

    fn draw_path(&mut self, path: &Polyline) {
        self.paths.push(path.clone());
    }

    fn fit_viewport(&mut self, bounds: &Bounds) {
        self.viewports.push(*bounds);
    }
}
