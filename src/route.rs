//! A single visualised journey: start, end and moving markers plus a path.
//!
//! Path computation is split around its suspension point. [`Route::path_request`]
//! captures what to ask for, [`PathRequest::resolve`] does the (possibly
//! remote) work, and [`Route::attach_path`] draws the result. The registry
//! drives the three steps itself so that no lock is held while a request is
//! in flight; [`Route::calculate_route`] chains them for standalone use.

use serde::{Deserialize, Serialize};

use crate::error::{DirectionsError, RegistryError};
use crate::geo::LatLng;
use crate::marker::{Marker, MarkerIcon, MarkerKind, MarkerOptions};
use crate::osrm::DirectionsResponse;
use crate::polyline::Polyline;
use crate::theme::Color;
use crate::traits::{DirectionsProvider, MapSurface};

/// Everything needed to create a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOptions {
    pub start: MarkerOptions,
    pub end: MarkerOptions,
    pub car: MarkerOptions,
    /// Previously fetched directions; when present no query is made.
    #[serde(default)]
    pub precomputed: Option<DirectionsResponse>,
}

impl RouteOptions {
    pub fn new(start: MarkerOptions, end: MarkerOptions, car: MarkerOptions) -> Self {
        Self {
            start,
            end,
            car,
            precomputed: None,
        }
    }

    pub fn with_precomputed(mut self, response: DirectionsResponse) -> Self {
        self.precomputed = Some(response);
        self
    }

    /// Replaces the icons of all three markers with ones derived from `color`:
    /// pins for start and end, a car for the moving marker.
    pub fn themed(mut self, color: Color) -> Self {
        self.start.icon = Some(MarkerIcon::Pin(color));
        self.end.icon = Some(MarkerIcon::Pin(color));
        self.car.icon = Some(MarkerIcon::Car(color));
        self
    }

    /// Checks every marker position before anything is placed.
    pub fn validate(&self) -> Result<(), RegistryError> {
        for (kind, options) in [
            (MarkerKind::Start, &self.start),
            (MarkerKind::End, &self.end),
            (MarkerKind::Car, &self.car),
        ] {
            if !options.position.is_valid() {
                return Err(RegistryError::InvalidPosition {
                    kind,
                    position: options.position,
                });
            }
        }
        Ok(())
    }
}

/// Lifecycle of a route once its markers exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStage {
    /// Markers visible, no path drawn and none requested. Routes whose path
    /// computation failed return here.
    MarkersPlaced,
    PathPending,
    Ready,
}

/// The pending half of a path computation.
#[derive(Debug, Clone, PartialEq)]
pub enum PathRequest {
    Precomputed(DirectionsResponse),
    Live { origin: LatLng, destination: LatLng },
}

impl PathRequest {
    /// Produces path geometry. Precomputed responses never reach `directions`.
    pub async fn resolve<D>(self, directions: &D) -> Result<Polyline, DirectionsError>
    where
        D: DirectionsProvider + ?Sized,
    {
        match self {
            PathRequest::Precomputed(response) => response.path(),
            PathRequest::Live {
                origin,
                destination,
            } => directions.compute_path(origin, destination).await,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    start: Marker,
    end: Marker,
    car: Marker,
    path: Option<Polyline>,
    stage: RouteStage,
}

impl Route {
    /// Places the three markers on `surface`.
    pub fn place<S: MapSurface + ?Sized>(
        surface: &mut S,
        start: MarkerOptions,
        end: MarkerOptions,
        car: MarkerOptions,
    ) -> Self {
        Self {
            start: Marker::place(surface, MarkerKind::Start, start),
            end: Marker::place(surface, MarkerKind::End, end),
            car: Marker::place(surface, MarkerKind::Car, car),
            path: None,
            stage: RouteStage::MarkersPlaced,
        }
    }

    /// Marks the path as pending and returns what has to be resolved.
    pub fn path_request(&mut self, precomputed: Option<DirectionsResponse>) -> PathRequest {
        self.stage = RouteStage::PathPending;
        match precomputed {
            Some(response) => PathRequest::Precomputed(response),
            None => PathRequest::Live {
                origin: self.start.position(),
                destination: self.end.position(),
            },
        }
    }

    pub fn attach_path<S: MapSurface + ?Sized>(&mut self, surface: &mut S, path: Polyline) {
        surface.draw_path(&path);
        self.path = Some(path);
        self.stage = RouteStage::Ready;
    }

    /// Leaves the route inert after a failed computation.
    pub fn abandon_path(&mut self) {
        self.stage = RouteStage::MarkersPlaced;
    }

    /// Computes and draws the path in one go.
    pub async fn calculate_route<S, D>(
        &mut self,
        surface: &mut S,
        directions: &D,
        precomputed: Option<DirectionsResponse>,
    ) -> Result<(), DirectionsError>
    where
        S: MapSurface + ?Sized,
        D: DirectionsProvider + ?Sized,
    {
        match self.path_request(precomputed).resolve(directions).await {
            Ok(path) => {
                self.attach_path(surface, path);
                Ok(())
            }
            Err(err) => {
                self.abandon_path();
                Err(err)
            }
        }
    }

    pub fn move_car<S: MapSurface + ?Sized>(&mut self, surface: &mut S, position: LatLng) {
        self.car.set_position(surface, position);
    }

    pub fn start_marker(&self) -> &Marker {
        &self.start
    }

    pub fn end_marker(&self) -> &Marker {
        &self.end
    }

    pub fn car_marker(&self) -> &Marker {
        &self.car
    }

    pub fn start_position(&self) -> LatLng {
        self.start.position()
    }

    pub fn end_position(&self) -> LatLng {
        self.end.position()
    }

    pub fn car_position(&self) -> LatLng {
        self.car.position()
    }

    pub fn path(&self) -> Option<&Polyline> {
        self.path.as_ref()
    }

    pub fn stage(&self) -> RouteStage {
        self.stage
    }
}
