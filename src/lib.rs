//! route-overlay core
//!
//! Keeps a set of named travel routes on one shared map surface: start and
//! end markers, a path from a directions provider, and a moving marker that
//! callers reposition as the journey progresses.

pub mod error;
pub mod geo;
pub mod traits;
pub mod marker;
pub mod theme;
pub mod polyline;
pub mod haversine;
pub mod osrm;
pub mod route;
pub mod registry;

pub use error::{DirectionsError, PolylineError, RegistryError};
pub use geo::{Bounds, LatLng};
pub use marker::{MarkerIcon, MarkerKind, MarkerOptions};
pub use registry::{RegistryConfig, RouteRegistry};
pub use route::{Route, RouteOptions, RouteStage};
pub use traits::{DirectionsProvider, MapSurface, MarkerId};
