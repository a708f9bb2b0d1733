//! Route registry: owns the shared surface and every route drawn on it.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::error::RegistryError;
use crate::geo::{Bounds, LatLng};
use crate::marker::MarkerKind;
use crate::route::{Route, RouteOptions};
use crate::theme::Palette;
use crate::traits::{DirectionsProvider, MapSurface};

#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    /// Colours `add_route_with_auto_theme` draws from.
    pub palette: Palette,
}

struct RegistryState<S> {
    surface: S,
    routes: HashMap<String, Route>,
    viewport: Option<Bounds>,
}

/// Keeps independently addressable routes on one map surface.
///
/// All methods take `&self`, so several `add_route` futures can be in flight
/// at once and `move_marker` can run while they are pending. The internal
/// lock is only ever held for synchronous sections, never across the
/// directions request.
pub struct RouteRegistry<S, D> {
    state: Mutex<RegistryState<S>>,
    directions: D,
    config: RegistryConfig,
}

impl<S, D> RouteRegistry<S, D>
where
    S: MapSurface,
    D: DirectionsProvider,
{
    /// Creates an empty registry with the default palette.
    pub fn new(surface: S, directions: D) -> Self {
        Self::with_config(surface, directions, RegistryConfig::default())
    }

    /// Creates an empty registry with an explicit configuration.
    pub fn with_config(surface: S, directions: D, config: RegistryConfig) -> Self {
        Self {
            state: Mutex::new(RegistryState {
                surface,
                routes: HashMap::new(),
                viewport: None,
            }),
            directions,
            config,
        }
    }

    /// Registers a route, places its markers and computes its path.
    ///
    /// The route is registered and visible before the path request is sent.
    /// Once the path arrives the viewport is refitted over every registered
    /// route. If the path cannot be computed the route stays registered
    /// without a path and `PathUnavailable` is returned.
    pub async fn add_route(
        &self,
        id: impl Into<String>,
        options: RouteOptions,
    ) -> Result<(), RegistryError> {
        let id = id.into();
        options.validate()?;

        let RouteOptions {
            start,
            end,
            car,
            precomputed,
        } = options;

        let request = {
            let mut guard = self.state.lock();
            let RegistryState {
                surface, routes, ..
            } = &mut *guard;

            if routes.contains_key(&id) {
                return Err(RegistryError::RouteAlreadyExists { id });
            }

            // Inserted before the request is awaited so that concurrent calls
            // see the id as taken.
            let mut route = Route::place(surface, start, end, car);
            let request = route.path_request(precomputed);
            routes.insert(id.clone(), route);
            tracing::debug!(route_id = %id, routes = routes.len(), "route markers placed");
            request
        };

        let outcome = request.resolve(&self.directions).await;

        let mut guard = self.state.lock();
        let RegistryState {
            surface,
            routes,
            viewport,
        } = &mut *guard;
        let route = routes
            .get_mut(&id)
            .ok_or_else(|| RegistryError::RouteNotFound { id: id.clone() })?;

        match outcome {
            Ok(path) => {
                tracing::debug!(route_id = %id, points = path.points().len(), "route path ready");
                route.attach_path(surface, path);
                *viewport = fit_viewport(surface, routes);
                Ok(())
            }
            Err(source) => {
                tracing::warn!(route_id = %id, error = %source, "route path unavailable");
                route.abandon_path();
                Err(RegistryError::PathUnavailable { id, source })
            }
        }
    }

    /// Like [`add_route`](Self::add_route), but themes all three markers with
    /// one colour drawn at random from the configured palette.
    pub async fn add_route_with_auto_theme(
        &self,
        id: impl Into<String>,
        options: RouteOptions,
    ) -> Result<(), RegistryError> {
        let color = self.config.palette.pick(&mut rand::thread_rng());
        self.add_route(id, options.themed(color)).await
    }

    /// Repositions the moving marker of route `id`. Never touches the viewport.
    pub fn move_marker(&self, id: &str, position: LatLng) -> Result<(), RegistryError> {
        if !position.is_valid() {
            return Err(RegistryError::InvalidPosition {
                kind: MarkerKind::Car,
                position,
            });
        }

        let mut guard = self.state.lock();
        let RegistryState {
            surface, routes, ..
        } = &mut *guard;
        let route = routes
            .get_mut(id)
            .ok_or_else(|| RegistryError::RouteNotFound { id: id.to_string() })?;

        route.move_car(surface, position);
        tracing::trace!(route_id = %id, %position, "car marker moved");
        Ok(())
    }

    /// Number of registered routes, pending and failed ones included.
    pub fn len(&self) -> usize {
        self.state.lock().routes.len()
    }

    /// True if no route has been registered.
    pub fn is_empty(&self) -> bool {
        self.state.lock().routes.is_empty()
    }

    /// True if `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.state.lock().routes.contains_key(id)
    }

    /// Registered identifiers, sorted.
    pub fn route_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.state.lock().routes.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Snapshot of route `id`.
    pub fn route(&self, id: &str) -> Option<Route> {
        self.state.lock().routes.get(id).cloned()
    }

    /// Bounds most recently applied to the surface.
    pub fn viewport(&self) -> Option<Bounds> {
        self.state.lock().viewport
    }

    /// Runs `f` against the shared surface.
    ///
    /// `f` runs with the registry lock held. The lock is not reentrant, so
    /// `f` must not call back into this registry or it will deadlock.
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.state.lock().surface)
    }

    /// The directions provider routes are resolved with.
    pub fn directions(&self) -> &D {
        &self.directions
    }

    /// Configuration the registry was built with.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }
}

/// Fits the surface to every route's start and end, recomputed from scratch.
fn fit_viewport<S: MapSurface>(surface: &mut S, routes: &HashMap<String, Route>) -> Option<Bounds> {
    let bounds = Bounds::from_points(
        routes
            .values()
            .flat_map(|route| [route.start_position(), route.end_position()]),
    )?;
    surface.fit_viewport(&bounds);
    Some(bounds)
}
