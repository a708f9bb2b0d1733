//! Error types surfaced by the registry and its collaborators.

use thiserror::Error;

use crate::geo::LatLng;
use crate::marker::MarkerKind;

/// Failures reported to callers of [`RouteRegistry`](crate::registry::RouteRegistry).
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The identifier is already registered; nothing was changed.
    #[error("route `{id}` already exists")]
    RouteAlreadyExists { id: String },

    #[error("route `{id}` is not registered")]
    RouteNotFound { id: String },

    /// Path computation failed. The route stays registered with its markers
    /// placed and no path.
    #[error("no path available for route `{id}`")]
    PathUnavailable {
        id: String,
        #[source]
        source: DirectionsError,
    },

    #[error("invalid {kind} marker position {position}")]
    InvalidPosition { kind: MarkerKind, position: LatLng },

    #[error("colour palette must contain at least one colour")]
    EmptyPalette,
}

/// Failures of a [`DirectionsProvider`](crate::traits::DirectionsProvider)
/// or of reconstructing a path from a precomputed response.
#[derive(Debug, Error)]
pub enum DirectionsError {
    #[error("directions request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed directions response: {0}")]
    Json(#[from] serde_json::Error),

    /// The routing engine answered but found no route.
    #[error("routing engine returned `{code}`: {}", .message.as_deref().unwrap_or("no message"))]
    NoRoute {
        code: String,
        message: Option<String>,
    },

    #[error("directions response contains no routes")]
    EmptyResponse,

    #[error("invalid route geometry: {0}")]
    Geometry(#[from] PolylineError),

    /// Catch-all for providers that are not HTTP based.
    #[error("directions unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Failures decoding an encoded polyline string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    #[error("polyline ends in the middle of a value at byte {offset}")]
    Truncated { offset: usize },

    #[error("invalid polyline byte {byte:#04x} at offset {offset}")]
    InvalidByte { offset: usize, byte: u8 },

    #[error("polyline value starting before byte {offset} overflows")]
    Overflow { offset: usize },

    #[error("decoded polyline point {index} is not a valid coordinate")]
    OutOfRange { index: usize },
}
