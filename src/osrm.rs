//! OSRM HTTP adapter for route geometries.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DirectionsError;
use crate::geo::LatLng;
use crate::polyline::Polyline;
use crate::traits::DirectionsProvider;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
        }
    }
}

impl OsrmConfig {
    /// Defaults overridden by `OSRM_BASE_URL`, `OSRM_PROFILE` and
    /// `OSRM_TIMEOUT_SECS` when set. Unparseable timeouts are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = env::var("OSRM_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(profile) = env::var("OSRM_PROFILE") {
            config.profile = profile;
        }
        if let Some(timeout_secs) = env::var("OSRM_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
        {
            config.timeout_secs = timeout_secs;
        }
        config
    }

    fn route_url(&self, origin: LatLng, destination: LatLng) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=polyline",
            self.base_url.trim_end_matches('/'),
            self.profile,
            origin.lng,
            origin.lat,
            destination.lng,
            destination.lat
        )
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OsrmConfig {
        &self.config
    }

    /// Queries the route service and returns the raw response.
    ///
    /// The response can be kept and later handed back as a precomputed
    /// response so the query is not repeated.
    pub async fn fetch_route(
        &self,
        origin: LatLng,
        destination: LatLng,
    ) -> Result<DirectionsResponse, DirectionsError> {
        let url = self.config.route_url(origin, destination);
        tracing::debug!(%url, "requesting OSRM route");

        // OSRM reports routing failures as JSON bodies on 4xx statuses, so the
        // body is parsed regardless of status.
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<DirectionsResponse>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => Err(DirectionsError::Unavailable {
                reason: format!("OSRM returned status {}", status),
            }),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl DirectionsProvider for OsrmClient {
    async fn compute_path(
        &self,
        origin: LatLng,
        destination: LatLng,
    ) -> Result<Polyline, DirectionsError> {
        self.fetch_route(origin, destination).await?.path()
    }
}

/// Body of an OSRM `route` service response.
///
/// This is also the precomputed response format accepted when adding a
/// route, so it serialises back to the same JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionsResponse {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRoute {
    /// Precision-5 encoded polyline.
    pub geometry: String,
    /// Metres.
    #[serde(default)]
    pub distance: f64,
    /// Seconds.
    #[serde(default)]
    pub duration: f64,
}

impl DirectionsResponse {
    pub fn from_json(json: &str) -> Result<Self, DirectionsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reconstructs the geometry of the first (best) route.
    pub fn path(&self) -> Result<Polyline, DirectionsError> {
        if self.code != "Ok" {
            return Err(DirectionsError::NoRoute {
                code: self.code.clone(),
                message: self.message.clone(),
            });
        }

        let route = self.routes.first().ok_or(DirectionsError::EmptyResponse)?;
        Ok(Polyline::decode(&route.geometry)?)
    }
}
