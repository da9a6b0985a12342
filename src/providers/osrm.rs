//! Routing provider backed by a public OSRM instance.

use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;
use crate::geo::GeoPoint;
use crate::providers::{Route, RoutingProvider};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmRouter {
    config: OsrmConfig,
    client: reqwest::Client,
}

impl OsrmRouter {
    pub fn new(config: OsrmConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl RoutingProvider for OsrmRouter {
    async fn compute_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<Route, AppError> {
        let url = format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=geojson",
            self.config.base_url,
            self.config.profile,
            origin.lng,
            origin.lat,
            destination.lng,
            destination.lat,
        );

        debug!(%url, "requesting osrm route");

        let body: OsrmRouteResponse = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let route = body
            .routes
            .into_iter()
            .next()
            .ok_or(AppError::ResolutionNotFound)?;

        Ok(Route {
            polyline: route
                .geometry
                .coordinates
                .into_iter()
                .map(|[lng, lat]| GeoPoint { lat, lng })
                .collect(),
            distance_meters: route.distance,
            duration_seconds: route.duration,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
    distance: f64,
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    // GeoJSON order: [longitude, latitude]
    coordinates: Vec<[f64; 2]>,
}
