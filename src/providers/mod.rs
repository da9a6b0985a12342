pub mod osrm;

use std::time::Duration;

use crate::error::AppError;
use crate::geo::GeoPoint;
use crate::models::employee::Employee;

/// A computed driving route between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub polyline: Vec<GeoPoint>,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// Source of the employee roster, in stable display order.
pub trait RosterProvider {
    fn list_employees(&self) -> Vec<Employee>;
}

/// Forward/reverse geocoding. Both directions are fallible; a miss is
/// `AppError::ResolutionNotFound`.
#[allow(async_fn_in_trait)]
pub trait Geocoder {
    async fn forward(&self, query: &str) -> Result<GeoPoint, AppError>;
    async fn reverse(&self, coordinate: GeoPoint) -> Result<String, AppError>;
}

/// Device location. `request_permission` yields `AppError::PermissionDenied`
/// when the user refuses; `current_position` is best-effort within `max_age`.
#[allow(async_fn_in_trait)]
pub trait LocationProvider {
    async fn request_permission(&self) -> Result<(), AppError>;
    async fn current_position(&self, max_age: Duration) -> Result<GeoPoint, AppError>;
}

/// Turn-by-turn routing between two points.
#[allow(async_fn_in_trait)]
pub trait RoutingProvider {
    async fn compute_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<Route, AppError>;
}
