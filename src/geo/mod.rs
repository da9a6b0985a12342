use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Viewport span used when centering on an explicitly chosen point.
pub const TIGHT_SPAN: f64 = 0.08;
/// Viewport span used when centering on the device's rough location.
pub const CITY_SPAN: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// A map viewport: a center plus latitude/longitude deltas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub center: GeoPoint,
    pub lat_delta: f64,
    pub lng_delta: f64,
}

impl Region {
    pub fn around(center: GeoPoint, span: f64) -> Self {
        Self {
            center,
            lat_delta: span,
            lng_delta: span,
        }
    }

    /// The whole-world fallback view when nothing better is known.
    pub fn world() -> Self {
        Self {
            center: GeoPoint { lat: 30.0, lng: 0.0 },
            lat_delta: 40.0,
            lng_delta: 40.0,
        }
    }
}

pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let sin_lat = (delta_lat / 2.0).sin();
    let sin_lng = (delta_lng / 2.0).sin();

    let haversine = sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lng * sin_lng;
    let central_angle = 2.0 * haversine.sqrt().asin();

    EARTH_RADIUS_KM * central_angle
}
