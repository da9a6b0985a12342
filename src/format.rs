//! Display helpers for dates, coordinates and trip durations.

use chrono::{DateTime, Utc};

use crate::geo::GeoPoint;

pub const EMPTY_VALUE: &str = "—";

pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%d %B %Y").to_string()
}

pub fn format_time(at: DateTime<Utc>) -> String {
    at.format("%H:%M").to_string()
}

pub fn format_date_time(at: DateTime<Utc>) -> String {
    at.format("%d %B %Y, %H:%M").to_string()
}

/// Timeline rows render missing timestamps as a dash.
pub fn format_optional(at: Option<DateTime<Utc>>) -> String {
    at.map(format_date_time)
        .unwrap_or_else(|| EMPTY_VALUE.to_string())
}

/// Whole minutes, rounded down.
pub fn format_travel_time(seconds: Option<u32>) -> String {
    match seconds {
        Some(seconds) => format!("{} min", seconds / 60),
        None => EMPTY_VALUE.to_string(),
    }
}

/// Caption shown under an endpoint field once a point is picked.
pub fn format_coordinate(point: GeoPoint) -> String {
    format!("lat {:.5}, lng {:.5}", point.lat, point.lng)
}
