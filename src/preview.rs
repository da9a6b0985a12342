//! Route preview for a committed order: a road route from the routing
//! provider, or a straight two-point line when the provider fails.

use tracing::warn;

use crate::geo::{GeoPoint, haversine_km};
use crate::providers::RoutingProvider;

#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub duration_min: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoutePreview {
    Road {
        polyline: Vec<GeoPoint>,
        summary: RouteSummary,
    },
    /// Fallback when no road route could be computed; the caller surfaces a
    /// non-blocking "showing a straight line" notice.
    StraightLine { polyline: [GeoPoint; 2] },
}

impl RoutePreview {
    pub fn polyline(&self) -> &[GeoPoint] {
        match self {
            RoutePreview::Road { polyline, .. } => polyline,
            RoutePreview::StraightLine { polyline } => polyline,
        }
    }

    pub fn summary(&self) -> Option<&RouteSummary> {
        match self {
            RoutePreview::Road { summary, .. } => Some(summary),
            RoutePreview::StraightLine { .. } => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, RoutePreview::StraightLine { .. })
    }

    /// Great-circle length of the shown line; for a road route this is the
    /// endpoint distance, not the polyline length.
    pub fn straight_distance_km(&self) -> f64 {
        let line = self.polyline();
        match (line.first(), line.last()) {
            (Some(first), Some(last)) => haversine_km(*first, *last),
            _ => 0.0,
        }
    }
}

/// Requests a driving route once, with no retry: a failure falls back to the
/// straight line between the two points.
pub async fn build_preview(
    router: &impl RoutingProvider,
    origin: GeoPoint,
    destination: GeoPoint,
) -> RoutePreview {
    match router.compute_route(origin, destination).await {
        Ok(route) if route.polyline.len() >= 2 => RoutePreview::Road {
            polyline: route.polyline,
            summary: RouteSummary {
                distance_km: route.distance_meters / 1000.0,
                duration_min: route.duration_seconds / 60.0,
            },
        },
        Ok(_) => {
            warn!("routing provider returned a degenerate polyline");
            RoutePreview::StraightLine {
                polyline: [origin, destination],
            }
        }
        Err(err) => {
            warn!(error = %err, "route computation failed, falling back to straight line");
            RoutePreview::StraightLine {
                polyline: [origin, destination],
            }
        }
    }
}
