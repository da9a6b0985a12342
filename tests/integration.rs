use std::time::Duration;

use crew_transit::draft::{BookingDesk, Endpoint};
use crew_transit::error::AppError;
use crew_transit::geo::{GeoPoint, Region, TIGHT_SPAN};
use crew_transit::history::{StatusTab, filter_orders};
use crew_transit::models::employee::Employee;
use crew_transit::models::order::{OrderStatus, VehicleGroup};
use crew_transit::preview::build_preview;
use crew_transit::providers::{Geocoder, LocationProvider, RosterProvider, Route, RoutingProvider};
use crew_transit::session::map_pick::AddressDisplay;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_target(false)
        .compact()
        .try_init();
}

const AIRPORT: GeoPoint = GeoPoint {
    lat: 44.2251,
    lng: 43.0819,
};
const CITY: GeoPoint = GeoPoint {
    lat: 44.2233,
    lng: 42.0578,
};

struct TestRoster;

impl RosterProvider for TestRoster {
    fn list_employees(&self) -> Vec<Employee> {
        ["e1", "e2", "e3", "e4"]
            .iter()
            .map(|id| Employee {
                id: id.to_string(),
                name: format!("employee {id}"),
                department: Some("Flight crew".to_string()),
            })
            .collect()
    }
}

struct TestGeocoder;

impl Geocoder for TestGeocoder {
    async fn forward(&self, query: &str) -> Result<GeoPoint, AppError> {
        match query {
            "Mineralnye Vody airport" => Ok(AIRPORT),
            _ => Err(AppError::ResolutionNotFound),
        }
    }

    async fn reverse(&self, coordinate: GeoPoint) -> Result<String, AppError> {
        Ok(format!(
            "near {:.4}, {:.4}",
            coordinate.lat, coordinate.lng
        ))
    }
}

struct NoLocation;

impl LocationProvider for NoLocation {
    async fn request_permission(&self) -> Result<(), AppError> {
        Err(AppError::PermissionDenied)
    }

    async fn current_position(&self, _max_age: Duration) -> Result<GeoPoint, AppError> {
        Err(AppError::PermissionDenied)
    }
}

struct OfflineRouter;

impl RoutingProvider for OfflineRouter {
    async fn compute_route(
        &self,
        _origin: GeoPoint,
        _destination: GeoPoint,
    ) -> Result<Route, AppError> {
        Err(AppError::Provider("dns failure".to_string()))
    }
}

#[tokio::test]
async fn booking_flow_from_empty_desk_to_committed_order() {
    init_tracing();
    let mut desk = BookingDesk::new();
    assert!(!desk.is_commit_ready());

    // pick three employees; the vehicle group follows the count
    let mut roster = desk.begin_roster_session(&TestRoster);
    roster.set_filter("FLIGHT");
    assert_eq!(roster.visible().len(), 4);
    roster.toggle("e1");
    roster.toggle("e2");
    roster.toggle("e3");
    desk.draft_mut().set_employees(roster.commit());
    assert_eq!(desk.draft().vehicle_group(), VehicleGroup::Sedan1To4);

    // pickup: no prior point, no permission, no memory -> world view,
    // then search selects and recenters
    let mut pickup = desk.begin_point_session(Endpoint::Pickup);
    pickup.resolve_initial(&TestGeocoder, &NoLocation).await;
    assert_eq!(pickup.viewport(), Region::world());

    pickup.set_search("Mineralnye Vody airport");
    pickup.search_and_select(&TestGeocoder).await.unwrap();
    assert!(pickup.can_confirm());
    desk.finish_point_session(Endpoint::Pickup, pickup);

    let pickup_place = desk.draft().pickup().unwrap().clone();
    assert_eq!(pickup_place.coordinate, AIRPORT);
    assert_eq!(pickup_place.address, "near 44.2251, 43.0819");

    // dropoff: the previous session's viewport is remembered
    let mut dropoff = desk.begin_point_session(Endpoint::Dropoff);
    dropoff.resolve_initial(&TestGeocoder, &NoLocation).await;
    assert_eq!(dropoff.viewport(), Region::around(AIRPORT, TIGHT_SPAN));

    dropoff.select_point(&TestGeocoder, CITY).await;
    desk.finish_point_session(Endpoint::Dropoff, dropoff);

    assert!(desk.is_commit_ready());
    let order = desk.commit().unwrap().clone();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.employees.len(), 3);
    assert_eq!(order.passengers, 3);
    assert_eq!(order.vehicle_group, VehicleGroup::Sedan1To4);
    assert_eq!(order.pickup.coordinate, AIRPORT);
    assert_eq!(order.dropoff.coordinate, CITY);
    assert!(order.timeline.assigned_at.is_none());

    // the draft is back to square one but the active order stays
    assert!(!desk.is_commit_ready());
    assert_eq!(desk.active_order().unwrap().id, order.id);
}

#[tokio::test]
async fn cancelled_point_session_changes_nothing_but_keeps_the_region() {
    init_tracing();
    let mut desk = BookingDesk::new();

    let mut pickup = desk.begin_point_session(Endpoint::Pickup);
    pickup.set_search("Mineralnye Vody airport");
    pickup.search_and_select(&TestGeocoder).await.unwrap();
    pickup.cancel();
    desk.finish_point_session(Endpoint::Pickup, pickup);

    assert!(desk.draft().pickup().is_none());

    // the next session still opens on the searched area
    let mut next = desk.begin_point_session(Endpoint::Pickup);
    next.resolve_initial(&TestGeocoder, &NoLocation).await;
    assert_eq!(next.viewport(), Region::around(AIRPORT, TIGHT_SPAN));
}

#[tokio::test]
async fn reopening_an_endpoint_seeds_the_session_with_its_coordinate() {
    init_tracing();
    let mut desk = BookingDesk::new();

    let mut pickup = desk.begin_point_session(Endpoint::Pickup);
    pickup.select_point(&TestGeocoder, AIRPORT).await;
    desk.finish_point_session(Endpoint::Pickup, pickup);

    let mut again = desk.begin_point_session(Endpoint::Pickup);
    again.resolve_initial(&TestGeocoder, &NoLocation).await;

    assert_eq!(again.selected_coordinate(), Some(AIRPORT));
    assert_eq!(
        again.address_display(),
        AddressDisplay::Resolved("near 44.2251, 43.0819".to_string())
    );
    assert_eq!(again.viewport(), Region::around(AIRPORT, TIGHT_SPAN));
}

#[tokio::test]
async fn preview_for_a_committed_order_survives_a_routing_outage() {
    init_tracing();
    let mut desk = BookingDesk::new();

    let mut pickup = desk.begin_point_session(Endpoint::Pickup);
    pickup.select_point(&TestGeocoder, AIRPORT).await;
    desk.finish_point_session(Endpoint::Pickup, pickup);

    let mut dropoff = desk.begin_point_session(Endpoint::Dropoff);
    dropoff.select_point(&TestGeocoder, CITY).await;
    desk.finish_point_session(Endpoint::Dropoff, dropoff);

    desk.draft_mut().set_employees(vec![Employee {
        id: "e1".to_string(),
        name: "employee e1".to_string(),
        department: None,
    }]);

    let order = desk.commit().unwrap().clone();
    let preview = build_preview(
        &OfflineRouter,
        order.pickup.coordinate,
        order.dropoff.coordinate,
    )
    .await;

    assert!(preview.is_fallback());
    assert_eq!(preview.polyline(), [AIRPORT, CITY]);
    // straight-line distance between the two cities is still plausible
    assert!(preview.straight_distance_km() > 50.0);
}

#[tokio::test]
async fn cancelled_orders_show_up_in_the_history_filter() {
    init_tracing();
    let mut desk = BookingDesk::new();

    let mut pickup = desk.begin_point_session(Endpoint::Pickup);
    pickup.select_point(&TestGeocoder, AIRPORT).await;
    desk.finish_point_session(Endpoint::Pickup, pickup);

    let mut dropoff = desk.begin_point_session(Endpoint::Dropoff);
    dropoff.select_point(&TestGeocoder, CITY).await;
    desk.finish_point_session(Endpoint::Dropoff, dropoff);

    let mut roster = desk.begin_roster_session(&TestRoster);
    roster.toggle("e2");
    desk.draft_mut().set_employees(roster.commit());

    desk.commit().unwrap();
    let cancelled = desk.cancel_active().unwrap().unwrap();

    let history = vec![cancelled];
    let hits = filter_orders(&history, StatusTab::Only(OrderStatus::Cancelled), "employee");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].status, OrderStatus::Cancelled);

    let misses = filter_orders(&history, StatusTab::Only(OrderStatus::Finished), "");
    assert!(misses.is_empty());
}
