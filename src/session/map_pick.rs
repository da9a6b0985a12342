//! One map-picking interaction: resolve an initial viewport, reconcile taps,
//! drags, searches and locate-me into a single selected point, and hand back
//! exactly one coordinate + address pair on confirmation.
//!
//! The session is a synchronous state machine guarded by a request-generation
//! counter and a closed flag; the async operations compose the synchronous
//! primitives around provider calls, so a stale or post-close resolution is
//! always discarded.

use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::geo::{CITY_SPAN, GeoPoint, Region, TIGHT_SPAN};
use crate::models::place::Place;
use crate::providers::{Geocoder, LocationProvider};

const RESOLVE_TIMEOUT: Duration = Duration::from_secs(10);
/// A cached device fix this old is still fine for centering at open.
const OPEN_LOCATION_MAX_AGE: Duration = Duration::from_secs(60);
/// Locate-me is a deliberate action and wants a fresher fix.
const LOCATE_MAX_AGE: Duration = Duration::from_secs(15);

/// The four distinguishable states of the address panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressDisplay {
    NoSelection,
    Resolving,
    Resolved(String),
    NotFound,
}

#[derive(Debug, Clone, PartialEq)]
enum Resolution {
    Pending,
    Resolved(String),
    NotFound,
}

#[derive(Debug, Clone, PartialEq)]
struct SelectedPoint {
    coordinate: GeoPoint,
    resolution: Resolution,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapPickSession {
    initial: Option<GeoPoint>,
    selected: Option<SelectedPoint>,
    search_query: String,
    viewport: Region,
    remembered: Option<Region>,
    centered: bool,
    generation: u64,
    closed: bool,
}

impl MapPickSession {
    /// Starts a session. `remembered` is the last-used viewport region owned
    /// by the caller; it seeds the viewport until `resolve_initial` centers.
    pub fn open(initial: Option<GeoPoint>, remembered: Option<Region>) -> Self {
        Self {
            initial,
            selected: None,
            search_query: String::new(),
            viewport: remembered.unwrap_or_else(Region::world),
            remembered,
            centered: false,
            generation: 0,
            closed: false,
        }
    }

    /// Resolves the initial viewport, centering at most once per open:
    /// an explicit prior point wins, then the device location (which centers
    /// without selecting), then the remembered region, then the world view.
    pub async fn resolve_initial(
        &mut self,
        geocoder: &impl Geocoder,
        locator: &impl LocationProvider,
    ) {
        if self.centered || self.closed {
            return;
        }
        self.search_query.clear();

        if let Some(coordinate) = self.initial {
            let generation = self.begin_resolve(coordinate);
            let outcome = resolve_address(geocoder, coordinate).await;
            self.apply_resolution(generation, outcome);
            self.center(Region::around(coordinate, TIGHT_SPAN), true);
            return;
        }

        if locator.request_permission().await.is_ok() {
            if let Ok(position) = locator.current_position(OPEN_LOCATION_MAX_AGE).await {
                // centering on the device is not a selection
                self.center(Region::around(position, CITY_SPAN), true);
                return;
            }
        }

        let fallback = self.remembered.unwrap_or_else(Region::world);
        self.center(fallback, false);
    }

    /// Map tap or marker drag end: replaces the selected point and resolves
    /// its address. The viewport stays where the user left it.
    pub async fn select_point(&mut self, geocoder: &impl Geocoder, coordinate: GeoPoint) {
        if self.closed {
            return;
        }
        let generation = self.begin_resolve(coordinate);
        let outcome = resolve_address(geocoder, coordinate).await;
        self.apply_resolution(generation, outcome);
    }

    /// Forward-geocodes the current search text and selects the hit,
    /// re-centering tightly on it. Empty text is a no-op; a miss or provider
    /// failure leaves the session untouched.
    pub async fn search_and_select(&mut self, geocoder: &impl Geocoder) -> Result<(), AppError> {
        if self.closed {
            return Ok(());
        }
        let query = self.search_query.trim().to_string();
        if query.is_empty() {
            return Ok(());
        }

        let coordinate = match geocoder.forward(&query).await {
            Ok(coordinate) => coordinate,
            Err(err) => {
                warn!(%query, error = %err, "address search failed");
                return Err(err);
            }
        };

        let generation = self.begin_resolve(coordinate);
        self.center(Region::around(coordinate, TIGHT_SPAN), true);
        let outcome = resolve_address(geocoder, coordinate).await;
        self.apply_resolution(generation, outcome);
        Ok(())
    }

    /// Selects the device position and re-centers tightly on it. Permission
    /// denial or a location failure leaves the session untouched.
    pub async fn locate_me(
        &mut self,
        geocoder: &impl Geocoder,
        locator: &impl LocationProvider,
    ) -> Result<(), AppError> {
        if self.closed {
            return Ok(());
        }
        locator.request_permission().await?;
        let position = locator.current_position(LOCATE_MAX_AGE).await?;

        let generation = self.begin_resolve(position);
        self.center(Region::around(position, TIGHT_SPAN), true);
        let outcome = resolve_address(geocoder, position).await;
        self.apply_resolution(generation, outcome);
        Ok(())
    }

    /// Replaces the selected point with a pending one and supersedes any
    /// in-flight resolution. Returns the token the matching
    /// `apply_resolution` call must present.
    pub fn begin_resolve(&mut self, coordinate: GeoPoint) -> u64 {
        if self.closed {
            return self.generation;
        }
        self.generation += 1;
        self.selected = Some(SelectedPoint {
            coordinate,
            resolution: Resolution::Pending,
        });
        self.generation
    }

    /// Applies a finished reverse-resolution. Results from a superseded
    /// request or a closed session are discarded.
    pub fn apply_resolution(&mut self, generation: u64, outcome: Result<String, AppError>) {
        if self.closed || generation != self.generation {
            debug!(generation, "discarding stale address resolution");
            return;
        }
        let Some(point) = self.selected.as_mut() else {
            return;
        };
        point.resolution = match outcome {
            Ok(label) => Resolution::Resolved(label),
            Err(err) => {
                warn!(error = %err, "reverse resolution failed");
                Resolution::NotFound
            }
        };
    }

    /// Moves the viewport. Centering counts against the once-per-open limit;
    /// `record` additionally stores the region as the last-used one (the
    /// open-time fallback re-uses the memory without recording).
    fn center(&mut self, region: Region, record: bool) {
        self.viewport = region;
        self.centered = true;
        if record {
            self.remembered = Some(region);
        }
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        if !self.closed {
            self.search_query = text.into();
        }
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn viewport(&self) -> Region {
        self.viewport
    }

    /// The region the caller should seed the next session with. Survives
    /// confirm and cancel.
    pub fn remembered_region(&self) -> Option<Region> {
        self.remembered
    }

    pub fn selected_coordinate(&self) -> Option<GeoPoint> {
        self.selected.as_ref().map(|point| point.coordinate)
    }

    pub fn resolving(&self) -> bool {
        self.selected
            .as_ref()
            .is_some_and(|point| point.resolution == Resolution::Pending)
    }

    pub fn address_display(&self) -> AddressDisplay {
        match &self.selected {
            None => AddressDisplay::NoSelection,
            Some(point) => match &point.resolution {
                Resolution::Pending => AddressDisplay::Resolving,
                Resolution::Resolved(label) => AddressDisplay::Resolved(label.clone()),
                Resolution::NotFound => AddressDisplay::NotFound,
            },
        }
    }

    /// Confirm is available only with a selected point whose resolution has
    /// finished.
    pub fn can_confirm(&self) -> bool {
        !self.closed && self.selected.is_some() && !self.resolving()
    }

    /// Ends the session and returns the committed point, or `None` while
    /// confirm is unavailable. A point whose address never resolved commits
    /// with an empty label.
    pub fn confirm(&mut self) -> Option<Place> {
        if !self.can_confirm() {
            return None;
        }
        let point = self.selected.take()?;
        let address = match point.resolution {
            Resolution::Resolved(label) => label,
            _ => String::new(),
        };
        self.search_query.clear();
        self.closed = true;
        Some(Place::new(point.coordinate, address))
    }

    /// Ends the session discarding the selection and search text. The
    /// remembered region is kept for the next open.
    pub fn cancel(&mut self) {
        self.selected = None;
        self.search_query.clear();
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

async fn resolve_address(
    geocoder: &impl Geocoder,
    coordinate: GeoPoint,
) -> Result<String, AppError> {
    match timeout(RESOLVE_TIMEOUT, geocoder.reverse(coordinate)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(AppError::Provider("address resolution timed out".to_string())),
    }
}
