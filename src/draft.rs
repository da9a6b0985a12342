//! Order draft assembly: accumulate endpoints, roster, vehicle group,
//! schedule and note, then commit the draft into an immutable order.

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, MissingField};
use crate::geo::Region;
use crate::models::employee::Employee;
use crate::models::order::{Order, OrderStatus, Ratings, Timeline, VehicleGroup};
use crate::models::place::Place;
use crate::providers::RosterProvider;
use crate::session::map_pick::MapPickSession;
use crate::session::roster::RosterSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Pickup,
    Dropoff,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pickup: Option<Place>,
    dropoff: Option<Place>,
    employees: Vec<Employee>,
    vehicle_group: VehicleGroup,
    scheduled_at: Option<DateTime<Utc>>,
    note: String,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self {
            pickup: None,
            dropoff: None,
            employees: Vec::new(),
            vehicle_group: VehicleGroup::suggest(0),
            scheduled_at: None,
            note: String::new(),
        }
    }
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_endpoint(&mut self, which: Endpoint, place: Place) {
        match which {
            Endpoint::Pickup => self.pickup = Some(place),
            Endpoint::Dropoff => self.dropoff = Some(place),
        }
    }

    /// Replaces the roster snapshot and recomputes the vehicle group from the
    /// new count. The recompute is unconditional: a manual group choice is
    /// overwritten every time the selection changes.
    pub fn set_employees(&mut self, selection: Vec<Employee>) {
        self.vehicle_group = VehicleGroup::suggest(selection.len());
        self.employees = selection;
    }

    pub fn set_vehicle_group(&mut self, group: VehicleGroup) {
        self.vehicle_group = group;
    }

    /// Rejects dates before today; time of day within the chosen date is
    /// unconstrained.
    pub fn set_schedule(&mut self, at: DateTime<Utc>) -> Result<(), AppError> {
        if at.date_naive() < Utc::now().date_naive() {
            return Err(AppError::ScheduleInPast);
        }
        self.scheduled_at = Some(at);
        Ok(())
    }

    pub fn set_note(&mut self, text: impl Into<String>) {
        self.note = text.into();
    }

    pub fn pickup(&self) -> Option<&Place> {
        self.pickup.as_ref()
    }

    pub fn dropoff(&self) -> Option<&Place> {
        self.dropoff.as_ref()
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn vehicle_group(&self) -> VehicleGroup {
        self.vehicle_group
    }

    pub fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        self.scheduled_at
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn missing_fields(&self) -> Vec<MissingField> {
        let mut missing = Vec::new();
        if self.pickup.is_none() {
            missing.push(MissingField::PickupPoint);
        }
        if self.dropoff.is_none() {
            missing.push(MissingField::DropoffPoint);
        }
        if self.employees.is_empty() {
            missing.push(MissingField::Employees);
        }
        missing
    }

    pub fn is_ready(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Commits the draft into an immutable pending order and resets the draft
    /// to its initial state. An unset schedule commits as the creation time.
    pub fn commit(&mut self) -> Result<Order, AppError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::Validation { missing });
        }

        let draft = std::mem::take(self);
        let now = Utc::now();
        let (pickup, dropoff) = match (draft.pickup, draft.dropoff) {
            (Some(pickup), Some(dropoff)) => (pickup, dropoff),
            // unreachable: missing_fields() covers both endpoints
            _ => {
                return Err(AppError::Validation {
                    missing: vec![MissingField::PickupPoint, MissingField::DropoffPoint],
                });
            }
        };
        let order = Order {
            id: Uuid::new_v4(),
            status: OrderStatus::Pending,
            pickup,
            dropoff,
            scheduled_at: draft.scheduled_at.unwrap_or(now),
            passengers: draft.employees.len().max(1) as u32,
            employees: draft.employees,
            vehicle_group: draft.vehicle_group,
            note: draft.note,
            timeline: Timeline::started(now),
            ratings: Ratings::default(),
        };

        info!(order_id = %order.id, passengers = order.passengers, "order committed");
        Ok(order)
    }
}

/// The booking screen's controller: one draft, at most one active order, and
/// the last-used map viewport shared between point-selection sessions.
#[derive(Debug, Default)]
pub struct BookingDesk {
    draft: OrderDraft,
    active: Option<Order>,
    last_region: Option<Region>,
}

impl BookingDesk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut OrderDraft {
        &mut self.draft
    }

    pub fn active_order(&self) -> Option<&Order> {
        self.active.as_ref()
    }

    pub fn is_commit_ready(&self) -> bool {
        self.draft.is_ready()
    }

    /// Opens a point-selection session for one endpoint, seeded with the
    /// endpoint's current coordinate and the shared last-used region.
    pub fn begin_point_session(&self, which: Endpoint) -> MapPickSession {
        let current = match which {
            Endpoint::Pickup => self.draft.pickup(),
            Endpoint::Dropoff => self.draft.dropoff(),
        };
        MapPickSession::open(current.map(|place| place.coordinate), self.last_region)
    }

    /// Collects a finished point session: applies the confirmed place if there
    /// is one and keeps the session's viewport memory either way.
    pub fn finish_point_session(&mut self, which: Endpoint, mut session: MapPickSession) {
        if let Some(place) = session.confirm() {
            self.draft.set_endpoint(which, place);
        }
        self.last_region = session.remembered_region();
    }

    /// Opens a roster session seeded with the draft's current selection.
    /// Cancelling is dropping the session; committing goes through
    /// [`OrderDraft::set_employees`].
    pub fn begin_roster_session(&self, provider: &impl RosterProvider) -> RosterSession {
        RosterSession::open(provider, self.draft.employees())
    }

    /// Commits the draft; the new order becomes the active one.
    pub fn commit(&mut self) -> Result<&Order, AppError> {
        let order = self.draft.commit()?;
        Ok(self.active.insert(order))
    }

    /// Cancels the active order and hands it back (for the history list).
    /// `Ok(None)` when there is nothing active.
    pub fn cancel_active(&mut self) -> Result<Option<Order>, AppError> {
        let Some(mut order) = self.active.take() else {
            return Ok(None);
        };
        if let Err(err) = order.cancel() {
            self.active = Some(order);
            return Err(err);
        }
        info!(order_id = %order.id, "order cancelled");
        Ok(Some(order))
    }
}
