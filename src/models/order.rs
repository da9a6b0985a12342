use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::employee::Employee;
use crate::models::place::Place;

/// Fixed passenger-capacity buckets for the assigned vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleGroup {
    #[serde(rename = "1-4")]
    Sedan1To4,
    #[serde(rename = "6-8")]
    Minivan6To8,
    #[serde(rename = "10-15")]
    Minibus10To15,
    #[serde(rename = "30-40")]
    Bus30To40,
}

impl VehicleGroup {
    pub const ALL: [VehicleGroup; 4] = [
        VehicleGroup::Sedan1To4,
        VehicleGroup::Minivan6To8,
        VehicleGroup::Minibus10To15,
        VehicleGroup::Bus30To40,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            VehicleGroup::Sedan1To4 => "1-4",
            VehicleGroup::Minivan6To8 => "6-8",
            VehicleGroup::Minibus10To15 => "10-15",
            VehicleGroup::Bus30To40 => "30-40",
        }
    }

    pub fn seats(&self) -> u32 {
        match self {
            VehicleGroup::Sedan1To4 => 4,
            VehicleGroup::Minivan6To8 => 8,
            VehicleGroup::Minibus10To15 => 15,
            VehicleGroup::Bus30To40 => 40,
        }
    }

    /// Smallest bucket whose upper bound fits the passenger count. A count of
    /// zero is treated as one passenger; counts beyond every bound get the
    /// largest bucket.
    pub fn suggest(passengers: usize) -> Self {
        let n = passengers.max(1);
        match n {
            1..=4 => VehicleGroup::Sedan1To4,
            5..=8 => VehicleGroup::Minivan6To8,
            9..=15 => VehicleGroup::Minibus10To15,
            _ => VehicleGroup::Bus30To40,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Assigned,
    ArrivedPickup,
    Departed,
    ArrivedDropoff,
    Finished,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Finished | OrderStatus::Cancelled)
    }
}

/// Dispatch milestones. Only `created_at` is stamped here; the remaining
/// fields are filled by the external dispatch system in sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub created_at: DateTime<Utc>,
    pub assigned_at: Option<DateTime<Utc>>,
    pub arrived_at_pickup: Option<DateTime<Utc>>,
    pub departed_at: Option<DateTime<Utc>>,
    pub arrived_at_dropoff: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub travel_time_sec: Option<u32>,
}

impl Timeline {
    pub fn started(created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            assigned_at: None,
            arrived_at_pickup: None,
            departed_at: None,
            arrived_at_dropoff: None,
            finished_at: None,
            travel_time_sec: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Ratings {
    pub driver: Option<f32>,
    pub passenger: Option<f32>,
}

/// A committed transport request. Immutable after creation except for
/// cancellation; status/timeline progress belongs to the dispatch side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub status: OrderStatus,
    pub pickup: Place,
    pub dropoff: Place,
    pub scheduled_at: DateTime<Utc>,
    pub employees: Vec<Employee>,
    pub passengers: u32,
    pub vehicle_group: VehicleGroup,
    pub note: String,
    pub timeline: Timeline,
    pub ratings: Ratings,
}

impl Order {
    pub fn cancel(&mut self) -> Result<(), AppError> {
        if self.status.is_terminal() {
            return Err(AppError::TerminalOrder(self.id));
        }
        self.status = OrderStatus::Cancelled;
        Ok(())
    }
}
