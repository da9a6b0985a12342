use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// A resolved point: a coordinate with a human-readable address label.
/// The label may be empty when reverse-resolution never produced one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub coordinate: GeoPoint,
    pub address: String,
}

impl Place {
    pub fn new(coordinate: GeoPoint, address: impl Into<String>) -> Self {
        Self {
            coordinate,
            address: address.into(),
        }
    }
}
