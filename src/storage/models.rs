//! Storage record models for the catalog file.
//!
//! Records mirror the on-disk JSON layout and stay separate from the domain
//! [`Vehicle`] so the file format can evolve without touching the UI.

use serde::{Deserialize, Serialize};

use crate::domain::{NewVehicle, Vehicle};

/// One vehicle as stored in the catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// Unique identifier, assigned as the highest stored id plus one.
    pub id: i64,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default)]
    pub car_type: String,

    #[serde(default)]
    pub specifications: Vec<String>,

    /// Unix timestamp of creation.
    #[serde(default)]
    pub created_at: i64,
}

impl VehicleRecord {
    /// Builds a record from a validated creation payload.
    #[must_use]
    pub fn from_new(id: i64, vehicle: NewVehicle, created_at: i64) -> Self {
        Self {
            id,
            name: vehicle.name,
            description: vehicle.description,
            image_url: vehicle.image_url,
            car_type: vehicle.car_type,
            specifications: vehicle.specifications,
            created_at,
        }
    }
}

impl From<VehicleRecord> for Vehicle {
    fn from(record: VehicleRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            image_url: record.image_url,
            car_type: record.car_type,
            specifications: record.specifications,
            created_at: record.created_at,
        }
    }
}
