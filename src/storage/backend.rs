//! Catalog store abstraction.
//!
//! [`CatalogStore`] is the seam between the worker and whatever holds the
//! vehicle records. Each method maps to one worker message.

use crate::domain::error::Result;
use crate::domain::NewVehicle;
use crate::storage::models::VehicleRecord;

/// Car types offered even when no stored record uses them.
pub const DEFAULT_CAR_TYPES: [&str; 2] = ["Manual", "Automatic"];

/// Persistent collection of vehicle records.
///
/// Implementations must be `Send` so the worker thread can own them.
pub trait CatalogStore: Send {
    /// Returns every stored record in ascending id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn list_vehicles(&self) -> Result<Vec<VehicleRecord>>;

    /// Validates `vehicle`, assigns it an id and persists it.
    ///
    /// # Errors
    ///
    /// Returns [`DriveSphereError::Validation`](crate::DriveSphereError::Validation)
    /// for an invalid payload, or a storage error if the write fails.
    fn create_vehicle(&mut self, vehicle: NewVehicle, created_at: i64) -> Result<VehicleRecord>;

    /// Removes the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns a storage error if no record has that id or the write fails.
    fn delete_vehicle(&mut self, id: i64) -> Result<()>;

    /// Distinct stored car types merged with [`DEFAULT_CAR_TYPES`].
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn car_types(&self) -> Result<Vec<String>>;
}
