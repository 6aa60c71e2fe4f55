//! JSON file-based catalog store.
//!
//! The whole catalog is held in memory and rewritten on every change using
//! write-to-temp + rename, so a crash never leaves a half-written file.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "vehicles": [
//!     {
//!       "id": 1,
//!       "name": "Ford Mustang",
//!       "description": "Five litre V8",
//!       "image_url": "https://example.com/mustang.jpg",
//!       "car_type": "Manual",
//!       "specifications": ["Fuel Type: Petrol"],
//!       "created_at": 1709651040
//!     }
//!   ]
//! }
//! ```

use crate::domain::error::{DriveSphereError, Result};
use crate::domain::NewVehicle;
use crate::storage::backend::{CatalogStore, DEFAULT_CAR_TYPES};
use crate::storage::models::VehicleRecord;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogData {
    version: u32,

    /// Records kept sorted by id.
    #[serde(default)]
    vehicles: Vec<VehicleRecord>,
}

impl Default for CatalogData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            vehicles: Vec::new(),
        }
    }
}

/// Catalog store backed by a single JSON file.
///
/// `Send` but not `Sync`; owned by the worker thread.
#[derive(Debug)]
pub struct JsonCatalog {
    file_path: PathBuf,
    data: CatalogData,
}

impl JsonCatalog {
    /// Opens the catalog at `file_path`, starting empty if the file is absent.
    ///
    /// Parent directories are created on demand.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// existing file cannot be read or parsed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use drivesphere::storage::{CatalogStore, JsonCatalog};
    /// use std::path::PathBuf;
    ///
    /// let catalog = JsonCatalog::open(PathBuf::from("/tmp/catalog.json"))?;
    /// assert!(catalog.list_vehicles()?.is_empty());
    /// # Ok::<(), drivesphere::DriveSphereError>(())
    /// ```
    pub fn open(file_path: PathBuf) -> Result<Self> {
        let _span = tracing::debug_span!("json_catalog_open", path = ?file_path).entered();

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("catalog file missing, starting empty");
            CatalogData::default()
        };

        tracing::debug!(vehicle_count = data.vehicles.len(), "catalog opened");

        Ok(Self { file_path, data })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<CatalogData> {
        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(CatalogData::default());
        }

        let mut data: CatalogData = serde_json::from_str(&contents)
            .map_err(|e| DriveSphereError::Storage(format!("failed to parse catalog: {e}")))?;
        data.vehicles.sort_by_key(|record| record.id);

        tracing::debug!(
            version = data.version,
            vehicles = data.vehicles.len(),
            "loaded catalog data"
        );
        Ok(data)
    }

    fn save_to_file(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| DriveSphereError::Storage(format!("failed to serialize catalog: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(path = ?self.file_path, "catalog saved");
        Ok(())
    }

    fn next_id(&self) -> i64 {
        self.data
            .vehicles
            .iter()
            .map(|record| record.id)
            .max()
            .unwrap_or(0)
            .saturating_add(1)
    }
}

impl CatalogStore for JsonCatalog {
    fn list_vehicles(&self) -> Result<Vec<VehicleRecord>> {
        Ok(self.data.vehicles.clone())
    }

    fn create_vehicle(&mut self, vehicle: NewVehicle, created_at: i64) -> Result<VehicleRecord> {
        let _span = tracing::debug_span!("json_create_vehicle", name = %vehicle.name).entered();

        let vehicle = vehicle.into_validated()?;
        let record = VehicleRecord::from_new(self.next_id(), vehicle, created_at);

        self.data.vehicles.push(record.clone());
        if let Err(e) = self.save_to_file() {
            self.data.vehicles.pop();
            return Err(e);
        }

        tracing::debug!(id = record.id, "vehicle created");
        Ok(record)
    }

    fn delete_vehicle(&mut self, id: i64) -> Result<()> {
        let _span = tracing::debug_span!("json_delete_vehicle", id).entered();

        let index = self
            .data
            .vehicles
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| DriveSphereError::Storage(format!("vehicle not found: {id}")))?;

        let removed = self.data.vehicles.remove(index);
        if let Err(e) = self.save_to_file() {
            self.data.vehicles.insert(index, removed);
            return Err(e);
        }

        tracing::debug!("vehicle deleted");
        Ok(())
    }

    fn car_types(&self) -> Result<Vec<String>> {
        let mut types: Vec<String> = DEFAULT_CAR_TYPES.iter().map(ToString::to_string).collect();

        let mut stored: Vec<&str> = self
            .data
            .vehicles
            .iter()
            .map(|record| record.car_type.trim())
            .filter(|car_type| !car_type.is_empty())
            .collect();
        stored.sort_unstable();
        stored.dedup();

        for car_type in stored {
            if !types.iter().any(|known| known.eq_ignore_ascii_case(car_type)) {
                types.push(car_type.to_string());
            }
        }

        Ok(types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, car_type: &str) -> NewVehicle {
        NewVehicle {
            name: name.to_string(),
            car_type: car_type.to_string(),
            ..NewVehicle::default()
        }
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = JsonCatalog::open(dir.path().join("nested/catalog.json")).unwrap();
        assert!(catalog.list_vehicles().unwrap().is_empty());
    }

    #[test]
    fn ids_continue_from_highest() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = JsonCatalog::open(dir.path().join("catalog.json")).unwrap();

        let first = catalog.create_vehicle(payload("A", "Manual"), 10).unwrap();
        let second = catalog.create_vehicle(payload("B", "Manual"), 20).unwrap();
        catalog.delete_vehicle(first.id).unwrap();
        let third = catalog.create_vehicle(payload("C", "Manual"), 30).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(third.id, 3);
    }

    #[test]
    fn delete_unknown_id_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = JsonCatalog::open(dir.path().join("catalog.json")).unwrap();
        let err = catalog.delete_vehicle(42).unwrap_err();
        assert!(matches!(err, DriveSphereError::Storage(_)));
    }

    #[test]
    fn invalid_payload_is_not_stored() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = JsonCatalog::open(dir.path().join("catalog.json")).unwrap();
        let err = catalog.create_vehicle(payload(" ", ""), 1).unwrap_err();
        assert!(matches!(err, DriveSphereError::Validation(_)));
        assert!(catalog.list_vehicles().unwrap().is_empty());
    }

    #[test]
    fn car_types_merge_defaults_with_stored() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = JsonCatalog::open(dir.path().join("catalog.json")).unwrap();
        catalog.create_vehicle(payload("A", "manual"), 1).unwrap();
        catalog.create_vehicle(payload("B", "Hybrid"), 2).unwrap();

        assert_eq!(
            catalog.car_types().unwrap(),
            vec!["Manual".to_string(), "Automatic".to_string(), "Hybrid".to_string()]
        );
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = JsonCatalog::open(path).unwrap_err();
        assert!(matches!(err, DriveSphereError::Storage(_)));
    }
}
