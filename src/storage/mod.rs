//! Storage layer for the vehicle catalog.
//!
//! # Modules
//!
//! - `backend`: [`CatalogStore`] trait implemented by catalog backends
//! - `json`: JSON file implementation with atomic writes
//! - `models`: Storage record types separate from domain models

pub mod backend;
pub mod json;
pub mod models;

pub use backend::{CatalogStore, DEFAULT_CAR_TYPES};
pub use json::JsonCatalog;
pub use models::VehicleRecord;
