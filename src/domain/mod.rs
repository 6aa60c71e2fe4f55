//! Domain layer for the DriveSphere plugin.
//!
//! Catalog records, the creation payload, the in-memory query that filters
//! and sorts the list, tag styles and the crate error type. Nothing here
//! touches Zellij or the filesystem.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`vehicle`]: Vehicle record and creation payload
//! - [`query`]: Filter/search/sort over a vehicle list
//! - [`tag`]: Closed set of chip variants

pub mod error;
pub mod query;
pub mod tag;
pub mod vehicle;

pub use error::{DriveSphereError, Result};
pub use query::CatalogQuery;
pub use tag::TagVariant;
pub use vehicle::{NewVehicle, ValidationErrors, Vehicle};
