//! Error types for the DriveSphere plugin.
//!
//! [`DriveSphereError`] covers every failure the host side can hit: catalog
//! storage, worker messaging, configuration and form validation. The
//! selection engine itself never fails and does not use it.

use thiserror::Error;

/// The main error type for DriveSphere operations.
///
/// # Examples
///
/// ```
/// use drivesphere::DriveSphereError;
///
/// fn read_catalog() -> Result<(), DriveSphereError> {
///     Err(DriveSphereError::Storage("Failed to read file".to_string()))
/// }
///
/// assert_eq!(
///     read_catalog().unwrap_err().to_string(),
///     "Storage error: Failed to read file"
/// );
/// ```
#[derive(Debug, Error)]
pub enum DriveSphereError {
    /// Reading or writing the catalog file failed, or a record was missing.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Converts from `std::io::Error` through `#[from]`.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// A configuration value or the filters file could not be used.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A creation payload was rejected. Carries the field messages joined.
    #[error("Validation error: {0}")]
    Validation(String),
}

/// A specialized `Result` type for DriveSphere operations.
pub type Result<T> = std::result::Result<T, DriveSphereError>;
