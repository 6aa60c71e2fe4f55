//! Infrastructure layer for filesystem and environment interactions.
//!
//! Sandbox path handling (the host filesystem is mounted under `/host`) and
//! loading the optional filters file.

pub mod filters;
pub mod paths;

pub use filters::{load_filter_sections, parse_filter_sections};
pub use paths::{default_catalog_file, display_path, expand_tilde, get_data_dir};
