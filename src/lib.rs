//! DriveSphere: a Zellij plugin for browsing a vehicle catalog.
//!
//! DriveSphere provides:
//! - A card list of vehicles with fuzzy search on the name
//! - A filter dialog with collapsible facet sections and a draft selection
//!   that only takes effect when applied
//! - A sort menu over name and creation date
//! - A details modal with delete confirmation
//! - An add-vehicle form with validation and dropdowns
//! - Persistent JSON catalog storage driven by a Zellij worker thread

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs, plugin.rs)            │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, overlays, add form               │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Engine        │   │ Worker Layer  │
//! │ (ui/)         │   │ (engine/)     │   │ (worker/)     │
//! │ - Components  │   │ - Filter      │   │ - IPC bridge  │
//! │ - Layout      │   │ - Sort        │   │ - Storage     │
//! │ - Palette     │   │ - Dismiss     │   │   (storage/)  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths, filters file (infrastructure/)    │
//! │  - Vehicle, query, tags, errors (domain/)           │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a rotating OTLP file    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/drivesphere.wasm" {
//!         catalog_file "~/.local/share/zellij/drivesphere/catalog.json"
//!         multi_select "true"
//!         filters_file "~/.config/drivesphere/filters.toml"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use drivesphere::{handle_event, initialize, Config, Event, InputMode};
//!
//! let mut state = initialize(&Config::default());
//!
//! for event in [Event::OpenSort, Event::KeyDown, Event::Select] {
//!     let (_render, actions) = handle_event(&mut state, &event)?;
//!     assert!(actions.is_empty());
//! }
//! assert_eq!(state.input_mode(), InputMode::Normal);
//! assert_eq!(state.sort.active().label(), "Name (Z-A)");
//! # Ok::<(), drivesphere::DriveSphereError>(())
//! ```

pub mod app;
pub mod domain;
pub mod engine;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus};
pub use domain::{DriveSphereError, NewVehicle, Result, Vehicle};

use std::collections::BTreeMap;
use std::path::Path;

use engine::filter::default_sections;
use engine::{FilterSelectionEngine, SelectionMode, SelectionState, SortSelectionEngine};

/// Plugin configuration parsed from the Zellij layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON catalog path inside the sandbox.
    pub catalog_file: String,

    /// Whether a filter section accepts several values at once.
    pub multi_select: bool,

    /// Optional TOML file replacing the built-in filter sections.
    pub filters_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_file: infrastructure::default_catalog_file()
                .to_string_lossy()
                .into_owned(),
            multi_select: true,
            filters_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Paths starting with `~` are mapped onto the sandbox `/host` mount.
    /// Values that do not parse fall back to their defaults.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use drivesphere::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("catalog_file".to_string(), "~/cars.json".to_string());
    /// map.insert("multi_select".to_string(), "false".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.catalog_file, "/host/cars.json");
    /// assert!(!config.multi_select);
    /// assert_eq!(config.trace_level, "info");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let catalog_file = config
            .get("catalog_file")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map_or(defaults.catalog_file, infrastructure::expand_tilde);

        let multi_select = config
            .get("multi_select")
            .and_then(|s| s.trim().parse::<bool>().ok())
            .unwrap_or(defaults.multi_select);

        let filters_file = config
            .get("filters_file")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(infrastructure::expand_tilde);

        let trace_level = config
            .get("trace_level")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map_or(defaults.trace_level, String::from);

        Self {
            catalog_file,
            multi_select,
            filters_file,
            trace_level,
        }
    }
}

/// Builds the application state for `config`.
///
/// Filter sections come from `filters_file` when it is set and loads
/// cleanly, otherwise from the built-in car type and specifications
/// sections. The catalog itself is empty until the worker answers the
/// first load request.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(catalog_file = %config.catalog_file, "initializing drivesphere plugin");

    let sections = config.filters_file.as_ref().map_or_else(default_sections, |path| {
        infrastructure::load_filter_sections(Path::new(path)).unwrap_or_else(|e| {
            tracing::warn!(filters_file = %path, error = %e, "failed to load filters file, using defaults");
            default_sections()
        })
    });

    let filter = FilterSelectionEngine::new(
        sections,
        SelectionState::new(),
        SelectionMode::from_multi_select(config.multi_select),
    )
    .on_apply(|selection| {
        tracing::info!(selected = selection.selected_count(), "filters applied");
    });

    let sort = SortSelectionEngine::new().on_sort(|descriptor| {
        tracing::info!(sort = %descriptor, "sort changed");
    });

    AppState::new(filter, sort, config.catalog_file.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_configuration_uses_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn unparsable_multi_select_keeps_default() {
        let config = Config::from_zellij(&map(&[("multi_select", "sometimes")]));
        assert!(config.multi_select);
    }

    #[test]
    fn filters_file_is_expanded() {
        let config = Config::from_zellij(&map(&[("filters_file", "~/filters.toml")]));
        assert_eq!(config.filters_file.as_deref(), Some("/host/filters.toml"));
    }

    #[test]
    fn missing_filters_file_falls_back_to_builtin_sections() {
        let config = Config {
            filters_file: Some("/definitely/not/here.toml".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.filter.sections(), default_sections().as_slice());
    }

    #[test]
    fn filters_file_replaces_builtin_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filters.toml");
        std::fs::write(
            &path,
            r#"
            [[sections]]
            id = "carType"
            title = "CAR TYPE"

            [[sections.options]]
            id = "manual"
            label = "Manual"
            value = "Manual"
            "#,
        )
        .unwrap();

        let config = Config {
            filters_file: Some(path.to_string_lossy().into_owned()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.filter.sections().len(), 1);
        assert_eq!(state.filter.sections()[0].id, "carType");
    }
}
