//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin shim (`main.rs`) and the domain, engine and
//! worker layers. Data flows one way:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Worker Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`form`]: Add-vehicle form state and its dropdowns
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Input mode types
//! - [`state`]: Central state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use drivesphere::app::{handle_event, AppState, Event, InputMode};
//! use drivesphere::engine::filter::default_sections;
//! use drivesphere::engine::{FilterSelectionEngine, SelectionMode, SelectionState, SortSelectionEngine};
//!
//! let filter = FilterSelectionEngine::new(default_sections(), SelectionState::new(), SelectionMode::Multiple);
//! let mut state = AppState::new(filter, SortSelectionEngine::new(), "catalog.json");
//!
//! let (render, actions) = handle_event(&mut state, &Event::OpenFilters)?;
//! assert!(render && actions.is_empty());
//! assert_eq!(state.input_mode(), InputMode::Filter);
//! # Ok::<(), drivesphere::DriveSphereError>(())
//! ```

pub mod actions;
pub mod form;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use form::{AddVehicleForm, FormField};
pub use handler::{handle_event, Event};
pub use modes::{InputMode, SearchFocus};
pub use state::{AppState, Overlay};
