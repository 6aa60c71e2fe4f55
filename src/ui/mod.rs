//! Terminal user interface.
//!
//! Transforms view models into ANSI-styled output through composable
//! rendering components:
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`layout`]: Screen geometry shared with mouse hit-testing
//! - [`helpers`]: Shared rendering utilities (highlighting, boxes, padding)
//! - [`palette`]: Colors and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod layout;
pub mod palette;
pub mod renderer;
pub mod viewmodel;

pub use renderer::render;
pub use viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, OverlayView, SearchBarInfo, StatusInfo,
    UIViewModel,
};
