//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to the component renderers, base
//!    layout first and the open overlay on top

use crate::app::AppState;
use crate::ui::components;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
///
/// Prints ANSI-styled output with absolute cursor positioning. Does not
/// clear the screen; the host repaints the pane before each render.
///
/// ```no_run
/// use drivesphere::app::AppState;
/// use drivesphere::engine::filter::default_sections;
/// use drivesphere::engine::{FilterSelectionEngine, SelectionMode, SelectionState, SortSelectionEngine};
///
/// let filter = FilterSelectionEngine::new(default_sections(), SelectionState::new(), SelectionMode::Multiple);
/// let state = AppState::new(filter, SortSelectionEngine::new(), "catalog.json");
/// drivesphere::ui::render(&state, 24, 80);
/// ```
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, rows: usize, cols: usize) {
    if let Some(search) = &vm.search_bar {
        components::render_search_mode(vm, search, cols, rows);
    } else {
        components::render_normal_mode(vm, cols, rows);
    }

    if let Some(overlay) = &vm.overlay {
        components::render_overlay(overlay, rows, cols);
    }
}
