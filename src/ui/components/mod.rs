//! Composable UI component renderers.
//!
//! Each component prints one part of the interface with absolute cursor
//! positioning. Row-oriented components take the row to start on and
//! return the next free row so layouts can chain them.
//!
//! # Components
//!
//! - [`header`]: Title bar with the vehicle count, filter badge and sort
//! - [`footer`]: Keybinding hints and the status line
//! - [`search`]: Search input box
//! - [`table`]: Vehicle list with NAME, TYPE, ADDED and SPECIFICATIONS columns
//! - [`empty`]: Message shown when the list has nothing to show
//! - [`details`], [`filter_dialog`], [`sort_menu`], [`form`]: Overlays
//! - [`tag`]: Colored chips shared by the list and the overlays
//!
//! # Layout Modes
//!
//! - [`render_normal_mode`]: Header + Table + Footer
//! - [`render_search_mode`]: Header + `SearchBar` + Table + Footer
//!
//! Overlays are drawn afterwards by [`render_overlay`], on top of either.

pub mod details;
pub mod empty;
pub mod filter_dialog;
pub mod footer;
pub mod form;
pub mod header;
pub mod search;
pub mod sort_menu;
pub mod table;
pub mod tag;

use crate::ui::helpers::position_cursor;
use crate::ui::layout;
use crate::ui::palette;
use crate::ui::viewmodel::{OverlayView, SearchBarInfo, UIViewModel};

use details::render_details;
use empty::render_empty_state;
use filter_dialog::render_filter_dialog;
use footer::{render_footer, render_status};
use form::render_form;
use header::render_header;
use search::render_search_bar;
use sort_menu::render_sort_menu;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, cols: usize) -> usize {
    position_cursor(row, 1);
    print!(
        "{}{}{}",
        palette::fg(palette::BORDER),
        "─".repeat(cols),
        palette::reset()
    );
    row + 1
}

/// Renders the normal mode layout (no search bar).
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Table Headers]
/// [Table Rows or empty state]
/// [Border]
/// [Footer]
/// [Status]
/// ```
pub fn render_normal_mode(vm: &UIViewModel, cols: usize, rows: usize) {
    let mut current_row = layout::HEADER_ROW;

    current_row = render_header(current_row, &vm.header, cols);
    current_row = render_border(current_row, cols);
    render_list(current_row, vm, cols);
    render_bottom(vm, cols, rows);
}

/// Renders the search mode layout, with the search box between the
/// header and the list.
pub fn render_search_mode(vm: &UIViewModel, search: &SearchBarInfo, cols: usize, rows: usize) {
    let mut current_row = layout::HEADER_ROW;

    current_row = render_header(current_row, &vm.header, cols);
    current_row = render_border(current_row, cols);
    current_row = render_search_bar(current_row, search, cols);
    render_list(current_row, vm, cols);
    render_bottom(vm, cols, rows);
}

fn render_list(row: usize, vm: &UIViewModel, cols: usize) {
    let row = render_table_headers(row, cols);
    match &vm.empty_state {
        Some(empty) => render_empty_state(row + 1, empty, cols),
        None => {
            render_table_rows(row, &vm.display_items, cols);
        }
    }
}

/// Footer border, key hints and the status line on the last three rows.
fn render_bottom(vm: &UIViewModel, cols: usize, rows: usize) {
    let status_row = rows;
    let footer_row = rows.saturating_sub(1);
    let border_row = rows.saturating_sub(2);

    render_border(border_row, cols);
    render_footer(footer_row, &vm.footer, cols);
    if let Some(status) = &vm.status {
        render_status(status_row, status, cols);
    }
}

/// Draws an overlay on top of the base layout.
pub fn render_overlay(overlay: &OverlayView, rows: usize, cols: usize) {
    match overlay {
        OverlayView::Details(view) => render_details(view, rows, cols),
        OverlayView::Filter(view) => render_filter_dialog(view, rows, cols),
        OverlayView::Sort(view) => render_sort_menu(view, cols),
        OverlayView::Form(view) => render_form(view, rows, cols),
    }
}
