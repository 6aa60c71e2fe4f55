//! View model types representing renderable UI state.
//!
//! View models are computed by [`AppState::compute_viewmodel`] and consumed by
//! the renderer. They hold display-ready strings and flags only; no engine
//! or storage types leak through, so components never reach back into state.
//!
//! [`AppState::compute_viewmodel`]: crate::app::AppState::compute_viewmodel

use crate::app::form::FormField;
use crate::domain::TagVariant;

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Cards inside the visible window.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected card within `display_items`.
    pub selected_index: usize,

    pub header: HeaderInfo,
    pub footer: FooterInfo,

    /// Message shown instead of the list when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    /// Present while search mode is active.
    pub search_bar: Option<SearchBarInfo>,

    /// Last worker outcome, shown on the bottom row.
    pub status: Option<StatusInfo>,

    /// The open overlay, drawn on top of the list.
    pub overlay: Option<OverlayView>,
}

/// One card row in the list.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    pub name: String,
    pub car_type: String,
    pub tag: TagVariant,

    /// `"Added: Mar 5, 2024"`, or empty when the date is unknown.
    pub added: String,

    /// Description cut for the card.
    pub summary: String,

    pub is_selected: bool,

    /// Fuzzy match ranges in `name`, as `(start, end)` character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,

    /// `"Filters (2)"` while any filter is applied.
    pub filter_badge: Option<String>,

    /// `"Sort: Name (A-Z)"`.
    pub sort_label: String,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,

    /// Whether keys currently edit the query.
    pub is_typing: bool,
}

#[derive(Debug, Clone)]
pub struct StatusInfo {
    pub text: String,
    pub is_error: bool,
}

/// Overlay contents, one variant per popover.
#[derive(Debug, Clone)]
pub enum OverlayView {
    Details(DetailsView),
    Filter(FilterDialogView),
    Sort(SortMenuView),
    Form(FormView),
}

#[derive(Debug, Clone)]
pub struct DetailsView {
    pub name: String,
    pub car_type: String,
    pub tag: TagVariant,
    pub description: String,
    pub image_url: Option<String>,
    pub specifications: Vec<String>,

    /// `"Mar 05, 2024 | 03:04 PM"` or `"Unknown"`.
    pub updated: String,

    /// Whether the modal is asking to confirm deletion.
    pub confirm_delete: bool,
}

#[derive(Debug, Clone)]
pub struct FilterDialogView {
    pub rows: Vec<FilterRowView>,

    /// Values selected in the draft.
    pub draft_count: usize,

    /// `"Select any"` or `"Select one"`.
    pub mode_hint: &'static str,
}

#[derive(Debug, Clone)]
pub enum FilterRowView {
    Section {
        title: String,
        expanded: bool,
        selected_count: usize,
        is_cursor: bool,
    },
    Option {
        label: String,
        tag: TagVariant,
        is_cursor: bool,
    },
}

#[derive(Debug, Clone)]
pub struct SortMenuView {
    pub items: Vec<SortItemView>,
}

#[derive(Debug, Clone)]
pub struct SortItemView {
    pub label: &'static str,
    pub is_active: bool,
    pub is_cursor: bool,
}

#[derive(Debug, Clone)]
pub struct FormView {
    pub name: String,
    pub description: String,
    /// `"12/280 char"`.
    pub description_counter: String,
    pub image_url: String,
    pub car_type: Option<String>,
    pub specifications: Vec<String>,
    /// `"Select"` or `"3 selected"`.
    pub specifications_summary: String,
    pub focus: FormField,
    pub name_error: Option<&'static str>,
    pub description_error: Option<&'static str>,
    pub car_type_error: Option<&'static str>,
    pub submitting: bool,
    pub dropdown: Option<DropdownView>,
}

#[derive(Debug, Clone)]
pub struct DropdownView {
    /// The field the list hangs off.
    pub field: FormField,
    pub options: Vec<DropdownOptionView>,
    /// Checkboxes when true, radio buttons otherwise.
    pub multi: bool,
}

#[derive(Debug, Clone)]
pub struct DropdownOptionView {
    pub label: String,
    pub checked: bool,
    pub is_cursor: bool,
}
