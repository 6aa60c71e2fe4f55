//! Application state and view model computation.
//!
//! [`AppState`] owns the catalog as last reported by the worker, the two
//! selection engines, the search query and the open overlay. The list the
//! user sees (`visible`) is always derived from those through a
//! [`CatalogQuery`], never edited directly.
//!
//! Overlays own their [`DismissGuard`]s, so replacing or clearing
//! `overlay` is all it takes to release their dismissal listeners.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::collections::BTreeSet;

use super::form::{AddVehicleForm, DropdownKind, FALLBACK_SPECIFICATIONS};
use super::modes::{InputMode, SearchFocus};
use crate::domain::vehicle::{truncate_chars, CARD_SUMMARY_CHARS};
use crate::domain::{CatalogQuery, TagVariant, Vehicle};
use crate::engine::filter::SPECIFICATIONS_SECTION;
use crate::engine::{
    DismissGuard, FilterSelectionEngine, ListenerRegistry, Popover, SortSelectionEngine,
};
use crate::infrastructure::paths;
use crate::storage::DEFAULT_CAR_TYPES;
use crate::ui::layout;
use crate::ui::viewmodel::{
    DetailsView, DisplayItem, DropdownOptionView, DropdownView, EmptyState, FilterDialogView,
    FilterRowView, FooterInfo, FormView, HeaderInfo, OverlayView, SearchBarInfo, SortItemView,
    SortMenuView, StatusInfo, UIViewModel,
};

/// Details modal for one vehicle.
#[derive(Debug)]
pub struct DetailsModal {
    pub vehicle_id: i64,
    pub confirm_delete: bool,
    /// Cancelling the confirmation closes the modal instead of showing details.
    pub return_to_list: bool,
    _guard: DismissGuard,
}

#[derive(Debug)]
pub struct FilterDialog {
    /// Index into [`AppState::filter_rows`].
    pub cursor: usize,
    _guard: DismissGuard,
}

#[derive(Debug)]
pub struct SortMenu {
    /// Index into [`SortDescriptor::ALL`](crate::engine::SortDescriptor::ALL).
    pub cursor: usize,
    _guard: DismissGuard,
}

/// The overlay currently drawn over the list. At most one is open.
#[derive(Debug)]
pub enum Overlay {
    Details(DetailsModal),
    Filter(FilterDialog),
    Sort(SortMenu),
    Form(AddVehicleForm),
}

/// A line of the filter dialog: a section header or one of its options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRow {
    Section(usize),
    Option { section: usize, option: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Central application state.
#[derive(Debug)]
pub struct AppState {
    /// Every vehicle in the catalog, in storage order.
    pub vehicles: Vec<Vehicle>,

    /// Vehicles passing the applied filters and search, in sort order.
    pub visible: Vec<Vehicle>,

    /// Index into `visible`.
    pub selected_index: usize,

    pub search_query: String,

    /// `Some` while the search bar is shown.
    pub search_focus: Option<SearchFocus>,

    pub filter: FilterSelectionEngine,
    pub sort: SortSelectionEngine,
    pub listeners: ListenerRegistry,
    pub overlay: Option<Overlay>,

    /// Car types offered by the form, as reported by the worker.
    pub car_types: Vec<String>,

    /// Specification choices offered by the form.
    pub spec_options: Vec<String>,

    pub status: Option<StatusMessage>,
    pub catalog_file: String,

    /// True until the first catalog response arrives.
    pub loading: bool,

    viewport: (usize, usize),
}

impl AppState {
    /// Creates an empty state around the two engines.
    ///
    /// The form's specification choices mirror the values of the
    /// `specifications` filter section so new vehicles stay filterable.
    #[must_use]
    pub fn new(
        filter: FilterSelectionEngine,
        sort: SortSelectionEngine,
        catalog_file: impl Into<String>,
    ) -> Self {
        let spec_options = filter
            .sections()
            .iter()
            .find(|section| section.id == SPECIFICATIONS_SECTION)
            .map(|section| {
                section
                    .options
                    .iter()
                    .map(|option| option.value.clone())
                    .collect::<Vec<_>>()
            })
            .filter(|options| !options.is_empty())
            .unwrap_or_else(|| FALLBACK_SPECIFICATIONS.iter().map(ToString::to_string).collect());

        Self {
            vehicles: vec![],
            visible: vec![],
            selected_index: 0,
            search_query: String::new(),
            search_focus: None,
            filter,
            sort,
            listeners: ListenerRegistry::new(),
            overlay: None,
            car_types: DEFAULT_CAR_TYPES.iter().map(ToString::to_string).collect(),
            spec_options,
            status: None,
            catalog_file: catalog_file.into(),
            loading: true,
            viewport: (24, 80),
        }
    }

    /// Input mode derived from the open overlay and the search focus.
    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        match &self.overlay {
            Some(Overlay::Details(modal)) if modal.confirm_delete => InputMode::ConfirmDelete,
            Some(Overlay::Details(_)) => InputMode::Details,
            Some(Overlay::Filter(_)) => InputMode::Filter,
            Some(Overlay::Sort(_)) => InputMode::Sort,
            Some(Overlay::Form(_)) => InputMode::Form,
            None => self
                .search_focus
                .map_or(InputMode::Normal, InputMode::Search),
        }
    }

    /// Records the pane size used for windowing and click hit-testing.
    pub fn set_viewport(&mut self, rows: usize, cols: usize) {
        self.viewport = (rows, cols);
    }

    #[must_use]
    pub const fn viewport(&self) -> (usize, usize) {
        self.viewport
    }

    pub fn move_selection_down(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.visible.len();
    }

    pub fn move_selection_up(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.visible.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_vehicle(&self) -> Option<&Vehicle> {
        self.visible.get(self.selected_index)
    }

    #[must_use]
    pub fn vehicle(&self, id: i64) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.id == id)
    }

    /// Moves the cursor to the vehicle with `id` if it is visible.
    pub fn select_vehicle(&mut self, id: i64) -> bool {
        match self.visible.iter().position(|vehicle| vehicle.id == id) {
            Some(index) => {
                self.selected_index = index;
                true
            }
            None => false,
        }
    }

    /// Replaces the catalog and recomputes the visible list.
    pub fn set_catalog(&mut self, vehicles: Vec<Vehicle>) {
        self.vehicles = vehicles;
        self.loading = false;
        self.refresh_visible();
    }

    /// Re-runs the applied filters, sort and search over the catalog.
    ///
    /// The cursor stays on the same vehicle when it is still visible and is
    /// clamped otherwise.
    pub fn refresh_visible(&mut self) {
        let selected_id = self.selected_vehicle().map(|vehicle| vehicle.id);

        let query = CatalogQuery::new(
            self.filter.applied(),
            self.filter.sections(),
            self.sort.active(),
            self.search_query.clone(),
        );
        self.visible = query.apply(&self.vehicles);

        let kept = selected_id.is_some_and(|id| self.select_vehicle(id));
        if !kept {
            self.selected_index = self.selected_index.min(self.visible.len().saturating_sub(1));
        }

        tracing::debug!(
            visible = self.visible.len(),
            total = self.vehicles.len(),
            selected = self.selected_index,
            "visible list refreshed"
        );
    }

    pub fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error,
        });
    }

    pub fn open_details(&mut self, vehicle_id: i64, confirm_delete: bool, return_to_list: bool) {
        self.overlay = Some(Overlay::Details(DetailsModal {
            vehicle_id,
            confirm_delete,
            return_to_list,
            _guard: self.listeners.arm(Popover::Details),
        }));
    }

    /// Opens the filter dialog on a fresh draft seeded from the applied map.
    pub fn open_filter_dialog(&mut self) {
        self.filter.open();
        self.overlay = Some(Overlay::Filter(FilterDialog {
            cursor: 0,
            _guard: self.listeners.arm(Popover::FilterDialog),
        }));
    }

    /// Opens the sort menu with the cursor on the active descriptor.
    pub fn open_sort_menu(&mut self) {
        self.overlay = Some(Overlay::Sort(SortMenu {
            cursor: self.sort.active().position(),
            _guard: self.listeners.arm(Popover::SortMenu),
        }));
    }

    pub fn open_form(&mut self) {
        self.overlay = Some(Overlay::Form(AddVehicleForm::new()));
    }

    /// Closes the open overlay. An uncommitted filter draft is discarded.
    pub fn close_overlay(&mut self) {
        if matches!(self.overlay, Some(Overlay::Filter(_))) && self.filter.is_open() {
            self.filter.cancel();
        }
        self.overlay = None;
    }

    /// Filter dialog lines: each section header followed by its options
    /// when the section is expanded.
    #[must_use]
    pub fn filter_rows(&self) -> Vec<FilterRow> {
        let mut rows = Vec::new();
        for (section_index, section) in self.filter.sections().iter().enumerate() {
            rows.push(FilterRow::Section(section_index));
            if self.filter.is_expanded(&section.id) {
                rows.extend(
                    (0..section.options.len()).map(|option| FilterRow::Option {
                        section: section_index,
                        option,
                    }),
                );
            }
        }
        rows
    }

    /// Choices listed by a form dropdown.
    #[must_use]
    pub fn dropdown_options(&self, kind: DropdownKind) -> &[String] {
        match kind {
            DropdownKind::CarType => &self.car_types,
            DropdownKind::Specifications => &self.spec_options,
        }
    }

    /// Range of `visible` shown in a pane `rows` tall.
    ///
    /// Keeps the selection centered and fills the window at the ends.
    fn window(&self, rows: usize) -> (usize, usize) {
        let capacity = layout::list_capacity(rows, self.search_focus.is_some()).max(1);
        let len = self.visible.len();

        let mut start = self.selected_index.saturating_sub(capacity / 2);
        let end = (start + capacity).min(len);
        if end - start < capacity && len >= capacity {
            start = end.saturating_sub(capacity);
        }
        (start, end)
    }

    /// Index into `visible` of the card drawn on screen row `row`.
    #[must_use]
    pub fn item_at_row(&self, row: usize) -> Option<usize> {
        let first = layout::list_first_row(self.search_focus.is_some());
        let (start, end) = self.window(self.viewport.0);
        let index = start + row.checked_sub(first)?;
        (index < end).then_some(index)
    }

    /// Computes the renderable view model for a `rows` x `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let (start, end) = self.window(rows);

        let tokens: Vec<String> = self
            .search_query
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        let matcher = (!tokens.is_empty()).then(SkimMatcherV2::default);

        let display_items = self.visible[start..end]
            .iter()
            .enumerate()
            .map(|(offset, vehicle)| {
                self.compute_display_item(vehicle, start + offset, cols, &tokens, matcher.as_ref())
            })
            .collect();

        UIViewModel {
            display_items,
            selected_index: self.selected_index.saturating_sub(start),
            header: self.compute_header(),
            footer: self.compute_footer(),
            empty_state: self.compute_empty_state(),
            search_bar: self.search_focus.map(|focus| SearchBarInfo {
                query: self.search_query.clone(),
                is_typing: focus == SearchFocus::Typing,
            }),
            status: self.status.as_ref().map(|status| StatusInfo {
                text: status.text.clone(),
                is_error: status.is_error,
            }),
            overlay: self.compute_overlay(),
        }
    }

    fn compute_display_item(
        &self,
        vehicle: &Vehicle,
        absolute_idx: usize,
        cols: usize,
        tokens: &[String],
        matcher: Option<&SkimMatcherV2>,
    ) -> DisplayItem {
        let fixed = layout::NAME_COLUMN_WIDTH + layout::TYPE_COLUMN_WIDTH + layout::ADDED_COLUMN_WIDTH;
        let summary_width = cols.saturating_sub(fixed + 1);

        let summary = vehicle.summary(CARD_SUMMARY_CHARS).replace('\n', " ");
        let summary = if summary.chars().count() > summary_width {
            truncate_chars(&summary, summary_width.saturating_sub(3))
        } else {
            summary
        };

        DisplayItem {
            name: truncate_chars(&vehicle.name, layout::NAME_COLUMN_WIDTH - 5),
            car_type: vehicle.car_type.clone(),
            tag: vehicle.car_tag(),
            added: vehicle.added_label().unwrap_or_default(),
            summary,
            is_selected: absolute_idx == self.selected_index,
            highlight_ranges: matcher
                .map_or_else(Vec::new, |m| highlight_ranges(&vehicle.name, tokens, m)),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let count = self.visible.len();
        let title = if count == self.vehicles.len() {
            format!(" DriveSphere ({count}) ")
        } else {
            format!(" DriveSphere ({count}/{}) ", self.vehicles.len())
        };

        let active = self.filter.active_count();
        HeaderInfo {
            title,
            filter_badge: (active > 0).then(|| format!("Filters ({active})")),
            sort_label: format!("Sort: {}", self.sort.current().1),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode() {
            InputMode::Normal => {
                "j/k: navigate  Enter: details  /: search  f: filters  s: sort  a: add  d: delete  q: quit"
            }
            InputMode::Search(SearchFocus::Typing) => {
                "ESC: exit search  Enter: results  Ctrl+n/p: navigate  Type to filter"
            }
            InputMode::Search(SearchFocus::Navigating) => {
                "ESC: exit search  /: edit query  j/k: navigate  Enter: details"
            }
            InputMode::Details => "d: delete  Esc/q: close",
            InputMode::ConfirmDelete => "y: delete  n/Esc: cancel",
            InputMode::Filter => "j/k: move  Space: toggle  r: reset  a: apply  Esc: cancel",
            InputMode::Sort => "j/k: move  Enter: select  Esc: close",
            InputMode::Form => match &self.overlay {
                Some(Overlay::Form(form)) if form.dropdown.is_some() => {
                    "j/k: move  Space/Enter: pick  Esc: close list"
                }
                _ => "Tab/Shift+Tab: field  Enter: open/submit  Esc: cancel",
            },
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        let (message, subtitle) = if self.loading {
            (
                "Loading catalog...".to_string(),
                paths::display_path(&self.catalog_file),
            )
        } else if self.vehicles.is_empty() {
            (
                "No vehicles in the catalog".to_string(),
                "Press 'a' to add a vehicle".to_string(),
            )
        } else if self.visible.is_empty() {
            (
                "No vehicles match".to_string(),
                "Press 'f' to adjust filters or Esc to clear the search".to_string(),
            )
        } else {
            return None;
        };

        Some(EmptyState { message, subtitle })
    }

    fn compute_overlay(&self) -> Option<OverlayView> {
        match self.overlay.as_ref()? {
            Overlay::Details(modal) => {
                let vehicle = self.vehicle(modal.vehicle_id)?;
                Some(OverlayView::Details(DetailsView {
                    name: vehicle.name.clone(),
                    car_type: vehicle.car_type.clone(),
                    tag: vehicle.car_tag(),
                    description: vehicle.description.clone(),
                    image_url: vehicle.image_url.clone(),
                    specifications: vehicle.specifications.clone(),
                    updated: vehicle.updated_label(),
                    confirm_delete: modal.confirm_delete,
                }))
            }
            Overlay::Filter(dialog) => Some(OverlayView::Filter(self.compute_filter_view(dialog))),
            Overlay::Sort(menu) => Some(OverlayView::Sort(SortMenuView {
                items: self
                    .sort
                    .options()
                    .enumerate()
                    .map(|(index, (descriptor, label))| SortItemView {
                        label,
                        is_active: descriptor == self.sort.active(),
                        is_cursor: index == menu.cursor,
                    })
                    .collect(),
            })),
            Overlay::Form(form) => Some(OverlayView::Form(self.compute_form_view(form))),
        }
    }

    fn compute_filter_view(&self, dialog: &FilterDialog) -> FilterDialogView {
        let sections = self.filter.sections();
        let rows = self
            .filter_rows()
            .into_iter()
            .enumerate()
            .filter_map(|(index, row)| {
                let is_cursor = index == dialog.cursor;
                match row {
                    FilterRow::Section(section_index) => {
                        let section = sections.get(section_index)?;
                        Some(FilterRowView::Section {
                            title: section.title.clone(),
                            expanded: self.filter.is_expanded(&section.id),
                            selected_count: self
                                .filter
                                .draft()
                                .values(&section.id)
                                .map_or(0, BTreeSet::len),
                            is_cursor,
                        })
                    }
                    FilterRow::Option { section, option } => {
                        let section = sections.get(section)?;
                        let option = section.options.get(option)?;
                        Some(FilterRowView::Option {
                            label: option.label.clone(),
                            tag: TagVariant::for_filter(
                                self.filter.is_selected(&section.id, &option.value),
                            ),
                            is_cursor,
                        })
                    }
                }
            })
            .collect();

        FilterDialogView {
            rows,
            draft_count: self.filter.draft().selected_count(),
            mode_hint: if self.filter.mode().is_multi() {
                "Select any"
            } else {
                "Select one"
            },
        }
    }

    fn compute_form_view(&self, form: &AddVehicleForm) -> FormView {
        let dropdown = form.dropdown.as_ref().map(|dropdown| {
            let options = self
                .dropdown_options(dropdown.kind)
                .iter()
                .enumerate()
                .map(|(index, label)| DropdownOptionView {
                    label: label.clone(),
                    checked: match dropdown.kind {
                        DropdownKind::CarType => form.car_type.as_deref() == Some(label.as_str()),
                        DropdownKind::Specifications => form.specifications.contains(label),
                    },
                    is_cursor: index == dropdown.cursor,
                })
                .collect();

            DropdownView {
                field: form.focus,
                options,
                multi: dropdown.kind == DropdownKind::Specifications,
            }
        });

        FormView {
            name: form.name.clone(),
            description: form.description.clone(),
            description_counter: form.description_counter(),
            image_url: form.image_url.clone(),
            car_type: form.car_type.clone(),
            specifications: form.specifications.clone(),
            specifications_summary: form.specifications_summary(),
            focus: form.focus,
            name_error: form.errors.name,
            description_error: form.errors.description,
            car_type_error: form.errors.car_type,
            submitting: form.submitting,
            dropdown,
        }
    }
}

/// Character ranges of `name` matched by any search token.
///
/// Adjacent matched indices are merged into `(start, end)` ranges with an
/// exclusive end.
fn highlight_ranges(name: &str, tokens: &[String], matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    let lowered = name.to_lowercase();
    let indices: BTreeSet<usize> = tokens
        .iter()
        .filter_map(|token| matcher.fuzzy_indices(&lowered, token))
        .flat_map(|(_score, indices)| indices)
        .collect();

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::filter::{default_sections, CAR_TYPE_SECTION};
    use crate::engine::{SelectionMode, SelectionState, SortDescriptor};

    fn vehicle(id: i64, name: &str, car_type: &str, created_at: i64) -> Vehicle {
        Vehicle {
            id,
            name: name.to_string(),
            description: format!("{name} description"),
            image_url: None,
            car_type: car_type.to_string(),
            specifications: vec![],
            created_at,
        }
    }

    fn state() -> AppState {
        let filter = FilterSelectionEngine::new(
            default_sections(),
            SelectionState::new(),
            SelectionMode::Multiple,
        );
        let mut state = AppState::new(filter, SortSelectionEngine::new(), "/tmp/catalog.json");
        state.set_catalog(vec![
            vehicle(1, "Mustang", "Manual", 300),
            vehicle(2, "Civic", "Automatic", 100),
            vehicle(3, "Accord", "Automatic", 200),
        ]);
        state
    }

    fn names(state: &AppState) -> Vec<&str> {
        state.visible.iter().map(|v| v.name.as_str()).collect()
    }

    #[test]
    fn catalog_is_sorted_by_name_initially() {
        let state = state();
        assert_eq!(names(&state), vec!["Accord", "Civic", "Mustang"]);
        assert!(!state.loading);
    }

    #[test]
    fn refresh_keeps_cursor_on_same_vehicle() {
        let mut state = state();
        state.select_vehicle(2);
        state.sort.select(SortDescriptor::NEWEST_FIRST);
        state.refresh_visible();

        assert_eq!(names(&state), vec!["Mustang", "Accord", "Civic"]);
        assert_eq!(state.selected_vehicle().map(|v| v.id), Some(2));
    }

    #[test]
    fn refresh_clamps_when_selection_disappears() {
        let mut state = state();
        state.selected_index = 2;
        state.filter.open();
        state.filter.toggle_option(CAR_TYPE_SECTION, "automatic");
        state.filter.commit();
        state.refresh_visible();

        assert_eq!(names(&state), vec!["Accord", "Civic"]);
        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn selection_wraps() {
        let mut state = state();
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn input_mode_follows_overlay_then_search() {
        let mut state = state();
        assert_eq!(state.input_mode(), InputMode::Normal);

        state.search_focus = Some(SearchFocus::Typing);
        assert_eq!(state.input_mode(), InputMode::Search(SearchFocus::Typing));

        state.open_details(1, true, false);
        assert_eq!(state.input_mode(), InputMode::ConfirmDelete);

        state.open_sort_menu();
        assert_eq!(state.input_mode(), InputMode::Sort);
    }

    #[test]
    fn replacing_overlay_keeps_one_listener() {
        let mut state = state();
        state.open_details(1, false, false);
        state.open_sort_menu();
        assert_eq!(state.listeners.armed_count(), 1);
        assert_eq!(state.listeners.topmost(), Some(Popover::SortMenu));

        state.close_overlay();
        assert_eq!(state.listeners.armed_count(), 0);
    }

    #[test]
    fn closing_filter_dialog_discards_draft() {
        let mut state = state();
        state.open_filter_dialog();
        state.filter.toggle_option(CAR_TYPE_SECTION, "manual");
        state.close_overlay();

        assert!(!state.filter.is_open());
        assert!(state.filter.applied().is_empty());
        assert!(state.filter.draft().is_empty());
    }

    #[test]
    fn collapsed_sections_hide_their_options() {
        let mut state = state();
        let expanded = state.filter_rows().len();
        state.filter.toggle_visibility(CAR_TYPE_SECTION);
        assert_eq!(state.filter_rows().len(), expanded - 2);
        assert_eq!(state.filter_rows()[0], FilterRow::Section(0));
        assert_eq!(state.filter_rows()[1], FilterRow::Section(1));
    }

    #[test]
    fn spec_options_come_from_filter_section() {
        let state = state();
        assert_eq!(state.spec_options.len(), 7);
        assert!(state.spec_options[0].starts_with("Engine"));

        let filter = FilterSelectionEngine::new(vec![], SelectionState::new(), SelectionMode::Single);
        let bare = AppState::new(filter, SortSelectionEngine::new(), "");
        assert_eq!(bare.spec_options, FALLBACK_SPECIFICATIONS.to_vec());
    }

    #[test]
    fn viewmodel_reports_empty_states() {
        let filter = FilterSelectionEngine::new(vec![], SelectionState::new(), SelectionMode::Multiple);
        let mut state = AppState::new(filter, SortSelectionEngine::new(), "/tmp/catalog.json");
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.unwrap().message, "Loading catalog...");

        state.set_catalog(vec![]);
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.unwrap().message, "No vehicles in the catalog");

        state.set_catalog(vec![vehicle(1, "Mustang", "Manual", 0)]);
        state.search_query = "zzz".to_string();
        state.refresh_visible();
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.unwrap().message, "No vehicles match");
    }

    #[test]
    fn viewmodel_header_shows_filters_and_sort() {
        let mut state = state();
        state.filter.open();
        state.filter.toggle_option(CAR_TYPE_SECTION, "manual");
        state.filter.commit();
        state.refresh_visible();

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.header.title, " DriveSphere (1/3) ");
        assert_eq!(vm.header.filter_badge.as_deref(), Some("Filters (1)"));
        assert_eq!(vm.header.sort_label, "Sort: Name (A-Z)");
    }

    #[test]
    fn window_follows_selection() {
        let mut state = state();
        state.set_catalog(
            (1..=40)
                .map(|id| vehicle(id, &format!("Car {id:02}"), "Manual", id))
                .collect(),
        );
        state.selected_index = 39;

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.display_items.len(), 17);
        assert_eq!(vm.display_items.last().map(|item| item.name.as_str()), Some("Car 40"));
        assert_eq!(vm.selected_index, 16);
    }

    #[test]
    fn item_at_row_maps_clicks_to_cards() {
        let state = state();
        assert_eq!(state.item_at_row(5), Some(0));
        assert_eq!(state.item_at_row(7), Some(2));
        assert_eq!(state.item_at_row(8), None);
        assert_eq!(state.item_at_row(3), None);
    }

    #[test]
    fn highlight_ranges_merge_adjacent_matches() {
        let matcher = SkimMatcherV2::default();
        let ranges = highlight_ranges("Mustang", &["mus".to_string()], &matcher);
        assert_eq!(ranges, vec![(0, 3)]);
    }
}
