//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point for user input and worker
//! responses. It mutates [`AppState`] and returns whether the frame needs
//! redrawing together with the side effects to run, in order.
//!
//! Events are mode-agnostic (`KeyDown`, `Select`, `Escape`, ...); what they
//! do depends on the [`InputMode`] derived from the state at the time.

use crate::app::form::FormField;
use crate::app::modes::{InputMode, SearchFocus};
use crate::app::state::{FilterRow, Overlay};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::engine::{DismissTrigger, Popover, SortDescriptor};
use crate::ui::layout;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the cursor of the list, the open menu, or the form focus down.
    KeyDown,
    /// Moves the cursor of the list, the open menu, or the form focus up.
    KeyUp,
    /// Activates whatever is under the cursor.
    Select,
    /// Toggles the filter row or dropdown option under the cursor.
    Toggle,
    /// Closes the topmost popover, or clears the search when none is open.
    Escape,
    /// Hides the plugin pane.
    CloseFocus,

    /// Enters search mode with typing focus.
    SearchMode,
    /// Focuses the search input field (from navigating mode).
    FocusSearchBar,
    /// Focuses the search results list (from typing mode).
    FocusResults,
    /// Exits search mode and clears the query.
    ExitSearch,
    /// Types into the search query or the focused form field.
    Char(char),
    /// Deletes the last character of the search query or the focused field.
    Backspace,

    NextField,
    PrevField,

    OpenFilters,
    /// Clears every section of the filter draft.
    ResetFilters,
    /// Commits the filter draft and re-queries the list.
    ApplyFilters,
    OpenSort,
    OpenForm,

    /// Asks to delete the selected or displayed vehicle.
    RequestDelete,
    ConfirmDelete,
    CancelDelete,

    /// Left click at a 1-indexed screen position.
    Click { row: usize, col: usize },

    /// Wraps a response from the background worker.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. Actions run in order after the state change.
///
/// # Errors
///
/// Reserved for failures while building worker requests; the current event
/// set never fails.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event, mode = ?state.input_mode()).entered();

    match event {
        Event::KeyDown => Ok((move_cursor(state, true), vec![])),
        Event::KeyUp => Ok((move_cursor(state, false), vec![])),
        Event::Select => Ok(select(state)),
        Event::Toggle => Ok((toggle(state), vec![])),
        Event::Escape => Ok((escape(state), vec![])),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),

        Event::SearchMode => {
            if state.input_mode() != InputMode::Normal {
                return Ok((false, vec![]));
            }
            tracing::debug!("entering search mode");
            state.search_focus = Some(SearchFocus::Typing);
            state.search_query.clear();
            state.refresh_visible();
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            if state.input_mode() != InputMode::Search(SearchFocus::Navigating) {
                return Ok((false, vec![]));
            }
            state.search_focus = Some(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.input_mode() != InputMode::Search(SearchFocus::Typing) {
                return Ok((false, vec![]));
            }
            if state.search_query.is_empty() {
                exit_search(state);
            } else {
                state.search_focus = Some(SearchFocus::Navigating);
            }
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            if !matches!(state.input_mode(), InputMode::Search(_)) {
                return Ok((false, vec![]));
            }
            exit_search(state);
            Ok((true, vec![]))
        }
        Event::Char(c) => Ok((type_char(state, *c), vec![])),
        Event::Backspace => Ok((backspace(state), vec![])),

        Event::NextField | Event::PrevField => {
            let Some(Overlay::Form(form)) = state.overlay.as_mut() else {
                return Ok((false, vec![]));
            };
            if *event == Event::NextField {
                form.focus_next();
            } else {
                form.focus_prev();
            }
            Ok((true, vec![]))
        }

        Event::OpenFilters => {
            if !browsing(state) {
                return Ok((false, vec![]));
            }
            state.open_filter_dialog();
            Ok((true, vec![]))
        }
        Event::ResetFilters => {
            if state.input_mode() != InputMode::Filter {
                return Ok((false, vec![]));
            }
            state.filter.reset();
            Ok((true, vec![]))
        }
        Event::ApplyFilters => {
            if state.input_mode() != InputMode::Filter {
                return Ok((false, vec![]));
            }
            let applied = state.filter.commit();
            tracing::debug!(selected = applied.selected_count(), "filters committed");
            state.close_overlay();
            state.refresh_visible();
            Ok((true, vec![]))
        }
        Event::OpenSort => {
            if !browsing(state) {
                return Ok((false, vec![]));
            }
            state.open_sort_menu();
            Ok((true, vec![]))
        }
        Event::OpenForm => {
            if !browsing(state) {
                return Ok((false, vec![]));
            }
            state.open_form();
            Ok((true, vec![]))
        }

        Event::RequestDelete => Ok((request_delete(state), vec![])),
        Event::ConfirmDelete => Ok(confirm_delete(state)),
        Event::CancelDelete => Ok((cancel_delete(state), vec![])),

        Event::Click { row, col } => Ok(click(state, *row, *col)),

        Event::WorkerResponse(response) => Ok(handle_worker_response(state, response)),
    }
}

/// Whether the card list (not an overlay or the search input) has focus.
fn browsing(state: &AppState) -> bool {
    matches!(
        state.input_mode(),
        InputMode::Normal | InputMode::Search(SearchFocus::Navigating)
    )
}

const fn wrap(cursor: usize, len: usize, down: bool) -> usize {
    if len == 0 {
        0
    } else if down {
        (cursor + 1) % len
    } else {
        (cursor + len - 1) % len
    }
}

fn move_cursor(state: &mut AppState, down: bool) -> bool {
    let len = match &state.overlay {
        Some(Overlay::Filter(_)) => state.filter_rows().len(),
        Some(Overlay::Sort(_)) => SortDescriptor::ALL.len(),
        Some(Overlay::Form(form)) => form
            .dropdown
            .as_ref()
            .map_or(0, |dropdown| state.dropdown_options(dropdown.kind).len()),
        Some(Overlay::Details(_)) => return false,
        None => {
            if down {
                state.move_selection_down();
            } else {
                state.move_selection_up();
            }
            return true;
        }
    };

    match state.overlay.as_mut() {
        Some(Overlay::Filter(dialog)) => dialog.cursor = wrap(dialog.cursor, len, down),
        Some(Overlay::Sort(menu)) => menu.cursor = wrap(menu.cursor, len, down),
        Some(Overlay::Form(form)) => {
            if form.dropdown.is_some() {
                form.move_dropdown_cursor(down, len);
            } else if down {
                form.focus_next();
            } else {
                form.focus_prev();
            }
        }
        Some(Overlay::Details(_)) | None => return false,
    }
    true
}

fn select(state: &mut AppState) -> (bool, Vec<Action>) {
    match state.input_mode() {
        InputMode::Normal | InputMode::Search(_) => {
            let Some(vehicle) = state.selected_vehicle() else {
                tracing::debug!("no vehicle selected");
                if state.search_focus.is_some() {
                    exit_search(state);
                    return (true, vec![]);
                }
                return (false, vec![]);
            };
            let id = vehicle.id;
            tracing::debug!(vehicle_id = id, name = %vehicle.name, "opening details");
            state.open_details(id, false, false);
            (true, vec![])
        }
        InputMode::Filter => (toggle_filter_row(state), vec![]),
        InputMode::Sort => {
            let Some(Overlay::Sort(menu)) = &state.overlay else {
                return (false, vec![]);
            };
            let cursor = menu.cursor;
            (select_sort(state, cursor), vec![])
        }
        InputMode::Form => form_select(state),
        InputMode::Details | InputMode::ConfirmDelete => (false, vec![]),
    }
}

fn toggle(state: &mut AppState) -> bool {
    match state.input_mode() {
        InputMode::Filter => toggle_filter_row(state),
        InputMode::Form => pick_dropdown_option(state),
        _ => false,
    }
}

/// Toggles visibility of a section header or selection of an option.
fn toggle_filter_row(state: &mut AppState) -> bool {
    let Some(Overlay::Filter(dialog)) = &state.overlay else {
        return false;
    };
    let rows = state.filter_rows();
    let Some(row) = rows.get(dialog.cursor).copied() else {
        return false;
    };

    match row {
        FilterRow::Section(index) => {
            let Some(section) = state.filter.sections().get(index) else {
                return false;
            };
            let section_id = section.id.clone();
            state.filter.toggle_visibility(&section_id);
        }
        FilterRow::Option { section, option } => {
            let Some((section_id, value)) = state.filter.sections().get(section).and_then(|s| {
                s.options
                    .get(option)
                    .map(|option| (s.id.clone(), option.value.clone()))
            }) else {
                return false;
            };
            state.filter.toggle_option(&section_id, &value);
        }
    }

    let len = state.filter_rows().len();
    if let Some(Overlay::Filter(dialog)) = state.overlay.as_mut() {
        dialog.cursor = dialog.cursor.min(len.saturating_sub(1));
    }
    true
}

/// Makes the descriptor at `index` active, re-queries, and closes the menu.
fn select_sort(state: &mut AppState, index: usize) -> bool {
    let Some(descriptor) = SortDescriptor::ALL.get(index).copied() else {
        return false;
    };
    state.sort.select(descriptor);
    state.close_overlay();
    state.refresh_visible();
    true
}

/// The option under the open dropdown's cursor.
fn highlighted_option(state: &AppState) -> Option<String> {
    let Some(Overlay::Form(form)) = &state.overlay else {
        return None;
    };
    let dropdown = form.dropdown.as_ref()?;
    state
        .dropdown_options(dropdown.kind)
        .get(dropdown.cursor)
        .cloned()
}

fn pick_dropdown_option(state: &mut AppState) -> bool {
    let Some(option) = highlighted_option(state) else {
        return false;
    };
    let Some(Overlay::Form(form)) = state.overlay.as_mut() else {
        return false;
    };
    form.pick(&option);
    true
}

fn form_select(state: &mut AppState) -> (bool, Vec<Action>) {
    let listeners = state.listeners.clone();
    let Some(Overlay::Form(form)) = state.overlay.as_ref() else {
        return (false, vec![]);
    };
    if form.dropdown.is_some() {
        return (pick_dropdown_option(state), vec![]);
    }

    let Some(Overlay::Form(form)) = state.overlay.as_mut() else {
        return (false, vec![]);
    };
    match form.focus {
        FormField::CarType | FormField::Specifications => (form.open_dropdown(&listeners), vec![]),
        FormField::Submit => match form.submit() {
            Some(payload) => {
                tracing::debug!(name = %payload.name, "submitting new vehicle");
                (
                    true,
                    vec![Action::PostToWorker(WorkerMessage::create_vehicle(payload))],
                )
            }
            None => (true, vec![]),
        },
        FormField::Name | FormField::Description | FormField::ImageUrl => {
            form.focus_next();
            (true, vec![])
        }
    }
}

/// Closes the most recently opened popover.
fn dismiss_topmost(state: &mut AppState, trigger: DismissTrigger) -> bool {
    let Some(popover) = state.listeners.topmost() else {
        return false;
    };
    tracing::debug!(?popover, ?trigger, "dismissing popover");

    match popover {
        Popover::CarTypeDropdown | Popover::SpecificationsDropdown => {
            if let Some(Overlay::Form(form)) = state.overlay.as_mut() {
                form.close_dropdown();
            }
        }
        Popover::SortMenu | Popover::FilterDialog | Popover::Details => state.close_overlay(),
    }
    true
}

fn escape(state: &mut AppState) -> bool {
    match state.input_mode() {
        InputMode::ConfirmDelete => cancel_delete(state),
        InputMode::Details | InputMode::Filter | InputMode::Sort => {
            dismiss_topmost(state, DismissTrigger::Escape)
        }
        InputMode::Form => {
            if !dismiss_topmost(state, DismissTrigger::Escape) {
                tracing::debug!("closing add form");
                state.close_overlay();
            }
            true
        }
        InputMode::Search(_) => {
            exit_search(state);
            true
        }
        InputMode::Normal => {
            let changed = !state.search_query.is_empty() || state.status.is_some();
            state.search_query.clear();
            state.status = None;
            state.refresh_visible();
            changed
        }
    }
}

fn exit_search(state: &mut AppState) {
    tracing::debug!(query = %state.search_query, "exiting search mode");
    state.search_focus = None;
    state.search_query.clear();
    state.refresh_visible();
}

fn type_char(state: &mut AppState, c: char) -> bool {
    match state.input_mode() {
        InputMode::Search(SearchFocus::Typing) => {
            state.search_query.push(c);
            tracing::trace!(query = %state.search_query, char = %c, "search query updated");
            state.refresh_visible();
            true
        }
        InputMode::Form => match state.overlay.as_mut() {
            Some(Overlay::Form(form)) => form.type_char(c),
            _ => false,
        },
        _ => false,
    }
}

fn backspace(state: &mut AppState) -> bool {
    match state.input_mode() {
        InputMode::Search(SearchFocus::Typing) => {
            state.search_query.pop();
            state.refresh_visible();
            true
        }
        InputMode::Form => match state.overlay.as_mut() {
            Some(Overlay::Form(form)) => form.backspace(),
            _ => false,
        },
        _ => false,
    }
}

fn request_delete(state: &mut AppState) -> bool {
    if browsing(state) {
        let Some(id) = state.selected_vehicle().map(|vehicle| vehicle.id) else {
            return false;
        };
        state.open_details(id, true, true);
        return true;
    }

    match state.overlay.as_mut() {
        Some(Overlay::Details(modal)) if !modal.confirm_delete => {
            modal.confirm_delete = true;
            true
        }
        _ => false,
    }
}

fn confirm_delete(state: &mut AppState) -> (bool, Vec<Action>) {
    let Some(Overlay::Details(modal)) = &state.overlay else {
        return (false, vec![]);
    };
    if !modal.confirm_delete {
        return (false, vec![]);
    }

    let id = modal.vehicle_id;
    tracing::debug!(vehicle_id = id, "deleting vehicle");
    state.close_overlay();
    (true, vec![Action::PostToWorker(WorkerMessage::delete_vehicle(id))])
}

fn cancel_delete(state: &mut AppState) -> bool {
    let Some(Overlay::Details(modal)) = state.overlay.as_mut() else {
        return false;
    };
    if !modal.confirm_delete {
        return false;
    }

    if modal.return_to_list {
        state.close_overlay();
    } else {
        modal.confirm_delete = false;
    }
    true
}

fn click(state: &mut AppState, row: usize, col: usize) -> (bool, Vec<Action>) {
    let (rows, cols) = state.viewport();

    match &state.overlay {
        Some(Overlay::Sort(_)) => {
            let rect = layout::sort_menu_rect(cols);
            if !rect.contains(row, col) {
                return (dismiss_topmost(state, DismissTrigger::OutsideClick), vec![]);
            }
            match row.checked_sub(rect.row + 1) {
                Some(item) if item < SortDescriptor::ALL.len() => (select_sort(state, item), vec![]),
                _ => (false, vec![]),
            }
        }
        Some(Overlay::Filter(dialog)) => {
            let lines = state.filter_rows().len();
            let rect = layout::filter_dialog_rect(rows, cols, lines);
            if !rect.contains(row, col) {
                return (dismiss_topmost(state, DismissTrigger::OutsideClick), vec![]);
            }

            let capacity = layout::filter_dialog_capacity(rect);
            let offset = layout::scroll_offset(dialog.cursor, capacity);
            let Some(line) = row.checked_sub(layout::filter_dialog_first_row(rect)) else {
                return (false, vec![]);
            };
            if line >= capacity || offset + line >= lines {
                return (false, vec![]);
            }
            if let Some(Overlay::Filter(dialog)) = state.overlay.as_mut() {
                dialog.cursor = offset + line;
            }
            (toggle_filter_row(state), vec![])
        }
        Some(Overlay::Details(_)) => {
            if layout::details_rect(rows, cols).contains(row, col) {
                (false, vec![])
            } else {
                (dismiss_topmost(state, DismissTrigger::OutsideClick), vec![])
            }
        }
        Some(Overlay::Form(form)) => {
            let form_rect = layout::form_rect(rows, cols);
            if let Some(dropdown) = &form.dropdown {
                let count = state.dropdown_options(dropdown.kind).len();
                let rect = layout::dropdown_rect(form_rect, form.focus, count);
                if !rect.contains(row, col) {
                    return (dismiss_topmost(state, DismissTrigger::OutsideClick), vec![]);
                }
                let Some(item) = row.checked_sub(rect.row + 1).filter(|item| *item < count) else {
                    return (false, vec![]);
                };
                if let Some(Overlay::Form(form)) = state.overlay.as_mut() {
                    if let Some(dropdown) = form.dropdown.as_mut() {
                        dropdown.cursor = item;
                    }
                }
                return (pick_dropdown_option(state), vec![]);
            }

            let clicked = FormField::ORDER
                .into_iter()
                .find(|field| layout::form_field_row(form_rect, *field) == row);
            match (clicked, state.overlay.as_mut()) {
                (Some(field), Some(Overlay::Form(form))) if form_rect.contains(row, col) => {
                    form.focus = field;
                    (true, vec![])
                }
                _ => (false, vec![]),
            }
        }
        None => {
            let Some(index) = state.item_at_row(row) else {
                return (false, vec![]);
            };
            state.selected_index = index;
            select(state)
        }
    }
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::CatalogLoaded { vehicles, car_types } => {
            if !state.loading && &state.vehicles == vehicles && &state.car_types == car_types {
                tracing::debug!("catalog unchanged, skipping render");
                return (false, vec![]);
            }
            if !car_types.is_empty() {
                state.car_types.clone_from(car_types);
            }
            state.set_catalog(vehicles.clone());
            tracing::info!(count = vehicles.len(), "catalog loaded");
            (true, vec![])
        }
        WorkerResponse::VehicleCreated { vehicle, vehicles } => {
            if matches!(&state.overlay, Some(Overlay::Form(form)) if form.submitting) {
                state.close_overlay();
            }
            if !state.car_types.contains(&vehicle.car_type) {
                state.car_types.push(vehicle.car_type.clone());
            }
            state.set_catalog(vehicles.clone());
            state.select_vehicle(vehicle.id);
            state.set_status(format!("Added {}", vehicle.name), false);
            tracing::info!(vehicle_id = vehicle.id, "vehicle created");
            (true, vec![])
        }
        WorkerResponse::VehicleDeleted { id, vehicles } => {
            if matches!(&state.overlay, Some(Overlay::Details(modal)) if modal.vehicle_id == *id) {
                state.close_overlay();
            }
            let name = state
                .vehicle(*id)
                .map_or_else(|| format!("vehicle {id}"), |vehicle| vehicle.name.clone());
            state.set_catalog(vehicles.clone());
            state.set_status(format!("Deleted {name}"), false);
            tracing::info!(vehicle_id = id, "vehicle deleted");
            (true, vec![])
        }
        WorkerResponse::Error { message } => {
            tracing::error!("Worker error: {}", message);
            state.loading = false;
            if let Some(Overlay::Form(form)) = state.overlay.as_mut() {
                form.submitting = false;
            }
            state.set_status(message.clone(), true);
            (true, vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Vehicle;
    use crate::engine::filter::{default_sections, CAR_TYPE_SECTION};
    use crate::engine::{
        FilterSelectionEngine, SelectionMode, SelectionState, SortSelectionEngine,
    };

    fn vehicle(id: i64, name: &str, car_type: &str) -> Vehicle {
        Vehicle {
            id,
            name: name.to_string(),
            description: String::new(),
            image_url: None,
            car_type: car_type.to_string(),
            specifications: vec![],
            created_at: id * 100,
        }
    }

    fn loaded_state() -> AppState {
        let filter = FilterSelectionEngine::new(
            default_sections(),
            SelectionState::new(),
            SelectionMode::Multiple,
        );
        let mut state = AppState::new(filter, SortSelectionEngine::new(), "/tmp/catalog.json");
        let response = WorkerResponse::CatalogLoaded {
            vehicles: vec![
                vehicle(1, "Mustang", "Manual"),
                vehicle(2, "Civic", "Automatic"),
                vehicle(3, "Accord", "Automatic"),
            ],
            car_types: vec!["Manual".to_string(), "Automatic".to_string()],
        };
        handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
        state
    }

    fn send(state: &mut AppState, events: &[Event]) -> Vec<Action> {
        events
            .iter()
            .flat_map(|event| handle_event(state, event).unwrap().1)
            .collect()
    }

    fn names(state: &AppState) -> Vec<&str> {
        state.visible.iter().map(|v| v.name.as_str()).collect()
    }

    #[test]
    fn unchanged_catalog_skips_render() {
        let mut state = loaded_state();
        let response = WorkerResponse::CatalogLoaded {
            vehicles: state.vehicles.clone(),
            car_types: state.car_types.clone(),
        };
        let (render, _) = handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
        assert!(!render);
    }

    #[test]
    fn enter_opens_details_and_escape_closes() {
        let mut state = loaded_state();
        send(&mut state, &[Event::KeyDown, Event::Select]);
        assert_eq!(state.input_mode(), InputMode::Details);
        assert!(state.listeners.is_armed(Popover::Details));

        send(&mut state, &[Event::Escape]);
        assert_eq!(state.input_mode(), InputMode::Normal);
        assert_eq!(state.listeners.armed_count(), 0);
    }

    #[test]
    fn filter_dialog_apply_requeries() {
        let mut state = loaded_state();
        // rows: [carType header, manual, automatic, specifications header, ...]
        send(
            &mut state,
            &[Event::OpenFilters, Event::KeyDown, Event::Toggle, Event::ApplyFilters],
        );

        assert_eq!(state.input_mode(), InputMode::Normal);
        assert_eq!(names(&state), vec!["Mustang"]);
        assert!(state.filter.applied().contains(CAR_TYPE_SECTION, "manual"));
        assert_eq!(state.listeners.armed_count(), 0);
    }

    #[test]
    fn filter_dialog_escape_discards_draft() {
        let mut state = loaded_state();
        send(
            &mut state,
            &[Event::OpenFilters, Event::KeyDown, Event::Toggle, Event::Escape],
        );

        assert_eq!(state.input_mode(), InputMode::Normal);
        assert!(state.filter.applied().is_empty());
        assert_eq!(state.visible.len(), 3);

        send(&mut state, &[Event::OpenFilters]);
        assert!(state.filter.draft().is_empty());
    }

    #[test]
    fn filter_header_toggles_visibility() {
        let mut state = loaded_state();
        send(&mut state, &[Event::OpenFilters, Event::Select]);
        assert!(!state.filter.is_expanded(CAR_TYPE_SECTION));

        send(&mut state, &[Event::ResetFilters]);
        assert!(!state.filter.is_expanded(CAR_TYPE_SECTION));
    }

    #[test]
    fn sort_menu_selects_and_closes() {
        let mut state = loaded_state();
        send(
            &mut state,
            &[Event::OpenSort, Event::KeyDown, Event::KeyDown, Event::Select],
        );

        assert_eq!(state.sort.active(), SortDescriptor::NEWEST_FIRST);
        assert_eq!(names(&state), vec!["Accord", "Civic", "Mustang"]);
        assert_eq!(state.input_mode(), InputMode::Normal);
    }

    #[test]
    fn sort_menu_click_outside_leaves_sort_unchanged() {
        let mut state = loaded_state();
        send(&mut state, &[Event::OpenSort, Event::Click { row: 20, col: 1 }]);

        assert_eq!(state.input_mode(), InputMode::Normal);
        assert_eq!(state.sort.active(), SortDescriptor::NAME_ASC);
        assert_eq!(state.listeners.armed_count(), 0);
    }

    #[test]
    fn sort_menu_click_on_item_selects_it() {
        let mut state = loaded_state();
        let rect = layout::sort_menu_rect(80);
        send(
            &mut state,
            &[
                Event::OpenSort,
                Event::Click {
                    row: rect.row + 2,
                    col: rect.col + 1,
                },
            ],
        );
        assert_eq!(state.sort.active(), SortDescriptor::NAME_DESC);
    }

    #[test]
    fn search_filters_and_escape_restores() {
        let mut state = loaded_state();
        send(
            &mut state,
            &[Event::SearchMode, Event::Char('c'), Event::Char('i')],
        );
        assert_eq!(names(&state), vec!["Civic"]);

        send(&mut state, &[Event::FocusResults]);
        assert_eq!(state.input_mode(), InputMode::Search(SearchFocus::Navigating));

        send(&mut state, &[Event::Escape]);
        assert_eq!(state.input_mode(), InputMode::Normal);
        assert_eq!(state.visible.len(), 3);
    }

    #[test]
    fn delete_from_list_confirms_then_posts() {
        let mut state = loaded_state();
        send(&mut state, &[Event::RequestDelete]);
        assert_eq!(state.input_mode(), InputMode::ConfirmDelete);

        let actions = send(&mut state, &[Event::ConfirmDelete]);
        assert_eq!(
            actions,
            vec![Action::PostToWorker(WorkerMessage::delete_vehicle(3))]
        );
        assert_eq!(state.input_mode(), InputMode::Normal);
    }

    #[test]
    fn cancel_delete_returns_to_details_when_opened_there() {
        let mut state = loaded_state();
        send(&mut state, &[Event::Select, Event::RequestDelete, Event::CancelDelete]);
        assert_eq!(state.input_mode(), InputMode::Details);

        send(&mut state, &[Event::Escape, Event::RequestDelete, Event::Escape]);
        assert_eq!(state.input_mode(), InputMode::Normal);
    }

    #[test]
    fn form_submit_posts_create_request() {
        let mut state = loaded_state();
        send(&mut state, &[Event::OpenForm]);
        for c in "Supra".chars() {
            send(&mut state, &[Event::Char(c)]);
        }
        send(
            &mut state,
            &[
                Event::NextField,
                Event::NextField,
                Event::NextField,
                Event::Select,
                Event::Select,
            ],
        );
        let Some(Overlay::Form(form)) = &state.overlay else {
            panic!("form should be open");
        };
        assert_eq!(form.car_type.as_deref(), Some("Manual"));
        assert!(form.dropdown.is_none());

        let actions = send(&mut state, &[Event::NextField, Event::NextField, Event::Select]);
        let [Action::PostToWorker(WorkerMessage::CreateVehicle { vehicle, .. })] = actions.as_slice()
        else {
            panic!("expected a create request, got {actions:?}");
        };
        assert_eq!(vehicle.name, "Supra");
        assert_eq!(vehicle.car_type, "Manual");
    }

    #[test]
    fn form_validation_blocks_submit() {
        let mut state = loaded_state();
        send(&mut state, &[Event::OpenForm, Event::PrevField]);
        let actions = send(&mut state, &[Event::Select]);
        assert!(actions.is_empty());

        let Some(Overlay::Form(form)) = &state.overlay else {
            panic!("form should be open");
        };
        assert_eq!(form.errors.name, Some("Car name is required"));
        assert_eq!(form.errors.car_type, Some("Car type is required"));
    }

    #[test]
    fn form_escape_closes_dropdown_before_form() {
        let mut state = loaded_state();
        send(
            &mut state,
            &[Event::OpenForm, Event::NextField, Event::NextField, Event::NextField, Event::NextField, Event::Select],
        );
        assert!(state.listeners.is_armed(Popover::SpecificationsDropdown));

        send(&mut state, &[Event::Escape]);
        assert_eq!(state.input_mode(), InputMode::Form);
        assert_eq!(state.listeners.armed_count(), 0);

        send(&mut state, &[Event::Escape]);
        assert_eq!(state.input_mode(), InputMode::Normal);
    }

    #[test]
    fn created_vehicle_closes_form_and_is_selected() {
        let mut state = loaded_state();
        send(&mut state, &[Event::OpenForm]);
        if let Some(Overlay::Form(form)) = state.overlay.as_mut() {
            form.submitting = true;
        }

        let created = vehicle(4, "Beetle", "Automatic");
        let mut vehicles = state.vehicles.clone();
        vehicles.push(created.clone());
        send(
            &mut state,
            &[Event::WorkerResponse(WorkerResponse::VehicleCreated {
                vehicle: created,
                vehicles,
            })],
        );

        assert_eq!(state.input_mode(), InputMode::Normal);
        assert_eq!(state.selected_vehicle().map(|v| v.id), Some(4));
        assert_eq!(state.status.as_ref().map(|s| s.text.as_str()), Some("Added Beetle"));
    }

    #[test]
    fn worker_error_resets_submitting_form() {
        let mut state = loaded_state();
        send(&mut state, &[Event::OpenForm]);
        if let Some(Overlay::Form(form)) = state.overlay.as_mut() {
            form.submitting = true;
        }

        send(
            &mut state,
            &[Event::WorkerResponse(WorkerResponse::Error {
                message: "Storage error: disk full".to_string(),
            })],
        );

        let Some(Overlay::Form(form)) = &state.overlay else {
            panic!("form should stay open");
        };
        assert!(!form.submitting);
        assert!(state.status.as_ref().is_some_and(|s| s.is_error));
    }

    #[test]
    fn click_on_card_opens_details() {
        let mut state = loaded_state();
        send(&mut state, &[Event::Click { row: 6, col: 3 }]);

        let Some(Overlay::Details(modal)) = &state.overlay else {
            panic!("details should be open");
        };
        assert_eq!(modal.vehicle_id, 2);
    }

    #[test]
    fn q_closes_plugin() {
        let mut state = loaded_state();
        let actions = send(&mut state, &[Event::CloseFocus]);
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
