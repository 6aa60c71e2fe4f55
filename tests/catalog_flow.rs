//! End-to-end flows: key events through the handler, requests through the
//! worker against a catalog file in a temp dir, responses back into state.

use drivesphere::app::Overlay;
use drivesphere::worker::{CatalogWorker, WorkerMessage, WorkerResponse};
use drivesphere::{handle_event, initialize, Action, AppState, Config, Event, InputMode};

struct Harness {
    _dir: tempfile::TempDir,
    path: String,
    state: AppState,
    worker: CatalogWorker,
}

impl Harness {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json").to_string_lossy().into_owned();
        Self::with_file(dir, path)
    }

    fn with_file(dir: tempfile::TempDir, path: String) -> Self {
        let config = Config {
            catalog_file: path.clone(),
            ..Config::default()
        };
        let mut harness = Self {
            _dir: dir,
            state: initialize(&config),
            worker: CatalogWorker::default(),
            path: path.clone(),
        };
        harness.run(vec![Action::PostToWorker(WorkerMessage::load_catalog(path))]);
        harness
    }

    /// Feeds events to the handler and runs every resulting worker request.
    fn send(&mut self, events: &[Event]) {
        let mut actions = Vec::new();
        for event in events {
            let (_, produced) = handle_event(&mut self.state, event).unwrap();
            actions.extend(produced);
        }
        self.run(actions);
    }

    fn run(&mut self, mut actions: Vec<Action>) {
        while !actions.is_empty() {
            let mut next = Vec::new();
            for action in actions {
                if let Action::PostToWorker(message) = action {
                    let response = self.worker.handle_message(message);
                    let (_, produced) =
                        handle_event(&mut self.state, &Event::WorkerResponse(response)).unwrap();
                    next.extend(produced);
                }
            }
            actions = next;
        }
    }

    fn type_text(&mut self, text: &str) {
        let events: Vec<Event> = text.chars().map(Event::Char).collect();
        self.send(&events);
    }

    fn add_vehicle(&mut self, name: &str) {
        self.send(&[Event::OpenForm]);
        self.type_text(name);
        self.send(&[
            Event::NextField,
            Event::NextField,
            Event::NextField,
            Event::Select,
            Event::Select,
            Event::NextField,
            Event::NextField,
            Event::Select,
        ]);
    }

    fn visible_names(&self) -> Vec<&str> {
        self.state.visible.iter().map(|v| v.name.as_str()).collect()
    }
}

#[test]
fn loading_an_empty_catalog_clears_the_loading_state() {
    let harness = Harness::new();

    assert!(!harness.state.loading);
    assert!(harness.state.vehicles.is_empty());
    assert_eq!(harness.state.car_types, vec!["Manual", "Automatic"]);
}

#[test]
fn added_vehicle_is_selected_and_persisted() {
    let mut harness = Harness::new();

    harness.add_vehicle("Civic");

    assert!(harness.state.overlay.is_none());
    assert_eq!(harness.state.input_mode(), InputMode::Normal);
    assert_eq!(harness.visible_names(), vec!["Civic"]);
    let selected = harness.state.selected_vehicle().unwrap();
    assert_eq!(selected.car_type, "Manual");
    let status = harness.state.status.as_ref().unwrap();
    assert_eq!(status.text, "Added Civic");
    assert!(!status.is_error);
    assert_eq!(harness.state.listeners.armed_count(), 0);

    let mut fresh = CatalogWorker::default();
    let response = fresh.handle_message(WorkerMessage::load_catalog(harness.path.clone()));
    let WorkerResponse::CatalogLoaded { vehicles, .. } = response else {
        panic!("expected CatalogLoaded, got {response:?}");
    };
    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0].name, "Civic");
}

#[test]
fn invalid_form_does_not_reach_the_worker() {
    let mut harness = Harness::new();

    harness.send(&[Event::OpenForm]);
    for _ in 0..5 {
        harness.send(&[Event::NextField]);
    }
    harness.send(&[Event::Select]);

    let Some(Overlay::Form(form)) = &harness.state.overlay else {
        panic!("form should stay open");
    };
    assert!(!form.submitting);
    assert_eq!(
        form.errors.messages(),
        vec!["Car name is required", "Car type is required"]
    );
    assert!(harness.state.vehicles.is_empty());
}

#[test]
fn delete_from_the_list_asks_first_then_removes() {
    let mut harness = Harness::new();
    harness.add_vehicle("Civic");
    harness.add_vehicle("Accord");
    assert_eq!(harness.visible_names(), vec!["Accord", "Civic"]);

    harness.send(&[Event::RequestDelete]);
    assert_eq!(harness.state.input_mode(), InputMode::ConfirmDelete);

    harness.send(&[Event::CancelDelete]);
    assert_eq!(harness.state.input_mode(), InputMode::Normal);
    assert_eq!(harness.state.vehicles.len(), 2);

    harness.send(&[Event::RequestDelete, Event::ConfirmDelete]);
    assert_eq!(harness.visible_names(), vec!["Civic"]);
    assert_eq!(harness.state.status.as_ref().unwrap().text, "Deleted Accord");
    assert_eq!(harness.state.listeners.armed_count(), 0);
}

#[test]
fn filter_draft_only_applies_on_apply() {
    let mut harness = Harness::new();
    harness.add_vehicle("Civic");
    harness.send(&[Event::OpenForm]);
    harness.type_text("Mustang");
    harness.send(&[
        Event::NextField,
        Event::NextField,
        Event::NextField,
        Event::Select,
        Event::KeyDown,
        Event::Select,
        Event::NextField,
        Event::NextField,
        Event::Select,
    ]);
    assert_eq!(harness.state.vehicle(2).unwrap().car_type, "Automatic");

    // Row 0 is the CAR TYPE header, row 1 its "Manual" option.
    harness.send(&[Event::OpenFilters, Event::KeyDown, Event::Toggle]);
    assert_eq!(harness.visible_names(), vec!["Civic", "Mustang"]);

    harness.send(&[Event::Escape]);
    assert!(harness.state.overlay.is_none());
    assert_eq!(harness.state.filter.active_count(), 0);

    harness.send(&[
        Event::OpenFilters,
        Event::KeyDown,
        Event::Toggle,
        Event::ApplyFilters,
    ]);
    assert_eq!(harness.visible_names(), vec!["Civic"]);
    assert_eq!(harness.state.filter.active_count(), 1);
    assert_eq!(harness.state.listeners.armed_count(), 0);
}

#[test]
fn corrupt_catalog_surfaces_an_error_status() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, "{ not json").unwrap();

    let harness = Harness::with_file(dir, path.to_string_lossy().into_owned());

    assert!(!harness.state.loading);
    let status = harness.state.status.as_ref().unwrap();
    assert!(status.is_error);
    assert!(harness.state.vehicles.is_empty());
}
