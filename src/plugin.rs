//! Zellij plugin wrapper.
//!
//! The thin integration layer between the DriveSphere library and the
//! Zellij plugin system:
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← UI state, event handling
//! │  └──────────────────┘   │
//! │          │              │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │ CatalogWorkerShim│   │  ← Catalog file I/O
//! │  │ (worker thread)  │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Key, Mouse, `CustomMessage`, `PermissionRequestResult`
//! 3. **Permissions granted**: Ask the worker for the catalog
//! 4. **Update**: Map Zellij events to library events, run the actions
//! 5. **Render**: Call the library render function
//!
//! # Keybindings
//!
//! Global: `Ctrl+n` / `Ctrl+p` move down / up.
//!
//! - Normal: `j`/`k` move, `Enter` details, `/` search, `f` filters,
//!   `s` sort, `a` add, `d` delete, `q` close, `Esc` clear
//! - Search: typing edits the query, `Enter` focuses results, `/` returns
//!   to the input, `Esc` exits
//! - Details: `d` delete, `Esc`/`q` close; confirm with `y`, cancel with `n`
//! - Filters: `Space`/`Enter` toggle, `r` reset, `a` apply, `Esc`/`q` cancel
//! - Sort: `Enter` select, `Esc`/`q` close
//! - Form: `Tab`/`Shift+Tab` move, `Enter` open dropdown or submit,
//!   `Space` pick in a dropdown, `Esc` close dropdown or form

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::{post_message_to, post_message_to_plugin};

use drivesphere::app::Overlay;
use drivesphere::worker::{init_worker_tracing, CatalogWorker, WorkerMessage, WorkerResponse};
use drivesphere::{handle_event, Action, AppState, Config, Event, InputMode, SearchFocus};

/// Name used both for worker routing and for responses posted back.
const WORKER_NAME: &str = "drivesphere";

/// Plugin state wrapper around the library's [`AppState`].
pub struct State {
    app: AppState,
    config: Config,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: drivesphere::initialize(&config),
            config,
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        self.config = Config::from_zellij(&configuration);
        drivesphere::observability::init_tracing(&self.config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(config = ?self.config, "parsed configuration");
        self.app = drivesphere::initialize(&self.config);

        request_permission(&[
            PermissionType::ReadApplicationState,
            PermissionType::ChangeApplicationState,
            PermissionType::FullHdAccess,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Mouse(Mouse::LeftClick(line, col)) => {
                let Ok(line) = usize::try_from(line) else {
                    return false;
                };
                Event::Click {
                    row: line + 1,
                    col: col + 1,
                }
            }
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                self.handle_permission_result(permissions);
                return false;
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in actions {
                    Self::execute_action(&action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_viewport(rows, cols);
        drivesphere::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(..) => "Mouse".to_string(),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    fn dropdown_open(&self) -> bool {
        matches!(&self.app.overlay, Some(Overlay::Form(form)) if form.dropdown.is_some())
    }

    /// Maps keyboard events to application events for the current mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        let mode = self.app.input_mode();
        Some(match (mode, key.bare_key) {
            (_, BareKey::Down) => Event::KeyDown,
            (_, BareKey::Up) => Event::KeyUp,

            (InputMode::Search(SearchFocus::Typing), BareKey::Enter) => Event::FocusResults,
            (InputMode::Search(_), BareKey::Esc) => Event::ExitSearch,
            (InputMode::Search(SearchFocus::Typing), BareKey::Backspace) => Event::Backspace,
            (InputMode::Search(SearchFocus::Typing), BareKey::Char(c)) => Event::Char(c),
            (InputMode::Search(SearchFocus::Navigating), BareKey::Char('/')) => {
                Event::FocusSearchBar
            }

            (InputMode::ConfirmDelete, BareKey::Char('y') | BareKey::Enter) => Event::ConfirmDelete,
            (InputMode::ConfirmDelete, BareKey::Char('n') | BareKey::Esc) => Event::CancelDelete,
            (InputMode::ConfirmDelete, _) => return None,

            (InputMode::Form, BareKey::Tab) if key.has_modifiers(&[KeyModifier::Shift]) => {
                Event::PrevField
            }
            (InputMode::Form, BareKey::Tab) => Event::NextField,
            (InputMode::Form, BareKey::Enter) => Event::Select,
            (InputMode::Form, BareKey::Esc) => Event::Escape,
            (InputMode::Form, BareKey::Backspace) => Event::Backspace,
            (InputMode::Form, BareKey::Char(' ')) if self.dropdown_open() => Event::Toggle,
            (InputMode::Form, BareKey::Char('j')) if self.dropdown_open() => Event::KeyDown,
            (InputMode::Form, BareKey::Char('k')) if self.dropdown_open() => Event::KeyUp,
            (InputMode::Form, BareKey::Char(c)) => Event::Char(c),
            (InputMode::Form, _) => return None,

            (InputMode::Filter, BareKey::Char(' ')) => Event::Toggle,
            (InputMode::Filter, BareKey::Char('r')) => Event::ResetFilters,
            (InputMode::Filter, BareKey::Char('a')) => Event::ApplyFilters,
            (InputMode::Sort, BareKey::Char(' ')) => Event::Select,

            (_, BareKey::Char('j')) => Event::KeyDown,
            (_, BareKey::Char('k')) => Event::KeyUp,
            (_, BareKey::Enter) => Event::Select,
            (_, BareKey::Esc) => Event::Escape,
            (InputMode::Details | InputMode::Filter | InputMode::Sort, BareKey::Char('q')) => {
                Event::Escape
            }
            (InputMode::Details, BareKey::Char('d')) => Event::RequestDelete,

            (InputMode::Normal | InputMode::Search(SearchFocus::Navigating), BareKey::Char(c)) => {
                match c {
                    '/' => Event::SearchMode,
                    'f' => Event::OpenFilters,
                    's' => Event::OpenSort,
                    'a' => Event::OpenForm,
                    'd' => Event::RequestDelete,
                    'q' => Event::CloseFocus,
                    _ => return None,
                }
            }
            _ => return None,
        })
    }

    fn handle_permission_result(&self, permissions: PermissionStatus) {
        match permissions {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted - loading catalog");
                Self::post_worker_message(&WorkerMessage::load_catalog(
                    self.config.catalog_file.clone(),
                ));
            }
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied - catalog cannot be loaded");
            }
        }
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    /// Serializes `message` and posts it to the catalog worker.
    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(message_type = message.kind(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: WORKER_NAME.to_string(),
                    payload,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize worker message");
            }
        }
    }

    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::PostToWorker(message) => Self::post_worker_message(message),
        }
    }
}

/// Zellij-facing wrapper around [`CatalogWorker`].
///
/// Zellij requires workers to be serde-serializable; the store itself is
/// skipped and reopened lazily.
#[derive(Default, serde::Serialize, serde::Deserialize)]
pub struct CatalogWorkerShim {
    #[serde(skip)]
    worker: CatalogWorker,
}

impl ZellijWorker<'_> for CatalogWorkerShim {
    fn on_message(&mut self, message: String, payload: String) {
        init_worker_tracing();

        let span = tracing::debug_span!("worker_on_message", message_name = %message);
        let _guard = span.entered();

        if let Some(response) = self.worker.handle_payload(&payload) {
            post_message_to_plugin(PluginMessage {
                name: message,
                payload: response,
                worker_name: None,
            });
        }
    }
}
