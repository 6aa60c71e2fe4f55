//! Add-vehicle form state.
//!
//! The form walks a fixed list of [`FormField`]s. Text fields take typed
//! characters; the car type and specifications fields open a dropdown
//! popover that holds a [`DismissGuard`] for as long as it is open.

use crate::domain::vehicle::MAX_DESCRIPTION_CHARS;
use crate::domain::{NewVehicle, ValidationErrors};
use crate::engine::{DismissGuard, ListenerRegistry, Popover};

/// Specification choices offered when no specifications section is configured.
pub const FALLBACK_SPECIFICATIONS: [&str; 6] = [
    "Engine type",
    "Displacement",
    "Fuel Type",
    "Mileage",
    "Seats",
    "Horsepower",
];

/// Focusable rows of the form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    ImageUrl,
    CarType,
    Specifications,
    Submit,
}

impl FormField {
    pub const ORDER: [Self; 6] = [
        Self::Name,
        Self::Description,
        Self::ImageUrl,
        Self::CarType,
        Self::Specifications,
        Self::Submit,
    ];

    fn index(self) -> usize {
        Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or_default()
    }

    /// Next field, wrapping after Submit.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    /// Previous field, wrapping before Name.
    #[must_use]
    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Car name",
            Self::Description => "Description",
            Self::ImageUrl => "Image URL",
            Self::CarType => "Car type",
            Self::Specifications => "Specifications",
            Self::Submit => "Submit",
        }
    }

    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::Name | Self::CarType)
    }

    /// The dropdown this field opens, if any.
    #[must_use]
    pub const fn dropdown(self) -> Option<DropdownKind> {
        match self {
            Self::CarType => Some(DropdownKind::CarType),
            Self::Specifications => Some(DropdownKind::Specifications),
            Self::Name | Self::Description | Self::ImageUrl | Self::Submit => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownKind {
    /// Radio list; picking closes the dropdown.
    CarType,
    /// Checkbox list; picking toggles.
    Specifications,
}

impl DropdownKind {
    #[must_use]
    pub const fn popover(self) -> Popover {
        match self {
            Self::CarType => Popover::CarTypeDropdown,
            Self::Specifications => Popover::SpecificationsDropdown,
        }
    }
}

/// An open dropdown and its highlighted option.
#[derive(Debug)]
pub struct FormDropdown {
    pub kind: DropdownKind,
    pub cursor: usize,
    _guard: DismissGuard,
}

/// Editable state of the add-vehicle form.
#[derive(Debug)]
pub struct AddVehicleForm {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub car_type: Option<String>,
    pub specifications: Vec<String>,
    pub focus: FormField,
    pub dropdown: Option<FormDropdown>,
    pub errors: ValidationErrors,
    /// Set once a create request is in flight.
    pub submitting: bool,
}

impl Default for AddVehicleForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AddVehicleForm {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            image_url: String::new(),
            car_type: None,
            specifications: Vec::new(),
            focus: FormField::Name,
            dropdown: None,
            errors: ValidationErrors {
                name: None,
                description: None,
                car_type: None,
            },
            submitting: false,
        }
    }

    pub fn focus_next(&mut self) {
        if self.dropdown.is_none() {
            self.focus = self.focus.next();
        }
    }

    pub fn focus_prev(&mut self) {
        if self.dropdown.is_none() {
            self.focus = self.focus.prev();
        }
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Name => Some(&mut self.name),
            FormField::Description => Some(&mut self.description),
            FormField::ImageUrl => Some(&mut self.image_url),
            FormField::CarType | FormField::Specifications | FormField::Submit => None,
        }
    }

    /// Appends `c` to the focused text field. Returns whether anything changed.
    pub fn type_char(&mut self, c: char) -> bool {
        if self.dropdown.is_some() || c.is_control() {
            return false;
        }
        if self.focus == FormField::Description
            && self.description.chars().count() >= MAX_DESCRIPTION_CHARS
        {
            return false;
        }

        let focus = self.focus;
        let Some(text) = self.focused_text() else {
            return false;
        };
        text.push(c);

        if focus == FormField::Name && !self.name.trim().is_empty() {
            self.errors.name = None;
        }
        true
    }

    /// Removes the last character of the focused text field.
    pub fn backspace(&mut self) -> bool {
        if self.dropdown.is_some() {
            return false;
        }
        self.focused_text().and_then(String::pop).is_some()
    }

    /// Opens the focused field's dropdown, arming its dismiss listener.
    pub fn open_dropdown(&mut self, listeners: &ListenerRegistry) -> bool {
        let Some(kind) = self.focus.dropdown() else {
            return false;
        };
        if self.dropdown.is_some() {
            return false;
        }

        self.dropdown = Some(FormDropdown {
            kind,
            cursor: 0,
            _guard: listeners.arm(kind.popover()),
        });
        true
    }

    /// Closes the open dropdown, releasing its listener.
    pub fn close_dropdown(&mut self) -> bool {
        self.dropdown.take().is_some()
    }

    /// Moves the dropdown cursor by one within `len` options, wrapping.
    pub fn move_dropdown_cursor(&mut self, down: bool, len: usize) {
        let Some(dropdown) = self.dropdown.as_mut() else {
            return;
        };
        if len == 0 {
            return;
        }
        dropdown.cursor = if down {
            (dropdown.cursor + 1) % len
        } else {
            (dropdown.cursor + len - 1) % len
        };
    }

    /// Picks `option` in the open dropdown.
    ///
    /// A car type replaces the current one and closes the dropdown. A
    /// specification is toggled and the dropdown stays open.
    pub fn pick(&mut self, option: &str) {
        let Some(kind) = self.dropdown.as_ref().map(|dropdown| dropdown.kind) else {
            return;
        };

        match kind {
            DropdownKind::CarType => {
                self.car_type = Some(option.to_string());
                self.errors.car_type = None;
                self.dropdown = None;
            }
            DropdownKind::Specifications => {
                if let Some(index) = self.specifications.iter().position(|spec| spec == option) {
                    self.specifications.remove(index);
                } else {
                    self.specifications.push(option.to_string());
                }
            }
        }
    }

    /// Payload built from the current field values.
    #[must_use]
    pub fn payload(&self) -> NewVehicle {
        NewVehicle {
            name: self.name.clone(),
            description: self.description.clone(),
            image_url: Some(self.image_url.clone()).filter(|url| !url.trim().is_empty()),
            car_type: self.car_type.clone().unwrap_or_default(),
            specifications: self.specifications.clone(),
        }
    }

    /// Validates the form and, if valid, marks it as submitting.
    ///
    /// Returns the payload to send, or `None` when validation failed (the
    /// messages are left in `errors`) or a request is already in flight.
    pub fn submit(&mut self) -> Option<NewVehicle> {
        if self.submitting {
            return None;
        }

        let payload = self.payload();
        self.errors = payload.validate();
        if !self.errors.is_empty() {
            tracing::debug!(errors = ?self.errors.messages(), "form validation failed");
            return None;
        }

        self.submitting = true;
        Some(payload)
    }

    /// Character counter shown next to the description label.
    #[must_use]
    pub fn description_counter(&self) -> String {
        format!(
            "{}/{MAX_DESCRIPTION_CHARS} char",
            self.description.chars().count()
        )
    }

    /// Summary shown in the closed specifications field.
    #[must_use]
    pub fn specifications_summary(&self) -> String {
        if self.specifications.is_empty() {
            "Select".to_string()
        } else {
            format!("{} selected", self.specifications.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_wraps_both_ways() {
        assert_eq!(FormField::Submit.next(), FormField::Name);
        assert_eq!(FormField::Name.prev(), FormField::Submit);
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let mut form = AddVehicleForm::new();
        form.type_char('A');
        form.focus_next();
        form.type_char('b');
        assert_eq!(form.name, "A");
        assert_eq!(form.description, "b");
    }

    #[test]
    fn description_is_capped() {
        let mut form = AddVehicleForm::new();
        form.focus = FormField::Description;
        form.description = "x".repeat(MAX_DESCRIPTION_CHARS);
        assert!(!form.type_char('y'));
        assert_eq!(form.description_counter(), "280/280 char");
    }

    #[test]
    fn car_type_pick_closes_dropdown_and_releases_listener() {
        let listeners = ListenerRegistry::new();
        let mut form = AddVehicleForm::new();
        form.focus = FormField::CarType;

        assert!(form.open_dropdown(&listeners));
        assert!(listeners.is_armed(Popover::CarTypeDropdown));

        form.pick("Manual");
        assert_eq!(form.car_type.as_deref(), Some("Manual"));
        assert!(form.dropdown.is_none());
        assert_eq!(listeners.armed_count(), 0);
    }

    #[test]
    fn specifications_toggle_and_stay_open() {
        let listeners = ListenerRegistry::new();
        let mut form = AddVehicleForm::new();
        form.focus = FormField::Specifications;
        form.open_dropdown(&listeners);

        form.pick("Seats");
        form.pick("Mileage");
        form.pick("Seats");

        assert_eq!(form.specifications, vec!["Mileage".to_string()]);
        assert!(form.dropdown.is_some());
        assert_eq!(form.specifications_summary(), "1 selected");
    }

    #[test]
    fn text_fields_do_not_open_dropdowns() {
        let listeners = ListenerRegistry::new();
        let mut form = AddVehicleForm::new();
        assert!(!form.open_dropdown(&listeners));
        assert_eq!(listeners.armed_count(), 0);
    }

    #[test]
    fn submit_reports_errors_then_succeeds() {
        let mut form = AddVehicleForm::new();
        assert!(form.submit().is_none());
        assert_eq!(
            form.errors.messages(),
            vec!["Car name is required", "Car type is required"]
        );

        form.name = "Civic".to_string();
        form.car_type = Some("Manual".to_string());
        let payload = form.submit().unwrap();
        assert_eq!(payload.name, "Civic");
        assert!(form.submitting);
        assert!(form.submit().is_none());
    }

    #[test]
    fn dropping_form_releases_open_dropdown() {
        let listeners = ListenerRegistry::new();
        let mut form = AddVehicleForm::new();
        form.focus = FormField::Specifications;
        form.open_dropdown(&listeners);
        assert_eq!(listeners.armed_count(), 1);

        drop(form);
        assert_eq!(listeners.armed_count(), 0);
    }
}
