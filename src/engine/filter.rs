//! Filter dialog selection engine.
//!
//! The engine keeps two selections apart: the `applied` map that the list is
//! currently filtered by, and the `draft` map the user edits while the dialog
//! is open. Opening the dialog copies applied into draft, committing copies
//! draft back into applied, and cancelling simply throws the draft away.
//!
//! # Example
//!
//! ```rust
//! use drivesphere::engine::{FilterSelectionEngine, SelectionMode, SelectionState};
//! use drivesphere::engine::filter::default_sections;
//!
//! let mut engine = FilterSelectionEngine::new(
//!     default_sections(),
//!     SelectionState::new(),
//!     SelectionMode::Multiple,
//! );
//!
//! engine.open();
//! engine.toggle_option("carType", "manual");
//! let applied = engine.commit();
//! assert!(applied.contains("carType", "manual"));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Section id for the transmission facet.
pub const CAR_TYPE_SECTION: &str = "carType";

/// Section id for the specifications facet.
pub const SPECIFICATIONS_SECTION: &str = "specifications";

/// A single selectable chip inside a filter section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    /// Identifier, unique within the owning section.
    pub id: String,
    /// Text shown on the chip.
    pub label: String,
    /// Token stored in the selection when the chip is picked.
    pub value: String,
}

impl FilterOption {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value: value.into(),
        }
    }

    /// Builds an option whose label doubles as its value.
    #[must_use]
    pub fn labelled(id: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(id, text.clone(), text)
    }
}

/// A titled group of filter options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSection {
    /// Identifier, unique across all sections. Keys the selection map.
    pub id: String,
    /// Heading rendered above the chips.
    pub title: String,
    /// Options in display order.
    #[serde(default)]
    pub options: Vec<FilterOption>,
}

impl FilterSection {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, options: Vec<FilterOption>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            options,
        }
    }

    /// Looks up the option carrying `value`, if the section still declares it.
    #[must_use]
    pub fn option_for_value(&self, value: &str) -> Option<&FilterOption> {
        self.options.iter().find(|option| option.value == value)
    }
}

/// Sections used when the host does not supply its own.
#[must_use]
pub fn default_sections() -> Vec<FilterSection> {
    vec![
        FilterSection::new(
            CAR_TYPE_SECTION,
            "CAR TYPE",
            vec![
                FilterOption::new("manual", "Manual", "manual"),
                FilterOption::new("automatic", "Automatic", "automatic"),
            ],
        ),
        FilterSection::new(
            SPECIFICATIONS_SECTION,
            "SPECIFICATIONS",
            vec![
                FilterOption::labelled("engine", "Engine: 5.0L Ti-VCT V8"),
                FilterOption::labelled("displacement", "Displacement: 4951 cc"),
                FilterOption::labelled("fuelType", "Fuel Type: Petrol"),
                FilterOption::labelled("mileage", "Mileage (ARAI): 7.9 km/l"),
                FilterOption::labelled("topSpeed", "Top Speed: 250 km/h"),
                FilterOption::labelled("maxPower", "Max Power: 401 PS @ 6500 rpm"),
                FilterOption::labelled("emissionStandard", "Emission Standard: BS4"),
            ],
        ),
    ]
}

/// How picking an unselected option affects the rest of its section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Picking an option replaces whatever the section held.
    Single,
    /// Options accumulate independently.
    #[default]
    Multiple,
}

impl SelectionMode {
    /// Maps the host's `multi_select` flag onto a mode.
    #[must_use]
    pub const fn from_multi_select(multi_select: bool) -> Self {
        if multi_select {
            Self::Multiple
        } else {
            Self::Single
        }
    }

    #[must_use]
    pub const fn is_multi(self) -> bool {
        matches!(self, Self::Multiple)
    }
}

/// Selected option values keyed by section id.
///
/// A section mapped to an empty set and a section missing from the map both
/// mean "nothing selected"; equality treats the two the same way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionState(BTreeMap<String, BTreeSet<String>>);

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Values selected in `section_id`, if the section has an entry.
    #[must_use]
    pub fn values(&self, section_id: &str) -> Option<&BTreeSet<String>> {
        self.0.get(section_id)
    }

    #[must_use]
    pub fn contains(&self, section_id: &str, value: &str) -> bool {
        self.0
            .get(section_id)
            .is_some_and(|values| values.contains(value))
    }

    /// Flips `value` in `section_id` according to `mode`.
    ///
    /// Removing a present value behaves the same in both modes. Adding an
    /// absent value unions it in `Multiple` mode and replaces the section's
    /// set with `{value}` in `Single` mode. Unknown sections get an entry.
    pub fn toggle(&mut self, section_id: &str, value: &str, mode: SelectionMode) {
        let values = self.0.entry(section_id.to_string()).or_default();

        if values.remove(value) {
            return;
        }

        if mode == SelectionMode::Single {
            values.clear();
        }
        values.insert(value.to_string());
    }

    /// Drops every section.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Total number of selected values across sections.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.0.values().map(BTreeSet::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeSet::is_empty)
    }

    /// All entries, including sections whose set is empty.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.0.iter().map(|(id, values)| (id.as_str(), values))
    }

    /// Entries that hold at least one value.
    pub fn active_sections(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.iter().filter(|(_, values)| !values.is_empty())
    }

    /// Keeps only the entries whose id appears in `sections`.
    #[must_use]
    pub fn restricted_to(&self, sections: &[FilterSection]) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(id, _)| sections.iter().any(|section| &section.id == *id))
                .map(|(id, values)| (id.clone(), values.clone()))
                .collect(),
        )
    }
}

impl PartialEq for SelectionState {
    fn eq(&self, other: &Self) -> bool {
        self.active_sections().eq(other.active_sections())
    }
}

impl Eq for SelectionState {}

impl<K, I, V> FromIterator<(K, I)> for SelectionState
where
    K: Into<String>,
    I: IntoIterator<Item = V>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(id, values)| (id.into(), values.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }
}

/// Expanded/collapsed flag per section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityState(BTreeMap<String, bool>);

impl VisibilityState {
    /// Every listed section starts expanded.
    #[must_use]
    pub fn expanded(sections: &[FilterSection]) -> Self {
        Self(
            sections
                .iter()
                .map(|section| (section.id.clone(), true))
                .collect(),
        )
    }

    /// Sections without an entry read as collapsed.
    #[must_use]
    pub fn is_expanded(&self, section_id: &str) -> bool {
        self.0.get(section_id).copied().unwrap_or(false)
    }

    pub fn toggle(&mut self, section_id: &str) {
        let expanded = self.0.entry(section_id.to_string()).or_insert(false);
        *expanded = !*expanded;
    }

    pub fn set(&mut self, section_id: &str, expanded: bool) {
        self.0.insert(section_id.to_string(), expanded);
    }
}

type ApplyCallback = Box<dyn FnMut(&SelectionState)>;

/// Draft/applied selection engine behind the filter dialog.
pub struct FilterSelectionEngine {
    sections: Vec<FilterSection>,
    applied: SelectionState,
    draft: SelectionState,
    visibility: VisibilityState,
    mode: SelectionMode,
    is_open: bool,
    on_apply: Option<ApplyCallback>,
}

impl FilterSelectionEngine {
    /// Creates an engine over `sections`, with `initial` as the applied map.
    #[must_use]
    pub fn new(sections: Vec<FilterSection>, initial: SelectionState, mode: SelectionMode) -> Self {
        let visibility = VisibilityState::expanded(&sections);
        Self {
            sections,
            draft: initial.clone(),
            applied: initial,
            visibility,
            mode,
            is_open: false,
            on_apply: None,
        }
    }

    /// Registers the consumer notified once per [`commit`](Self::commit).
    #[must_use]
    pub fn on_apply(mut self, callback: impl FnMut(&SelectionState) + 'static) -> Self {
        self.on_apply = Some(Box::new(callback));
        self
    }

    /// Starts an editing session from the applied selection.
    pub fn open(&mut self) {
        self.draft.clone_from(&self.applied);
        self.is_open = true;
        tracing::debug!(
            applied = self.applied.selected_count(),
            "filter dialog opened"
        );
    }

    pub fn toggle_visibility(&mut self, section_id: &str) {
        self.visibility.toggle(section_id);
        tracing::trace!(
            section = %section_id,
            expanded = self.visibility.is_expanded(section_id),
            "section visibility toggled"
        );
    }

    pub fn toggle_option(&mut self, section_id: &str, value: &str) {
        self.draft.toggle(section_id, value, self.mode);
        tracing::trace!(
            section = %section_id,
            value = %value,
            selected = self.draft.contains(section_id, value),
            "filter option toggled"
        );
    }

    /// Clears the draft in every section. Visibility is left alone.
    pub fn reset(&mut self) {
        self.draft.clear();
        tracing::debug!("filter draft reset");
    }

    /// Publishes the draft as the applied selection.
    ///
    /// The apply callback fires exactly once. The draft itself is not
    /// modified, so committing twice in a row publishes the same map.
    pub fn commit(&mut self) -> SelectionState {
        self.applied.clone_from(&self.draft);
        self.is_open = false;

        tracing::debug!(
            selected = self.applied.selected_count(),
            "filter selection committed"
        );

        if let Some(callback) = self.on_apply.as_mut() {
            callback(&self.applied);
        }

        self.applied.clone()
    }

    /// Closes the session and discards the draft.
    pub fn cancel(&mut self) {
        self.draft.clone_from(&self.applied);
        self.is_open = false;
        tracing::debug!("filter draft discarded");
    }

    /// Replaces the applied selection with a host-supplied map.
    pub fn seed(&mut self, selection: SelectionState) {
        self.applied = selection;
        if !self.is_open {
            self.draft.clone_from(&self.applied);
        }
    }

    #[must_use]
    pub fn sections(&self) -> &[FilterSection] {
        &self.sections
    }

    #[must_use]
    pub const fn draft(&self) -> &SelectionState {
        &self.draft
    }

    #[must_use]
    pub const fn applied(&self) -> &SelectionState {
        &self.applied
    }

    #[must_use]
    pub const fn visibility(&self) -> &VisibilityState {
        &self.visibility
    }

    #[must_use]
    pub fn is_selected(&self, section_id: &str, value: &str) -> bool {
        self.draft.contains(section_id, value)
    }

    #[must_use]
    pub fn is_expanded(&self, section_id: &str) -> bool {
        self.visibility.is_expanded(section_id)
    }

    #[must_use]
    pub const fn mode(&self) -> SelectionMode {
        self.mode
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// Number of values in the applied selection, for the header badge.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.applied.restricted_to(&self.sections).selected_count()
    }
}

impl fmt::Debug for FilterSelectionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterSelectionEngine")
            .field("sections", &self.sections.len())
            .field("applied", &self.applied)
            .field("draft", &self.draft)
            .field("visibility", &self.visibility)
            .field("mode", &self.mode)
            .field("is_open", &self.is_open)
            .finish_non_exhaustive()
    }
}
