//! Sort selection engine.
//!
//! A [`SortDescriptor`] pairs a [`SortField`] with a [`SortDirection`]. Both
//! enums have two variants, so the four descriptors in [`SortDescriptor::ALL`]
//! cover every value the type can hold and each one has a display label.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Vehicle attribute the list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "createdAt")]
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl SortDirection {
    /// Flips an ascending comparison when the direction is descending.
    #[must_use]
    pub fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// The active ordering of the vehicle list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortDescriptor {
    #[serde(rename = "sortBy")]
    pub field: SortField,
    #[serde(rename = "sortOrder")]
    pub direction: SortDirection,
}

impl SortDescriptor {
    pub const NAME_ASC: Self = Self::new(SortField::Name, SortDirection::Asc);
    pub const NAME_DESC: Self = Self::new(SortField::Name, SortDirection::Desc);
    pub const NEWEST_FIRST: Self = Self::new(SortField::CreatedAt, SortDirection::Desc);
    pub const OLDEST_FIRST: Self = Self::new(SortField::CreatedAt, SortDirection::Asc);

    /// Descriptors in menu order. The first one is the initial ordering.
    pub const ALL: [Self; 4] = [
        Self::NAME_ASC,
        Self::NAME_DESC,
        Self::NEWEST_FIRST,
        Self::OLDEST_FIRST,
    ];

    #[must_use]
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match (self.field, self.direction) {
            (SortField::Name, SortDirection::Asc) => "Name (A-Z)",
            (SortField::Name, SortDirection::Desc) => "Name (Z-A)",
            (SortField::CreatedAt, SortDirection::Desc) => "Newest First",
            (SortField::CreatedAt, SortDirection::Asc) => "Oldest First",
        }
    }

    /// Index of this descriptor in [`Self::ALL`].
    #[must_use]
    pub fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|descriptor| *descriptor == self)
            .unwrap_or_default()
    }
}

impl Default for SortDescriptor {
    fn default() -> Self {
        Self::ALL[0]
    }
}

impl fmt::Display for SortDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

type SortCallback = Box<dyn FnMut(SortDescriptor)>;

/// Holds the one active [`SortDescriptor`].
#[derive(Default)]
pub struct SortSelectionEngine {
    active: SortDescriptor,
    on_sort: Option<SortCallback>,
}

impl SortSelectionEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the consumer notified on every [`select`](Self::select).
    #[must_use]
    pub fn on_sort(mut self, callback: impl FnMut(SortDescriptor) + 'static) -> Self {
        self.on_sort = Some(Box::new(callback));
        self
    }

    /// Makes `descriptor` active and notifies the consumer.
    ///
    /// Re-selecting the active descriptor still notifies.
    pub fn select(&mut self, descriptor: SortDescriptor) {
        tracing::debug!(
            previous = %self.active,
            selected = %descriptor,
            "sort descriptor selected"
        );
        self.active = descriptor;

        if let Some(callback) = self.on_sort.as_mut() {
            callback(descriptor);
        }
    }

    #[must_use]
    pub const fn current(&self) -> (SortDescriptor, &'static str) {
        (self.active, self.active.label())
    }

    #[must_use]
    pub const fn active(&self) -> SortDescriptor {
        self.active
    }

    pub fn options(&self) -> impl Iterator<Item = (SortDescriptor, &'static str)> {
        SortDescriptor::ALL
            .into_iter()
            .map(|descriptor| (descriptor, descriptor.label()))
    }
}

impl fmt::Debug for SortSelectionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortSelectionEngine")
            .field("active", &self.active)
            .field("has_callback", &self.on_sort.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn defaults_to_name_ascending() {
        let engine = SortSelectionEngine::new();
        assert_eq!(engine.current(), (SortDescriptor::NAME_ASC, "Name (A-Z)"));
    }

    #[test]
    fn select_makes_each_descriptor_current() {
        let mut engine = SortSelectionEngine::new();
        for descriptor in SortDescriptor::ALL {
            engine.select(descriptor);
            assert_eq!(engine.current().0, descriptor);
            assert_eq!(engine.current().1, descriptor.label());
        }
    }

    #[test]
    fn reselecting_fires_callback_each_time() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let mut engine =
            SortSelectionEngine::new().on_sort(move |descriptor| sink.borrow_mut().push(descriptor));

        engine.select(SortDescriptor::NEWEST_FIRST);
        engine.select(SortDescriptor::NEWEST_FIRST);

        assert_eq!(engine.active(), SortDescriptor::NEWEST_FIRST);
        assert_eq!(
            *calls.borrow(),
            vec![SortDescriptor::NEWEST_FIRST, SortDescriptor::NEWEST_FIRST]
        );
    }

    #[test]
    fn options_are_listed_in_menu_order() {
        let engine = SortSelectionEngine::new();
        let labels: Vec<_> = engine.options().map(|(_, label)| label).collect();
        assert_eq!(
            labels,
            ["Name (A-Z)", "Name (Z-A)", "Newest First", "Oldest First"]
        );
    }

    #[test]
    fn position_matches_menu_index() {
        for (index, descriptor) in SortDescriptor::ALL.into_iter().enumerate() {
            assert_eq!(descriptor.position(), index);
        }
    }

    #[test]
    fn serializes_with_wire_names() {
        let json = serde_json::to_string(&SortDescriptor::NEWEST_FIRST).unwrap();
        assert_eq!(json, r#"{"sortBy":"createdAt","sortOrder":"DESC"}"#);
    }

    #[test]
    fn descending_reverses_ordering() {
        assert_eq!(SortDirection::Desc.orient(Ordering::Less), Ordering::Greater);
        assert_eq!(SortDirection::Asc.orient(Ordering::Less), Ordering::Less);
    }
}
