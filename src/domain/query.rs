//! In-memory catalog query.
//!
//! A [`CatalogQuery`] combines the committed filter selection, the active
//! sort descriptor and the search text into one pass over the vehicle list.
//!
//! # Matching Rules
//!
//! - `carType` section: the vehicle's car type equals one of the selected
//!   values, ignoring case
//! - any other section: the vehicle lists one of the selected values in its
//!   specifications
//! - values in one section are alternatives; every non-empty section must match
//! - every whitespace-separated search token must fuzzy-match the name
//!
//! Sorting by name ignores case. Equal keys fall back to ascending id, so the
//! result order never depends on the input order.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::vehicle::Vehicle;
use crate::engine::filter::CAR_TYPE_SECTION;
use crate::engine::{FilterSection, SelectionState, SortDescriptor, SortField};

/// Filter, search and sort parameters for the vehicle list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub filters: SelectionState,
    pub sort: SortDescriptor,
    pub search: String,
}

impl CatalogQuery {
    /// Builds a query, dropping selections for sections not in `sections`.
    #[must_use]
    pub fn new(
        filters: &SelectionState,
        sections: &[FilterSection],
        sort: SortDescriptor,
        search: impl Into<String>,
    ) -> Self {
        Self {
            filters: filters.restricted_to(sections),
            sort,
            search: search.into(),
        }
    }

    /// Returns the matching vehicles in sort order.
    #[must_use]
    pub fn apply(&self, vehicles: &[Vehicle]) -> Vec<Vehicle> {
        let _span = tracing::debug_span!(
            "catalog_query",
            total = vehicles.len(),
            active_filters = self.filters.selected_count(),
            search_len = self.search.len(),
            sort = %self.sort
        )
        .entered();

        let tokens: Vec<String> = self
            .search
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        let matcher = (!tokens.is_empty()).then(SkimMatcherV2::default);

        let mut matched: Vec<Vehicle> = vehicles
            .iter()
            .filter(|vehicle| self.matches_filters(vehicle))
            .filter(|vehicle| {
                matcher.as_ref().map_or(true, |m| {
                    let name = vehicle.name.to_lowercase();
                    tokens.iter().all(|token| m.fuzzy_match(&name, token).is_some())
                })
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| self.compare(a, b));

        tracing::debug!(matched = matched.len(), "catalog query applied");
        matched
    }

    /// Whether `vehicle` satisfies every non-empty filter section.
    #[must_use]
    pub fn matches_filters(&self, vehicle: &Vehicle) -> bool {
        self.filters
            .active_sections()
            .all(|(section_id, values)| section_matches(section_id, values, vehicle))
    }

    fn compare(&self, a: &Vehicle, b: &Vehicle) -> Ordering {
        let primary = match self.sort.field {
            SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        self.sort.direction.orient(primary).then(a.id.cmp(&b.id))
    }
}

fn section_matches(section_id: &str, values: &BTreeSet<String>, vehicle: &Vehicle) -> bool {
    if section_id == CAR_TYPE_SECTION {
        values
            .iter()
            .any(|value| value.eq_ignore_ascii_case(&vehicle.car_type))
    } else {
        values
            .iter()
            .any(|value| vehicle.specifications.iter().any(|spec| spec == value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::filter::default_sections;

    fn vehicle(id: i64, name: &str, car_type: &str, specs: &[&str], created_at: i64) -> Vehicle {
        Vehicle {
            id,
            name: name.to_string(),
            description: String::new(),
            image_url: None,
            car_type: car_type.to_string(),
            specifications: specs.iter().map(|s| (*s).to_string()).collect(),
            created_at,
        }
    }

    fn fleet() -> Vec<Vehicle> {
        vec![
            vehicle(1, "Mustang", "Manual", &["Fuel Type: Petrol"], 300),
            vehicle(2, "civic", "Automatic", &["Fuel Type: Petrol", "Top Speed: 250 km/h"], 100),
            vehicle(3, "Beetle", "automatic", &[], 200),
        ]
    }

    fn ids(vehicles: &[Vehicle]) -> Vec<i64> {
        vehicles.iter().map(|v| v.id).collect()
    }

    #[test]
    fn empty_query_sorts_by_name() {
        let result = CatalogQuery::default().apply(&fleet());
        assert_eq!(ids(&result), vec![3, 2, 1]);
    }

    #[test]
    fn car_type_matches_case_insensitively() {
        let filters = SelectionState::from_iter([("carType", ["automatic"])]);
        let query = CatalogQuery::new(&filters, &default_sections(), SortDescriptor::NAME_ASC, "");
        assert_eq!(ids(&query.apply(&fleet())), vec![3, 2]);
    }

    #[test]
    fn sections_are_anded_and_values_ored() {
        let filters = SelectionState::from_iter([
            ("carType", vec!["manual", "automatic"]),
            ("specifications", vec!["Top Speed: 250 km/h"]),
        ]);
        let query = CatalogQuery::new(&filters, &default_sections(), SortDescriptor::NAME_ASC, "");
        assert_eq!(ids(&query.apply(&fleet())), vec![2]);
    }

    #[test]
    fn empty_and_undeclared_sections_are_ignored() {
        let filters = SelectionState::from_iter([
            ("carType", Vec::<&str>::new()),
            ("colour", vec!["red"]),
        ]);
        let query = CatalogQuery::new(&filters, &default_sections(), SortDescriptor::NAME_ASC, "");
        assert_eq!(query.apply(&fleet()).len(), 3);
    }

    #[test]
    fn newest_first_orders_by_timestamp() {
        let query = CatalogQuery {
            sort: SortDescriptor::NEWEST_FIRST,
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&query.apply(&fleet())), vec![1, 3, 2]);
    }

    #[test]
    fn ties_fall_back_to_id() {
        let vehicles = vec![
            vehicle(9, "Twin", "Manual", &[], 50),
            vehicle(4, "twin", "Manual", &[], 50),
        ];
        for sort in SortDescriptor::ALL {
            let query = CatalogQuery {
                sort,
                ..CatalogQuery::default()
            };
            assert_eq!(ids(&query.apply(&vehicles)), vec![4, 9]);
        }
    }

    #[test]
    fn search_tokens_must_all_match() {
        let query = CatalogQuery {
            search: "mus tng".to_string(),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&query.apply(&fleet())), vec![1]);

        let query = CatalogQuery {
            search: "mus zzz".to_string(),
            ..CatalogQuery::default()
        };
        assert!(query.apply(&fleet()).is_empty());
    }
}
