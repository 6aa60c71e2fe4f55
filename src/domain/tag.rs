//! Visual variants for tag chips.

/// Closed set of chip styles used across the catalog views.
///
/// Rendering matches on this exhaustively, so adding a variant forces every
/// style table to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagVariant {
    /// Specification entry in the details view.
    Specification,
    /// Safety feature entry.
    Safety,
    /// Unselected filter chip.
    Filter,
    /// Selected filter chip.
    FilterSelected,
    /// Manual transmission badge.
    Manual,
    /// Automatic transmission badge.
    Automatic,
    /// Bordered chip used for specification lists.
    Outline,
}

impl TagVariant {
    /// Chip variant for a car type string.
    ///
    /// Only "manual" (any case) maps to [`TagVariant::Manual`]; everything
    /// else, including unknown types, renders as automatic.
    #[must_use]
    pub fn for_car_type(car_type: &str) -> Self {
        if car_type.eq_ignore_ascii_case("manual") {
            Self::Manual
        } else {
            Self::Automatic
        }
    }

    /// Filter chip variant for an option's selected state.
    #[must_use]
    pub const fn for_filter(selected: bool) -> Self {
        if selected {
            Self::FilterSelected
        } else {
            Self::Filter
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_is_case_insensitive() {
        assert_eq!(TagVariant::for_car_type("MANUAL"), TagVariant::Manual);
        assert_eq!(TagVariant::for_car_type("Manual"), TagVariant::Manual);
    }

    #[test]
    fn unknown_car_type_renders_automatic() {
        assert_eq!(TagVariant::for_car_type("hybrid"), TagVariant::Automatic);
        assert_eq!(TagVariant::for_car_type(""), TagVariant::Automatic);
    }

    #[test]
    fn filter_variant_tracks_selection() {
        assert_eq!(TagVariant::for_filter(true), TagVariant::FilterSelected);
        assert_eq!(TagVariant::for_filter(false), TagVariant::Filter);
    }
}
