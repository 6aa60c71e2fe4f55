//! Input mode state machine types.
//!
//! The active [`InputMode`] decides how the plugin maps keys to events and
//! which footer hints are shown. It is derived from the open overlay and the
//! search focus rather than stored separately, so the two can never disagree.

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Keys edit the query. Enter moves focus to the results.
    Typing,

    /// j/k move through results, Enter opens details, `/` edits the query.
    Navigating,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Browsing the card list.
    ///
    /// j/k (navigate), Enter (details), / (search), f (filters), s (sort),
    /// a (add), d (delete), q (quit).
    Normal,

    /// Search bar visible with the given focus.
    Search(SearchFocus),

    /// Details modal open.
    Details,

    /// Details modal asking to confirm deletion.
    ConfirmDelete,

    /// Filter dialog open.
    Filter,

    /// Sort menu open.
    Sort,

    /// Add-vehicle form open.
    Form,
}

impl InputMode {
    /// Whether an overlay currently captures input.
    #[must_use]
    pub const fn is_overlay(self) -> bool {
        !matches!(self, Self::Normal | Self::Search(_))
    }
}
