//! Selection-state engine shared by the filter dialog and the sort menu.
//!
//! Everything here is synchronous and I/O free. The host constructs the
//! engines, forwards user input to them, and reacts to the callbacks (or the
//! returned values) when a selection is committed.
//!
//! - [`filter`]: draft/applied facet selection with per-section visibility
//! - [`sort`]: the closed set of sort descriptors and the active one
//! - [`dismiss`]: RAII listeners that let popovers close on Escape or
//!   outside clicks

pub mod dismiss;
pub mod filter;
pub mod sort;

pub use dismiss::{DismissGuard, DismissTrigger, ListenerRegistry, Popover};
pub use filter::{
    FilterOption, FilterSection, FilterSelectionEngine, SelectionMode, SelectionState,
    VisibilityState,
};
pub use sort::{SortDescriptor, SortDirection, SortField, SortSelectionEngine};
