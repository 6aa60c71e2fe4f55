//! Scoped dismissal listeners for popovers.
//!
//! Opening a popover arms a listener in the [`ListenerRegistry`] and hands
//! back a [`DismissGuard`]. The listener stays armed exactly as long as the
//! guard lives, so a popover that is closed by key, by outside click, or by
//! its owning state being dropped always releases it.
//!
//! ```rust
//! use drivesphere::engine::{ListenerRegistry, Popover};
//!
//! let registry = ListenerRegistry::new();
//! let guard = registry.arm(Popover::SortMenu);
//! assert_eq!(registry.topmost(), Some(Popover::SortMenu));
//!
//! drop(guard);
//! assert_eq!(registry.armed_count(), 0);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Overlays that close on Escape or on a click outside their frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Popover {
    SortMenu,
    FilterDialog,
    Details,
    CarTypeDropdown,
    SpecificationsDropdown,
}

/// What asked a popover to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissTrigger {
    Escape,
    OutsideClick,
}

#[derive(Debug, Default)]
struct ListenerTable {
    next_id: u64,
    /// Armed listeners in arming order; the last one is on top.
    armed: Vec<(u64, Popover)>,
}

/// Tracks which popovers currently listen for dismissal.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    table: Rc<RefCell<ListenerTable>>,
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a listener for `popover`. Dropping the guard disarms it.
    pub fn arm(&self, popover: Popover) -> DismissGuard {
        let mut table = self.table.borrow_mut();
        let id = table.next_id;
        table.next_id += 1;
        table.armed.push((id, popover));

        tracing::trace!(?popover, id, armed = table.armed.len(), "dismiss listener armed");

        DismissGuard {
            id,
            popover,
            table: Rc::downgrade(&self.table),
        }
    }

    #[must_use]
    pub fn armed_count(&self) -> usize {
        self.table.borrow().armed.len()
    }

    #[must_use]
    pub fn is_armed(&self, popover: Popover) -> bool {
        self.table
            .borrow()
            .armed
            .iter()
            .any(|(_, armed)| *armed == popover)
    }

    /// The most recently armed popover still open.
    #[must_use]
    pub fn topmost(&self) -> Option<Popover> {
        self.table.borrow().armed.last().map(|(_, popover)| *popover)
    }
}

/// Keeps a dismissal listener armed until dropped.
#[derive(Debug)]
#[must_use = "dropping the guard disarms the listener immediately"]
pub struct DismissGuard {
    id: u64,
    popover: Popover,
    table: Weak<RefCell<ListenerTable>>,
}

impl DismissGuard {
    #[must_use]
    pub const fn popover(&self) -> Popover {
        self.popover
    }
}

impl Drop for DismissGuard {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            let mut table = table.borrow_mut();
            table.armed.retain(|(id, _)| *id != self.id);
            tracing::trace!(
                popover = ?self.popover,
                id = self.id,
                armed = table.armed.len(),
                "dismiss listener released"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arm_then_drop_leaves_nothing_armed() {
        let registry = ListenerRegistry::new();
        let guard = registry.arm(Popover::FilterDialog);
        assert_eq!(registry.armed_count(), 1);
        assert!(registry.is_armed(Popover::FilterDialog));

        drop(guard);
        assert_eq!(registry.armed_count(), 0);
        assert!(!registry.is_armed(Popover::FilterDialog));
    }

    #[test]
    fn topmost_follows_arming_order() {
        let registry = ListenerRegistry::new();
        let _details = registry.arm(Popover::Details);
        let dropdown = registry.arm(Popover::CarTypeDropdown);
        assert_eq!(registry.topmost(), Some(Popover::CarTypeDropdown));

        drop(dropdown);
        assert_eq!(registry.topmost(), Some(Popover::Details));
    }

    #[test]
    fn dropping_owner_releases_every_listener() {
        struct Owner {
            _menu: DismissGuard,
            _dialog: DismissGuard,
        }

        let registry = ListenerRegistry::new();
        let owner = Owner {
            _menu: registry.arm(Popover::SortMenu),
            _dialog: registry.arm(Popover::FilterDialog),
        };
        assert_eq!(registry.armed_count(), 2);

        drop(owner);
        assert_eq!(registry.armed_count(), 0);
        assert_eq!(registry.topmost(), None);
    }

    #[test]
    fn guard_outliving_registry_is_harmless() {
        let registry = ListenerRegistry::new();
        let guard = registry.arm(Popover::SortMenu);
        drop(registry);
        assert_eq!(guard.popover(), Popover::SortMenu);
        drop(guard);
    }

    #[test]
    fn same_popover_armed_twice_is_released_per_guard() {
        let registry = ListenerRegistry::new();
        let first = registry.arm(Popover::SortMenu);
        let second = registry.arm(Popover::SortMenu);

        drop(first);
        assert!(registry.is_armed(Popover::SortMenu));
        drop(second);
        assert!(!registry.is_armed(Popover::SortMenu));
    }
}
