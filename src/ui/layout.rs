//! Screen geometry shared by rendering and mouse hit-testing.
//!
//! Every position is 1-indexed, matching the cursor escapes used by the
//! components and the click coordinates delivered by the plugin shim.

use crate::app::form::FormField;

/// First row of the header bar. Row 1 stays blank.
pub const HEADER_ROW: usize = 2;

/// Rows taken by the search box when it is visible.
pub const SEARCH_BAR_HEIGHT: usize = 3;

/// Card list columns. The summary takes whatever width is left.
pub const NAME_COLUMN_WIDTH: usize = 28;
pub const TYPE_COLUMN_WIDTH: usize = 12;
pub const ADDED_COLUMN_WIDTH: usize = 21;

pub const SORT_MENU_WIDTH: usize = 22;
pub const SORT_MENU_HEIGHT: usize = 6;

const FILTER_DIALOG_MAX_WIDTH: usize = 60;
const DETAILS_MAX_WIDTH: usize = 72;
const DETAILS_MAX_HEIGHT: usize = 20;
const FORM_MAX_WIDTH: usize = 70;
pub const FORM_HEIGHT: usize = 20;

/// A rectangular screen region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub row: usize,
    pub col: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    #[must_use]
    pub const fn new(row: usize, col: usize, width: usize, height: usize) -> Self {
        Self {
            row,
            col,
            width,
            height,
        }
    }

    /// A `width` x `height` rect centered in a `rows` x `cols` screen.
    #[must_use]
    pub fn centered(rows: usize, cols: usize, width: usize, height: usize) -> Self {
        let width = width.min(cols);
        let height = height.min(rows);
        Self {
            row: rows.saturating_sub(height) / 2 + 1,
            col: cols.saturating_sub(width) / 2 + 1,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.row
            && row < self.row + self.height
            && col >= self.col
            && col < self.col + self.width
    }

    /// Last row inside the rect.
    #[must_use]
    pub const fn bottom(&self) -> usize {
        (self.row + self.height).saturating_sub(1)
    }

    /// Width between the left and right borders.
    #[must_use]
    pub const fn inner_width(&self) -> usize {
        self.width.saturating_sub(2)
    }
}

/// Row of the column headings above the card list.
#[must_use]
pub const fn table_header_row(search_visible: bool) -> usize {
    if search_visible {
        HEADER_ROW + 2 + SEARCH_BAR_HEIGHT
    } else {
        HEADER_ROW + 2
    }
}

/// Row of the first card in the list.
#[must_use]
pub const fn list_first_row(search_visible: bool) -> usize {
    table_header_row(search_visible) + 1
}

/// Number of cards that fit between the table heading and the footer.
///
/// The bottom three rows hold the footer border, the key hints and the
/// status line.
#[must_use]
pub const fn list_capacity(rows: usize, search_visible: bool) -> usize {
    rows.saturating_sub(list_first_row(search_visible) + 2)
}

/// The sort menu, anchored to the top-right corner under the header.
#[must_use]
pub fn sort_menu_rect(cols: usize) -> Rect {
    let width = SORT_MENU_WIDTH.min(cols);
    Rect::new(
        HEADER_ROW + 1,
        cols.saturating_sub(width + 1).max(1),
        width,
        SORT_MENU_HEIGHT,
    )
}

/// The filter dialog holding `lines` rows of sections and options.
///
/// Adds the borders, the title and the key hint line.
#[must_use]
pub fn filter_dialog_rect(rows: usize, cols: usize, lines: usize) -> Rect {
    let width = FILTER_DIALOG_MAX_WIDTH.min(cols.saturating_sub(4));
    let height = (lines + 4).min(rows.saturating_sub(2));
    Rect::centered(rows, cols, width, height)
}

/// Rows of the filter dialog available to sections and options.
#[must_use]
pub const fn filter_dialog_capacity(dialog: Rect) -> usize {
    dialog.height.saturating_sub(4)
}

/// Row of the first section or option line in the filter dialog.
#[must_use]
pub const fn filter_dialog_first_row(dialog: Rect) -> usize {
    dialog.row + 2
}

/// First line shown in a list of `capacity` rows so `cursor` stays visible.
#[must_use]
pub const fn scroll_offset(cursor: usize, capacity: usize) -> usize {
    if capacity == 0 {
        0
    } else {
        cursor.saturating_sub(capacity - 1)
    }
}

#[must_use]
pub fn details_rect(rows: usize, cols: usize) -> Rect {
    let width = DETAILS_MAX_WIDTH.min(cols.saturating_sub(4));
    let height = DETAILS_MAX_HEIGHT.min(rows.saturating_sub(2));
    Rect::centered(rows, cols, width, height)
}

#[must_use]
pub fn form_rect(rows: usize, cols: usize) -> Rect {
    let width = FORM_MAX_WIDTH.min(cols.saturating_sub(4));
    Rect::centered(rows, cols, width, FORM_HEIGHT)
}

/// Offset of a field's label row from the top border of the form.
#[must_use]
pub const fn form_label_offset(field: FormField) -> usize {
    match field {
        FormField::Name => 3,
        FormField::Description => 6,
        FormField::ImageUrl => 9,
        FormField::CarType => 12,
        FormField::Specifications => 15,
        FormField::Submit => 18,
    }
}

/// Absolute row where a field's value is drawn.
///
/// Submit has no label, so its button sits on the label row.
#[must_use]
pub const fn form_field_row(form: Rect, field: FormField) -> usize {
    match field {
        FormField::Submit => form.row + form_label_offset(field),
        _ => form.row + form_label_offset(field) + 1,
    }
}

/// The dropdown list opened under `field`, holding `count` options.
#[must_use]
pub fn dropdown_rect(form: Rect, field: FormField, count: usize) -> Rect {
    Rect::new(
        form_field_row(form, field) + 1,
        form.col + 2,
        form.width.saturating_sub(4),
        count + 2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::new(3, 10, 5, 2);
        assert!(rect.contains(3, 10));
        assert!(rect.contains(4, 14));
        assert!(!rect.contains(5, 10));
        assert!(!rect.contains(3, 15));
        assert!(!rect.contains(2, 12));
    }

    #[test]
    fn centered_rect_fits_small_screens() {
        let rect = Rect::centered(10, 30, 60, 20);
        assert_eq!(rect, Rect::new(1, 1, 30, 10));
    }

    #[test]
    fn sort_menu_hugs_right_edge() {
        let rect = sort_menu_rect(80);
        assert_eq!(rect.col, 57);
        assert_eq!(rect.width, SORT_MENU_WIDTH);
        assert_eq!(rect.row, 3);
    }

    #[test]
    fn list_shrinks_with_search_bar() {
        assert_eq!(list_first_row(false), 5);
        assert_eq!(list_first_row(true), 8);
        assert_eq!(list_capacity(24, false), 17);
        assert_eq!(list_capacity(24, true), 14);
    }

    #[test]
    fn dropdown_opens_below_field_value() {
        let form = form_rect(30, 80);
        let dropdown = dropdown_rect(form, FormField::CarType, 2);
        assert_eq!(dropdown.row, form.row + 14);
        assert_eq!(dropdown.height, 4);
    }
}
