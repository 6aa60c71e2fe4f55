//! Card table renderer.
//!
//! One row per vehicle: NAME, TYPE (as a chip), ADDED and a description
//! summary filling the rest of the line.

use super::tag::{tag, tag_width};
use crate::ui::helpers::{self, pad, position_cursor, text_width};
use crate::ui::layout::{ADDED_COLUMN_WIDTH, NAME_COLUMN_WIDTH, TYPE_COLUMN_WIDTH};
use crate::ui::palette;
use crate::ui::viewmodel::DisplayItem;

/// Renders the column headings at `row` and returns the next free row.
pub fn render_table_headers(row: usize, cols: usize) -> usize {
    let fixed = NAME_COLUMN_WIDTH + TYPE_COLUMN_WIDTH + ADDED_COLUMN_WIDTH;

    position_cursor(row, 1);
    print!("{}", palette::bold());
    print!("{}", palette::fg(palette::HEADER_FG));
    print!(
        "{}{}{}{}",
        pad("NAME", NAME_COLUMN_WIDTH),
        pad("TYPE", TYPE_COLUMN_WIDTH),
        pad("ADDED", ADDED_COLUMN_WIDTH),
        pad("SUMMARY", cols.saturating_sub(fixed))
    );
    print!("{}", palette::reset());
    row + 1
}

/// Renders every item starting at `row` and returns the next free row.
pub fn render_table_rows(row: usize, items: &[DisplayItem], cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, cols);
    }
    current_row
}

/// Renders one card row, padded to the full width so the selection
/// background covers the line.
fn render_table_row(row: usize, item: &DisplayItem, cols: usize) -> usize {
    let row_style = if item.is_selected {
        format!(
            "{}{}",
            palette::fg(palette::SELECTION_FG),
            palette::bg(palette::SELECTION_BG)
        )
    } else {
        palette::fg(palette::TEXT)
    };

    position_cursor(row, 1);
    print!("{row_style}");

    if item.is_selected {
        print!("{}", palette::bold());
    }
    helpers::render_highlighted_text(&item.name, &item.highlight_ranges, item.is_selected);
    print!("{}", " ".repeat(NAME_COLUMN_WIDTH.saturating_sub(text_width(&item.name))));

    if item.car_type.is_empty() {
        print!("{}", " ".repeat(TYPE_COLUMN_WIDTH));
    } else {
        print!("{}", tag(&item.car_type, item.tag));
        print!("{row_style}");
        print!(
            "{}",
            " ".repeat(TYPE_COLUMN_WIDTH.saturating_sub(tag_width(&item.car_type)))
        );
    }

    if !item.is_selected {
        print!("{}", palette::fg(palette::TEXT_DIM));
    }
    print!("{}", pad(&item.added, ADDED_COLUMN_WIDTH));

    let fixed = NAME_COLUMN_WIDTH + TYPE_COLUMN_WIDTH + ADDED_COLUMN_WIDTH;
    print!("{}", pad(&item.summary, cols.saturating_sub(fixed)));

    print!("{}", palette::reset());
    row + 1
}
