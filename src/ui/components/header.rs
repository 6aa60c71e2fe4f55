//! Header component renderer.
//!
//! Renders the title bar: the active filter badge on the left, the title
//! centered, and the sort label on the right.

use crate::ui::helpers::{position_cursor, text_width};
use crate::ui::palette;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header at `row` and returns the next free row.
///
/// # Layout
///
/// ```text
///  Filters (2)           DriveSphere (4/9)           Sort: Name (A-Z)
/// ```
///
/// The side labels are dropped when the pane is too narrow to fit them
/// next to the title.
pub fn render_header(row: usize, header: &HeaderInfo, cols: usize) -> usize {
    let title_len = text_width(&header.title);
    let padding = cols.saturating_sub(title_len) / 2;

    position_cursor(row, 1);
    print!("{}", palette::bold());
    print!("{}", palette::fg(palette::HEADER_FG));
    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));
    print!("{}", palette::reset());

    let sort_len = text_width(&header.sort_label);
    if padding > sort_len + 2 {
        position_cursor(row, cols.saturating_sub(sort_len));
        print!("{}", palette::fg(palette::TEXT_DIM));
        print!("{}", header.sort_label);
        print!("{}", palette::reset());
    }

    if let Some(badge) = &header.filter_badge {
        if padding > text_width(badge) + 2 {
            position_cursor(row, 2);
            print!("{}", palette::bold());
            print!("{}", palette::fg(palette::ACCENT));
            print!("{badge}");
            print!("{}", palette::reset());
        }
    }

    row + 1
}
