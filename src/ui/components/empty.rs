//! Empty state component renderer.

use crate::ui::helpers::{position_cursor, text_width};
use crate::ui::palette;
use crate::ui::viewmodel::EmptyState;

/// Renders a centered two-line message starting at `row`.
///
/// Shown in place of the card list while the catalog loads, when it is
/// empty, and when nothing matches the filters or search.
pub fn render_empty_state(row: usize, empty: &EmptyState, cols: usize) {
    let msg_len = text_width(&empty.message);
    let msg_padding = cols.saturating_sub(msg_len) / 2;

    position_cursor(row, 1);
    print!("{}", palette::fg(palette::ACCENT));
    print!("{}", " ".repeat(msg_padding));
    print!("{}", empty.message);
    print!("{}", " ".repeat(cols.saturating_sub(msg_padding + msg_len)));
    print!("{}", palette::reset());

    let sub_len = text_width(&empty.subtitle);
    let sub_padding = cols.saturating_sub(sub_len) / 2;

    position_cursor(row + 1, 1);
    print!("{}", palette::dim());
    print!("{}", palette::fg(palette::TEXT_DIM));
    print!("{}", " ".repeat(sub_padding));
    print!("{}", empty.subtitle);
    print!("{}", " ".repeat(cols.saturating_sub(sub_padding + sub_len)));
    print!("{}", palette::reset());
}
