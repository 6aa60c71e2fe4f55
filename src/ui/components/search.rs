//! Search bar component renderer.

use crate::ui::helpers::{clip, position_cursor, text_width};
use crate::ui::palette;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the 3-line search box at `row` and returns the next free row.
///
/// ```text
/// [margin] ┌─────────────┐ [margin]
/// [margin] │ Search: ... │ [margin]
/// [margin] └─────────────┘ [margin]
/// ```
///
/// The border uses the accent color while the query is being typed and
/// the border color once focus moved to the results.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.is_typing {
        palette::ACCENT
    } else {
        palette::BORDER
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", palette::fg(border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", palette::reset());

    let caret = if search.is_typing { "_" } else { "" };
    let search_text = format!(" Search: {}{caret}", search.query);
    let search_text = clip(&search_text, inner_width);
    let padding = inner_width.saturating_sub(text_width(search_text));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", palette::fg(border));
    print!("│");
    print!("{}", palette::fg(palette::TEXT));
    print!("{search_text}");
    print!("{}", " ".repeat(padding));
    print!("{}", palette::fg(border));
    print!("│");
    print!("{}", palette::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", palette::fg(border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", palette::reset());

    row + 3
}
