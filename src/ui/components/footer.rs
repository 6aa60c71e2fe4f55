//! Footer component renderer.
//!
//! Key hints on one row and the worker status line on the row below.

use crate::ui::helpers::{clip, position_cursor, text_width};
use crate::ui::palette;
use crate::ui::viewmodel::{FooterInfo, StatusInfo};

/// Renders the key hints centered on `row`, truncated to the pane width.
pub fn render_footer(row: usize, footer: &FooterInfo, cols: usize) -> usize {
    let help_text = clip(&footer.keybindings, cols);
    let text_len = text_width(help_text);
    let padding = cols.saturating_sub(text_len) / 2;

    position_cursor(row, 1);
    print!("{}", palette::fg(palette::TEXT_DIM));
    print!("{}", " ".repeat(padding));
    print!("{help_text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", palette::reset());
    row + 1
}

/// Renders the last worker outcome, red for errors and green otherwise.
pub fn render_status(row: usize, status: &StatusInfo, cols: usize) -> usize {
    let color = if status.is_error {
        palette::ERROR
    } else {
        palette::SUCCESS
    };

    position_cursor(row, 1);
    print!("{}", palette::fg(color));
    print!(" {}", clip(&status.text, cols.saturating_sub(1)));
    print!("{}", palette::reset());
    row + 1
}
