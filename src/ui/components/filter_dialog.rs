//! Filter dialog renderer.

use super::tag::tag;
use crate::ui::helpers::{draw_box, position_cursor, print_in_box};
use crate::ui::layout;
use crate::ui::palette;
use crate::ui::viewmodel::{FilterDialogView, FilterRowView};

/// Renders the filter dialog centered in the pane.
///
/// Section headers show an expand marker and the number of values picked
/// in the draft; options render as filter chips. The list scrolls to keep
/// the cursor row visible.
pub fn render_filter_dialog(view: &FilterDialogView, rows: usize, cols: usize) {
    let rect = layout::filter_dialog_rect(rows, cols, view.rows.len());
    draw_box(
        rect,
        palette::ACCENT,
        Some(&format!("Filters · {}", view.mode_hint)),
    );

    let capacity = layout::filter_dialog_capacity(rect);
    let cursor = view
        .rows
        .iter()
        .position(|row| match row {
            FilterRowView::Section { is_cursor, .. } | FilterRowView::Option { is_cursor, .. } => {
                *is_cursor
            }
        })
        .unwrap_or(0);
    let offset = layout::scroll_offset(cursor, capacity);
    let first_row = layout::filter_dialog_first_row(rect);
    let background = palette::bg(palette::OVERLAY_BG);

    for (line, row_view) in view.rows.iter().skip(offset).take(capacity).enumerate() {
        let row = first_row + line;
        position_cursor(row, rect.col + 1);

        match row_view {
            FilterRowView::Section {
                title,
                expanded,
                selected_count,
                is_cursor,
            } => {
                print!("{background}{}", cursor_marker(*is_cursor));
                let marker = if *expanded { "▾" } else { "▸" };
                let count = if *selected_count > 0 {
                    format!(" ({selected_count})")
                } else {
                    String::new()
                };
                print!(
                    "{}{}{marker} {title}{}{}",
                    palette::bold(),
                    palette::fg(palette::HEADER_FG),
                    palette::fg(palette::ACCENT),
                    count
                );
            }
            FilterRowView::Option {
                label,
                tag: variant,
                is_cursor,
            } => {
                print!("{background}{}   ", cursor_marker(*is_cursor));
                print!("{}", tag(label, *variant));
            }
        }
        print!("{}", palette::reset());
    }

    let hint = if view.draft_count > 0 {
        format!(
            "Space: toggle  r: reset  a: apply ({})  Esc: cancel",
            view.draft_count
        )
    } else {
        "Space: toggle  r: reset  a: apply  Esc: cancel".to_string()
    };
    print_in_box(
        rect,
        rect.bottom().saturating_sub(1),
        &palette::fg(palette::TEXT_DIM),
        &hint,
    );
}

fn cursor_marker(is_cursor: bool) -> String {
    if is_cursor {
        format!("{}›", palette::fg(palette::ACCENT))
    } else {
        " ".to_string()
    }
}
