//! Details modal renderer.

use super::tag::{tag, tag_width};
use crate::domain::TagVariant;
use crate::ui::helpers::{draw_box, position_cursor, print_in_box, wrap_text};
use crate::ui::layout::{self, Rect};
use crate::ui::palette;
use crate::ui::viewmodel::DetailsView;

/// Renders the details modal centered in the pane.
///
/// ```text
/// ┌ Mustang GT ─────────────────────────────┐
/// │                                         │
/// │  Manual   Updated: Mar 05, 2024 | 03:04 │
/// │                                         │
/// │  Description                            │
/// │  ...wrapped text...                     │
/// │                                         │
/// │  Specifications                         │
/// │  [Seats] [Mileage]                      │
/// │                                         │
/// │  d: delete  Esc: close                  │
/// └─────────────────────────────────────────┘
/// ```
///
/// Content that does not fit is cut off above the hint row.
pub fn render_details(view: &DetailsView, rows: usize, cols: usize) {
    let rect = layout::details_rect(rows, cols);
    let border = if view.confirm_delete {
        palette::ERROR
    } else {
        palette::ACCENT
    };
    draw_box(rect, border, Some(&view.name));

    let last_content_row = rect.bottom().saturating_sub(2);
    let text_width = rect.inner_width().saturating_sub(2);
    let heading = format!("{}{}", palette::bold(), palette::fg(palette::HEADER_FG));
    let body = palette::fg(palette::TEXT);
    let mut row = rect.row + 2;

    position_cursor(row, rect.col + 2);
    if !view.car_type.is_empty() {
        print!("{}  ", tag(&view.car_type, view.tag));
    }
    print!(
        "{}{}Updated: {}{}",
        palette::bg(palette::OVERLAY_BG),
        palette::fg(palette::TEXT_DIM),
        view.updated,
        palette::reset()
    );
    row += 2;

    if !view.description.is_empty() && row < last_content_row {
        print_in_box(rect, row, &heading, "Description");
        row += 1;
        for line in wrap_text(&view.description, text_width) {
            if row >= last_content_row {
                break;
            }
            print_in_box(rect, row, &body, &line);
            row += 1;
        }
        row += 1;
    }

    if !view.specifications.is_empty() && row < last_content_row {
        print_in_box(rect, row, &heading, "Specifications");
        row += 1;
        row = render_chip_rows(rect, row, last_content_row, &view.specifications);
        row += 1;
    }

    if let Some(url) = &view.image_url {
        if row < last_content_row {
            print_in_box(rect, row, &body, &format!("Image: {url}"));
        }
    }

    let hint_row = rect.bottom().saturating_sub(1);
    if view.confirm_delete {
        print_in_box(
            rect,
            hint_row,
            &format!("{}{}", palette::bold(), palette::fg(palette::ERROR)),
            &format!("Delete {}? y: delete  n: cancel", view.name),
        );
    } else {
        print_in_box(
            rect,
            hint_row,
            &palette::fg(palette::TEXT_DIM),
            "d: delete  Esc: close",
        );
    }
}

/// Lays outlined chips left to right, wrapping at the box edge.
///
/// Returns the row after the last chip row.
fn render_chip_rows(rect: Rect, mut row: usize, last_row: usize, labels: &[String]) -> usize {
    let available = rect.inner_width().saturating_sub(2);
    let mut used = 0;

    for label in labels {
        let width = tag_width(label) + 1;
        if used > 0 && used + width > available {
            row += 1;
            used = 0;
        }
        if row >= last_row {
            return row;
        }
        position_cursor(row, rect.col + 2 + used);
        print!("{}", tag(label, TagVariant::Outline));
        used += width;
    }
    row + 1
}
