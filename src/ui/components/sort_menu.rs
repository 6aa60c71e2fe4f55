//! Sort menu renderer.

use crate::ui::helpers::{draw_box, pad, position_cursor};
use crate::ui::layout;
use crate::ui::palette;
use crate::ui::viewmodel::SortMenuView;

/// Renders the sort menu in the top-right corner.
///
/// The active descriptor carries a check mark; the cursor row is drawn
/// with the selection colors.
pub fn render_sort_menu(view: &SortMenuView, cols: usize) {
    let rect = layout::sort_menu_rect(cols);
    draw_box(rect, palette::ACCENT, None);

    let inner = rect.inner_width();
    for (index, item) in view.items.iter().enumerate() {
        let row = rect.row + 1 + index;
        if row >= rect.bottom() {
            break;
        }

        position_cursor(row, rect.col + 1);
        if item.is_cursor {
            print!(
                "{}{}",
                palette::fg(palette::SELECTION_FG),
                palette::bg(palette::SELECTION_BG)
            );
        } else {
            print!(
                "{}{}",
                palette::fg(palette::TEXT),
                palette::bg(palette::OVERLAY_BG)
            );
        }

        let check = if item.is_active { "✓" } else { " " };
        print!("{}", pad(&format!(" {check} {}", item.label), inner));
        print!("{}", palette::reset());
    }
}
