//! Add-vehicle form renderer.

use crate::app::form::FormField;
use crate::ui::helpers::{draw_box, pad, position_cursor, print_in_box, text_width};
use crate::ui::layout::{self, Rect};
use crate::ui::palette;
use crate::ui::viewmodel::{DropdownView, FormView};

/// Renders the add-vehicle form and, on top of it, an open dropdown.
pub fn render_form(view: &FormView, rows: usize, cols: usize) {
    let rect = layout::form_rect(rows, cols);
    draw_box(rect, palette::ACCENT, Some("Add Vehicle"));

    render_input(rect, view, FormField::Name, &view.name, view.name_error, "");
    render_input(
        rect,
        view,
        FormField::Description,
        &view.description,
        view.description_error,
        &view.description_counter,
    );
    render_input(rect, view, FormField::ImageUrl, &view.image_url, None, "");
    render_input(
        rect,
        view,
        FormField::CarType,
        view.car_type.as_deref().unwrap_or("Select"),
        view.car_type_error,
        "",
    );
    render_input(
        rect,
        view,
        FormField::Specifications,
        &view.specifications_summary,
        None,
        "",
    );
    render_submit(rect, view);

    if let Some(dropdown) = &view.dropdown {
        render_dropdown(rect, dropdown);
    }
}

/// Label row plus a one-line value box.
///
/// The label carries a `*` for required fields, the validation error
/// follows it and `trailing` is right-aligned on the same row.
fn render_input(
    rect: Rect,
    view: &FormView,
    field: FormField,
    value: &str,
    error: Option<&str>,
    trailing: &str,
) {
    let label_row = rect.row + layout::form_label_offset(field);
    let focused = view.focus == field;
    let inner = rect.inner_width().saturating_sub(2);

    let mut label = field.label().to_string();
    if field.is_required() {
        label.push_str(" *");
    }
    let label_style = if focused {
        format!("{}{}", palette::bold(), palette::fg(palette::ACCENT))
    } else {
        palette::fg(palette::HEADER_FG)
    };
    print_in_box(rect, label_row, &label_style, &label);

    if let Some(error) = error {
        let col = rect.col + 2 + text_width(&label) + 2;
        position_cursor(label_row, col);
        print!(
            "{}{}{error}{}",
            palette::bg(palette::OVERLAY_BG),
            palette::fg(palette::ERROR),
            palette::reset()
        );
    }

    if !trailing.is_empty() {
        let col = (rect.col + 2 + inner).saturating_sub(text_width(trailing));
        position_cursor(label_row, col);
        print!(
            "{}{}{trailing}{}",
            palette::bg(palette::OVERLAY_BG),
            palette::fg(palette::TEXT_DIM),
            palette::reset()
        );
    }

    let value_row = layout::form_field_row(rect, field);
    let caret = if focused && field.dropdown().is_none() {
        "_"
    } else {
        ""
    };
    let marker = if field.dropdown().is_some() { " ▾" } else { "" };
    let width = inner.saturating_sub(text_width(marker));
    let text = if value.is_empty() && !focused {
        String::new()
    } else {
        format!("{value}{caret}")
    };

    position_cursor(value_row, rect.col + 2);
    let border = if error.is_some() {
        palette::ERROR
    } else if focused {
        palette::ACCENT
    } else {
        palette::BORDER
    };
    print!(
        "{}{}▏{}{}{}{}{}",
        palette::bg(palette::OVERLAY_BG),
        palette::fg(border),
        palette::fg(palette::TEXT),
        pad(&text, width.saturating_sub(1)),
        palette::fg(palette::TEXT_DIM),
        marker,
        palette::reset()
    );
}

fn render_submit(rect: Rect, view: &FormView) {
    let row = layout::form_field_row(rect, FormField::Submit);
    let label = if view.submitting {
        " Submitting... "
    } else {
        " Submit "
    };
    let col = (rect.col + rect.width).saturating_sub(text_width(label) + 3);

    position_cursor(row, col);
    if view.focus == FormField::Submit && !view.submitting {
        print!(
            "{}{}{}[{label}]{}",
            palette::bold(),
            palette::fg(palette::SELECTION_FG),
            palette::bg(palette::SELECTION_BG),
            palette::reset()
        );
    } else {
        print!(
            "{}{}[{label}]{}",
            palette::bg(palette::OVERLAY_BG),
            palette::fg(palette::TEXT_DIM),
            palette::reset()
        );
    }

    print_in_box(
        rect,
        row,
        &palette::fg(palette::TEXT_DIM),
        "Tab: next  Enter: open/submit  Esc: close",
    );
}

/// Car types render as radio buttons, specifications as checkboxes.
fn render_dropdown(form: Rect, dropdown: &DropdownView) {
    let rect = layout::dropdown_rect(form, dropdown.field, dropdown.options.len());
    draw_box(rect, palette::ACCENT, None);

    let inner = rect.inner_width();
    for (index, option) in dropdown.options.iter().enumerate() {
        let row = rect.row + 1 + index;
        if row >= rect.bottom() {
            break;
        }

        let mark = match (dropdown.multi, option.checked) {
            (true, true) => "[x]",
            (true, false) => "[ ]",
            (false, true) => "(•)",
            (false, false) => "( )",
        };

        position_cursor(row, rect.col + 1);
        if option.is_cursor {
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
        print!(
            "{}{}",
            pad(&format!(" {mark} {}", option.label), inner),
            palette::reset()
        );
    }
}
