//! Shared rendering utilities.
//!
//! Cursor positioning, padding by character count, fuzzy match
//! highlighting and the framed boxes every overlay is drawn in. All text
//! measurement uses character counts, never byte lengths.

use crate::ui::layout::Rect;
use crate::ui::palette;

/// Moves the cursor to a 1-indexed `row` and `col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `width` characters.
#[must_use]
pub fn clip(text: &str, width: usize) -> &str {
    match text.char_indices().nth(width) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// `text` clipped or right-padded with spaces to exactly `width` characters.
///
/// ```
/// use drivesphere::ui::helpers::pad;
///
/// assert_eq!(pad("Civic", 8), "Civic   ");
/// assert_eq!(pad("Mustang", 4), "Must");
/// ```
#[must_use]
pub fn pad(text: &str, width: usize) -> String {
    let clipped = clip(text, width);
    format!("{clipped}{}", " ".repeat(width - text_width(clipped)))
}

/// Word-wraps `text` into lines of at most `width` characters.
///
/// Words longer than a line are split.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![];
    }

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word = word;
            while text_width(word) > width {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                let head = clip(word, width);
                lines.push(head.to_string());
                word = &word[head.len()..];
            }
            if word.is_empty() {
                continue;
            }
            let needed = if line.is_empty() {
                text_width(word)
            } else {
                text_width(&line) + 1 + text_width(word)
            };
            if needed > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}

/// Prints `text` with the character `ranges` highlighted.
///
/// Ranges are `(start, end)` character indices with an exclusive end and
/// are clipped to the text. Selected rows skip highlighting so the
/// selection background stays uniform.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], is_selected: bool) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        let normal: String = chars[current_pos..start].iter().collect();
        print!("{normal}");

        let highlighted: String = chars[start..end].iter().collect();
        print!(
            "{}{}{highlighted}{}{}",
            palette::fg(palette::MATCH_FG),
            palette::bg(palette::MATCH_BG),
            palette::reset(),
            palette::fg(palette::TEXT),
        );

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Draws a bordered box filled with the overlay background.
///
/// `title` is set into the top border, left-aligned.
pub fn draw_box(rect: Rect, border: &str, title: Option<&str>) {
    if rect.width < 2 || rect.height < 2 {
        return;
    }
    let inner = rect.inner_width();
    let background = palette::bg(palette::OVERLAY_BG);
    let border_fg = palette::fg(border);

    let top = match title {
        Some(title) => {
            let title = clip(title, inner.saturating_sub(2));
            let label = format!(" {title} ");
            format!(
                "┌{}{}{label}{}{background}{border_fg}{}┐",
                palette::bold(),
                palette::fg(palette::HEADER_FG),
                palette::reset(),
                "─".repeat(inner.saturating_sub(text_width(&label)))
            )
        }
        None => format!("┌{}┐", "─".repeat(inner)),
    };

    position_cursor(rect.row, rect.col);
    print!("{background}{border_fg}{top}{}", palette::reset());

    for row in rect.row + 1..rect.bottom() {
        position_cursor(row, rect.col);
        print!(
            "{background}{border_fg}│{}{border_fg}│{}",
            " ".repeat(inner),
            palette::reset()
        );
    }

    position_cursor(rect.bottom(), rect.col);
    print!(
        "{background}{border_fg}└{}┘{}",
        "─".repeat(inner),
        palette::reset()
    );
}

/// Prints `text` inside a box on `row`, one column in from the left
/// border, clipped to the inner width.
pub fn print_in_box(rect: Rect, row: usize, style: &str, text: &str) {
    if row <= rect.row || row >= rect.bottom() {
        return;
    }
    position_cursor(row, rect.col + 2);
    print!(
        "{}{style}{}{}",
        palette::bg(palette::OVERLAY_BG),
        clip(text, rect.inner_width().saturating_sub(2)),
        palette::reset()
    );
}
