//! Tag chip renderer.

use crate::domain::TagVariant;
use crate::ui::helpers::text_width;
use crate::ui::palette::{self, tag_style};

/// Styled chip text for `label`, ending with a color reset.
///
/// Filled chips are padded with a space on each side; outlined chips are
/// wrapped in brackets instead.
#[must_use]
pub fn tag(label: &str, variant: TagVariant) -> String {
    let style = tag_style(variant);
    if style.outlined {
        format!(
            "{}{}[{label}]{}",
            palette::fg(style.fg),
            palette::bg(style.bg),
            palette::reset()
        )
    } else {
        format!(
            "{}{} {label} {}",
            palette::fg(style.fg),
            palette::bg(style.bg),
            palette::reset()
        )
    }
}

/// Columns taken by a chip for `label`.
#[must_use]
pub fn tag_width(label: &str) -> usize {
    text_width(label) + 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chips_wrap_label_and_reset() {
        let chip = tag("Manual", TagVariant::Manual);
        assert!(chip.contains(" Manual "));
        assert!(chip.ends_with(palette::reset()));

        let outlined = tag("Seats", TagVariant::Outline);
        assert!(outlined.contains("[Seats]"));
        assert_eq!(tag_width("Seats"), 7);
    }
}
