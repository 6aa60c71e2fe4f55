//! Fixed color palette and ANSI escape sequence generation.
//!
//! Colors are 24-bit hex strings turned into escape sequences on demand.
//! Tag chip colors are looked up with an exhaustive match on
//! [`TagVariant`], so a new variant cannot ship without a style.

use crate::domain::TagVariant;

pub const ACCENT: &str = "#9370DB";
pub const HEADER_FG: &str = "#FFFFFF";
pub const TEXT: &str = "#E5E7EB";
pub const TEXT_DIM: &str = "#9CA3AF";
pub const BORDER: &str = "#4B5563";
pub const SELECTION_FG: &str = "#FFFFFF";
pub const SELECTION_BG: &str = ACCENT;
pub const MATCH_FG: &str = "#1A1A1A";
pub const MATCH_BG: &str = "#FBBF24";
pub const OVERLAY_BG: &str = "#1F2937";
pub const ERROR: &str = "#EF4444";
pub const SUCCESS: &str = "#22C55E";

/// Colors of a tag chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagStyle {
    pub fg: &'static str,
    pub bg: &'static str,
    /// Drawn with brackets instead of a filled background.
    pub outlined: bool,
}

#[must_use]
pub const fn tag_style(variant: TagVariant) -> TagStyle {
    match variant {
        TagVariant::Specification => TagStyle {
            fg: "#1F2937",
            bg: "#F3F4F6",
            outlined: false,
        },
        TagVariant::Safety => TagStyle {
            fg: "#1D4ED8",
            bg: "#EFF6FF",
            outlined: false,
        },
        TagVariant::Filter => TagStyle {
            fg: "#D1D5DB",
            bg: OVERLAY_BG,
            outlined: true,
        },
        TagVariant::FilterSelected => TagStyle {
            fg: "#FFFFFF",
            bg: "#9333EA",
            outlined: false,
        },
        TagVariant::Manual => TagStyle {
            fg: "#15803D",
            bg: "#F0FDF4",
            outlined: false,
        },
        TagVariant::Automatic => TagStyle {
            fg: "#B45309",
            bg: "#FFFBEB",
            outlined: false,
        },
        TagVariant::Outline => TagStyle {
            fg: "#E5E7EB",
            bg: OVERLAY_BG,
            outlined: true,
        },
    }
}

/// Parses `#rrggbb`, falling back to white on malformed input.
fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#').trim();

    if hex.len() != 6 || !hex.is_ascii() {
        return (255, 255, 255);
    }

    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

    (r, g, b)
}

/// 24-bit foreground escape for a hex color.
///
/// ```
/// use drivesphere::ui::palette;
///
/// assert_eq!(palette::fg("#9370DB"), "\u{1b}[38;2;147;112;219m");
/// ```
#[must_use]
pub fn fg(hex: &str) -> String {
    let (r, g, b) = hex_to_rgb(hex);
    format!("\u{001b}[38;2;{r};{g};{b}m")
}

/// 24-bit background escape for a hex color.
#[must_use]
pub fn bg(hex: &str) -> String {
    let (r, g, b) = hex_to_rgb(hex);
    format!("\u{001b}[48;2;{r};{g};{b}m")
}

#[must_use]
pub const fn bold() -> &'static str {
    "\u{001b}[1m"
}

#[must_use]
pub const fn dim() -> &'static str {
    "\u{001b}[2m"
}

#[must_use]
pub const fn reset() -> &'static str {
    "\u{001b}[0m"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(hex_to_rgb("#1A1A1A"), (26, 26, 26));
        assert_eq!(hex_to_rgb("9370db"), (147, 112, 219));
    }

    #[test]
    fn malformed_hex_falls_back_to_white() {
        assert_eq!(hex_to_rgb("#abc"), (255, 255, 255));
        assert_eq!(hex_to_rgb("#zz0000"), (255, 255, 255));
        assert_eq!(hex_to_rgb("#ééé"), (255, 255, 255));
    }

    #[test]
    fn filter_chips_differ_when_selected() {
        let idle = tag_style(TagVariant::for_filter(false));
        let selected = tag_style(TagVariant::for_filter(true));
        assert!(idle.outlined);
        assert!(!selected.outlined);
        assert_ne!(idle.bg, selected.bg);
    }
}
