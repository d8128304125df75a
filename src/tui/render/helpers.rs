use ratatui::style::Color;
use unicode_width::UnicodeWidthStr;

use crate::model::status::{Category, Swatch};
use crate::tui::theme::parse_hex_color;

/// Terminal color for a swatch entry
pub(super) fn swatch_color(swatch: Swatch) -> Color {
    parse_hex_color(swatch.hex()).unwrap_or(Color::White)
}

/// Lane symbols, matching the CLI listing
pub(super) fn category_symbol(category: Category) -> &'static str {
    match category {
        Category::Todo => "[ ]",
        Category::Active => "[>]",
        Category::Done => "[x]",
        Category::Cancelled => "[~]",
    }
}

/// Truncate to a display width, appending … when anything was cut
pub(super) fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    for c in text.chars() {
        let candidate = format!("{}{}", out, c);
        if candidate.width() + 1 > max_width {
            break;
        }
        out = candidate;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer name", 8), "a longe…");
    }
}
