//! Shared rendering utilities.
//!
//! Text ranges are character indices, never byte indices, so multi-byte text
//! highlights correctly.

use crate::ui::theme::Theme;

/// Moves the cursor to `row`, `col` (both 1-indexed).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Prints `text` with the character range `highlight` in match colors.
///
/// Selected rows skip match highlighting so the selection background stays
/// uniform. Ranges past the end of `text` are clamped.
pub fn render_highlighted_text(text: &str, highlight: Option<(usize, usize)>, theme: &Theme, is_selected: bool) {
    let Some((start, end)) = highlight.filter(|_| !is_selected) else {
        print!("{text}");
        return;
    };

    let chars: Vec<char> = text.chars().collect();
    let start = start.min(chars.len());
    let end = end.clamp(start, chars.len());

    let before: String = chars[..start].iter().collect();
    let matched: String = chars[start..end].iter().collect();
    let after: String = chars[end..].iter().collect();

    print!("{before}");
    print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
    print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
    print!("{matched}");
    print!("{}", Theme::reset());
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{after}");
}

/// Prints `text` left-aligned and pads the rest of a `cols`-wide line.
pub fn print_padded(text: &str, cols: usize) {
    let len = text.chars().count();
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(len)));
}
