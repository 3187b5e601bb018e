//! Item list, empty message and loader sentinel.

use crate::ui::helpers::{self, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, EmptyState, LoaderInfo};

/// Width of the badge column including its trailing space.
const BADGE_COLUMN: usize = 7;

/// Renders all rows starting at `row` and returns the next free row.
pub fn render_list_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_list_row(current_row, item, theme, cols);
    }
    current_row
}

/// One row: `#seq` badge, then the text with its filter highlight.
///
/// The selected row gets the selection colors across the full width.
fn render_list_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else if item.is_local {
        print!("{}", Theme::fg(&theme.colors.local_fg));
    } else {
        print!("{}", Theme::fg(&theme.colors.badge_fg));
    }
    print!(" {:<width$}", item.badge, width = BADGE_COLUMN - 1);

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    helpers::render_highlighted_text(&item.text, item.highlight, theme, item.is_selected);

    let line_len = BADGE_COLUMN.max(item.badge.chars().count() + 1) + item.text.chars().count();
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}

/// Centered message for an empty list.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    let msg_len = empty.message.chars().count();
    let padding = cols.saturating_sub(msg_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", " ".repeat(padding));
    print!("{}", empty.message);
    print!("{}", " ".repeat(cols.saturating_sub(padding + msg_len)));
    print!("{}", Theme::reset());
    row + 1
}

/// Dimmed, centered loader row after the last item.
pub fn render_loader(row: usize, loader: &LoaderInfo, theme: &Theme, cols: usize) -> usize {
    let text_len = loader.text.chars().count();
    let padding = cols.saturating_sub(text_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.loader_fg));
    print!("{}", " ".repeat(padding));
    print!("{}", loader.text);
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}
