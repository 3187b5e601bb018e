//! Meta line and message lines.

use crate::ui::helpers::{print_padded, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the counts summary followed by two message rows.
///
/// The validation message and the fetch message each get their own row and
/// are shown independently; an absent message leaves its row blank.
pub fn render_status(row: usize, vm: &UIViewModel, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print_padded(&format!(" {}", vm.counts.summary()), cols);
    print!("{}", Theme::reset());

    let messages = [vm.validation_message.as_deref(), vm.fetch_message.as_deref()];
    for (offset, message) in messages.into_iter().enumerate() {
        position_cursor(row + 1 + offset, 1);
        print!("{}", Theme::fg(&theme.colors.error_fg));
        print_padded(&message.map_or_else(String::new, |m| format!(" {m}")), cols);
        print!("{}", Theme::reset());
    }

    row + 3
}
