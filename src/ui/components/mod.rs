//! Composable UI component renderers.
//!
//! Each component prints one region at a given row and returns the next free
//! row, so layouts read top to bottom.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`input`]: Compose and filter lines with their controls
//! - [`status`]: Counts summary, validation and fetch messages
//! - [`list`]: Item rows, empty message, loader sentinel
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Compose]
//! [Filter]
//! [Counts]
//! [Validation message]
//! [Fetch message]
//! [Border]
//! [Item rows + loader]
//! [Border]
//! [Footer]
//! ```

mod footer;
mod header;
mod input;
mod list;
mod status;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use footer::render_footer;
use header::render_header;
use input::{render_compose_bar, render_filter_bar};
use list::{render_empty_state, render_list_rows, render_loader};
use status::render_status;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full layout. The list area spans from below the top chrome to
/// above the bottom border.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // row 1 stays blank

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_compose_bar(current_row, &vm.compose, vm.can_submit, theme, cols);
    current_row = render_filter_bar(current_row, &vm.filter, vm.has_more, theme, cols);
    current_row = render_status(current_row, vm, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    let footer_start = rows;
    let border_row = footer_start.saturating_sub(1);
    let list_rows = border_row.saturating_sub(current_row);

    if vm.display_items.is_empty() {
        if let Some(empty) = vm.empty_state.as_ref().filter(|_| list_rows >= 2) {
            current_row = render_empty_state(current_row, empty, theme, cols);
        }
    } else {
        current_row = render_list_rows(current_row, &vm.display_items, theme, cols);
    }
    if vm.sentinel_visible && current_row < border_row {
        render_loader(current_row, &vm.loader, theme, cols);
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}
