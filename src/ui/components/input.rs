//! Compose and filter input lines.
//!
//! Each input is a single row: a label, the current text, and bracketed
//! controls on the right. The label takes the focus color when the field owns
//! the keyboard, and a block cursor follows the text.

use crate::ui::helpers::{print_padded, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ComposeBarInfo, FilterBarInfo};

const PLACEHOLDER_COMPOSE: &str = "Add item...";
const PLACEHOLDER_FILTER: &str = "Filter...";

/// Renders the draft line with the `[Add]` / `[Saving...]` button.
pub fn render_compose_bar(row: usize, compose: &ComposeBarInfo, can_submit: bool, theme: &Theme, cols: usize) -> usize {
    let button = format!("[{}]", compose.button_label);
    let button_color = if can_submit { &theme.colors.focus_fg } else { &theme.colors.text_dim };

    render_input_line(
        row,
        InputLine {
            label: " New: ",
            value: &compose.draft,
            placeholder: PLACEHOLDER_COMPOSE,
            is_focused: compose.is_focused,
            controls: &[(button.as_str(), button_color.as_str())],
        },
        theme,
        cols,
    )
}

/// Renders the filter line with the sort and load-more indicators.
pub fn render_filter_bar(row: usize, filter: &FilterBarInfo, has_more: bool, theme: &Theme, cols: usize) -> usize {
    let sort = format!("[Sort: {}]", filter.sort_label);
    let load = format!("[{}]", filter.load_label);
    let load_color = if has_more { &theme.colors.loader_fg } else { &theme.colors.text_dim };

    render_input_line(
        row,
        InputLine {
            label: " Filter: ",
            value: &filter.query,
            placeholder: PLACEHOLDER_FILTER,
            is_focused: filter.is_focused,
            controls: &[(sort.as_str(), theme.colors.text_normal.as_str()), (load.as_str(), load_color.as_str())],
        },
        theme,
        cols,
    )
}

struct InputLine<'a> {
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    is_focused: bool,
    controls: &'a [(&'a str, &'a str)],
}

fn render_input_line(row: usize, line: InputLine<'_>, theme: &Theme, cols: usize) -> usize {
    let controls_len: usize = line.controls.iter().map(|(text, _)| text.chars().count() + 1).sum();
    let field_width = cols.saturating_sub(line.label.chars().count() + controls_len + 1);

    position_cursor(row, 1);
    if line.is_focused {
        print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.focus_fg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", line.label);
    print!("{}", Theme::reset());

    let shown = if line.value.is_empty() && !line.is_focused {
        print!("{}", Theme::fg(&theme.colors.text_dim));
        line.placeholder.to_string()
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
        let mut text = tail_chars(line.value, field_width.saturating_sub(1));
        if line.is_focused {
            text.push('█');
        }
        text
    };
    print_padded(&shown, field_width);
    print!("{}", Theme::reset());

    for (text, color) in line.controls {
        print!(" {}{text}{}", Theme::fg(color), Theme::reset());
    }
    row + 1
}

/// Last `max` characters of `text`, so the cursor end stays in view.
fn tail_chars(text: &str, max: usize) -> String {
    let count = text.chars().count();
    text.chars().skip(count.saturating_sub(max)).collect()
}
