//! Top-level rendering coordinator.
//!
//! Rendering is two steps: compute the view model from `AppState`, then hand
//! it to the layout components. The view model is returned so the runtime can
//! inspect what was drawn, e.g. whether the loader row is on screen.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout and returns the view model that was drawn.
///
/// Prints ANSI-styled output with `print!`. Does not clear the screen.
pub fn render(state: &AppState, rows: usize, cols: usize) -> UIViewModel {
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_layout(&viewmodel, &state.theme, cols, rows);
    viewmodel
}
