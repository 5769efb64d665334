pub mod events_pane;
pub mod form;
pub mod grid_pane;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod styles;
pub mod templates_pane;

use crate::app::AppState;
use crate::domain::UiMode;
use events_pane::render_events_pane;
use form::render_form;
use grid_pane::render_grid_pane;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::{render_confirm_modal, render_day_changed_modal};
use ratatui::{
    text::Line,
    widgets::Paragraph,
    Frame,
};
use styles::{hint_style, status_style};
use templates_pane::render_templates_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &mut AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, layout.keybindings_area);
    render_grid_pane(f, app, layout.grid_area);
    render_templates_pane(f, app, layout.templates_area);
    render_events_pane(f, app, layout.events_area);
    render_status(f, app, layout.status_area);

    // Day changed modal takes precedence over everything
    if app.ui_mode == UiMode::DayChanged {
        render_day_changed_modal(f, size);
        return;
    }

    if app.form.is_some() {
        render_form(f, app, size);
    }

    if matches!(app.ui_mode, UiMode::ConfirmClearDay | UiMode::ConfirmClearAll) {
        render_confirm_modal(f, app, size);
    }
}

/// Bottom status line: the drag hint while carrying a record, otherwise
/// the last transient message
fn render_status(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let (text, style) = if app.drag.is_some() {
        (
            " carrying - move to a cell, Enter/m drops, Esc cancels".to_string(),
            status_style(),
        )
    } else if let Some(status) = &app.status {
        (format!(" {}", status), status_style())
    } else {
        (String::new(), hint_style())
    };

    f.render_widget(Paragraph::new(Line::raw(text)).style(style), area);
}
