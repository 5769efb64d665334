use crate::app::AppState;
use crate::dates::format_iso;
use crate::domain::UiMode;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the clear-day / clear-all confirmation dialog
pub fn render_confirm_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let modal_area = create_modal_area(area);
    f.render_widget(Clear, modal_area);

    let message = match app.ui_mode {
        UiMode::ConfirmClearDay => format!(
            "Delete all tasks on {}?",
            format_iso(app.cursor_date())
        ),
        _ => "Delete ALL tasks?".to_string(),
    };

    let lines = vec![
        Line::raw(""),
        Line::styled(message, modal_title_style()),
        Line::raw(""),
        Line::raw("This cannot be undone."),
        Line::raw(""),
        Line::raw("y - yes    n/Esc - no"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Confirm ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the blocking modal shown after midnight has passed
pub fn render_day_changed_modal(f: &mut Frame, area: Rect) {
    let modal_area = create_modal_area(area);
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::styled("The day has changed.", modal_title_style()),
        Line::raw(""),
        Line::raw("The date strip is anchored at startup; restart"),
        Line::raw("weekplan to plan the new day."),
        Line::raw(""),
        Line::raw("q - quit"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Day Changed ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
