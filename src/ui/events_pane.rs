use crate::app::AppState;
use crate::domain::Focus;
use crate::ui::styles::{
    border_style, default_style, focused_border_style, hint_style, record_color,
    selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the events of the cursor day
pub fn render_events_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let date = app.cursor_date();
    let focused = app.focus == Focus::Events;
    let border = if focused {
        focused_border_style()
    } else {
        border_style()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(
            format!(
                " Events · {} {} ",
                crate::dates::day_of_week(date).full_name(),
                date.format("%b %d")
            ),
            title_style(),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let events = app.planner.events_for_day(date);

    let mut lines: Vec<Line> = Vec::new();
    if events.is_empty() {
        lines.push(Line::styled("no events", hint_style()));
    }

    for (idx, event) in events.iter().enumerate() {
        let selected = focused && idx == app.event_cursor.min(events.len() - 1);
        let style = if selected {
            selected_style()
        } else {
            default_style()
        };

        lines.push(Line::from(vec![
            Span::styled("• ", Style::default().fg(record_color(&event.color))),
            Span::styled(event.title.clone(), style),
            Span::styled(format!("  {}", event.time_label()), hint_style()),
        ]));
    }

    f.render_widget(Paragraph::new(lines), inner);
}
