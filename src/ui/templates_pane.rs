use crate::app::{AppState, PaneGeometry};
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

/// Render the predefined-task panel. Templates are picked up from here
/// and stamped onto the grid as fresh tasks.
pub fn render_templates_pane(f: &mut Frame, app: &mut AppState, area: Rect) {
    let focused = app.focus == Focus::Templates;
    let border = if focused {
        focused_border_style()
    } else {
        border_style()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(" Templates ", title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let template_count = app.planner.predefined_tasks().len();
    app.templates_geometry = PaneGeometry {
        x: inner.x,
        y: inner.y,
        width: inner.width,
        rows: (template_count as u16).min(inner.height),
    };
    let templates = app.planner.predefined_tasks();

    let mut lines: Vec<Line> = Vec::new();

    if templates.is_empty() {
        lines.push(Line::styled("no templates yet", hint_style()));
        lines.push(Line::styled("a adds a reusable task", hint_style()));
    }

    for (idx, template) in templates.iter().enumerate() {
        let selected = focused && idx == app.template_cursor.min(templates.len() - 1);

        let style = if selected {
            selected_style()
        } else {
            default_style()
        };

        let mut spans = vec![
            Span::styled("■ ", Style::default().fg(record_color(&template.color))),
            Span::styled(template.title.clone(), style),
        ];
        if let Some(category) = &template.category {
            spans.push(Span::styled(format!("  ({})", category), hint_style()));
        }

        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), inner);
}
