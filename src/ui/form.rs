use crate::app::{AppState, FormKind, FormState};
use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style, record_color},
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the add/edit form for tasks, events, and templates
pub fn render_form(f: &mut Frame, app: &AppState, area: Rect) {
    let form = match &app.form {
        Some(form) => form,
        None => return,
    };

    let modal_area = create_modal_area(area);
    f.render_widget(Clear, modal_area);

    let title_text = match (form.kind, &form.editing_id) {
        (FormKind::Task, None) => " Add Task ",
        (FormKind::Task, Some(_)) => " Edit Task ",
        (FormKind::Event, None) => " Add Event ",
        (FormKind::Event, Some(_)) => " Edit Event ",
        (FormKind::Template, None) => " Add Template ",
        (FormKind::Template, Some(_)) => " Edit Template ",
    };

    let mut lines = Vec::new();
    lines.push(Line::raw(""));

    push_text_field(&mut lines, form, 0, "Title", &form.title);
    push_text_field(&mut lines, form, 1, "Description", &form.description);

    match form.kind {
        FormKind::Task | FormKind::Template => {
            push_text_field(&mut lines, form, 2, "Category", &form.category);
        }
        FormKind::Event => {
            let toggle_label = field_label(form, 2, "All day");
            lines.push(Line::raw(toggle_label));
            lines.push(Line::from(vec![
                Span::raw("> "),
                Span::styled(
                    if form.is_all_day { "[x]" } else { "[ ]" },
                    modal_title_style(),
                ),
                Span::styled("  (Space toggles)", hint_style()),
            ]));
            lines.push(Line::raw(""));

            push_text_field(&mut lines, form, 3, "Start (HH:MM)", &form.start_time);
            push_text_field(&mut lines, form, 4, "End (HH:MM)", &form.end_time);
        }
    }

    // Color selector is always the last field
    let color_field = form.field_count() - 1;
    lines.push(Line::raw(field_label(form, color_field, "Color")));
    lines.push(Line::from(vec![
        Span::raw("> "),
        Span::styled("██ ", Style::default().fg(record_color(form.color()))),
        Span::styled(form.color().to_string(), modal_title_style()),
        Span::styled("  (Space cycles)", hint_style()),
    ]));
    lines.push(Line::raw(""));

    lines.push(Line::raw(
        "Tab to switch fields  ·  Enter to save  ·  Esc to cancel",
    ));

    if form.kind == FormKind::Task && form.editing_id.is_none() {
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("(Placing at "),
            Span::styled(
                format!("{} {}", app.cursor_date().format("%b %d"), app.cursor_slot_time()),
                modal_title_style(),
            ),
            Span::raw(")"),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title_text, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

fn field_label(form: &FormState, field: usize, label: &str) -> String {
    if form.editing_field == field {
        format!("{}: (editing)", label)
    } else {
        format!("{}:", label)
    }
}

fn push_text_field(lines: &mut Vec<Line>, form: &FormState, field: usize, label: &str, value: &str) {
    lines.push(Line::raw(field_label(form, field, label)));

    let mut spans = vec![
        Span::raw("> "),
        Span::styled(value.to_string(), modal_title_style()),
    ];
    if form.editing_field == field {
        spans.push(Span::styled("█", modal_title_style())); // Cursor
    }
    lines.push(Line::from(spans));
    lines.push(Line::raw(""));
}
