use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::raw(" ←↑↓→ cell   "),
        Span::raw("[ ] / { } slide   "),
        Span::raw("p/n week   "),
        Span::raw("t today   "),
        Span::raw("m move   "),
        Span::raw("a add   "),
        Span::raw("e edit   "),
        Span::raw("Space done   "),
        Span::raw("d delete   "),
        Span::raw("D clear-day   "),
        Span::raw("Tab pane   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
