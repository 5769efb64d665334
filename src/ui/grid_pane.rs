use crate::app::{AppState, GridGeometry};
use crate::dates::{self, SLOT_COUNT};
use crate::domain::Focus;
use crate::ui::styles::{
    border_style, default_style, done_style, drop_target_style, focused_border_style,
    gutter_style, header_style, selected_style, today_style, title_style, record_color,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Width of the time-label gutter ("11:00 PM" plus a space)
const GUTTER_WIDTH: u16 = 9;

/// Day name row plus date row
const HEADER_ROWS: u16 = 2;

/// Render the planning grid: the visible day columns crossed with the
/// hourly slots. Also writes back the cell geometry used for mouse
/// hit-testing.
pub fn render_grid_pane(f: &mut Frame, app: &mut AppState, area: Rect) {
    let display_dates: Vec<chrono::NaiveDate> = app.planner.display_dates().to_vec();

    let mut title = String::new();
    if app.planner.has_previous_days() {
        title.push_str("◀ ");
    }
    if let (Some(first), Some(last)) = (display_dates.first(), display_dates.last()) {
        title.push_str(&format!(
            "{} - {}",
            first.format("%b %d"),
            last.format("%b %d")
        ));
    }
    if app.planner.has_more_days() {
        title.push_str(" ▶");
    }

    let border = if app.focus == Focus::Grid {
        focused_border_style()
    } else {
        border_style()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(format!(" {} ", title), title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width <= GUTTER_WIDTH || inner.height <= HEADER_ROWS {
        app.grid_geometry = GridGeometry::default();
        return;
    }

    let cols = display_dates.len() as u16;
    let col_width = (inner.width - GUTTER_WIDTH) / cols.max(1);
    let visible_rows = (inner.height - HEADER_ROWS).min(SLOT_COUNT as u16);

    // Keep the cursor row on screen
    let mut scroll = app.grid_geometry.slot_scroll;
    if app.cursor_slot < scroll {
        scroll = app.cursor_slot;
    }
    if app.cursor_slot >= scroll + visible_rows as usize {
        scroll = app.cursor_slot + 1 - visible_rows as usize;
    }
    scroll = scroll.min(SLOT_COUNT.saturating_sub(visible_rows as usize));

    app.grid_geometry = GridGeometry {
        x: inner.x + GUTTER_WIDTH,
        y: inner.y + HEADER_ROWS,
        col_width,
        cols,
        rows: visible_rows,
        slot_scroll: scroll,
    };

    let cell_width = col_width as usize;
    let mut lines: Vec<Line> = Vec::new();

    // Day-name header
    let mut name_spans = vec![Span::raw(" ".repeat(GUTTER_WIDTH as usize))];
    let mut date_spans = vec![Span::raw(" ".repeat(GUTTER_WIDTH as usize))];
    for date in &display_dates {
        let day = dates::day_of_week(*date);
        let style = if dates::is_today(*date) {
            today_style()
        } else {
            header_style()
        };

        let name = if dates::is_today(*date) {
            format!("{} ●", day.short_name())
        } else {
            day.short_name().to_string()
        };
        name_spans.push(Span::styled(pad(&name, cell_width), style));
        date_spans.push(Span::styled(
            pad(&date.format("%b %d").to_string(), cell_width),
            style,
        ));
    }
    lines.push(Line::from(name_spans));
    lines.push(Line::from(date_spans));

    // Slot rows
    let slots = dates::generate_time_slots();
    let now_slot = dates::slot_index(&chrono::Local::now().format("%H:00").to_string());
    for row in 0..visible_rows as usize {
        let slot_idx = scroll + row;
        let slot = &slots[slot_idx];

        let gutter = if now_slot == Some(slot_idx) {
            today_style()
        } else {
            gutter_style()
        };
        let mut spans = vec![Span::styled(format!("{:>8} ", slot.label), gutter)];

        for (day_idx, date) in display_dates.iter().enumerate() {
            let cell_tasks = app.planner.tasks_for_slot(*date, &slot.time);
            let is_cursor = app.cursor_day == day_idx && app.cursor_slot == slot_idx;

            let style = if is_cursor && app.drag.is_some() {
                drop_target_style()
            } else if is_cursor {
                selected_style()
            } else if let Some(task) = cell_tasks.first() {
                if task.completed {
                    done_style()
                } else {
                    Style::default().fg(record_color(&task.color))
                }
            } else {
                default_style()
            };

            let text = match cell_tasks.len() {
                0 => String::new(),
                1 => cell_label(&cell_tasks[0].title, cell_tasks[0].completed, cell_width),
                n => {
                    let suffix = format!(" +{}", n - 1);
                    let title_width = cell_width.saturating_sub(suffix.len());
                    let mut text =
                        cell_label(&cell_tasks[0].title, cell_tasks[0].completed, title_width);
                    text.truncate(text.trim_end().len());
                    format!("{}{}", text, suffix)
                }
            };

            spans.push(Span::styled(pad(&text, cell_width), style));
        }

        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

/// Completion mark plus truncated title
fn cell_label(title: &str, completed: bool, width: usize) -> String {
    let mark = if completed { "✓" } else { "·" };
    truncate_string(&format!("{} {}", mark, title), width)
}

/// Truncate to at most `max_chars` characters, ellipsized
fn truncate_string(s: &str, max_chars: usize) -> String {
    let count = s.chars().count();
    if count <= max_chars {
        return s.to_string();
    }
    if max_chars <= 1 {
        return s.chars().take(max_chars).collect();
    }
    let mut out: String = s.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

/// Left-pad a cell's text to its column width
fn pad(s: &str, width: usize) -> String {
    let truncated = truncate_string(s, width.saturating_sub(1));
    let used = truncated.chars().count();
    format!("{}{}", truncated, " ".repeat(width.saturating_sub(used)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Standup", 10), "Standup");
        assert_eq!(truncate_string("Daily standup", 8), "Daily s…");
        assert_eq!(truncate_string("ab", 1), "a");
        assert_eq!(truncate_string("", 5), "");
    }

    #[test]
    fn test_truncate_string_multibyte() {
        // Truncation respects character boundaries
        assert_eq!(truncate_string("café break", 5), "café…");
        assert_eq!(truncate_string("日本語のタスク", 4), "日本語…");
    }

    #[test]
    fn test_pad_fills_width() {
        let padded = pad("Gym", 10);
        assert_eq!(padded.chars().count(), 10);
        assert!(padded.starts_with("Gym"));
    }

    #[test]
    fn test_cell_label_marks() {
        assert_eq!(cell_label("Gym", false, 20), "· Gym");
        assert_eq!(cell_label("Gym", true, 20), "✓ Gym");
    }
}
