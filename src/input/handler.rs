use crate::app::AppState;
use crate::domain::{Focus, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::Form => handle_form_mode(app, key),
        UiMode::ConfirmClearDay | UiMode::ConfirmClearAll => handle_confirm_mode(app, key),
        UiMode::DayChanged => Ok(matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)),
    }
}

fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Cell cursor
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_cursor_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_cursor_down();
            Ok(false)
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.move_cursor_left();
            Ok(false)
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.move_cursor_right();
            Ok(false)
        }

        // Slide the visible window
        KeyCode::Char('[') => {
            app.shift_window(-1);
            Ok(false)
        }
        KeyCode::Char(']') => {
            app.shift_window(1);
            Ok(false)
        }
        KeyCode::Char('{') => {
            app.shift_window(-7);
            Ok(false)
        }
        KeyCode::Char('}') => {
            app.shift_window(7);
            Ok(false)
        }

        // Week paging and today
        KeyCode::Char('p') | KeyCode::Char('P') => {
            app.previous_week();
            Ok(false)
        }
        KeyCode::Char('n') | KeyCode::Char('N') => {
            app.next_week();
            Ok(false)
        }
        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.go_to_today();
            Ok(false)
        }

        // Pane focus
        KeyCode::Tab => {
            app.cycle_focus();
            Ok(false)
        }

        // Cycle through stacked tasks in the cursor cell
        KeyCode::Char('o') | KeyCode::Char('O') => {
            app.cycle_task_in_cell();
            Ok(false)
        }

        // Pick up / drop (move mode)
        KeyCode::Char('m') | KeyCode::Char('M') => {
            app.pick_up_or_drop();
            Ok(false)
        }

        // Enter drops a carried record, otherwise edits
        KeyCode::Enter => {
            if app.drag.is_some() {
                app.drop_on_cursor_cell();
            } else {
                app.start_edit();
            }
            Ok(false)
        }

        // Toggle completion
        KeyCode::Char(' ') => {
            if app.focus == Focus::Grid {
                app.toggle_selected_complete();
            }
            Ok(false)
        }

        // Add / edit / delete
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.start_add();
            Ok(false)
        }
        KeyCode::Char('e') | KeyCode::Char('E') => {
            app.start_edit();
            Ok(false)
        }
        KeyCode::Char('d') => {
            app.delete_selected();
            Ok(false)
        }

        // Bulk deletion, behind confirm modals
        KeyCode::Char('D') => {
            if app.focus == Focus::Grid {
                app.ui_mode = UiMode::ConfirmClearDay;
            }
            Ok(false)
        }
        KeyCode::Char('X') => {
            app.ui_mode = UiMode::ConfirmClearAll;
            Ok(false)
        }

        // Escape cancels a drag in flight
        KeyCode::Esc => {
            if app.drag.is_some() {
                app.cancel_drag();
            } else {
                app.status = None;
            }
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys in the add/edit form
fn handle_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => {
            app.submit_form();
            Ok(false)
        }
        KeyCode::Esc => {
            app.cancel_form();
            Ok(false)
        }
        KeyCode::Tab => {
            app.form_next_field();
            Ok(false)
        }
        KeyCode::Backspace => {
            app.form_backspace();
            Ok(false)
        }
        KeyCode::Char(' ') => {
            app.form_space();
            Ok(false)
        }
        KeyCode::Char(c) => {
            app.form_add_char(c);
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// Handle keys in the clear-day / clear-all confirm modals
fn handle_confirm_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if app.ui_mode == UiMode::ConfirmClearDay {
                app.clear_cursor_day();
            } else {
                app.clear_all_tasks();
            }
            Ok(false)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.ui_mode = UiMode::Normal;
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// Handle mouse input: click selects a cell, press-travel-release drags a
/// task (or template) onto a cell
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) -> Result<bool> {
    if app.ui_mode != UiMode::Normal {
        return Ok(false);
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.on_mouse_down(mouse.column, mouse.row);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.on_mouse_drag(mouse.column, mouse.row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.on_mouse_up(mouse.column, mouse.row);
        }
        _ => {}
    }

    Ok(false)
}
