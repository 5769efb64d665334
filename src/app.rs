use crate::dates::{self, SLOT_COUNT};
use crate::domain::{
    Event, EventUpdate, Focus, PredefinedTask, PredefinedTaskUpdate, Task, TaskUpdate, UiMode,
    TASK_COLORS,
};
use crate::planner::PlannerState;
use crate::resolver::{self, DragSource, DRAG_ACTIVATION_DISTANCE};
use chrono::{Duration, Local, NaiveDate};

/// Which record kind a form is editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Task,
    Event,
    Template,
}

/// Input form state for creating or editing a record
#[derive(Debug, Clone)]
pub struct FormState {
    pub kind: FormKind,
    /// Some(id) when editing an existing record, None when creating
    pub editing_id: Option<String>,
    pub title: String,
    pub description: String,
    pub category: String,
    pub is_all_day: bool,
    pub start_time: String,
    pub end_time: String,
    pub color_index: usize,
    pub editing_field: usize,
}

impl FormState {
    fn blank(kind: FormKind) -> Self {
        Self {
            kind,
            editing_id: None,
            title: String::new(),
            description: String::new(),
            category: String::new(),
            is_all_day: true,
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            color_index: 4, // blue
            editing_field: 0,
        }
    }

    /// Number of Tab-reachable fields for this form kind
    pub fn field_count(&self) -> usize {
        match self.kind {
            FormKind::Task | FormKind::Template => 4, // title, description, category, color
            FormKind::Event => 6, // title, description, all-day, start, end, color
        }
    }

    /// Whether the focused field is the color selector
    pub fn on_color_field(&self) -> bool {
        self.editing_field == self.field_count() - 1
    }

    pub fn color(&self) -> &'static str {
        TASK_COLORS[self.color_index % TASK_COLORS.len()]
    }

    fn color_index_for(color: &str) -> usize {
        TASK_COLORS.iter().position(|c| *c == color).unwrap_or(4)
    }

    /// Append a character to the focused text field
    pub fn push_char(&mut self, c: char) {
        if self.on_color_field() {
            return;
        }
        match (self.kind, self.editing_field) {
            (_, 0) => self.title.push(c),
            (_, 1) => self.description.push(c),
            (FormKind::Task | FormKind::Template, 2) => self.category.push(c),
            (FormKind::Event, 3) => self.start_time.push(c),
            (FormKind::Event, 4) => self.end_time.push(c),
            _ => {}
        }
    }

    /// Delete the last character of the focused text field
    pub fn pop_char(&mut self) {
        if self.on_color_field() {
            return;
        }
        match (self.kind, self.editing_field) {
            (_, 0) => {
                self.title.pop();
            }
            (_, 1) => {
                self.description.pop();
            }
            (FormKind::Task | FormKind::Template, 2) => {
                self.category.pop();
            }
            (FormKind::Event, 3) => {
                self.start_time.pop();
            }
            (FormKind::Event, 4) => {
                self.end_time.pop();
            }
            _ => {}
        }
    }
}

/// Screen region of the slot grid, written back by the renderer each frame
/// so mouse positions can be mapped to (day, slot) cells
#[derive(Debug, Clone, Copy, Default)]
pub struct GridGeometry {
    /// Screen position of the top-left slot cell (day 0, first visible row)
    pub x: u16,
    pub y: u16,
    pub col_width: u16,
    /// Visible day columns
    pub cols: u16,
    /// Visible slot rows
    pub rows: u16,
    /// First visible slot index (vertical scroll)
    pub slot_scroll: usize,
}

impl GridGeometry {
    /// Map a screen position to a (day index, slot index) cell
    pub fn hit(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        if self.col_width == 0 || x < self.x || y < self.y {
            return None;
        }
        let col = ((x - self.x) / self.col_width) as usize;
        let row = (y - self.y) as usize;
        if col >= self.cols as usize || row >= self.rows as usize {
            return None;
        }
        let slot = row + self.slot_scroll;
        if slot >= SLOT_COUNT {
            return None;
        }
        Some((col, slot))
    }
}

/// Screen region of a row-list pane (templates), for mouse hit-testing
#[derive(Debug, Clone, Copy, Default)]
pub struct PaneGeometry {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub rows: u16,
}

impl PaneGeometry {
    pub fn hit_row(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.x || y < self.y || x >= self.x + self.width {
            return None;
        }
        let row = (y - self.y) as usize;
        if row >= self.rows as usize {
            return None;
        }
        Some(row)
    }
}

/// A pending mouse press: becomes a drag once the pointer travels far
/// enough, otherwise lands as a click
#[derive(Debug, Clone)]
pub struct MousePress {
    pub x: u16,
    pub y: u16,
    /// Raw drag-source identifier of the record under the press, if any
    /// (task id, or a `predefined-`-prefixed template id)
    pub source_id: Option<String>,
}

/// Main application state
pub struct AppState {
    pub planner: PlannerState,
    pub ui_mode: UiMode,
    pub focus: Focus,
    /// Cursor cell within the visible grid
    pub cursor_day: usize,
    pub cursor_slot: usize,
    /// Which task within the cursor cell operations target
    pub cursor_task: usize,
    pub template_cursor: usize,
    pub event_cursor: usize,
    /// Active drag, if a task or template has been picked up
    pub drag: Option<DragSource>,
    pub form: Option<FormState>,
    /// Transient message for the status line
    pub status: Option<String>,
    /// The day the date strip was anchored on at startup
    pub file_date: NaiveDate,
    pub grid_geometry: GridGeometry,
    pub templates_geometry: PaneGeometry,
    pub mouse_press: Option<MousePress>,
}

impl AppState {
    pub fn new(planner: PlannerState) -> Self {
        Self {
            planner,
            ui_mode: UiMode::Normal,
            focus: Focus::Grid,
            cursor_day: 0,
            cursor_slot: 0,
            cursor_task: 0,
            template_cursor: 0,
            event_cursor: 0,
            drag: None,
            form: None,
            status: None,
            file_date: Local::now().date_naive(),
            grid_geometry: GridGeometry::default(),
            templates_geometry: PaneGeometry::default(),
            mouse_press: None,
        }
    }

    /// Check if the current date has changed (crossed midnight); the date
    /// strip is anchored at startup, so a restart is required
    pub fn has_day_changed(&self) -> bool {
        Local::now().date_naive() != self.file_date
    }

    // --- cursor ---

    pub fn cursor_date(&self) -> NaiveDate {
        let dates = self.planner.display_dates();
        dates[self.cursor_day.min(dates.len().saturating_sub(1))]
    }

    pub fn cursor_slot_time(&self) -> String {
        dates::slot_for_index(self.cursor_slot).unwrap_or_else(|| "06:00".to_string())
    }

    /// The task operations in the grid act on: `cursor_task`-th task of
    /// the cursor cell
    pub fn selected_task(&self) -> Option<&Task> {
        let slot = self.cursor_slot_time();
        let tasks = self.planner.tasks_for_slot(self.cursor_date(), &slot);
        if tasks.is_empty() {
            return None;
        }
        tasks.get(self.cursor_task.min(tasks.len() - 1)).copied()
    }

    pub fn selected_template(&self) -> Option<&PredefinedTask> {
        let templates = self.planner.predefined_tasks();
        if templates.is_empty() {
            return None;
        }
        templates.get(self.template_cursor.min(templates.len() - 1))
    }

    pub fn selected_event(&self) -> Option<&Event> {
        let events = self.planner.events_for_day(self.cursor_date());
        if events.is_empty() {
            return None;
        }
        events.get(self.event_cursor.min(events.len() - 1)).copied()
    }

    pub fn move_cursor_up(&mut self) {
        match self.focus {
            Focus::Grid => {
                if self.cursor_slot > 0 {
                    self.cursor_slot -= 1;
                }
                self.cursor_task = 0;
            }
            Focus::Templates => {
                if self.template_cursor > 0 {
                    self.template_cursor -= 1;
                }
            }
            Focus::Events => {
                if self.event_cursor > 0 {
                    self.event_cursor -= 1;
                }
            }
        }
    }

    pub fn move_cursor_down(&mut self) {
        match self.focus {
            Focus::Grid => {
                if self.cursor_slot + 1 < SLOT_COUNT {
                    self.cursor_slot += 1;
                }
                self.cursor_task = 0;
            }
            Focus::Templates => {
                let len = self.planner.predefined_tasks().len();
                if self.template_cursor + 1 < len {
                    self.template_cursor += 1;
                }
            }
            Focus::Events => {
                let len = self.planner.events_for_day(self.cursor_date()).len();
                if self.event_cursor + 1 < len {
                    self.event_cursor += 1;
                }
            }
        }
    }

    /// Move left across day columns; at the left edge the window slides
    pub fn move_cursor_left(&mut self) {
        if self.focus != Focus::Grid {
            return;
        }
        if self.cursor_day > 0 {
            self.cursor_day -= 1;
        } else if self.planner.has_previous_days() {
            self.planner.shift_window(-1);
        }
        self.cursor_task = 0;
        self.event_cursor = 0;
    }

    /// Move right across day columns; at the right edge the window slides
    pub fn move_cursor_right(&mut self) {
        if self.focus != Focus::Grid {
            return;
        }
        if self.cursor_day + 1 < self.planner.display_dates().len() {
            self.cursor_day += 1;
        } else if self.planner.has_more_days() {
            self.planner.shift_window(1);
        }
        self.cursor_task = 0;
        self.event_cursor = 0;
    }

    /// Cycle through the tasks stacked in the cursor cell
    pub fn cycle_task_in_cell(&mut self) {
        let slot = self.cursor_slot_time();
        let count = self.planner.tasks_for_slot(self.cursor_date(), &slot).len();
        if count > 0 {
            self.cursor_task = (self.cursor_task + 1) % count;
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    // --- window navigation ---

    pub fn shift_window(&mut self, delta: i64) {
        self.planner.shift_window(delta);
        self.cursor_task = 0;
        self.event_cursor = 0;
    }

    pub fn go_to_today(&mut self) {
        self.planner.go_to_today();
        self.cursor_day = 0;
        self.cursor_task = 0;
        self.event_cursor = 0;
    }

    /// Page the window one week back
    pub fn previous_week(&mut self) {
        let first = self.planner.display_dates()[0];
        self.planner.go_to_week(first - Duration::days(7));
        self.cursor_task = 0;
        self.event_cursor = 0;
    }

    /// Page the window one week forward
    pub fn next_week(&mut self) {
        let first = self.planner.display_dates()[0];
        self.planner.go_to_week(first + Duration::days(7));
        self.cursor_task = 0;
        self.event_cursor = 0;
    }

    // --- grid operations ---

    pub fn toggle_selected_complete(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id.clone()) {
            self.planner.toggle_complete(&id);
        }
    }

    pub fn delete_selected(&mut self) {
        match self.focus {
            Focus::Grid => {
                if let Some(task) = self.selected_task() {
                    let id = task.id.clone();
                    let title = task.title.clone();
                    self.planner.delete_task(&id);
                    self.cursor_task = 0;
                    self.status = Some(format!("Deleted '{}'", title));
                }
            }
            Focus::Templates => {
                if let Some(template) = self.selected_template() {
                    let id = template.id.clone();
                    self.planner.delete_predefined_task(&id);
                    self.template_cursor = self.template_cursor.saturating_sub(1);
                }
            }
            Focus::Events => {
                if let Some(event) = self.selected_event() {
                    let id = event.id.clone();
                    self.planner.delete_event(&id);
                    self.event_cursor = self.event_cursor.saturating_sub(1);
                }
            }
        }
    }

    /// Clear every task on the cursor day (invoked from the confirm modal)
    pub fn clear_cursor_day(&mut self) {
        let date = self.cursor_date();
        self.planner.delete_tasks_for_date(date);
        self.cursor_task = 0;
        self.status = Some(format!("Cleared {}", dates::format_iso(date)));
        self.ui_mode = UiMode::Normal;
    }

    /// Clear every task (invoked from the confirm modal)
    pub fn clear_all_tasks(&mut self) {
        self.planner.delete_all_tasks();
        self.cursor_task = 0;
        self.status = Some("Cleared all tasks".to_string());
        self.ui_mode = UiMode::Normal;
    }

    // --- move mode / drag ---

    /// Pick up the record under the cursor, or drop a carried one onto
    /// the cursor cell
    pub fn pick_up_or_drop(&mut self) {
        if self.drag.is_some() {
            self.drop_on_cursor_cell();
            return;
        }

        match self.focus {
            Focus::Grid => {
                if let Some((id, title)) = self.selected_task().map(|t| (t.id.clone(), t.title.clone())) {
                    self.status = Some(format!("Moving '{}'", title));
                    self.drag = Some(DragSource::Task(id));
                }
            }
            Focus::Templates => {
                if let Some((id, title)) = self.selected_template().map(|t| (t.id.clone(), t.title.clone())) {
                    self.status = Some(format!("Placing '{}'", title));
                    self.drag = Some(DragSource::Predefined(id));
                    self.focus = Focus::Grid;
                }
            }
            Focus::Events => {}
        }
    }

    /// Land the active drag on the cursor cell
    pub fn drop_on_cursor_cell(&mut self) {
        let target = resolver::encode_drop_target(self.cursor_date(), &self.cursor_slot_time());
        self.finish_drag(target.as_deref());
    }

    /// Land the active drag on an explicit target cell (mouse path)
    pub fn finish_drag(&mut self, target: Option<&str>) {
        if let Some(source) = self.drag.take() {
            let dropped = resolver::resolve_drop(&mut self.planner, &source, target);
            self.status = if dropped {
                source
                    .title(&self.planner)
                    .map(|title| format!("Placed '{}'", title))
            } else {
                None
            };
        }
        self.mouse_press = None;
    }

    /// Cancel a drag mid-air; nothing is mutated
    pub fn cancel_drag(&mut self) {
        self.drag = None;
        self.mouse_press = None;
        self.status = None;
    }

    // --- mouse ---

    pub fn on_mouse_down(&mut self, x: u16, y: u16) {
        let source_id = if let Some((day, slot)) = self.grid_geometry.hit(x, y) {
            let dates = self.planner.display_dates();
            let date = dates[day.min(dates.len().saturating_sub(1))];
            let slot_time = dates::slot_for_index(slot).unwrap_or_default();
            self.planner
                .tasks_for_slot(date, &slot_time)
                .first()
                .map(|t| DragSource::Task(t.id.clone()).encode())
        } else if let Some(row) = self.templates_geometry.hit_row(x, y) {
            self.planner
                .predefined_tasks()
                .get(row)
                .map(|t| DragSource::Predefined(t.id.clone()).encode())
        } else {
            None
        };

        self.mouse_press = Some(MousePress { x, y, source_id });
    }

    pub fn on_mouse_drag(&mut self, x: u16, y: u16) {
        if self.drag.is_some() {
            return;
        }
        let press = match &self.mouse_press {
            Some(press) => press,
            None => return,
        };

        let travel = press.x.abs_diff(x).max(press.y.abs_diff(y));
        if travel >= DRAG_ACTIVATION_DISTANCE {
            if let Some(source_id) = press.source_id.clone() {
                let source = DragSource::parse(&source_id);
                self.status = source
                    .title(&self.planner)
                    .map(|title| format!("Moving '{}'", title));
                self.drag = Some(source);
            }
        }
    }

    pub fn on_mouse_up(&mut self, x: u16, y: u16) {
        if self.drag.is_some() {
            // Released mid-drag: resolve against whatever cell is under
            // the pointer (none -> cancelled gesture, no mutation)
            let target = self.grid_geometry.hit(x, y).and_then(|(day, slot)| {
                let dates = self.planner.display_dates();
                let date = *dates.get(day)?;
                let slot_time = dates::slot_for_index(slot)?;
                resolver::encode_drop_target(date, &slot_time)
            });
            self.finish_drag(target.as_deref());
            return;
        }

        // Sub-threshold release: a click moves the cursor
        if let Some((day, slot)) = self.grid_geometry.hit(x, y) {
            self.focus = Focus::Grid;
            self.cursor_day = day;
            self.cursor_slot = slot;
            self.cursor_task = 0;
        } else if let Some(row) = self.templates_geometry.hit_row(x, y) {
            if row < self.planner.predefined_tasks().len() {
                self.focus = Focus::Templates;
                self.template_cursor = row;
            }
        }
        self.mouse_press = None;
    }

    // --- forms ---

    pub fn start_add(&mut self) {
        let form = match self.focus {
            Focus::Grid => FormState::blank(FormKind::Task),
            Focus::Templates => FormState::blank(FormKind::Template),
            Focus::Events => FormState::blank(FormKind::Event),
        };
        self.form = Some(form);
        self.ui_mode = UiMode::Form;
    }

    pub fn start_edit(&mut self) {
        let form = match self.focus {
            Focus::Grid => self.selected_task().map(|task| {
                let mut form = FormState::blank(FormKind::Task);
                form.editing_id = Some(task.id.clone());
                form.title = task.title.clone();
                form.description = task.description.clone().unwrap_or_default();
                form.category = task.category.clone().unwrap_or_default();
                form.color_index = FormState::color_index_for(&task.color);
                form
            }),
            Focus::Templates => self.selected_template().map(|template| {
                let mut form = FormState::blank(FormKind::Template);
                form.editing_id = Some(template.id.clone());
                form.title = template.title.clone();
                form.description = template.description.clone().unwrap_or_default();
                form.category = template.category.clone().unwrap_or_default();
                form.color_index = FormState::color_index_for(&template.color);
                form
            }),
            Focus::Events => self.selected_event().map(|event| {
                let mut form = FormState::blank(FormKind::Event);
                form.editing_id = Some(event.id.clone());
                form.title = event.title.clone();
                form.description = event.description.clone().unwrap_or_default();
                form.is_all_day = event.is_all_day;
                if let Some(start) = &event.start_time {
                    form.start_time = start.clone();
                }
                if let Some(end) = &event.end_time {
                    form.end_time = end.clone();
                }
                form.color_index = FormState::color_index_for(&event.color);
                form
            }),
        };

        if let Some(form) = form {
            self.form = Some(form);
            self.ui_mode = UiMode::Form;
        }
    }

    pub fn form_next_field(&mut self) {
        if let Some(form) = &mut self.form {
            form.editing_field = (form.editing_field + 1) % form.field_count();
        }
    }

    pub fn form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.form {
            form.push_char(c);
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(form) = &mut self.form {
            form.pop_char();
        }
    }

    /// Space toggles the all-day flag, or cycles the color on the color
    /// field
    pub fn form_space(&mut self) {
        if let Some(form) = &mut self.form {
            if form.on_color_field() {
                form.color_index = (form.color_index + 1) % TASK_COLORS.len();
            } else if form.kind == FormKind::Event && form.editing_field == 2 {
                form.is_all_day = !form.is_all_day;
            } else {
                form.push_char(' ');
            }
        }
    }

    pub fn submit_form(&mut self) {
        let form = match self.form.take() {
            Some(form) => form,
            None => return,
        };
        self.ui_mode = UiMode::Normal;

        if form.title.trim().is_empty() {
            return;
        }

        let description = if form.description.trim().is_empty() {
            None
        } else {
            Some(form.description.clone())
        };
        let category = if form.category.trim().is_empty() {
            None
        } else {
            Some(form.category.clone())
        };
        let color = form.color().to_string();

        match (form.kind, &form.editing_id) {
            (FormKind::Task, None) => {
                let mut task = Task::new(form.title.clone(), self.cursor_date(), self.cursor_slot_time());
                task.description = description;
                task.category = category;
                task.color = color;
                self.status = Some(format!("Added '{}'", task.title));
                self.planner.add_task(task);
            }
            (FormKind::Task, Some(id)) => {
                self.planner.update_task(
                    id,
                    TaskUpdate {
                        title: Some(form.title.clone()),
                        description,
                        category,
                        color: Some(color),
                        ..Default::default()
                    },
                );
            }
            (FormKind::Event, None) => {
                let (start, end) = if form.is_all_day {
                    (None, None)
                } else {
                    (Some(form.start_time.clone()), Some(form.end_time.clone()))
                };
                let mut event = Event::new(form.title.clone(), self.cursor_date(), form.is_all_day, start, end);
                event.description = description;
                event.color = color;
                self.status = Some(format!("Added event '{}'", event.title));
                self.planner.add_event(event);
            }
            (FormKind::Event, Some(id)) => {
                let (start, end) = if form.is_all_day {
                    (Some(None), Some(None))
                } else {
                    (
                        Some(Some(form.start_time.clone())),
                        Some(Some(form.end_time.clone())),
                    )
                };
                self.planner.update_event(
                    id,
                    EventUpdate {
                        title: Some(form.title.clone()),
                        description,
                        is_all_day: Some(form.is_all_day),
                        start_time: start,
                        end_time: end,
                        color: Some(color),
                        ..Default::default()
                    },
                );
            }
            (FormKind::Template, None) => {
                let mut template = PredefinedTask::new(form.title.clone());
                template.description = description;
                template.category = category;
                template.color = color;
                self.status = Some(format!("Added template '{}'", template.title));
                self.planner.add_predefined_task(template);
            }
            (FormKind::Template, Some(id)) => {
                self.planner.update_predefined_task(
                    id,
                    PredefinedTaskUpdate {
                        title: Some(form.title.clone()),
                        description,
                        category,
                        color: Some(color),
                    },
                );
            }
        }
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.ui_mode = UiMode::Normal;
    }
}
