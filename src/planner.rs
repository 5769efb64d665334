use crate::dates;
use crate::domain::{Event, EventUpdate, PredefinedTask, PredefinedTaskUpdate, Task, TaskUpdate};
use crate::persistence::{
    CollectionStore, KeyValueStorage, EVENTS_KEY, PREDEFINED_KEY, TASKS_KEY,
};
use chrono::{Local, NaiveDate};
use std::sync::Arc;

/// The aggregate planner state: the rolling date strip with its visible
/// window, and the task/event/template collections.
///
/// This is the single writer for all three collections. Every mutation
/// replaces the affected collection wholesale (filter/map over the old
/// one), so readers always observe a consistent snapshot, and issues one
/// save of the resulting collection. Mutations addressing an unknown id
/// are no-ops. Persistence is injected, so tests run against isolated
/// in-memory instances.
pub struct PlannerState {
    selected_dates: Vec<NaiveDate>,
    offset: usize,
    window_size: usize,
    tasks: Vec<Task>,
    events: Vec<Event>,
    predefined_tasks: Vec<PredefinedTask>,
    task_store: CollectionStore<Task>,
    event_store: CollectionStore<Event>,
    predefined_store: CollectionStore<PredefinedTask>,
}

impl PlannerState {
    /// Build the date strip around today and load all collections
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        let today = Local::now().date_naive();
        let selected_dates = dates::date_window(today);

        let mut task_store = CollectionStore::new(Arc::clone(&storage), TASKS_KEY);
        let mut event_store = CollectionStore::new(Arc::clone(&storage), EVENTS_KEY);
        let mut predefined_store = CollectionStore::new(storage, PREDEFINED_KEY);

        let tasks = task_store.load();
        let events = event_store.load();
        let predefined_tasks = predefined_store.load();

        let mut planner = Self {
            selected_dates,
            offset: 0,
            window_size: dates::WINDOW_SIZE,
            tasks,
            events,
            predefined_tasks,
            task_store,
            event_store,
            predefined_store,
        };
        planner.go_to_today();
        planner
    }

    // --- accessors ---

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn predefined_tasks(&self) -> &[PredefinedTask] {
        &self.predefined_tasks
    }

    pub fn selected_dates(&self) -> &[NaiveDate] {
        &self.selected_dates
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// The visible slice of the date strip
    pub fn display_dates(&self) -> &[NaiveDate] {
        let end = (self.offset + self.window_size).min(self.selected_dates.len());
        &self.selected_dates[self.offset..end]
    }

    fn max_offset(&self) -> usize {
        self.selected_dates.len().saturating_sub(self.window_size)
    }

    // --- task operations ---

    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
        self.task_store.save(&self.tasks);
    }

    pub fn update_task(&mut self, id: &str, update: TaskUpdate) {
        self.tasks = self
            .tasks
            .iter()
            .map(|task| {
                if task.id == id {
                    let mut updated = task.clone();
                    updated.apply(update.clone());
                    updated
                } else {
                    task.clone()
                }
            })
            .collect();
        self.task_store.save(&self.tasks);
    }

    pub fn delete_task(&mut self, id: &str) {
        self.tasks = self
            .tasks
            .iter()
            .filter(|task| task.id != id)
            .cloned()
            .collect();
        self.task_store.save(&self.tasks);
    }

    /// Remove every task placed on a given day
    pub fn delete_tasks_for_date(&mut self, date: NaiveDate) {
        self.tasks = self
            .tasks
            .iter()
            .filter(|task| task.date != date)
            .cloned()
            .collect();
        self.task_store.save(&self.tasks);
    }

    pub fn delete_all_tasks(&mut self) {
        self.tasks = Vec::new();
        self.task_store.save(&self.tasks);
    }

    pub fn toggle_complete(&mut self, id: &str) {
        self.tasks = self
            .tasks
            .iter()
            .map(|task| {
                if task.id == id {
                    let mut updated = task.clone();
                    updated.apply(TaskUpdate {
                        completed: Some(!task.completed),
                        ..Default::default()
                    });
                    updated
                } else {
                    task.clone()
                }
            })
            .collect();
        self.task_store.save(&self.tasks);
    }

    /// Reassign a task's placement. The weekday label is derived from the
    /// new date inside the update.
    pub fn move_task(&mut self, id: &str, new_date: NaiveDate, new_time_slot: &str) {
        self.update_task(
            id,
            TaskUpdate {
                date: Some(new_date),
                time_slot: Some(new_time_slot.to_string()),
                ..Default::default()
            },
        );
    }

    /// Tasks placed on a day, in insertion order
    pub fn tasks_for_day(&self, date: NaiveDate) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.date == date).collect()
    }

    /// Tasks placed in one (day, slot) cell, in insertion order
    pub fn tasks_for_slot(&self, date: NaiveDate, time_slot: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.date == date && t.time_slot == time_slot)
            .collect()
    }

    // --- event operations ---

    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
        self.event_store.save(&self.events);
    }

    pub fn update_event(&mut self, id: &str, update: EventUpdate) {
        self.events = self
            .events
            .iter()
            .map(|event| {
                if event.id == id {
                    let mut updated = event.clone();
                    updated.apply(update.clone());
                    updated
                } else {
                    event.clone()
                }
            })
            .collect();
        self.event_store.save(&self.events);
    }

    pub fn delete_event(&mut self, id: &str) {
        self.events = self
            .events
            .iter()
            .filter(|event| event.id != id)
            .cloned()
            .collect();
        self.event_store.save(&self.events);
    }

    /// Events attached to a day, in insertion order
    pub fn events_for_day(&self, date: NaiveDate) -> Vec<&Event> {
        self.events.iter().filter(|e| e.date == date).collect()
    }

    // --- predefined task operations ---

    pub fn add_predefined_task(&mut self, template: PredefinedTask) {
        self.predefined_tasks.push(template);
        self.predefined_store.save(&self.predefined_tasks);
    }

    pub fn update_predefined_task(&mut self, id: &str, update: PredefinedTaskUpdate) {
        self.predefined_tasks = self
            .predefined_tasks
            .iter()
            .map(|template| {
                if template.id == id {
                    let mut updated = template.clone();
                    updated.apply(update.clone());
                    updated
                } else {
                    template.clone()
                }
            })
            .collect();
        self.predefined_store.save(&self.predefined_tasks);
    }

    pub fn delete_predefined_task(&mut self, id: &str) {
        self.predefined_tasks = self
            .predefined_tasks
            .iter()
            .filter(|template| template.id != id)
            .cloned()
            .collect();
        self.predefined_store.save(&self.predefined_tasks);
    }

    /// Stamp out a placed task from a template. Does not insert it; pair
    /// with `add_task`. The template is never consumed or mutated.
    pub fn create_task_from_predefined(
        &self,
        template_id: &str,
        date: NaiveDate,
        time_slot: &str,
    ) -> Option<Task> {
        self.predefined_tasks
            .iter()
            .find(|t| t.id == template_id)
            .map(|template| template.instantiate(date, time_slot))
    }

    // --- window operations ---

    /// Recenter so today is the first visible date
    pub fn go_to_today(&mut self) {
        let max = self.max_offset();
        self.offset = self
            .selected_dates
            .iter()
            .position(|d| dates::is_today(*d))
            .map(|i| i.min(max))
            .unwrap_or(0);
    }

    /// Recenter on a week's start date if it is in the strip, else rewind
    /// to the beginning
    pub fn go_to_week(&mut self, week_start: NaiveDate) {
        let max = self.max_offset();
        self.offset = self
            .selected_dates
            .iter()
            .position(|d| *d == week_start)
            .map(|i| i.min(max))
            .unwrap_or(0);
    }

    /// Slide the visible window, clamped to the strip bounds
    pub fn shift_window(&mut self, delta: i64) {
        self.offset = dates::shift_window(&self.selected_dates, self.offset, delta, self.window_size);
    }

    pub fn has_more_days(&self) -> bool {
        self.offset < self.max_offset()
    }

    pub fn has_previous_days(&self) -> bool {
        self.offset > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::{format_iso, parse_iso};
    use crate::domain::Weekday;
    use crate::persistence::MemoryStorage;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn planner() -> PlannerState {
        PlannerState::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_add_task_appears_exactly_once_in_slot() {
        let mut planner = planner();
        let task = Task::new("Standup", date(2024, 6, 3), "09:00");
        let id = task.id.clone();

        planner.add_task(task);

        let slot = planner.tasks_for_slot(date(2024, 6, 3), "09:00");
        assert_eq!(slot.len(), 1);
        assert_eq!(slot[0].id, id);
        assert_eq!(slot[0].day, Weekday::Mon);

        // Neighboring slots stay empty
        assert!(planner.tasks_for_slot(date(2024, 6, 3), "10:00").is_empty());
        assert!(planner.tasks_for_slot(date(2024, 6, 4), "09:00").is_empty());
    }

    #[test]
    fn test_update_task_bumps_updated_at() {
        let mut planner = planner();
        let task = Task::new("Standup", date(2024, 6, 3), "09:00");
        let id = task.id.clone();
        let before = task.updated_at;
        planner.add_task(task);

        planner.update_task(
            &id,
            TaskUpdate {
                title: Some("Daily standup".to_string()),
                ..Default::default()
            },
        );

        let updated = planner.tasks().iter().find(|t| t.id == id).unwrap();
        assert_eq!(updated.title, "Daily standup");
        assert!(updated.updated_at > before);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut planner = planner();
        planner.add_task(Task::new("Standup", date(2024, 6, 3), "09:00"));

        planner.update_task(
            "task-0-missing",
            TaskUpdate {
                title: Some("Ghost".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(planner.tasks().len(), 1);
        assert_eq!(planner.tasks()[0].title, "Standup");
    }

    #[test]
    fn test_move_task_between_slots() {
        let mut planner = planner();
        let task = Task::new("Standup", date(2024, 6, 3), "09:00");
        let id = task.id.clone();
        planner.add_task(task);

        planner.move_task(&id, date(2024, 6, 5), "14:00");

        assert!(planner.tasks_for_slot(date(2024, 6, 3), "09:00").is_empty());
        let moved = planner.tasks_for_slot(date(2024, 6, 5), "14:00");
        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].id, id);
        // Day label follows the date
        assert_eq!(moved[0].day, Weekday::Wed);
        assert_eq!(moved[0].day, dates::day_of_week(moved[0].date));
    }

    #[test]
    fn test_delete_task() {
        let mut planner = planner();
        let task = Task::new("Standup", date(2024, 6, 3), "09:00");
        let id = task.id.clone();
        planner.add_task(task);
        planner.add_task(Task::new("Review", date(2024, 6, 3), "11:00"));

        planner.delete_task(&id);

        assert_eq!(planner.tasks().len(), 1);
        assert_eq!(planner.tasks()[0].title, "Review");

        // Deleting again is a no-op
        planner.delete_task(&id);
        assert_eq!(planner.tasks().len(), 1);
    }

    #[test]
    fn test_delete_tasks_for_date_spares_other_days() {
        let mut planner = planner();
        planner.add_task(Task::new("A", date(2024, 6, 3), "09:00"));
        planner.add_task(Task::new("B", date(2024, 6, 3), "14:00"));
        planner.add_task(Task::new("C", date(2024, 6, 4), "09:00"));

        planner.delete_tasks_for_date(date(2024, 6, 3));

        assert!(planner.tasks_for_day(date(2024, 6, 3)).is_empty());
        assert_eq!(planner.tasks_for_day(date(2024, 6, 4)).len(), 1);
    }

    #[test]
    fn test_delete_all_tasks() {
        let mut planner = planner();
        planner.add_task(Task::new("A", date(2024, 6, 3), "09:00"));
        planner.add_task(Task::new("B", date(2024, 6, 4), "14:00"));

        planner.delete_all_tasks();

        assert!(planner.tasks().is_empty());
    }

    #[test]
    fn test_toggle_complete_twice_round_trips() {
        let mut planner = planner();
        let task = Task::new("Standup", date(2024, 6, 3), "09:00");
        let id = task.id.clone();
        let t0 = task.updated_at;
        planner.add_task(task);

        planner.toggle_complete(&id);
        let t1 = planner.tasks()[0].updated_at;
        assert!(planner.tasks()[0].completed);
        assert!(t1 > t0);

        planner.toggle_complete(&id);
        let t2 = planner.tasks()[0].updated_at;
        assert!(!planner.tasks()[0].completed);
        assert!(t2 > t1);
    }

    #[test]
    fn test_slot_queries_preserve_insertion_order() {
        let mut planner = planner();
        planner.add_task(Task::new("First", date(2024, 6, 3), "09:00"));
        planner.add_task(Task::new("Second", date(2024, 6, 3), "09:00"));
        planner.add_task(Task::new("Third", date(2024, 6, 3), "09:00"));

        let slot = planner.tasks_for_slot(date(2024, 6, 3), "09:00");
        let titles: Vec<&str> = slot.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_iso_keys_match_queries() {
        // Queries key on the same calendar day the ISO form names
        let mut planner = planner();
        let iso = "2024-06-03";
        let day = parse_iso(iso).unwrap();
        planner.add_task(Task::new("Standup", day, "09:00"));

        let found = planner.tasks_for_day(day);
        assert_eq!(found.len(), 1);
        assert_eq!(format_iso(found[0].date), iso);
    }

    #[test]
    fn test_event_crud_and_day_query() {
        let mut planner = planner();
        let event = Event::new("Dentist", date(2024, 6, 4), false, Some("10:00".into()), Some("11:00".into()));
        let id = event.id.clone();
        planner.add_event(event);
        planner.add_event(Event::new("Holiday", date(2024, 6, 5), true, None, None));

        assert_eq!(planner.events_for_day(date(2024, 6, 4)).len(), 1);
        assert_eq!(planner.events_for_day(date(2024, 6, 5)).len(), 1);
        assert!(planner.events_for_day(date(2024, 6, 6)).is_empty());

        planner.update_event(
            &id,
            EventUpdate {
                title: Some("Dentist appointment".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(planner.events_for_day(date(2024, 6, 4))[0].title, "Dentist appointment");

        planner.delete_event(&id);
        assert!(planner.events_for_day(date(2024, 6, 4)).is_empty());
        assert_eq!(planner.events().len(), 1);
    }

    #[test]
    fn test_predefined_crud() {
        let mut planner = planner();
        let template = PredefinedTask::new("Gym");
        let id = template.id.clone();
        planner.add_predefined_task(template);

        planner.update_predefined_task(
            &id,
            PredefinedTaskUpdate {
                color: Some("#ef4444".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(planner.predefined_tasks()[0].color, "#ef4444");

        planner.delete_predefined_task(&id);
        assert!(planner.predefined_tasks().is_empty());
    }

    #[test]
    fn test_create_task_from_predefined() {
        let mut planner = planner();
        let mut template = PredefinedTask::new("Gym");
        template.description = Some("Leg day".to_string());
        template.color = "#22c55e".to_string();
        template.category = Some("health".to_string());
        let template_id = template.id.clone();
        planner.add_predefined_task(template);

        let task = planner
            .create_task_from_predefined(&template_id, date(2024, 6, 4), "14:00")
            .unwrap();

        assert_ne!(task.id, template_id);
        assert_eq!(task.title, "Gym");
        assert_eq!(task.description.as_deref(), Some("Leg day"));
        assert_eq!(task.color, "#22c55e");
        assert_eq!(task.category.as_deref(), Some("health"));
        assert_eq!(task.day, Weekday::Tue);
        assert_eq!(task.time_slot, "14:00");

        // Factory alone does not insert
        assert!(planner.tasks().is_empty());
        // The template survives, unchanged
        assert_eq!(planner.predefined_tasks().len(), 1);

        planner.add_task(task);
        assert_eq!(planner.tasks_for_slot(date(2024, 6, 4), "14:00").len(), 1);
    }

    #[test]
    fn test_create_task_from_unknown_template() {
        let planner = planner();
        assert!(planner
            .create_task_from_predefined("template-0-missing", date(2024, 6, 4), "14:00")
            .is_none());
    }

    #[test]
    fn test_window_starts_on_today() {
        let planner = planner();
        let today = Local::now().date_naive();

        assert_eq!(planner.selected_dates().len(), 43);
        assert_eq!(planner.display_dates().len(), 5);
        assert_eq!(planner.display_dates()[0], today);
        assert!(planner.has_previous_days());
        assert!(planner.has_more_days());
    }

    #[test]
    fn test_shift_window_clamps_at_strip_bounds() {
        let mut planner = planner();
        let max = planner.selected_dates().len() - planner.window_size();

        planner.shift_window(-1000);
        assert_eq!(planner.offset(), 0);
        assert!(!planner.has_previous_days());
        assert!(planner.has_more_days());

        planner.shift_window(1000);
        assert_eq!(planner.offset(), max);
        assert!(planner.has_previous_days());
        assert!(!planner.has_more_days());
    }

    #[test]
    fn test_go_to_today_recenters() {
        let mut planner = planner();
        let today = Local::now().date_naive();

        planner.shift_window(-1000);
        planner.go_to_today();

        assert_eq!(planner.display_dates()[0], today);
    }

    #[test]
    fn test_go_to_week_present_and_absent() {
        let mut planner = planner();
        let in_strip = planner.selected_dates()[10];

        planner.go_to_week(in_strip);
        assert_eq!(planner.offset(), 10);

        // A date outside the strip rewinds to the start
        planner.go_to_week(date(1999, 1, 1));
        assert_eq!(planner.offset(), 0);
    }

    #[test]
    fn test_go_to_week_near_end_clamps() {
        let mut planner = planner();
        let last = *planner.selected_dates().last().unwrap();
        let max = planner.selected_dates().len() - planner.window_size();

        planner.go_to_week(last);
        assert_eq!(planner.offset(), max);
        assert_eq!(planner.display_dates().len(), 5);
    }

    #[test]
    fn test_mutations_persist_across_instances() {
        let storage = Arc::new(MemoryStorage::new());

        let mut first = PlannerState::new(Arc::clone(&storage) as Arc<dyn KeyValueStorage>);
        let task = Task::new("Standup", date(2024, 6, 3), "09:00");
        let task_id = task.id.clone();
        first.add_task(task);
        first.add_event(Event::new("Holiday", date(2024, 6, 5), true, None, None));
        first.add_predefined_task(PredefinedTask::new("Gym"));

        let second = PlannerState::new(storage);
        assert_eq!(second.tasks().len(), 1);
        assert_eq!(second.tasks()[0].id, task_id);
        assert_eq!(second.events().len(), 1);
        assert_eq!(second.predefined_tasks().len(), 1);
    }

    #[test]
    fn test_storage_write_failure_keeps_memory_state() {
        let mut planner = PlannerState::new(Arc::new(MemoryStorage::failing()));

        planner.add_task(Task::new("Standup", date(2024, 6, 3), "09:00"));

        // The write was dropped, but the session state is authoritative
        assert_eq!(planner.tasks_for_day(date(2024, 6, 3)).len(), 1);
    }

    #[test]
    fn test_day_label_invariant_after_mutations() {
        let mut planner = planner();
        let task = Task::new("Standup", date(2024, 6, 3), "09:00");
        let id = task.id.clone();
        planner.add_task(task);

        planner.move_task(&id, date(2024, 6, 8), "06:00");
        planner.update_task(
            &id,
            TaskUpdate {
                date: Some(date(2024, 6, 9)),
                ..Default::default()
            },
        );
        planner.toggle_complete(&id);

        for task in planner.tasks() {
            assert_eq!(task.day, dates::day_of_week(task.date));
        }
    }
}
