use super::enums::Weekday;
use super::ids::new_record_id;
use crate::dates;
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Selectable task colors (red through pink)
pub const TASK_COLORS: [&str; 8] = [
    "#ef4444", "#f97316", "#eab308", "#22c55e", "#3b82f6", "#6366f1", "#a855f7", "#ec4899",
];

/// Default color for new tasks (blue)
pub const DEFAULT_COLOR: &str = "#3b82f6";

/// A task placed on the grid at a (date, time slot) cell
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Weekday label; always equals `dates::day_of_week(date)`. Stored for
    /// wire compatibility, recomputed on every mutation that changes `date`.
    pub day: Weekday,
    /// Calendar day, the primary placement key together with `time_slot`
    pub date: NaiveDate,
    /// One of the 18 hourly slots, "06:00".."23:00"
    pub time_slot: String,
    pub completed: bool,
    /// Hex color code, e.g. "#3b82f6"
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
}

/// Partial update for a task; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub time_slot: Option<String>,
    pub completed: Option<bool>,
    pub color: Option<String>,
    pub category: Option<String>,
}

impl Task {
    pub fn new(title: impl Into<String>, date: NaiveDate, time_slot: impl Into<String>) -> Self {
        let now = Local::now();

        Self {
            id: new_record_id("task"),
            title: title.into(),
            description: None,
            day: dates::day_of_week(date),
            date,
            time_slot: time_slot.into(),
            completed: false,
            color: DEFAULT_COLOR.to_string(),
            category: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Shallow-merge an update and refresh `updated_at`
    pub fn apply(&mut self, update: TaskUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(date) = update.date {
            self.date = date;
            self.day = dates::day_of_week(date);
        }
        if let Some(time_slot) = update.time_slot {
            self.time_slot = time_slot;
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
        if let Some(category) = update.category {
            self.category = Some(category);
        }
        self.updated_at = Local::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_task_new_defaults() {
        let task = Task::new("Standup", date(2024, 6, 3), "09:00");

        assert!(task.id.starts_with("task-"));
        assert_eq!(task.title, "Standup");
        assert_eq!(task.day, Weekday::Mon);
        assert_eq!(task.time_slot, "09:00");
        assert!(!task.completed);
        assert_eq!(task.color, DEFAULT_COLOR);
        assert!(task.description.is_none());
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_apply_recomputes_day() {
        let mut task = Task::new("Standup", date(2024, 6, 3), "09:00");

        task.apply(TaskUpdate {
            date: Some(date(2024, 6, 4)),
            time_slot: Some("14:00".to_string()),
            ..Default::default()
        });

        assert_eq!(task.day, Weekday::Tue);
        assert_eq!(task.time_slot, "14:00");
        assert_eq!(task.day, dates::day_of_week(task.date));
    }

    #[test]
    fn test_apply_refreshes_updated_at() {
        let mut task = Task::new("Standup", date(2024, 6, 3), "09:00");
        let before = task.updated_at;

        task.apply(TaskUpdate {
            completed: Some(true),
            ..Default::default()
        });

        assert!(task.updated_at > before);
        assert!(task.completed);
        // Untouched fields survive the merge
        assert_eq!(task.title, "Standup");
        assert_eq!(task.date, date(2024, 6, 3));
    }

    #[test]
    fn test_task_wire_format() {
        let task = Task::new("Standup", date(2024, 6, 3), "09:00");
        let json = serde_json::to_string(&task).unwrap();

        assert!(json.contains("\"timeSlot\":\"09:00\""));
        assert!(json.contains("\"date\":\"2024-06-03\""));
        assert!(json.contains("\"day\":\"mon\""));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"updatedAt\""));
        // Absent optionals are omitted, not null
        assert!(!json.contains("\"description\""));
        assert!(!json.contains("\"category\""));

        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, task.id);
        assert_eq!(back.date, task.date);
    }
}
