use super::ids::new_record_id;
use super::task::{Task, DEFAULT_COLOR};
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// A reusable task template. Never placed on the grid itself; dropping it
/// onto a cell stamps out a fresh `Task`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredefinedTask {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
}

/// Partial update for a template; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct PredefinedTaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub category: Option<String>,
}

impl PredefinedTask {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Local::now();

        Self {
            id: new_record_id("template"),
            title: title.into(),
            description: None,
            color: DEFAULT_COLOR.to_string(),
            category: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Shallow-merge an update and refresh `updated_at`
    pub fn apply(&mut self, update: PredefinedTaskUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(color) = update.color {
            self.color = color;
        }
        if let Some(category) = update.category {
            self.category = Some(category);
        }
        self.updated_at = Local::now();
    }

    /// Stamp out a placed task from this template: fresh id and
    /// timestamps, copied title/color/description/category. The template
    /// itself is untouched.
    pub fn instantiate(&self, date: NaiveDate, time_slot: impl Into<String>) -> Task {
        let mut task = Task::new(self.title.clone(), date, time_slot);
        task.description = self.description.clone();
        task.color = self.color.clone();
        task.category = self.category.clone();
        task
    }
}
