use super::enums::Weekday;
use super::ids::new_record_id;
use super::task::DEFAULT_COLOR;
use crate::dates;
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar event attached to a day, all-day or timed.
///
/// For timed events both `start_time` and `end_time` are expected in
/// "HH:MM" form, with start before end. Neither is enforced here; the
/// record stores whatever the caller supplies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Weekday label; always equals `dates::day_of_week(date)`
    pub day: Weekday,
    pub date: NaiveDate,
    pub is_all_day: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub color: String,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
}

/// Partial update for an event.
///
/// `start_time`/`end_time` use a double option so callers can clear them
/// when an event becomes all-day: `None` leaves the field untouched,
/// `Some(None)` clears it, `Some(Some(_))` sets it.
#[derive(Debug, Clone, Default)]
pub struct EventUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub is_all_day: Option<bool>,
    pub start_time: Option<Option<String>>,
    pub end_time: Option<Option<String>>,
    pub color: Option<String>,
}

impl Event {
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        is_all_day: bool,
        start_time: Option<String>,
        end_time: Option<String>,
    ) -> Self {
        let now = Local::now();

        Self {
            id: new_record_id("event"),
            title: title.into(),
            description: None,
            day: dates::day_of_week(date),
            date,
            is_all_day,
            start_time,
            end_time,
            color: DEFAULT_COLOR.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Shallow-merge an update and refresh `updated_at`
    pub fn apply(&mut self, update: EventUpdate) {
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
        if let Some(is_all_day) = update.is_all_day {
            self.is_all_day = is_all_day;
        }
        if let Some(start_time) = update.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = update.end_time {
            self.end_time = end_time;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
        self.updated_at = Local::now();
    }

    /// "all day" or "HH:MM - HH:MM" for display
    pub fn time_label(&self) -> String {
        if self.is_all_day {
            "all day".to_string()
        } else {
            match (&self.start_time, &self.end_time) {
                (Some(start), Some(end)) => format!("{} - {}", start, end),
                (Some(start), None) => format!("{} -", start),
                _ => String::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_event_new() {
        let event = Event::new("Dentist", date(2024, 6, 4), false, Some("10:00".into()), Some("11:00".into()));

        assert!(event.id.starts_with("event-"));
        assert_eq!(event.day, Weekday::Tue);
        assert!(!event.is_all_day);
        assert_eq!(event.time_label(), "10:00 - 11:00");
    }

    #[test]
    fn test_all_day_label() {
        let event = Event::new("Holiday", date(2024, 6, 4), true, None, None);
        assert_eq!(event.time_label(), "all day");
    }

    #[test]
    fn test_apply_clears_times_when_all_day() {
        let mut event = Event::new("Dentist", date(2024, 6, 4), false, Some("10:00".into()), Some("11:00".into()));

        event.apply(EventUpdate {
            is_all_day: Some(true),
            start_time: Some(None),
            end_time: Some(None),
            ..Default::default()
        });

        assert!(event.is_all_day);
        assert!(event.start_time.is_none());
        assert!(event.end_time.is_none());
    }

    #[test]
    fn test_apply_moves_date_and_day() {
        let mut event = Event::new("Dentist", date(2024, 6, 4), true, None, None);
        let before = event.updated_at;

        event.apply(EventUpdate {
            date: Some(date(2024, 6, 7)),
            ..Default::default()
        });

        assert_eq!(event.day, Weekday::Fri);
        assert!(event.updated_at > before);
    }

    #[test]
    fn test_event_wire_format() {
        let event = Event::new("Dentist", date(2024, 6, 4), false, Some("10:00".into()), Some("11:00".into()));
        let json = serde_json::to_string(&event).unwrap();

        assert!(json.contains("\"isAllDay\":false"));
        assert!(json.contains("\"startTime\":\"10:00\""));
        assert!(json.contains("\"endTime\":\"11:00\""));

        let all_day = Event::new("Holiday", date(2024, 6, 4), true, None, None);
        let json = serde_json::to_string(&all_day).unwrap();
        assert!(!json.contains("startTime"));
        assert!(!json.contains("endTime"));
    }
}
