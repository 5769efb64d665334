use crate::domain::Weekday;
use chrono::{Datelike, Duration, Local, NaiveDate, TimeZone};

/// Days kept before today in the rolling date strip
pub const DAYS_BEFORE: i64 = 21;

/// Days kept after today in the rolling date strip
pub const DAYS_AFTER: i64 = 21;

/// Number of day columns visible at once
pub const WINDOW_SIZE: usize = 5;

/// First schedulable hour (06:00)
pub const FIRST_HOUR: u32 = 6;

/// Last schedulable hour (23:00)
pub const LAST_HOUR: u32 = 23;

/// Number of hourly slots per day (06:00..23:00 inclusive)
pub const SLOT_COUNT: usize = (LAST_HOUR - FIRST_HOUR + 1) as usize;

/// One hourly slot of the planning grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    /// Hour of day, 6..=23
    pub hour: u32,
    /// Storage form, e.g. "06:00"
    pub time: String,
    /// Display form, e.g. "6:00 AM"
    pub label: String,
}

/// Start of the week containing `date`, where weeks run Saturday..Friday.
///
/// Subtracts `1` for a Sunday and `dow + 1` otherwise (days counted from
/// Sunday), so a Saturday input steps back a full week.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let dow = date.weekday().num_days_from_sunday();
    let days_to_subtract = if dow == 0 { 1 } else { dow + 1 };
    date - Duration::days(days_to_subtract as i64)
}

/// Date of a given weekday within the week starting at `week_start`
pub fn date_for_day(week_start: NaiveDate, day: Weekday) -> NaiveDate {
    week_start + Duration::days(day.index() as i64)
}

/// Weekday label for a date
pub fn day_of_week(date: NaiveDate) -> Weekday {
    match date.weekday() {
        chrono::Weekday::Sat => Weekday::Sat,
        chrono::Weekday::Sun => Weekday::Sun,
        chrono::Weekday::Mon => Weekday::Mon,
        chrono::Weekday::Tue => Weekday::Tue,
        chrono::Weekday::Wed => Weekday::Wed,
        chrono::Weekday::Thu => Weekday::Thu,
        chrono::Weekday::Fri => Weekday::Fri,
    }
}

/// Format a date as zero-padded local YYYY-MM-DD
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a YYYY-MM-DD string back to a date
pub fn parse_iso(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Whether a date is the current local calendar day
pub fn is_today(date: NaiveDate) -> bool {
    date == Local::now().date_naive()
}

/// Local calendar day containing an epoch-milliseconds instant
pub fn date_from_millis(millis: i64) -> Option<NaiveDate> {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.date_naive())
}

/// Epoch milliseconds of local midnight for a date (drop-target encoding)
pub fn millis_at_midnight(date: NaiveDate) -> Option<i64> {
    Local
        .from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
        .single()
        .map(|dt| dt.timestamp_millis())
}

/// Generate the 18 hourly slots, 06:00 through 23:00
pub fn generate_time_slots() -> Vec<TimeSlot> {
    let mut slots = Vec::with_capacity(SLOT_COUNT);

    for hour in FIRST_HOUR..=LAST_HOUR {
        let time = format!("{:02}:00", hour);
        let period = if hour >= 12 { "PM" } else { "AM" };
        let display_hour = if hour > 12 { hour - 12 } else { hour };
        let label = format!("{}:00 {}", display_hour, period);

        slots.push(TimeSlot { hour, time, label });
    }

    slots
}

/// Index of a slot string within the daily grid (None if not a grid slot)
pub fn slot_index(time: &str) -> Option<usize> {
    let hour: u32 = time.strip_suffix(":00")?.parse().ok()?;
    if (FIRST_HOUR..=LAST_HOUR).contains(&hour) {
        Some((hour - FIRST_HOUR) as usize)
    } else {
        None
    }
}

/// Slot string for a grid row index
pub fn slot_for_index(index: usize) -> Option<String> {
    if index < SLOT_COUNT {
        Some(format!("{:02}:00", FIRST_HOUR + index as u32))
    } else {
        None
    }
}

/// Clamp `offset + delta` to the valid window range over `dates`
pub fn shift_window(dates: &[NaiveDate], offset: usize, delta: i64, window_size: usize) -> usize {
    let max_offset = dates.len().saturating_sub(window_size) as i64;
    (offset as i64 + delta).clamp(0, max_offset) as usize
}

/// Build the rolling date strip around `center`: 43 consecutive days
/// spanning 21 before through 21 after
pub fn date_window(center: NaiveDate) -> Vec<NaiveDate> {
    (-DAYS_BEFORE..=DAYS_AFTER)
        .map(|d| center + Duration::days(d))
        .collect()
}
