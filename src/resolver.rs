use crate::dates;
use crate::domain::Weekday;
use crate::planner::PlannerState;
use chrono::NaiveDate;

/// Literal prefix of every drop-target identifier
pub const DROP_PREFIX: &str = "drop-";

/// Prefix marking a drag source as a predefined-task template
pub const PREDEFINED_PREFIX: &str = "predefined-";

/// Minimum pointer travel, in terminal cells, before a press is treated
/// as a drag rather than a click
pub const DRAG_ACTIVATION_DISTANCE: u16 = 2;

/// A decoded drop location: one (day, date, slot) cell of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub day: Weekday,
    pub date: NaiveDate,
    pub time_slot: String,
}

/// What is being dragged: a placed task (moved on drop) or a template
/// (copied into a fresh task on drop)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    Task(String),
    Predefined(String),
}

impl DragSource {
    /// Classify a raw drag-source identifier by its prefix
    pub fn parse(id: &str) -> Self {
        match id.strip_prefix(PREDEFINED_PREFIX) {
            Some(template_id) => Self::Predefined(template_id.to_string()),
            None => Self::Task(id.to_string()),
        }
    }

    /// The wire identifier this source was parsed from
    pub fn encode(&self) -> String {
        match self {
            Self::Task(id) => id.clone(),
            Self::Predefined(id) => format!("{}{}", PREDEFINED_PREFIX, id),
        }
    }

    /// Title of the dragged record, for the status line
    pub fn title<'a>(&self, planner: &'a PlannerState) -> Option<&'a str> {
        match self {
            Self::Task(id) => planner
                .tasks()
                .iter()
                .find(|t| t.id == *id)
                .map(|t| t.title.as_str()),
            Self::Predefined(id) => planner
                .predefined_tasks()
                .iter()
                .find(|t| t.id == *id)
                .map(|t| t.title.as_str()),
        }
    }
}

/// Build the identifier for a grid cell: `drop-{day}|{epoch_millis}|{slot}`
pub fn encode_drop_target(date: NaiveDate, time_slot: &str) -> Option<String> {
    let millis = dates::millis_at_midnight(date)?;
    Some(format!(
        "{}{}|{}|{}",
        DROP_PREFIX,
        dates::day_of_week(date).as_label(),
        millis,
        time_slot
    ))
}

/// Decode a drop-target identifier into a typed placement.
///
/// Requires the literal prefix, exactly three `|`-separated parts, a known
/// day label, a non-empty slot, and epoch milliseconds that parse and land
/// on a representable local day. Anything else is `None`.
pub fn decode_drop_target(id: &str) -> Option<Placement> {
    let rest = id.strip_prefix(DROP_PREFIX)?;
    let parts: Vec<&str> = rest.split('|').collect();
    if parts.len() != 3 {
        return None;
    }

    let day = Weekday::from_label(parts[0])?;
    let millis: i64 = parts[1].parse().ok()?;
    let time_slot = parts[2];
    if time_slot.is_empty() {
        return None;
    }

    let date = dates::date_from_millis(millis)?;

    Some(Placement {
        day,
        date,
        time_slot: time_slot.to_string(),
    })
}

/// Land a drag gesture: decode the target and perform exactly one
/// mutation. A cancelled gesture (no target) or an undecodable target is
/// a no-op. Returns whether a mutation happened.
pub fn resolve_drop(planner: &mut PlannerState, source: &DragSource, target: Option<&str>) -> bool {
    let target = match target {
        Some(target) => target,
        None => return false,
    };

    let placement = match decode_drop_target(target) {
        Some(placement) => placement,
        None => return false,
    };

    match source {
        DragSource::Task(id) => {
            if !planner.tasks().iter().any(|t| t.id == *id) {
                return false;
            }
            planner.move_task(id, placement.date, &placement.time_slot);
            true
        }
        DragSource::Predefined(template_id) => {
            match planner.create_task_from_predefined(template_id, placement.date, &placement.time_slot)
            {
                Some(task) => {
                    planner.add_task(task);
                    true
                }
                None => false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PredefinedTask, Task};
    use crate::persistence::MemoryStorage;
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn planner() -> PlannerState {
        PlannerState::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_decode_well_formed_target() {
        let monday = date(2024, 6, 3);
        let millis = dates::millis_at_midnight(monday).unwrap();
        let id = format!("drop-mon|{}|09:00", millis);

        let placement = decode_drop_target(&id).unwrap();
        assert_eq!(placement.day, Weekday::Mon);
        assert_eq!(placement.date, monday);
        assert_eq!(placement.time_slot, "09:00");
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let tuesday = date(2024, 6, 4);
        let id = encode_drop_target(tuesday, "14:00").unwrap();
        assert!(id.starts_with("drop-tue|"));

        let placement = decode_drop_target(&id).unwrap();
        assert_eq!(placement.day, Weekday::Tue);
        assert_eq!(placement.date, tuesday);
        assert_eq!(placement.time_slot, "14:00");
    }

    #[test]
    fn test_decode_rejects_malformed_targets() {
        // Missing third segment
        assert_eq!(decode_drop_target("drop-mon|abc"), None);
        // Non-numeric timestamp
        assert_eq!(decode_drop_target("drop-mon|abc|09:00"), None);
        // Missing prefix
        assert_eq!(decode_drop_target("mon|1717372800000|09:00"), None);
        // Empty day
        assert_eq!(decode_drop_target("drop-|1717372800000|09:00"), None);
        // Unknown day label
        assert_eq!(decode_drop_target("drop-xyz|1717372800000|09:00"), None);
        // Empty time slot
        assert_eq!(decode_drop_target("drop-mon|1717372800000|"), None);
        // Too many segments
        assert_eq!(decode_drop_target("drop-mon|1717372800000|09:00|x"), None);
        // Timestamp outside the representable range
        let overflow = format!("drop-mon|{}|09:00", i64::MAX);
        assert_eq!(decode_drop_target(&overflow), None);
        // Empty input
        assert_eq!(decode_drop_target(""), None);
    }

    #[test]
    fn test_drag_source_parse() {
        assert_eq!(
            DragSource::parse("task-1717372800000-abc123def"),
            DragSource::Task("task-1717372800000-abc123def".to_string())
        );
        assert_eq!(
            DragSource::parse("predefined-template-1717372800000-abc123def"),
            DragSource::Predefined("template-1717372800000-abc123def".to_string())
        );
    }

    #[test]
    fn test_drag_source_encode_round_trip() {
        let task = DragSource::Task("task-1-a".to_string());
        assert_eq!(DragSource::parse(&task.encode()), task);

        let template = DragSource::Predefined("template-1-a".to_string());
        assert_eq!(DragSource::parse(&template.encode()), template);
    }

    #[test]
    fn test_drop_moves_existing_task() {
        let mut planner = planner();
        let task = Task::new("Standup", date(2024, 6, 3), "09:00");
        let id = task.id.clone();
        planner.add_task(task);

        let target = encode_drop_target(date(2024, 6, 5), "14:00").unwrap();
        let moved = resolve_drop(&mut planner, &DragSource::Task(id.clone()), Some(&target));

        assert!(moved);
        assert!(planner.tasks_for_slot(date(2024, 6, 3), "09:00").is_empty());
        assert_eq!(planner.tasks_for_slot(date(2024, 6, 5), "14:00")[0].id, id);
    }

    #[test]
    fn test_drop_copies_template() {
        let mut planner = planner();
        let template = PredefinedTask::new("Gym");
        let template_id = template.id.clone();
        planner.add_predefined_task(template);

        let target = encode_drop_target(date(2024, 6, 4), "14:00").unwrap();
        let source = DragSource::Predefined(template_id.clone());

        assert!(resolve_drop(&mut planner, &source, Some(&target)));
        assert!(resolve_drop(&mut planner, &source, Some(&target)));

        // Two drops stamped out two distinct tasks; the template remains
        let slot = planner.tasks_for_slot(date(2024, 6, 4), "14:00");
        assert_eq!(slot.len(), 2);
        assert_ne!(slot[0].id, slot[1].id);
        assert_eq!(planner.predefined_tasks().len(), 1);
        assert_eq!(planner.predefined_tasks()[0].id, template_id);
    }

    #[test]
    fn test_cancelled_drop_is_noop() {
        let mut planner = planner();
        let task = Task::new("Standup", date(2024, 6, 3), "09:00");
        let id = task.id.clone();
        planner.add_task(task);

        assert!(!resolve_drop(&mut planner, &DragSource::Task(id), None));
        assert_eq!(planner.tasks_for_slot(date(2024, 6, 3), "09:00").len(), 1);
    }

    #[test]
    fn test_malformed_target_is_noop() {
        let mut planner = planner();
        let task = Task::new("Standup", date(2024, 6, 3), "09:00");
        let id = task.id.clone();
        planner.add_task(task);

        assert!(!resolve_drop(
            &mut planner,
            &DragSource::Task(id),
            Some("drop-mon|abc")
        ));
        assert_eq!(planner.tasks_for_slot(date(2024, 6, 3), "09:00").len(), 1);
    }

    #[test]
    fn test_unknown_sources_are_noops() {
        let mut planner = planner();
        let target = encode_drop_target(date(2024, 6, 5), "14:00").unwrap();

        assert!(!resolve_drop(
            &mut planner,
            &DragSource::Task("task-0-missing".to_string()),
            Some(&target)
        ));
        assert!(!resolve_drop(
            &mut planner,
            &DragSource::Predefined("template-0-missing".to_string()),
            Some(&target)
        ));
        assert!(planner.tasks().is_empty());
    }
}
