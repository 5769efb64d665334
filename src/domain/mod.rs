pub mod enums;
pub mod event;
pub mod ids;
pub mod predefined;
pub mod task;

pub use enums::{Focus, UiMode, Weekday};
pub use event::{Event, EventUpdate};
pub use ids::new_record_id;
pub use predefined::{PredefinedTask, PredefinedTaskUpdate};
pub use task::{Task, TaskUpdate, DEFAULT_COLOR, TASK_COLORS};
