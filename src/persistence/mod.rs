pub mod files;
pub mod kv;
pub mod store;

pub use files::{atomic_write, ensure_planner_dir, get_planner_dir, init_local_planner, log_file_name, read_file};
pub use kv::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{CollectionStore, EVENTS_KEY, PREDEFINED_KEY, TASKS_KEY};
