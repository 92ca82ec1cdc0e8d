pub mod memory;
pub mod store_model;
pub mod store_traits;

pub use memory::{MemoryActivityLog, MemoryNotifier, MemoryStore, SentEmail};
pub use store_model::{ActivityEntry, ActorType, GoalProgressUpdate, Notification, Severity};
pub use store_traits::{ActivityLogger, Notifier, PlanningStore, SchedulerStore};
