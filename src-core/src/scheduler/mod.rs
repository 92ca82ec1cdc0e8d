pub mod scheduler_service;

pub use scheduler_service::{ContributionScheduler, TickSummary};
