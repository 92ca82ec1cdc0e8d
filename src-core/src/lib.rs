//! Money Lab planning core: risk classification, goal-term estimation,
//! investment allocation recommendations, and the recurring-contribution
//! scheduler. Persistence, notification delivery, and activity logging are
//! reached only through the traits in [`store`], so every component here can
//! run against the in-memory implementations as well as a real backend.

pub mod errors;
pub mod goals;
pub mod recommendation;
pub mod risk;
pub mod scheduler;
pub mod store;

pub use errors::{Error, Result, ValidationError};
