pub mod goals_model;
pub mod term;

pub use goals_model::{
    ContributionTransaction, Frequency, GoalStatus, NewGoal, SavingsGoal, TransactionStatus,
    Wallet,
};
pub use term::{estimate_duration_months, FALLBACK_HORIZON_MONTHS};
