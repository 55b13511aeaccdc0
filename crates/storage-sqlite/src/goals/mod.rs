//! SQLite storage for savings goals.

pub mod model;
pub mod repository;

pub use model::{GoalDB, NewGoalDB};
pub use repository::GoalRepository;
