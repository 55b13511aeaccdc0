//! Scheduler module - decides which rules fire and applies the results.

mod scheduler_model;
mod scheduler_service;
mod scheduler_traits;


pub use scheduler_model::{IncomeEvent, SchedulerRunSummary};
pub use scheduler_service::SchedulerService;
pub use scheduler_traits::SchedulerServiceTrait;
