//! Goals module - domain models, services, and traits.

mod goals_errors;
mod goals_model;
mod goals_service;
mod goals_traits;

#[cfg(test)]
mod goals_model_tests;

pub use goals_errors::GoalError;
pub use goals_model::{
    AutoContributionMode, AutoContributionPolicy, GoalPriority, GoalProgress, GoalStatus,
    GoalUpdate, NewGoal, SavingsGoal,
};
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
