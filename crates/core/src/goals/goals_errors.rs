//! Goal domain errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GoalError {
    #[error("Goal not found: {0}")]
    NotFound(String),

    #[error("Invalid amount: {0} (must be positive)")]
    InvalidAmount(f64),

    #[error("Invalid deadline: {0}")]
    InvalidDeadline(String),
}
