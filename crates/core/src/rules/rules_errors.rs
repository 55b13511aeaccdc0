//! Rule domain errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Rule not found: {0}")]
    NotFound(String),

    #[error("Inconsistent rule configuration: {0}")]
    InconsistentConfig(String),

    #[error("Rule description must not be empty")]
    MissingDescription,
}
