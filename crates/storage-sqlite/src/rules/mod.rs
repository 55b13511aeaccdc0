//! SQLite storage for savings rules.

pub mod model;
pub mod repository;

pub use model::{NewRuleDB, RuleDB};
pub use repository::RuleRepository;
