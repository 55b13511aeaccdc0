//! SQLite storage for the contribution ledger.

pub mod model;
pub mod repository;

pub use model::{ContributionDB, NewContributionDB};
pub use repository::ContributionRepository;
