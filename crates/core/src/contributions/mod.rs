//! Contributions module - the append-only ledger behind every goal total.

mod contributions_model;
mod contributions_service;
mod contributions_traits;

#[cfg(test)]
mod contributions_service_tests;

pub use contributions_model::{Contribution, ContributionSource, NewContribution};
pub use contributions_service::ContributionService;
pub use contributions_traits::{ContributionRepositoryTrait, ContributionServiceTrait};
