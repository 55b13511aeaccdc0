//! Rules module - standing policies that generate contributions.

mod rules_errors;
mod rules_model;
mod rules_service;
mod rules_traits;

#[cfg(test)]
mod rules_service_tests;

pub use rules_errors::RuleError;
pub use rules_model::{NewRule, RuleConfig, RuleFrequency, RuleUpdate, SavingsRule};
pub use rules_service::RuleService;
pub use rules_traits::{RuleRepositoryTrait, RuleServiceTrait};
