//! Analytics module - progress-vs-schedule and sustainability scoring.

mod analytics_model;
mod analytics_service;
mod analytics_traits;


pub use analytics_model::{
    AnalyticsConfig, AnalyticsRunSummary, CashflowSnapshot, GoalAnalytics, RiskLevel,
};
pub use analytics_service::AnalyticsService;
pub use analytics_traits::AnalyticsServiceTrait;
