//! Analytics domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse classification of how likely a goal is to miss its deadline.
///
/// Ordered from lowest to highest: Low < Medium < High.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Returns the string representation of this risk level.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(RiskLevel::Low),
            "MEDIUM" => Ok(RiskLevel::Medium),
            "HIGH" => Ok(RiskLevel::High),
            other => Err(format!("Unknown risk level: {}", other)),
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Monthly income/expense snapshot for a user, supplied by an external
/// aggregation source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowSnapshot {
    pub user_id: String,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
}

impl CashflowSnapshot {
    pub fn disposable_income(&self) -> f64 {
        self.monthly_income - self.monthly_expenses
    }
}

/// Derived metrics cached on a goal. The progress analyzer is the only
/// writer of these fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalAnalytics {
    /// 0-100 estimate of how affordable the goal's required pace is.
    pub sustainability_score: i32,
    pub risk_level: RiskLevel,
    /// Falls back to the goal's deadline when there is no contribution
    /// history to project from.
    pub projected_completion_date: DateTime<Utc>,
    /// Actual / expected progress; 1.0 is exactly on pace.
    pub progress_rate: f64,
    pub next_suggested_contribution: f64,
    pub avg_monthly_contribution: Option<f64>,
    pub computed_at: DateTime<Utc>,
}

/// Thresholds and knobs for the progress analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsConfig {
    /// Progress rate below which a goal late in its window is High risk (default: 0.8)
    pub high_risk_progress_threshold: f64,

    /// Elapsed-time fraction past which a lagging goal is High risk (default: 0.7)
    pub high_risk_time_threshold: f64,

    /// Progress rate below which a goal past mid-window is Medium risk (default: 0.9)
    pub medium_risk_progress_threshold: f64,

    /// Elapsed-time fraction past which a slightly lagging goal is Medium risk (default: 0.5)
    pub medium_risk_time_threshold: f64,

    /// Sustainability score below which risk is at least Medium (default: 50)
    pub low_sustainability_score: i32,

    /// Suggested-contribution boost when well behind pace (default: 1.2)
    pub behind_pace_multiplier: f64,

    /// Suggested-contribution boost when slightly behind pace (default: 1.1)
    pub slightly_behind_multiplier: f64,

    /// Fraction of disposable income the suggestion never exceeds (default: 0.5)
    pub disposable_income_cap: f64,

    /// Month length used for pace arithmetic, in days (default: 30)
    pub days_per_month: f64,

    /// Floor for months-remaining so required pace stays finite as the
    /// deadline approaches or passes (default: 0.1)
    pub min_months_remaining: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            high_risk_progress_threshold: 0.8,
            high_risk_time_threshold: 0.7,
            medium_risk_progress_threshold: 0.9,
            medium_risk_time_threshold: 0.5,
            low_sustainability_score: 50,
            behind_pace_multiplier: 1.2,
            slightly_behind_multiplier: 1.1,
            disposable_income_cap: 0.5,
            days_per_month: 30.0,
            min_months_remaining: 0.1,
        }
    }
}

/// Aggregate result of an analytics pass over a user's active goals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsRunSummary {
    pub updated: usize,
    pub failed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
    }

    #[test]
    fn test_risk_level_round_trip() {
        for level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
            assert_eq!(level.as_str().parse::<RiskLevel>().unwrap(), level);
        }
    }

    #[test]
    fn test_default_config_matches_documented_thresholds() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.high_risk_progress_threshold, 0.8);
        assert_eq!(config.high_risk_time_threshold, 0.7);
        assert_eq!(config.low_sustainability_score, 50);
        assert_eq!(config.days_per_month, 30.0);
    }

    #[test]
    fn test_disposable_income() {
        let snapshot = CashflowSnapshot {
            user_id: "user-1".to_string(),
            monthly_income: 3000.0,
            monthly_expenses: 2100.0,
        };
        assert!((snapshot.disposable_income() - 900.0).abs() < 1e-9);
    }
}
