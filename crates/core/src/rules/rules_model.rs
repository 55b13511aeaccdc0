//! Savings-rule domain models.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::rules::rules_errors::RuleError;

/// Rule-type-specific parameters.
///
/// Each variant carries only the fields its amount computation needs, so an
/// inconsistent combination (say, a percentage rule without a percentage)
/// cannot be represented. Validation happens once, at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleConfig {
    /// Save a percentage of each income event.
    PercentageOfIncome { percentage: f64 },
    /// Save a fixed amount per firing.
    FixedAmount { amount: f64 },
    /// Extension point: round transaction amounts up and save the change.
    /// No amount algorithm is defined yet; the rule never fires.
    RoundUp,
    /// Extension point: adaptive saving based on spending patterns.
    /// No amount algorithm is defined yet; the rule never fires.
    SmartSave,
}

impl RuleConfig {
    pub fn validate(&self) -> Result<(), RuleError> {
        match self {
            RuleConfig::PercentageOfIncome { percentage } => {
                if *percentage <= 0.0 || *percentage > 100.0 {
                    return Err(RuleError::InconsistentConfig(format!(
                        "percentage {} must be in (0, 100]",
                        percentage
                    )));
                }
            }
            RuleConfig::FixedAmount { amount } => {
                if *amount <= 0.0 {
                    return Err(RuleError::InconsistentConfig(format!(
                        "fixed amount {} must be positive",
                        amount
                    )));
                }
            }
            RuleConfig::RoundUp | RuleConfig::SmartSave => {}
        }
        Ok(())
    }

    /// Returns the string tag used for storage and display.
    pub fn type_name(&self) -> &'static str {
        match self {
            RuleConfig::PercentageOfIncome { .. } => "PERCENTAGE_OF_INCOME",
            RuleConfig::FixedAmount { .. } => "FIXED_AMOUNT",
            RuleConfig::RoundUp => "ROUND_UP",
            RuleConfig::SmartSave => "SMART_SAVE",
        }
    }
}

/// The cadence or trigger condition under which a rule is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleFrequency {
    EveryIncome,
    Daily,
    Weekly,
    Monthly,
    OnExpense,
}

impl RuleFrequency {
    /// The three frequencies the time-triggered scheduler pass sweeps.
    pub const TIME_BASED: [RuleFrequency; 3] = [
        RuleFrequency::Daily,
        RuleFrequency::Weekly,
        RuleFrequency::Monthly,
    ];

    /// Returns the string representation of this frequency.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleFrequency::EveryIncome => "EVERY_INCOME",
            RuleFrequency::Daily => "DAILY",
            RuleFrequency::Weekly => "WEEKLY",
            RuleFrequency::Monthly => "MONTHLY",
            RuleFrequency::OnExpense => "ON_EXPENSE",
        }
    }

    pub fn is_time_based(&self) -> bool {
        Self::TIME_BASED.contains(self)
    }

    /// The next scheduled instant after a firing at `from`.
    ///
    /// Monthly advances by one calendar month: Jan 31 lands on the last
    /// valid day of February, not an invalid date. Event-driven frequencies
    /// have no schedule and return None.
    pub fn next_occurrence(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            RuleFrequency::Daily => Some(from + Duration::days(1)),
            RuleFrequency::Weekly => Some(from + Duration::days(7)),
            RuleFrequency::Monthly => from.checked_add_months(Months::new(1)),
            RuleFrequency::EveryIncome | RuleFrequency::OnExpense => None,
        }
    }
}

impl std::str::FromStr for RuleFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EVERY_INCOME" => Ok(RuleFrequency::EveryIncome),
            "DAILY" => Ok(RuleFrequency::Daily),
            "WEEKLY" => Ok(RuleFrequency::Weekly),
            "MONTHLY" => Ok(RuleFrequency::Monthly),
            "ON_EXPENSE" => Ok(RuleFrequency::OnExpense),
            other => Err(format!("Unknown rule frequency: {}", other)),
        }
    }
}

impl std::fmt::Display for RuleFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A standing policy that automatically generates contributions toward a
/// goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsRule {
    pub id: String,
    pub goal_id: String,
    pub config: RuleConfig,
    pub frequency: RuleFrequency,
    /// Income gate: below this, the rule produces nothing and its schedule
    /// is not advanced.
    pub minimum_income_threshold: Option<f64>,
    /// Upper bound on any single contribution this rule produces.
    pub maximum_contribution: Option<f64>,
    pub enabled: bool,
    pub description: String,
    /// Stamped by the scheduler after a successful firing; never by user
    /// edits.
    pub last_executed: Option<DateTime<Utc>>,
    /// Meaningful only for time-based frequencies.
    pub next_scheduled: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SavingsRule {
    /// Computes the contribution this rule would produce for the given
    /// trigger context, or None when the rule should not fire.
    ///
    /// A None here means the firing attempt is skipped entirely: no ledger
    /// write and no schedule advance, so a gated rule is retried next
    /// period.
    pub fn contribution_amount(&self, income_amount: Option<f64>) -> Option<f64> {
        if !self.enabled {
            return None;
        }
        if let (Some(threshold), Some(income)) = (self.minimum_income_threshold, income_amount) {
            if income < threshold {
                return None;
            }
        }

        let raw = match self.config {
            RuleConfig::PercentageOfIncome { percentage } => income_amount? * percentage / 100.0,
            RuleConfig::FixedAmount { amount } => amount,
            RuleConfig::RoundUp | RuleConfig::SmartSave => return None,
        };

        let capped = match self.maximum_contribution {
            Some(cap) => raw.min(cap),
            None => raw,
        };
        (capped > 0.0).then_some(capped)
    }

    /// Whether a time-based rule is due at `as_of`. An unset schedule means
    /// immediately due.
    pub fn is_due(&self, as_of: DateTime<Utc>) -> bool {
        self.enabled && self.next_scheduled.map_or(true, |at| at <= as_of)
    }
}

/// Input model for creating a rule.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewRule {
    pub id: Option<String>,
    pub goal_id: String,
    pub config: RuleConfig,
    pub frequency: RuleFrequency,
    pub minimum_income_threshold: Option<f64>,
    pub maximum_contribution: Option<f64>,
    pub enabled: bool,
    pub description: String,
}

impl NewRule {
    pub fn validate(&self) -> Result<(), RuleError> {
        self.config.validate()?;
        if self.description.trim().is_empty() {
            return Err(RuleError::MissingDescription);
        }
        if let Some(threshold) = self.minimum_income_threshold {
            if threshold < 0.0 {
                return Err(RuleError::InconsistentConfig(format!(
                    "minimum income threshold {} must not be negative",
                    threshold
                )));
            }
        }
        if let Some(cap) = self.maximum_contribution {
            if cap <= 0.0 {
                return Err(RuleError::InconsistentConfig(format!(
                    "maximum contribution {} must be positive",
                    cap
                )));
            }
        }
        Ok(())
    }
}

/// Editable rule fields. Schedule stamps are scheduler-owned and absent
/// here.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RuleUpdate {
    pub config: Option<RuleConfig>,
    pub frequency: Option<RuleFrequency>,
    pub minimum_income_threshold: Option<f64>,
    pub maximum_contribution: Option<f64>,
    pub description: Option<String>,
}
