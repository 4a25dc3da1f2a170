//! Report Policy
//!
//! Thresholds used to label risk and to fire insight rules. The defaults are
//! the published table; callers may swap in their own.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::model::RiskCategory;

/// Volatility cut points (percent, value-weighted mean |24h change|)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskPolicy {
    /// Scores from here up are at least Balanced
    pub balanced_from: Decimal,

    /// Scores from here up are Aggressive
    pub aggressive_from: Decimal,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            balanced_from: dec!(3),
            aggressive_from: dec!(8),
        }
    }
}

impl RiskPolicy {
    /// Lower bounds are inclusive
    pub fn categorize(&self, score: Decimal) -> RiskCategory {
        if score >= self.aggressive_from {
            RiskCategory::Aggressive
        } else if score >= self.balanced_from {
            RiskCategory::Balanced
        } else {
            RiskCategory::Conservative
        }
    }
}

/// Insight rule thresholds
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightPolicy {
    /// Allocation share (percent) above which the largest exposure is flagged
    pub concentration_threshold: Decimal,
}

impl Default for InsightPolicy {
    fn default() -> Self {
        Self {
            concentration_threshold: dec!(40),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPolicy {
    pub risk: RiskPolicy,
    pub insights: InsightPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_boundaries_inclusive_on_lower_bound() {
        let policy = RiskPolicy::default();
        assert_eq!(policy.categorize(dec!(0)), RiskCategory::Conservative);
        assert_eq!(policy.categorize(dec!(2.9999)), RiskCategory::Conservative);
        assert_eq!(policy.categorize(dec!(3)), RiskCategory::Balanced);
        assert_eq!(policy.categorize(dec!(7.9999)), RiskCategory::Balanced);
        assert_eq!(policy.categorize(dec!(8)), RiskCategory::Aggressive);
        assert_eq!(policy.categorize(dec!(150)), RiskCategory::Aggressive);
    }

    #[test]
    fn test_custom_policy() {
        let policy = RiskPolicy {
            balanced_from: dec!(1),
            aggressive_from: dec!(2),
        };
        assert_eq!(policy.categorize(dec!(1.5)), RiskCategory::Balanced);
    }
}
