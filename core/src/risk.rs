//! Threshold-based risk scoring for inventory items.

use serde::{Deserialize, Serialize};

use crate::catalog::InventoryItem;

const LOW_STOCK_UNITS: u32 = 10;
const LONG_LEAD_TIME_DAYS: u32 = 20;
const HIGH_DEFECT_RATE: f64 = 5.0;
const SLOW_SHIPPING_DAYS: u32 = 10;

const HIGH_RISK_SCORE: u32 = 6;
const MEDIUM_RISK_SCORE: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    fn from_score(score: u32) -> Self {
        if score >= HIGH_RISK_SCORE {
            RiskLevel::High
        } else if score >= MEDIUM_RISK_SCORE {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            RiskLevel::High => "URGENT ACTION REQUIRED",
            RiskLevel::Medium => "Review and Monitor",
            RiskLevel::Low => "Continue Normal Operations",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub sku: String,
    pub risk_level: RiskLevel,
    pub risk_score: u32,
    pub risk_factors: Vec<String>,
    pub action: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RiskSummary {
    pub fn from_assessments(assessments: &[RiskAssessment]) -> Self {
        let mut summary = Self::default();
        for a in assessments {
            match a.risk_level {
                RiskLevel::High => summary.high += 1,
                RiskLevel::Medium => summary.medium += 1,
                RiskLevel::Low => summary.low += 1,
            }
        }
        summary
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RiskAnalyzer;

impl RiskAnalyzer {
    pub fn assess(&self, item: &InventoryItem) -> RiskAssessment {
        let checks: [(bool, u32, &str); 4] = [
            (item.stock_level < LOW_STOCK_UNITS, 3, "Low Stock"),
            (item.lead_time_days > LONG_LEAD_TIME_DAYS, 2, "Long Lead Time"),
            (item.defect_rate > HIGH_DEFECT_RATE, 3, "High Defect Rate"),
            (item.shipping_time_days > SLOW_SHIPPING_DAYS, 1, "Slow Shipping"),
        ];

        let mut risk_score = 0;
        let mut risk_factors = Vec::new();
        for (hit, weight, factor) in checks {
            if hit {
                risk_score += weight;
                risk_factors.push(factor.to_string());
            }
        }

        let risk_level = RiskLevel::from_score(risk_score);
        RiskAssessment {
            sku: item.sku.clone(),
            risk_level,
            risk_score,
            risk_factors,
            action: risk_level.action().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::item;

    #[test]
    fn healthy_item_is_low_risk() {
        let a = RiskAnalyzer.assess(&item("SKU0"));
        assert_eq!(a.risk_level, RiskLevel::Low);
        assert_eq!(a.risk_score, 0);
        assert!(a.risk_factors.is_empty());
        assert_eq!(a.action, "Continue Normal Operations");
    }

    #[test]
    fn factors_accumulate() {
        let mut it = item("SKU9");
        it.stock_level = 4;
        it.defect_rate = 6.1;
        let a = RiskAnalyzer.assess(&it);
        assert_eq!(a.risk_score, 6);
        assert_eq!(a.risk_level, RiskLevel::High);
        assert_eq!(a.risk_factors, ["Low Stock", "High Defect Rate"]);

        let mut it = item("SKU8");
        it.lead_time_days = 25;
        it.shipping_time_days = 11;
        let a = RiskAnalyzer.assess(&it);
        assert_eq!(a.risk_score, 3);
        assert_eq!(a.risk_level, RiskLevel::Medium);
        assert_eq!(a.action, "Review and Monitor");
    }

    #[test]
    fn thresholds_are_strict() {
        let mut it = item("SKU7");
        it.stock_level = 10;
        it.lead_time_days = 20;
        it.defect_rate = 5.0;
        it.shipping_time_days = 10;
        assert_eq!(RiskAnalyzer.assess(&it).risk_score, 0);
    }

    #[test]
    fn summary_counts_levels() {
        let mut risky = item("SKU1");
        risky.stock_level = 1;
        let assessments = vec![RiskAnalyzer.assess(&item("SKU0")), RiskAnalyzer.assess(&risky)];
        let summary = RiskSummary::from_assessments(&assessments);
        assert_eq!(summary, RiskSummary { high: 0, medium: 1, low: 1 });
    }
}
