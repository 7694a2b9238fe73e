//! Budget-allocation tiers.
//!
//! A heuristic scoring policy with fixed thresholds, not a learned model:
//! the score rewards revenue efficiency and cheap acquisitions, and the
//! tier boundaries are product policy.

use roilens_reporting::InfluencerMetrics;
use serde::{Deserialize, Serialize};

/// Recommended budget action for one influencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    ReduceBudget,
    Maintain,
    Increase,
    Maximize,
}

impl BudgetTier {
    /// Fixed thresholds over the performance score.
    pub fn classify(score: f64) -> Self {
        if score <= 0.5 {
            Self::ReduceBudget
        } else if score <= 1.0 {
            Self::Maintain
        } else if score <= 1.5 {
            Self::Increase
        } else {
            Self::Maximize
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ReduceBudget => "Reduce Budget",
            Self::Maintain => "Maintain",
            Self::Increase => "Increase",
            Self::Maximize => "Maximize",
        }
    }
}

/// `revenue_per_cost * 0.6 + 1 / (cost_per_order + 1) * 0.4`.
///
/// `revenue_per_cost` is ROAS; `cost_per_order` is CPA. Both terms are
/// zero-guarded upstream, so a zero-cost or zero-order influencer scores
/// on whichever component is defined.
pub fn performance_score(revenue_per_cost: f64, cost_per_order: f64) -> f64 {
    let sanitize = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
    sanitize(revenue_per_cost) * 0.6 + 1.0 / (sanitize(cost_per_order) + 1.0) * 0.4
}

/// One budget recommendation per influencer row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecommendation {
    pub influencer_id: i64,
    pub name: String,
    pub performance_score: f64,
    pub tier: BudgetTier,
}

/// Score each per-influencer row and classify it into a budget tier,
/// preserving input row order.
pub fn budget_recommendations(rows: &[InfluencerMetrics]) -> Vec<BudgetRecommendation> {
    rows.iter()
        .map(|row| {
            let cost_per_order = if row.orders > 0 {
                row.total_payout / row.orders as f64
            } else {
                0.0
            };
            let score = performance_score(row.roas, cost_per_order);
            BudgetRecommendation {
                influencer_id: row.influencer_id,
                name: row.name.clone(),
                performance_score: score,
                tier: BudgetTier::classify(score),
            }
        })
        .collect()
}
