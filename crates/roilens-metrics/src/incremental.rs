//! Incremental ROAS estimation.
//!
//! A heuristic baseline model, not causal inference: it assumes the revenue
//! the brand would have earned without influencer campaigns is proportional
//! to observed revenue scaled by a baseline conversion rate and average
//! order value, and attributes everything above that baseline to campaigns.

use serde::{Deserialize, Serialize};

/// Result of the incremental attribution estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncrementalRoas {
    pub total_revenue: f64,
    pub estimated_baseline_revenue: f64,
    pub incremental_revenue: f64,
    pub incremental_roas: f64,
    pub attribution_rate: f64,
}

/// Estimate incremental revenue, ROAS, and attribution rate above an
/// assumed organic baseline.
///
/// `baseline_conversion_rate` is a fraction (0.02 for 2%), `baseline_aov`
/// the assumed organic average order value. Zero cost or revenue resolves
/// the corresponding ratio to 0.
pub fn incremental_roas(
    total_revenue: f64,
    total_cost: f64,
    baseline_conversion_rate: f64,
    baseline_aov: f64,
) -> IncrementalRoas {
    let clean = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
    let total_revenue = clean(total_revenue);
    let total_cost = clean(total_cost);

    let estimated_baseline_revenue =
        total_revenue * clean(baseline_conversion_rate) * clean(baseline_aov) / 100.0;
    let incremental_revenue = (total_revenue - estimated_baseline_revenue).max(0.0);

    let incremental = if total_cost > 0.0 {
        incremental_revenue / total_cost
    } else {
        0.0
    };
    let attribution_rate = if total_revenue > 0.0 {
        incremental_revenue / total_revenue
    } else {
        0.0
    };

    IncrementalRoas {
        total_revenue,
        estimated_baseline_revenue,
        incremental_revenue,
        incremental_roas: incremental,
        attribution_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_model() {
        let result = incremental_roas(100_000.0, 20_000.0, 0.02, 500.0);
        assert_eq!(result.estimated_baseline_revenue, 10_000.0);
        assert_eq!(result.incremental_revenue, 90_000.0);
        assert_eq!(result.incremental_roas, 4.5);
        assert_eq!(result.attribution_rate, 0.9);
    }

    #[test]
    fn test_zero_guards() {
        let no_cost = incremental_roas(100_000.0, 0.0, 0.02, 500.0);
        assert_eq!(no_cost.incremental_roas, 0.0);

        let no_revenue = incremental_roas(0.0, 20_000.0, 0.02, 500.0);
        assert_eq!(no_revenue.attribution_rate, 0.0);
        assert_eq!(no_revenue.incremental_revenue, 0.0);
    }

    #[test]
    fn test_baseline_above_revenue_floors_at_zero() {
        // Baseline assumptions so aggressive the model explains all revenue.
        let result = incremental_roas(10_000.0, 5_000.0, 0.5, 400.0);
        assert_eq!(result.incremental_revenue, 0.0);
        assert_eq!(result.incremental_roas, 0.0);
        assert_eq!(result.attribution_rate, 0.0);
    }
}
