//! Portfolio-level health summary across all influencer rows.

use roilens_reporting::InfluencerMetrics;
use serde::{Deserialize, Serialize};

/// Headline health figures for the influencer portfolio, feeding the
/// actionable-insights view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioHealth {
    /// Share of influencers with positive ROI, as a percentage.
    pub profitable_ratio: f64,
    /// Mean ROI across rows, in percent.
    pub avg_roi_pct: f64,
    pub negative_roi_count: u64,
    /// Influencers with positive but weak ROAS (below 2x).
    pub low_roas_count: u64,
    /// Influencers at or above 100% ROI.
    pub high_performer_count: u64,
}

pub fn portfolio_health(rows: &[InfluencerMetrics]) -> PortfolioHealth {
    if rows.is_empty() {
        return PortfolioHealth {
            profitable_ratio: 0.0,
            avg_roi_pct: 0.0,
            negative_roi_count: 0,
            low_roas_count: 0,
            high_performer_count: 0,
        };
    }

    let total = rows.len() as f64;
    let profitable = rows.iter().filter(|r| r.roi > 0.0).count() as f64;
    let avg_roi = rows.iter().map(|r| r.roi).sum::<f64>() / total * 100.0;

    PortfolioHealth {
        profitable_ratio: profitable / total * 100.0,
        avg_roi_pct: avg_roi,
        negative_roi_count: rows.iter().filter(|r| r.roi < 0.0).count() as u64,
        low_roas_count: rows
            .iter()
            .filter(|r| r.roas > 0.0 && r.roas < 2.0)
            .count() as u64,
        high_performer_count: rows.iter().filter(|r| r.roi >= 1.0).count() as u64,
    }
}
