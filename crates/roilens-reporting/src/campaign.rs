//! Per-campaign metric rows with payout apportionment.

use std::collections::BTreeMap;

use roilens_core::{Payout, TrackingRecord};
use roilens_metrics as metrics;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::filter::AnalysisFilter;

/// One flat record per campaign found in the tracking data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignMetrics {
    pub campaign: String,
    pub orders: u64,
    pub revenue: f64,
    pub total_payout: f64,
    pub roi: f64,
    pub roas: f64,
}

/// Group tracking rows by campaign and apportion influencer payouts.
///
/// Payout is an influencer-level total, so an influencer active in several
/// campaigns must not contribute their full payout to each one. Policy:
/// split each influencer's summed payout across the campaigns their
/// tracking rows touch, proportionally to that influencer's order share
/// per campaign. An influencer with zero orders everywhere splits equally
/// across the campaigns they touch. Rows come back sorted by campaign name.
pub fn per_campaign_metrics(
    tracking: &[TrackingRecord],
    payouts: &[Payout],
    filter: &AnalysisFilter,
) -> Vec<CampaignMetrics> {
    let filtered: Vec<&TrackingRecord> = tracking
        .iter()
        .filter(|r| filter.matches_tracking(r))
        .collect();

    // campaign -> (orders, revenue)
    let mut campaign_aggs: BTreeMap<String, (u64, f64)> = BTreeMap::new();
    // influencer -> campaign -> orders, for the apportionment weights
    let mut orders_by_influencer: BTreeMap<i64, BTreeMap<String, u64>> = BTreeMap::new();

    for record in &filtered {
        let agg = campaign_aggs.entry(record.campaign.clone()).or_default();
        agg.0 += record.orders;
        agg.1 += record.revenue;
        *orders_by_influencer
            .entry(record.influencer_id)
            .or_default()
            .entry(record.campaign.clone())
            .or_default() += record.orders;
    }

    let mut payout_totals: BTreeMap<i64, f64> = BTreeMap::new();
    for payout in payouts {
        *payout_totals.entry(payout.influencer_id).or_insert(0.0) += payout.total_payout;
    }

    // campaign -> apportioned payout
    let mut campaign_payouts: BTreeMap<String, f64> = BTreeMap::new();
    for (influencer_id, campaigns) in &orders_by_influencer {
        let Some(&payout) = payout_totals.get(influencer_id) else {
            continue;
        };
        let total_orders: u64 = campaigns.values().sum();
        for (campaign, &orders) in campaigns {
            let share = if total_orders > 0 {
                orders as f64 / total_orders as f64
            } else {
                1.0 / campaigns.len() as f64
            };
            *campaign_payouts.entry(campaign.clone()).or_insert(0.0) += payout * share;
        }
    }

    debug!(campaigns = campaign_aggs.len(), "campaign aggregation complete");

    campaign_aggs
        .into_iter()
        .map(|(campaign, (orders, revenue))| {
            let total_payout = campaign_payouts.get(&campaign).copied().unwrap_or(0.0);
            CampaignMetrics {
                roi: metrics::roi(revenue, total_payout),
                roas: metrics::roas(revenue, total_payout),
                campaign,
                orders,
                revenue,
                total_payout,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use roilens_core::PayoutBasis;

    fn tracking(influencer_id: i64, campaign: &str, orders: u64, revenue: f64) -> TrackingRecord {
        TrackingRecord {
            source: "instagram".to_string(),
            campaign: campaign.to_string(),
            influencer_id,
            user_id: "u".to_string(),
            product: "p".to_string(),
            date: None,
            orders,
            revenue,
        }
    }

    fn payout(influencer_id: i64, total: f64) -> Payout {
        Payout {
            influencer_id,
            basis: PayoutBasis::Order,
            rate: 0.0,
            orders: 0,
            total_payout: total,
        }
    }

    #[test]
    fn test_payout_split_by_order_share() {
        // Influencer 1: 30 orders in A, 10 in B, payout 100 -> A 75, B 25.
        let tracking_rows = vec![
            tracking(1, "A", 30, 3_000.0),
            tracking(1, "B", 10, 1_000.0),
        ];
        let payouts = vec![payout(1, 100.0)];
        let rows = per_campaign_metrics(&tracking_rows, &payouts, &AnalysisFilter::default());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].campaign, "A");
        assert_eq!(rows[0].total_payout, 75.0);
        assert_eq!(rows[1].campaign, "B");
        assert_eq!(rows[1].total_payout, 25.0);
        // Apportionment never double counts.
        assert_eq!(rows[0].total_payout + rows[1].total_payout, 100.0);
    }

    #[test]
    fn test_zero_order_influencer_splits_equally() {
        let tracking_rows = vec![tracking(1, "A", 0, 0.0), tracking(1, "B", 0, 0.0)];
        let payouts = vec![payout(1, 100.0)];
        let rows = per_campaign_metrics(&tracking_rows, &payouts, &AnalysisFilter::default());
        assert_eq!(rows[0].total_payout, 50.0);
        assert_eq!(rows[1].total_payout, 50.0);
    }

    #[test]
    fn test_orphan_tracking_rows_still_aggregate() {
        // Influencer 99 has no payout row; campaign still appears.
        let tracking_rows = vec![tracking(99, "C", 5, 500.0)];
        let rows = per_campaign_metrics(&tracking_rows, &[], &AnalysisFilter::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].revenue, 500.0);
        assert_eq!(rows[0].total_payout, 0.0);
        assert_eq!(rows[0].roi, 0.0);
    }

    #[test]
    fn test_idempotent_on_identical_input() {
        let tracking_rows = vec![
            tracking(1, "A", 30, 3_000.0),
            tracking(2, "B", 10, 1_000.0),
            tracking(1, "B", 5, 400.0),
        ];
        let payouts = vec![payout(1, 100.0), payout(2, 50.0)];
        let filter = AnalysisFilter::default();

        let first = per_campaign_metrics(&tracking_rows, &payouts, &filter);
        let second = per_campaign_metrics(&tracking_rows, &payouts, &filter);
        assert_eq!(first, second);
    }

    #[test]
    fn test_roi_uses_apportioned_payout() {
        let tracking_rows = vec![tracking(1, "A", 10, 300.0)];
        let payouts = vec![payout(1, 100.0)];
        let rows = per_campaign_metrics(&tracking_rows, &payouts, &AnalysisFilter::default());
        assert_eq!(rows[0].roi, 2.0);
        assert_eq!(rows[0].roas, 3.0);
    }
}
