//! Category rollups and monthly cohorts.
//!
//! These joins need the influencer profile (category or profile platform),
//! so tracking rows with an orphan `influencer_id` are excluded here while
//! still counting in the per-platform and per-campaign views.

use std::collections::BTreeMap;

use chrono::Datelike;
use roilens_core::{Influencer, Payout, TrackingRecord};
use roilens_metrics as metrics;
use serde::{Deserialize, Serialize};

/// One flat record per influencer category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMetrics {
    pub category: String,
    pub influencers: u64,
    pub orders: u64,
    pub revenue: f64,
    pub total_payout: f64,
    pub roi: f64,
    pub roas: f64,
}

/// Revenue and orders for one cohort key in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortRow {
    /// Category or platform, depending on the cohort axis.
    pub key: String,
    /// Calendar month label, `YYYY-MM`.
    pub period: String,
    pub orders: u64,
    pub revenue: f64,
}

/// Group tracking revenue and payout by the influencer's category.
/// Payout is summed per influencer first so it is counted once however
/// many tracking rows the influencer has.
pub fn per_category_metrics(
    influencers: &[Influencer],
    tracking: &[TrackingRecord],
    payouts: &[Payout],
) -> Vec<CategoryMetrics> {
    let category_of: BTreeMap<i64, &str> = influencers
        .iter()
        .map(|i| (i.id, i.category.as_str()))
        .collect();

    let mut payout_totals: BTreeMap<i64, f64> = BTreeMap::new();
    for payout in payouts {
        *payout_totals.entry(payout.influencer_id).or_insert(0.0) += payout.total_payout;
    }

    // category -> (influencer ids seen, orders, revenue)
    let mut aggs: BTreeMap<String, (std::collections::BTreeSet<i64>, u64, f64)> = BTreeMap::new();
    for record in tracking {
        let Some(category) = category_of.get(&record.influencer_id) else {
            continue; // orphan row, reported by the integrity check
        };
        let agg = aggs.entry(category.to_string()).or_default();
        agg.0.insert(record.influencer_id);
        agg.1 += record.orders;
        agg.2 += record.revenue;
    }

    aggs.into_iter()
        .map(|(category, (ids, orders, revenue))| {
            let total_payout: f64 = ids
                .iter()
                .map(|id| payout_totals.get(id).copied().unwrap_or(0.0))
                .sum();
            CategoryMetrics {
                roi: metrics::roi(revenue, total_payout),
                roas: metrics::roas(revenue, total_payout),
                category,
                influencers: ids.len() as u64,
                orders,
                revenue,
                total_payout,
            }
        })
        .collect()
}

fn monthly_cohorts<F>(
    influencers: &[Influencer],
    tracking: &[TrackingRecord],
    key_of: F,
) -> Vec<CohortRow>
where
    F: Fn(&Influencer) -> &str,
{
    let keys: BTreeMap<i64, &str> = influencers.iter().map(|i| (i.id, key_of(i))).collect();

    let mut aggs: BTreeMap<(String, String), (u64, f64)> = BTreeMap::new();
    for record in tracking {
        let Some(key) = keys.get(&record.influencer_id) else {
            continue;
        };
        // Undated rows cannot be bucketed into a month.
        let Some(date) = record.date else {
            continue;
        };
        let period = format!("{:04}-{:02}", date.year(), date.month());
        let agg = aggs.entry((key.to_string(), period)).or_default();
        agg.0 += record.orders;
        agg.1 += record.revenue;
    }

    aggs.into_iter()
        .map(|((key, period), (orders, revenue))| CohortRow {
            key,
            period,
            orders,
            revenue,
        })
        .collect()
}

/// Monthly revenue/orders cohorts keyed by influencer category.
pub fn category_cohorts(influencers: &[Influencer], tracking: &[TrackingRecord]) -> Vec<CohortRow> {
    monthly_cohorts(influencers, tracking, |i| i.category.as_str())
}

/// Monthly revenue/orders cohorts keyed by the influencer's profile platform.
pub fn platform_cohorts(influencers: &[Influencer], tracking: &[TrackingRecord]) -> Vec<CohortRow> {
    monthly_cohorts(influencers, tracking, |i| i.platform.as_str())
}
