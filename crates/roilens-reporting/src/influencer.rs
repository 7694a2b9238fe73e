//! Per-influencer metric rows.

use std::collections::BTreeMap;

use roilens_core::{Influencer, Payout, Post, TrackingRecord};
use roilens_metrics as metrics;
use serde::{Deserialize, Serialize};

use crate::filter::AnalysisFilter;

/// One flat record per influencer. Field names are the stable output
/// contract consumed by tabular rendering and CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluencerMetrics {
    pub influencer_id: i64,
    pub name: String,
    pub category: String,
    pub platform: String,
    pub gender: String,
    pub follower_count: u64,
    pub total_posts: u64,
    pub reach: u64,
    pub total_engagement: u64,
    pub engagement_rate: f64,
    pub conversion_rate: f64,
    pub orders: u64,
    pub revenue: f64,
    pub total_payout: f64,
    pub roi: f64,
    pub roas: f64,
    pub avg_order_value: f64,
}

#[derive(Default)]
struct PostAgg {
    posts: u64,
    reach: u64,
    likes: u64,
    comments: u64,
}

#[derive(Default)]
struct TrackingAgg {
    orders: u64,
    revenue: f64,
}

/// Aggregate posts, tracking, and payouts per influencer and derive the
/// ratio metrics.
///
/// Every influencer passing the filter yields exactly one row; an
/// influencer with no posts, tracking, or payout appears with zeroed
/// metrics rather than going missing. Payout rows are summed per
/// influencer (multiple rows are treated as distinct compensation events)
/// and are never multiplied by the influencer's tracking-row count.
/// Output order follows the influencers table.
pub fn per_influencer_metrics(
    influencers: &[Influencer],
    posts: &[Post],
    tracking: &[TrackingRecord],
    payouts: &[Payout],
    filter: &AnalysisFilter,
) -> Vec<InfluencerMetrics> {
    let mut post_aggs: BTreeMap<i64, PostAgg> = BTreeMap::new();
    for post in posts {
        let agg = post_aggs.entry(post.influencer_id).or_default();
        agg.posts += 1;
        agg.reach += post.reach;
        agg.likes += post.likes;
        agg.comments += post.comments;
    }

    let mut tracking_aggs: BTreeMap<i64, TrackingAgg> = BTreeMap::new();
    for record in tracking.iter().filter(|r| filter.matches_tracking(r)) {
        let agg = tracking_aggs.entry(record.influencer_id).or_default();
        agg.orders += record.orders;
        agg.revenue += record.revenue;
    }

    let mut payout_totals: BTreeMap<i64, f64> = BTreeMap::new();
    for payout in payouts {
        *payout_totals.entry(payout.influencer_id).or_insert(0.0) += payout.total_payout;
    }

    let empty_posts = PostAgg::default();
    let empty_tracking = TrackingAgg::default();

    influencers
        .iter()
        .filter(|i| filter.matches_influencer(i))
        .filter_map(|influencer| {
            let post_agg = post_aggs.get(&influencer.id).unwrap_or(&empty_posts);
            let tracking_agg = tracking_aggs.get(&influencer.id).unwrap_or(&empty_tracking);
            let total_payout = payout_totals.get(&influencer.id).copied().unwrap_or(0.0);

            if !filter.passes_min_orders(tracking_agg.orders) {
                return None;
            }

            let total_engagement = post_agg.likes + post_agg.comments;
            Some(InfluencerMetrics {
                influencer_id: influencer.id,
                name: influencer.name.clone(),
                category: influencer.category.clone(),
                platform: influencer.platform.clone(),
                gender: influencer.gender.clone(),
                follower_count: influencer.follower_count,
                total_posts: post_agg.posts,
                reach: post_agg.reach,
                total_engagement,
                engagement_rate: metrics::engagement_rate(
                    post_agg.likes as f64,
                    post_agg.comments as f64,
                    post_agg.reach as f64,
                ),
                conversion_rate: metrics::conversion_rate(
                    tracking_agg.orders as f64,
                    post_agg.reach as f64,
                ),
                orders: tracking_agg.orders,
                revenue: tracking_agg.revenue,
                total_payout,
                roi: metrics::roi(tracking_agg.revenue, total_payout),
                roas: metrics::roas(tracking_agg.revenue, total_payout),
                avg_order_value: metrics::average_order_value(
                    tracking_agg.revenue,
                    tracking_agg.orders as f64,
                ),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use roilens_core::PayoutBasis;

    fn influencer(id: i64, name: &str) -> Influencer {
        Influencer {
            id,
            name: name.to_string(),
            category: "fitness".to_string(),
            gender: "F".to_string(),
            follower_count: 50_000,
            platform: "instagram".to_string(),
        }
    }

    fn post(influencer_id: i64, reach: u64, likes: u64, comments: u64) -> Post {
        Post {
            influencer_id,
            platform: "instagram".to_string(),
            date: None,
            url: String::new(),
            caption: String::new(),
            reach,
            likes,
            comments,
        }
    }

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
            basis: PayoutBasis::Post,
            rate: 0.0,
            orders: 0,
            total_payout: total,
        }
    }

    #[test]
    fn test_influencer_without_activity_gets_zeroed_row() {
        let influencers = vec![
            influencer(1, "a"),
            influencer(2, "b"),
            influencer(3, "silent"),
        ];
        let posts = vec![post(1, 10_000, 900, 100), post(2, 5_000, 200, 50)];
        let tracking_rows = vec![tracking(1, "launch", 20, 10_000.0)];
        let payouts = vec![payout(1, 4_000.0)];

        let rows = per_influencer_metrics(
            &influencers,
            &posts,
            &tracking_rows,
            &payouts,
            &AnalysisFilter::default(),
        );

        assert_eq!(rows.len(), 3);
        let silent = &rows[2];
        assert_eq!(silent.influencer_id, 3);
        assert_eq!(silent.reach, 0);
        assert_eq!(silent.revenue, 0.0);
        assert_eq!(silent.roi, 0.0);
        assert_eq!(silent.avg_order_value, 0.0);
    }

    #[test]
    fn test_metric_derivation() {
        let influencers = vec![influencer(1, "a")];
        let posts = vec![post(1, 10_000, 900, 100)];
        let tracking_rows = vec![tracking(1, "launch", 20, 10_000.0)];
        let payouts = vec![payout(1, 4_000.0)];

        let rows = per_influencer_metrics(
            &influencers,
            &posts,
            &tracking_rows,
            &payouts,
            &AnalysisFilter::default(),
        );
        let row = &rows[0];
        assert_eq!(row.engagement_rate, 10.0);
        assert_eq!(row.conversion_rate, 0.2);
        assert_eq!(row.roi, 1.5);
        assert_eq!(row.roas, 2.5);
        assert_eq!(row.avg_order_value, 500.0);
        assert_eq!(row.total_posts, 1);
    }

    #[test]
    fn test_payout_not_duplicated_across_tracking_rows() {
        let influencers = vec![influencer(1, "a")];
        // Three tracking rows, one payout of 1000: total_payout must be
        // 1000, not 3000.
        let tracking_rows = vec![
            tracking(1, "x", 1, 100.0),
            tracking(1, "y", 2, 200.0),
            tracking(1, "z", 3, 300.0),
        ];
        let payouts = vec![payout(1, 1_000.0)];

        let rows =
            per_influencer_metrics(&influencers, &[], &tracking_rows, &payouts, &AnalysisFilter::default());
        assert_eq!(rows[0].total_payout, 1_000.0);
        assert_eq!(rows[0].revenue, 600.0);
    }

    #[test]
    fn test_duplicate_payout_rows_sum_as_distinct_events() {
        let influencers = vec![influencer(1, "a")];
        let payouts = vec![payout(1, 600.0), payout(1, 400.0)];
        let rows =
            per_influencer_metrics(&influencers, &[], &[], &payouts, &AnalysisFilter::default());
        assert_eq!(rows[0].total_payout, 1_000.0);
    }

    #[test]
    fn test_min_orders_filter_drops_aggregated_rows() {
        let influencers = vec![influencer(1, "a"), influencer(2, "b")];
        let tracking_rows = vec![tracking(1, "x", 10, 100.0), tracking(2, "x", 2, 20.0)];
        let filter = AnalysisFilter {
            min_orders: Some(5),
            ..Default::default()
        };
        let rows = per_influencer_metrics(&influencers, &[], &tracking_rows, &[], &filter);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].influencer_id, 1);
    }

    #[test]
    fn test_campaign_filter_restricts_tracking() {
        let influencers = vec![influencer(1, "a")];
        let tracking_rows = vec![tracking(1, "summer", 5, 500.0), tracking(1, "winter", 7, 700.0)];
        let filter = AnalysisFilter {
            campaigns: Some(vec!["summer".to_string()]),
            ..Default::default()
        };
        let rows = per_influencer_metrics(&influencers, &[], &tracking_rows, &[], &filter);
        assert_eq!(rows[0].orders, 5);
        assert_eq!(rows[0].revenue, 500.0);
    }
}
