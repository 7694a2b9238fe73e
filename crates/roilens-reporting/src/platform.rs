//! Per-platform efficiency rows.

use std::collections::BTreeMap;

use roilens_core::{Post, TrackingRecord};
use roilens_metrics as metrics;
use serde::{Deserialize, Serialize};

/// One flat record per platform seen in either posts or tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformMetrics {
    pub platform: String,
    pub reach: u64,
    pub likes: u64,
    pub comments: u64,
    pub orders: u64,
    pub revenue: f64,
    pub engagement_rate: f64,
    pub conversion_rate: f64,
    pub revenue_per_impression: f64,
}

#[derive(Default)]
struct PlatformAgg {
    reach: u64,
    likes: u64,
    comments: u64,
    orders: u64,
    revenue: f64,
}

/// Outer-join posts (grouped by `platform`) with tracking (grouped by
/// `source`) on the platform name. A platform present on only one side
/// still appears, with the missing side zero-filled. Rows come back
/// sorted by platform name.
pub fn per_platform_metrics(posts: &[Post], tracking: &[TrackingRecord]) -> Vec<PlatformMetrics> {
    let mut aggs: BTreeMap<String, PlatformAgg> = BTreeMap::new();

    for post in posts {
        let agg = aggs.entry(post.platform.clone()).or_default();
        agg.reach += post.reach;
        agg.likes += post.likes;
        agg.comments += post.comments;
    }
    for record in tracking {
        let agg = aggs.entry(record.source.clone()).or_default();
        agg.orders += record.orders;
        agg.revenue += record.revenue;
    }

    aggs.into_iter()
        .map(|(platform, agg)| {
            let reach = agg.reach as f64;
            PlatformMetrics {
                platform,
                reach: agg.reach,
                likes: agg.likes,
                comments: agg.comments,
                orders: agg.orders,
                revenue: agg.revenue,
                engagement_rate: metrics::engagement_rate(
                    agg.likes as f64,
                    agg.comments as f64,
                    reach,
                ),
                conversion_rate: metrics::conversion_rate(agg.orders as f64, reach),
                revenue_per_impression: if agg.reach > 0 {
                    agg.revenue / reach
                } else {
                    0.0
                },
            }
        })
        .collect()
}
