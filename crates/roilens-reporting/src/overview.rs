//! Session-wide overview helpers: overall rates and recent activity.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use roilens_core::{Influencer, Post, TrackingRecord};
use roilens_metrics as metrics;
use serde::{Deserialize, Serialize};

/// Engagement rate across the whole posts table.
pub fn overall_engagement_rate(posts: &[Post]) -> f64 {
    let reach: u64 = posts.iter().map(|p| p.reach).sum();
    let likes: u64 = posts.iter().map(|p| p.likes).sum();
    let comments: u64 = posts.iter().map(|p| p.comments).sum();
    metrics::engagement_rate(likes as f64, comments as f64, reach as f64)
}

/// Conversion rate across the whole session: total orders over total reach.
///
/// When every tracking row carries zero orders, the tracking row count
/// stands in for the order total, treating each row as one conversion
/// event batch.
pub fn overall_conversion_rate(posts: &[Post], tracking: &[TrackingRecord]) -> f64 {
    if posts.is_empty() || tracking.is_empty() {
        return 0.0;
    }
    let reach: u64 = posts.iter().map(|p| p.reach).sum();
    let mut orders: u64 = tracking.iter().map(|t| t.orders).sum();
    if orders == 0 {
        orders = tracking.len() as u64;
    }
    metrics::conversion_rate(orders as f64, reach as f64)
}

/// A recent post joined with the influencer's name, for the activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentPost {
    pub date: NaiveDate,
    pub name: String,
    pub platform: String,
    pub reach: u64,
    pub likes: u64,
    pub comments: u64,
}

/// Posts within `days` of the newest post date, newest first. Undated
/// posts cannot qualify; posts by an unknown influencer show an empty name.
pub fn recent_activity(posts: &[Post], influencers: &[Influencer], days: i64) -> Vec<RecentPost> {
    let names: BTreeMap<i64, &str> = influencers
        .iter()
        .map(|i| (i.id, i.name.as_str()))
        .collect();

    let Some(newest) = posts.iter().filter_map(|p| p.date).max() else {
        return Vec::new();
    };
    let cutoff = newest - chrono::Duration::days(days);

    let mut recent: Vec<RecentPost> = posts
        .iter()
        .filter_map(|post| {
            let date = post.date?;
            if date < cutoff {
                return None;
            }
            Some(RecentPost {
                date,
                name: names
                    .get(&post.influencer_id)
                    .map(|n| n.to_string())
                    .unwrap_or_default(),
                platform: post.platform.clone(),
                reach: post.reach,
                likes: post.likes,
                comments: post.comments,
            })
        })
        .collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(influencer_id: i64, date: Option<NaiveDate>, reach: u64) -> Post {
        Post {
            influencer_id,
            platform: "instagram".to_string(),
            date,
            url: String::new(),
            caption: String::new(),
            reach,
            likes: 10,
            comments: 5,
        }
    }

    fn tracking(orders: u64) -> TrackingRecord {
        TrackingRecord {
            source: "instagram".to_string(),
            campaign: "c".to_string(),
            influencer_id: 1,
            user_id: "u".to_string(),
            product: "p".to_string(),
            date: None,
            orders,
            revenue: 0.0,
        }
    }

    fn influencer(id: i64, name: &str) -> Influencer {
        Influencer {
            id,
            name: name.to_string(),
            category: "fitness".to_string(),
            gender: "F".to_string(),
            follower_count: 0,
            platform: "instagram".to_string(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_overall_rates() {
        let posts = vec![post(1, None, 1_000), post(1, None, 0)];
        assert_eq!(overall_engagement_rate(&posts), 3.0);
        assert_eq!(overall_conversion_rate(&posts, &[tracking(5)]), 0.5);
    }

    #[test]
    fn test_conversion_rate_falls_back_to_row_count() {
        let posts = vec![post(1, None, 1_000)];
        // Two tracking rows, zero orders recorded: rows stand in as orders.
        let rows = vec![tracking(0), tracking(0)];
        assert_eq!(overall_conversion_rate(&posts, &rows), 0.2);
    }

    #[test]
    fn test_recent_activity_window_and_order() {
        let influencers = vec![influencer(1, "a")];
        let posts = vec![
            post(1, date(2024, 5, 1), 100),
            post(1, date(2024, 5, 10), 200),
            post(1, date(2024, 4, 1), 300),  // outside the window
            post(1, None, 400),              // undated, never recent
        ];
        let recent = recent_activity(&posts, &influencers, 9);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].reach, 200);
        assert_eq!(recent[1].reach, 100);
        assert_eq!(recent[0].name, "a");
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(overall_engagement_rate(&[]), 0.0);
        assert_eq!(overall_conversion_rate(&[], &[]), 0.0);
        assert!(recent_activity(&[], &[], 7).is_empty());
    }
}
