//! Typed rows for the four base tables.
//!
//! Rows only exist in this form after raw-table coercion, so numeric fields
//! are already clamped to their documented domains (counts are unsigned,
//! money is a non-negative float, bad dates are `None`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Master influencer record. `id` is the join key for the other tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Influencer {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub gender: String,
    pub follower_count: u64,
    pub platform: String,
}

/// One published social post. Multiple rows per influencer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub influencer_id: i64,
    pub platform: String,
    pub date: Option<NaiveDate>,
    pub url: String,
    pub caption: String,
    pub reach: u64,
    pub likes: u64,
    pub comments: u64,
}

/// One conversion-event batch from the tracking feed. `source` is the
/// platform the conversions came through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingRecord {
    pub source: String,
    pub campaign: String,
    pub influencer_id: i64,
    pub user_id: String,
    pub product: String,
    pub date: Option<NaiveDate>,
    pub orders: u64,
    pub revenue: f64,
}

/// How an influencer is compensated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutBasis {
    Post,
    Order,
}

impl PayoutBasis {
    /// Parse the raw basis cell. Unrecognised values coerce to `Post`
    /// rather than erroring, matching the numeric coercion policy.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "order" | "orders" | "per_order" => Self::Order,
            _ => Self::Post,
        }
    }
}

/// Compensation terms for one influencer. `total_payout` is an
/// influencer-level aggregate, never a per-tracking-row amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub influencer_id: i64,
    pub basis: PayoutBasis,
    pub rate: f64,
    pub orders: u64,
    pub total_payout: f64,
}
