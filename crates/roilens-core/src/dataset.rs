//! Session-owned dataset store.
//!
//! Holds the four typed tables for one analysis session. Tables are replaced
//! in place on upload and cleared on explicit reset; there is no history.
//! The store never hands out mutable table references, so every downstream
//! aggregation works on borrowed, immutable slices.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::AnalyticsResult;
use crate::raw::{self, RawTable};
use crate::types::{Influencer, Payout, Post, TrackingRecord};

pub const DATASET_NAMES: [&str; 4] = ["influencers", "posts", "tracking_data", "payouts"];

/// Upload completeness across the four datasets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetStatus {
    pub uploaded: Vec<&'static str>,
    pub missing: Vec<&'static str>,
    pub all_uploaded: bool,
}

/// Headline totals across the whole session, available once every table
/// is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_influencers: u64,
    pub total_posts: u64,
    pub total_orders: u64,
    pub total_revenue: f64,
    pub total_payouts: f64,
}

/// Referential findings across the loaded tables. Issues name orphan
/// `influencer_id` references; warnings flag influencers with partial
/// coverage. Neither blocks computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}

/// In-memory store for one analysis session.
#[derive(Debug, Default)]
pub struct DatasetStore {
    influencers: Option<Vec<Influencer>>,
    posts: Option<Vec<Post>>,
    tracking: Option<Vec<TrackingRecord>>,
    payouts: Option<Vec<Payout>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_influencers(&mut self, table: &RawTable) -> AnalyticsResult<()> {
        let rows = raw::coerce_influencers(table)?;
        info!(rows = rows.len(), "influencers dataset loaded");
        self.influencers = Some(rows);
        Ok(())
    }

    pub fn set_posts(&mut self, table: &RawTable) -> AnalyticsResult<()> {
        let rows = raw::coerce_posts(table)?;
        info!(rows = rows.len(), "posts dataset loaded");
        self.posts = Some(rows);
        Ok(())
    }

    pub fn set_tracking(&mut self, table: &RawTable) -> AnalyticsResult<()> {
        let rows = raw::coerce_tracking(table)?;
        info!(rows = rows.len(), "tracking dataset loaded");
        self.tracking = Some(rows);
        Ok(())
    }

    pub fn set_payouts(&mut self, table: &RawTable) -> AnalyticsResult<()> {
        let rows = raw::coerce_payouts(table)?;
        info!(rows = rows.len(), "payouts dataset loaded");
        self.payouts = Some(rows);
        Ok(())
    }

    pub fn influencers(&self) -> Option<&[Influencer]> {
        self.influencers.as_deref()
    }

    pub fn posts(&self) -> Option<&[Post]> {
        self.posts.as_deref()
    }

    pub fn tracking(&self) -> Option<&[TrackingRecord]> {
        self.tracking.as_deref()
    }

    pub fn payouts(&self) -> Option<&[Payout]> {
        self.payouts.as_deref()
    }

    /// Clear all four tables, ending the session's data.
    pub fn reset(&mut self) {
        debug!("dataset store reset");
        self.influencers = None;
        self.posts = None;
        self.tracking = None;
        self.payouts = None;
    }

    pub fn status(&self) -> DatasetStatus {
        let loaded = [
            self.influencers.is_some(),
            self.posts.is_some(),
            self.tracking.is_some(),
            self.payouts.is_some(),
        ];
        let uploaded: Vec<&'static str> = DATASET_NAMES
            .iter()
            .zip(loaded)
            .filter(|(_, l)| *l)
            .map(|(n, _)| *n)
            .collect();
        let missing: Vec<&'static str> = DATASET_NAMES
            .iter()
            .zip(loaded)
            .filter(|(_, l)| !*l)
            .map(|(n, _)| *n)
            .collect();
        DatasetStatus {
            all_uploaded: missing.is_empty(),
            uploaded,
            missing,
        }
    }

    /// Headline totals, or `None` until all four tables are loaded.
    pub fn summary(&self) -> Option<SummaryStats> {
        let influencers = self.influencers.as_ref()?;
        let posts = self.posts.as_ref()?;
        let tracking = self.tracking.as_ref()?;
        let payouts = self.payouts.as_ref()?;
        Some(SummaryStats {
            total_influencers: influencers.len() as u64,
            total_posts: posts.len() as u64,
            total_orders: tracking.iter().map(|t| t.orders).sum(),
            total_revenue: tracking.iter().map(|t| t.revenue).sum(),
            total_payouts: payouts.iter().map(|p| p.total_payout).sum(),
        })
    }

    /// Cross-table referential check. Orphan rows are reported here but are
    /// still counted by per-platform and per-campaign aggregates; only joins
    /// needing the influencer profile exclude them.
    pub fn validate_integrity(&self) -> IntegrityReport {
        let mut report = IntegrityReport::default();
        if !self.status().all_uploaded {
            report.issues.push("Not all datasets uploaded".to_string());
            return report;
        }

        let known: BTreeSet<i64> = self
            .influencers
            .iter()
            .flatten()
            .map(|i| i.id)
            .collect();
        let post_ids: BTreeSet<i64> = self
            .posts
            .iter()
            .flatten()
            .map(|p| p.influencer_id)
            .collect();
        let tracking_ids: BTreeSet<i64> = self
            .tracking
            .iter()
            .flatten()
            .map(|t| t.influencer_id)
            .collect();
        let payout_ids: BTreeSet<i64> = self
            .payouts
            .iter()
            .flatten()
            .map(|p| p.influencer_id)
            .collect();

        for (table, ids) in [
            ("Posts", &post_ids),
            ("Tracking data", &tracking_ids),
            ("Payouts", &payout_ids),
        ] {
            let orphans: Vec<i64> = ids.difference(&known).copied().collect();
            if !orphans.is_empty() {
                report.issues.push(format!(
                    "{table} reference non-existent influencer IDs: {orphans:?}"
                ));
            }
        }

        if post_ids.difference(&tracking_ids).next().is_some() {
            report
                .warnings
                .push("Some influencers have posts but no tracking data".to_string());
        }
        if tracking_ids.difference(&payout_ids).next().is_some() {
            report
                .warnings
                .push("Some influencers have tracking data but no payout information".to_string());
        }

        if !report.issues.is_empty() {
            warn!(issues = report.issues.len(), "dataset integrity issues found");
        }
        report
    }
}
