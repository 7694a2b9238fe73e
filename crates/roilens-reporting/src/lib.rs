//! Aggregation and join layer: turns the four base tables into
//! per-influencer, per-campaign, per-platform, per-category, time-bucketed,
//! and cohort summaries.
//!
//! Every function here is pure over borrowed slices: inputs are never
//! mutated, group iteration runs over ordered keys, and repeated calls on
//! identical input produce identical output, so results are safely
//! cacheable by the presentation layer.

pub mod campaign;
pub mod cohort;
pub mod filter;
pub mod influencer;
pub mod overview;
pub mod payout;
pub mod platform;
pub mod timeseries;

pub use campaign::{per_campaign_metrics, CampaignMetrics};
pub use cohort::{category_cohorts, per_category_metrics, platform_cohorts, CategoryMetrics, CohortRow};
pub use filter::AnalysisFilter;
pub use influencer::{per_influencer_metrics, InfluencerMetrics};
pub use overview::{overall_conversion_rate, overall_engagement_rate, recent_activity, RecentPost};
pub use payout::{payout_basis_summary, PayoutBasisSummary};
pub use platform::{per_platform_metrics, PlatformMetrics};
pub use timeseries::{per_period_metrics, Period, PeriodMetrics};
