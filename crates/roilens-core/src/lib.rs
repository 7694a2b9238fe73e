//! Shared types for influencer campaign analytics: the typed base tables,
//! raw-table coercion, and the session-owned dataset store.

pub mod dataset;
pub mod error;
pub mod raw;
pub mod types;

pub use dataset::{DatasetStatus, DatasetStore, IntegrityReport, SummaryStats};
pub use error::{AnalyticsError, AnalyticsResult};
pub use raw::RawTable;
pub use types::{Influencer, Payout, PayoutBasis, Post, TrackingRecord};
