//! Ranking and segmentation over computed metric rows: top/bottom-N,
//! ROI buckets, performance segments, budget tiers, and portfolio health.

pub mod budget;
pub mod buckets;
pub mod portfolio;
pub mod ranking;

pub use budget::{budget_recommendations, performance_score, BudgetRecommendation, BudgetTier};
pub use buckets::{roi_distribution, PerformanceSegment, RoiBucket};
pub use portfolio::{portfolio_health, PortfolioHealth};
pub use ranking::{bottom_n, top_n};
