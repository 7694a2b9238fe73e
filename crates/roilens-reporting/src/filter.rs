//! User-selected filter set applied before aggregation.

use roilens_core::{Influencer, TrackingRecord};
use serde::{Deserialize, Serialize};

/// The active filter set for one analysis request. `None` on a field means
/// no restriction; `Default` is the unfiltered view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFilter {
    /// Restrict to influencers whose profile platform is in this set.
    pub platforms: Option<Vec<String>>,
    /// Restrict to influencers in these categories.
    pub categories: Option<Vec<String>>,
    /// Restrict tracking rows to these campaigns.
    pub campaigns: Option<Vec<String>>,
    /// Drop aggregated influencer rows with fewer total orders than this.
    pub min_orders: Option<u64>,
}

impl AnalysisFilter {
    pub fn matches_influencer(&self, influencer: &Influencer) -> bool {
        if let Some(platforms) = &self.platforms {
            if !platforms.iter().any(|p| p == &influencer.platform) {
                return false;
            }
        }
        if let Some(categories) = &self.categories {
            if !categories.iter().any(|c| c == &influencer.category) {
                return false;
            }
        }
        true
    }

    pub fn matches_tracking(&self, record: &TrackingRecord) -> bool {
        match &self.campaigns {
            Some(campaigns) => campaigns.iter().any(|c| c == &record.campaign),
            None => true,
        }
    }

    /// Applied after aggregation, on the influencer's summed orders.
    pub fn passes_min_orders(&self, total_orders: u64) -> bool {
        match self.min_orders {
            Some(min) => total_orders >= min,
            None => true,
        }
    }
}
