//! Pure metric formulas for influencer campaign analytics.
//!
//! Every function here is total over finite inputs: degenerate denominators
//! resolve to 0 instead of erroring, and out-of-domain values (NaN, negative
//! cost) coerce to 0 before use. Aggregation layers feed these functions
//! already-summed scalars, never raw tables.

pub mod formulas;
pub mod incremental;
pub mod score;

pub use formulas::{
    average_order_value, conversion_rate, cost_per_acquisition, cost_per_mille, engagement_rate,
    roas, roi,
};
pub use incremental::{incremental_roas, IncrementalRoas};
pub use score::composite_influencer_score;
