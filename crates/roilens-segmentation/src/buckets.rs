//! Fixed-edge ROI classification.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fixed ROI histogram bins over ratio ROI (1.0 = 100%). Edges are
/// `(-inf,-0.5], (-0.5,0], (0,0.5], (0.5,1.0], (1.0,2.0], (2.0,inf)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiBucket {
    BelowMinus50,
    Minus50To0,
    ZeroTo50,
    FiftyTo100,
    HundredTo200,
    Above200,
}

impl RoiBucket {
    /// Classify a ratio ROI into its bucket. Upper edges are inclusive;
    /// non-finite values read as 0, matching the metric engine's input
    /// coercion.
    pub fn classify(roi: f64) -> Self {
        let roi = if roi.is_finite() { roi } else { 0.0 };
        if roi <= -0.5 {
            Self::BelowMinus50
        } else if roi <= 0.0 {
            Self::Minus50To0
        } else if roi <= 0.5 {
            Self::ZeroTo50
        } else if roi <= 1.0 {
            Self::FiftyTo100
        } else if roi <= 2.0 {
            Self::HundredTo200
        } else {
            Self::Above200
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::BelowMinus50 => "< -50%",
            Self::Minus50To0 => "-50% to 0%",
            Self::ZeroTo50 => "0% to 50%",
            Self::FiftyTo100 => "50% to 100%",
            Self::HundredTo200 => "100% to 200%",
            Self::Above200 => "> 200%",
        }
    }
}

/// Count rows per ROI bucket, keyed in bucket order.
pub fn roi_distribution(rois: impl IntoIterator<Item = f64>) -> BTreeMap<RoiBucket, u64> {
    let mut counts = BTreeMap::new();
    for roi in rois {
        *counts.entry(RoiBucket::classify(roi)).or_insert(0) += 1;
    }
    counts
}

/// Coarse portfolio segments over percentage ROI, used by the insights
/// views alongside the finer histogram buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceSegment {
    HighPerformer,
    GoodPerformer,
    BreakEven,
    LossMaking,
}

impl PerformanceSegment {
    /// Classify by percentage ROI: >= 100 high, >= 50 good, >= 0
    /// break-even, otherwise loss-making.
    pub fn classify(roi_pct: f64) -> Self {
        if roi_pct >= 100.0 {
            Self::HighPerformer
        } else if roi_pct >= 50.0 {
            Self::GoodPerformer
        } else if roi_pct >= 0.0 {
            Self::BreakEven
        } else {
            Self::LossMaking
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::HighPerformer => "High Performers (ROI >= 100%)",
            Self::GoodPerformer => "Good Performers (ROI 50-99%)",
            Self::BreakEven => "Break-even (ROI 0-49%)",
            Self::LossMaking => "Loss-making (ROI < 0%)",
        }
    }
}
