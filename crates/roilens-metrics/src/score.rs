//! Composite influencer score.

/// Blend engagement, conversion, and ROI into a single 0-100 score.
///
/// Each sub-metric is normalised onto a 0-100 scale with fixed policy
/// constants, then combined with fixed weights 0.3 / 0.4 / 0.3:
///
/// - engagement: `engagement_rate * 10`, capped at 100 (a 10% rate maxes out)
/// - conversion: `conversion_rate * 1000`, capped at 100 (a 0.1% rate maxes out)
/// - ROI: `roi_pct + 100`, clamped to [0, 100] (break-even scores 100)
///
/// `roi_pct` is the percentage form of ROI (ratio * 100). The constants are
/// product policy, not derived from data. Result rounds to 1 decimal.
pub fn composite_influencer_score(engagement_rate: f64, conversion_rate: f64, roi_pct: f64) -> f64 {
    let sanitize = |v: f64| if v.is_finite() { v } else { 0.0 };

    let engagement_score = (sanitize(engagement_rate) * 10.0).min(100.0).max(0.0);
    let conversion_score = (sanitize(conversion_rate) * 1000.0).min(100.0).max(0.0);
    let roi_score = (sanitize(roi_pct) + 100.0).clamp(0.0, 100.0);

    let composite = engagement_score * 0.3 + conversion_score * 0.4 + roi_score * 0.3;
    (composite * 10.0).round() / 10.0
}
