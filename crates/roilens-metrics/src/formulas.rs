//! Ratio and cost formulas.

/// Clamp a metric input to its documented domain: finite and non-negative.
/// NaN, infinities, and negatives all read as 0.
fn clean(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Return on investment as a ratio: `(revenue - cost) / cost`.
/// 1.0 means the campaign earned back its cost twice over; presentation
/// layers multiply by 100 for display. 0 when cost is 0.
pub fn roi(revenue: f64, cost: f64) -> f64 {
    let cost = clean(cost);
    if cost == 0.0 {
        return 0.0;
    }
    (clean(revenue) - cost) / cost
}

/// Return on ad spend: `revenue / cost`. 0 when cost is 0.
pub fn roas(revenue: f64, cost: f64) -> f64 {
    let cost = clean(cost);
    if cost == 0.0 {
        return 0.0;
    }
    clean(revenue) / cost
}

/// Engagement rate as a percentage: `(likes + comments) / reach * 100`.
/// 0 when reach is 0.
pub fn engagement_rate(likes: f64, comments: f64, reach: f64) -> f64 {
    let reach = clean(reach);
    if reach == 0.0 {
        return 0.0;
    }
    (clean(likes) + clean(comments)) / reach * 100.0
}

/// Conversion rate as a percentage: `orders / reach * 100`. 0 when reach is 0.
pub fn conversion_rate(orders: f64, reach: f64) -> f64 {
    let reach = clean(reach);
    if reach == 0.0 {
        return 0.0;
    }
    clean(orders) / reach * 100.0
}

/// Cost per acquisition: `cost / orders`. 0 when there are no orders.
pub fn cost_per_acquisition(total_cost: f64, total_orders: f64) -> f64 {
    let orders = clean(total_orders);
    if orders == 0.0 {
        return 0.0;
    }
    clean(total_cost) / orders
}

/// Cost per thousand impressions: `cost / impressions * 1000`.
/// 0 when there are no impressions.
pub fn cost_per_mille(total_cost: f64, total_impressions: f64) -> f64 {
    let impressions = clean(total_impressions);
    if impressions == 0.0 {
        return 0.0;
    }
    clean(total_cost) / impressions * 1000.0
}

/// Average order value: `revenue / orders`. 0 when there are no orders.
pub fn average_order_value(revenue: f64, orders: f64) -> f64 {
    let orders = clean(orders);
    if orders == 0.0 {
        return 0.0;
    }
    clean(revenue) / orders
}
