//! Payout breakdown by compensation basis.

use std::collections::BTreeMap;

use roilens_core::{Payout, PayoutBasis};
use serde::{Deserialize, Serialize};

/// One flat record per compensation basis found in the payouts table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutBasisSummary {
    pub basis: PayoutBasis,
    /// Payout rows on this basis (one per compensation event).
    pub influencers: u64,
    pub orders: u64,
    pub total_payout: f64,
    pub avg_payout: f64,
}

#[derive(Default)]
struct BasisAgg {
    rows: u64,
    orders: u64,
    total_payout: f64,
}

/// Group payouts by basis: row count, summed orders, summed and average
/// payout. Feeds the payout-distribution view that compares post-based
/// against order-based compensation.
pub fn payout_basis_summary(payouts: &[Payout]) -> Vec<PayoutBasisSummary> {
    let mut aggs: BTreeMap<PayoutBasis, BasisAgg> = BTreeMap::new();
    for payout in payouts {
        let agg = aggs.entry(payout.basis).or_default();
        agg.rows += 1;
        agg.orders += payout.orders;
        agg.total_payout += payout.total_payout;
    }

    aggs.into_iter()
        .map(|(basis, agg)| PayoutBasisSummary {
            basis,
            influencers: agg.rows,
            orders: agg.orders,
            total_payout: agg.total_payout,
            avg_payout: if agg.rows > 0 {
                agg.total_payout / agg.rows as f64
            } else {
                0.0
            },
        })
        .collect()
}
