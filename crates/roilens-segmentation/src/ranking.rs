//! Deterministic top-N / bottom-N ranking.

use std::cmp::Ordering;

fn ranked<T: Clone>(rows: &[T], n: usize, key: impl Fn(&T) -> f64, descending: bool) -> Vec<T> {
    let mut sorted: Vec<T> = rows.to_vec();
    // Stable sort: ties keep their original row order, so repeated calls
    // on identical input return identical output. Metric values are total
    // functions and never NaN, so the ordering fallback is unreachable in
    // practice.
    sorted.sort_by(|a, b| {
        let ord = key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal);
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
    sorted.truncate(n);
    sorted
}

/// The `n` rows with the highest metric value, ties in original order.
pub fn top_n<T: Clone>(rows: &[T], n: usize, key: impl Fn(&T) -> f64) -> Vec<T> {
    ranked(rows, n, key, true)
}

/// The `n` rows with the lowest metric value, ties in original order.
pub fn bottom_n<T: Clone>(rows: &[T], n: usize, key: impl Fn(&T) -> f64) -> Vec<T> {
    ranked(rows, n, key, false)
}
