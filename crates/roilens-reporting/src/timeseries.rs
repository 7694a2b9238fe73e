//! Time-bucketed tracking summaries.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use roilens_core::TrackingRecord;
use roilens_metrics as metrics;
use serde::{Deserialize, Serialize};

/// Calendar truncation applied to tracking dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
}

/// One flat record per time bucket, sorted by bucket start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodMetrics {
    /// Bucket label: `YYYY-MM-DD`, `YYYY-Www` (ISO week), or `YYYY-MM`.
    pub period: String,
    /// First calendar day of the bucket.
    pub start: NaiveDate,
    pub orders: u64,
    pub revenue: f64,
    pub avg_order_value: f64,
}

/// Truncate a date to its bucket start and render the bucket label.
fn bucket(date: NaiveDate, period: Period) -> (NaiveDate, String) {
    match period {
        Period::Daily => (date, date.format("%Y-%m-%d").to_string()),
        Period::Weekly => {
            let iso = date.iso_week();
            // The ISO week always has a Monday, so the fallback is unreachable
            // for valid dates.
            let start = NaiveDate::from_isoywd_opt(iso.year(), iso.week(), Weekday::Mon)
                .unwrap_or(date);
            (start, format!("{:04}-W{:02}", iso.year(), iso.week()))
        }
        Period::Monthly => {
            let start = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date);
            (start, format!("{:04}-{:02}", date.year(), date.month()))
        }
    }
}

/// Sum orders and revenue per calendar bucket. Rows whose date failed to
/// parse are excluded here (they still count in non-date aggregates).
pub fn per_period_metrics(tracking: &[TrackingRecord], period: Period) -> Vec<PeriodMetrics> {
    let mut aggs: BTreeMap<NaiveDate, (String, u64, f64)> = BTreeMap::new();

    for record in tracking {
        let Some(date) = record.date else {
            continue;
        };
        let (start, label) = bucket(date, period);
        let agg = aggs.entry(start).or_insert_with(|| (label, 0, 0.0));
        agg.1 += record.orders;
        agg.2 += record.revenue;
    }

    aggs.into_iter()
        .map(|(start, (label, orders, revenue))| PeriodMetrics {
            period: label,
            start,
            orders,
            revenue,
            avg_order_value: metrics::average_order_value(revenue, orders as f64),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracking(date: Option<NaiveDate>, orders: u64, revenue: f64) -> TrackingRecord {
        TrackingRecord {
            source: "instagram".to_string(),
            campaign: "c".to_string(),
            influencer_id: 1,
            user_id: "u".to_string(),
            product: "p".to_string(),
            date,
            orders,
            revenue,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_daily_buckets() {
        let rows = per_period_metrics(
            &[
                tracking(date(2024, 5, 1), 2, 200.0),
                tracking(date(2024, 5, 1), 3, 400.0),
                tracking(date(2024, 5, 2), 1, 100.0),
            ],
            Period::Daily,
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].period, "2024-05-01");
        assert_eq!(rows[0].orders, 5);
        assert_eq!(rows[0].avg_order_value, 120.0);
    }

    #[test]
    fn test_iso_week_buckets() {
        // 2024-05-01 is a Wednesday in ISO week 18; 2024-05-06 is the
        // Monday of week 19.
        let rows = per_period_metrics(
            &[
                tracking(date(2024, 5, 1), 1, 100.0),
                tracking(date(2024, 5, 3), 1, 100.0),
                tracking(date(2024, 5, 6), 1, 100.0),
            ],
            Period::Weekly,
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].period, "2024-W18");
        assert_eq!(rows[0].start, NaiveDate::from_ymd_opt(2024, 4, 29).unwrap());
        assert_eq!(rows[0].orders, 2);
        assert_eq!(rows[1].period, "2024-W19");
    }

    #[test]
    fn test_monthly_buckets_and_null_dates() {
        let rows = per_period_metrics(
            &[
                tracking(date(2024, 5, 1), 1, 100.0),
                tracking(date(2024, 5, 28), 1, 100.0),
                tracking(date(2024, 6, 1), 2, 300.0),
                tracking(None, 50, 5_000.0), // unparseable date, excluded
            ],
            Period::Monthly,
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].period, "2024-05");
        assert_eq!(rows[0].orders, 2);
        assert_eq!(rows[1].period, "2024-06");
        assert_eq!(rows[1].avg_order_value, 150.0);
    }

    #[test]
    fn test_buckets_sorted_by_start() {
        let rows = per_period_metrics(
            &[
                tracking(date(2024, 6, 1), 1, 100.0),
                tracking(date(2024, 4, 1), 1, 100.0),
                tracking(date(2024, 5, 1), 1, 100.0),
            ],
            Period::Monthly,
        );
        let starts: Vec<NaiveDate> = rows.iter().map(|r| r.start).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
    }
}
