//! Raw inbound tables and cell coercion.
//!
//! The CSV/upload layer sits outside the core and hands tables over as
//! loosely typed `serde_json::Value` cells. Everything here turns those
//! cells into the typed rows of [`crate::types`] under one fixed policy:
//! invalid numerics become 0, invalid dates become `None`, and rows are
//! never dropped for a bad cell. Only a missing required column rejects
//! the whole table at the boundary.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::types::{Influencer, Payout, PayoutBasis, Post, TrackingRecord};

/// A table as delivered by the upload layer: a declared column set plus
/// one map per row. Cells absent from a row read as null.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<BTreeMap<String, Value>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<BTreeMap<String, Value>>) -> Self {
        Self { columns, rows }
    }

    /// Build a table from bare rows, deriving the column set from the
    /// union of row keys.
    pub fn from_rows(rows: Vec<BTreeMap<String, Value>>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }
        Self { columns, rows }
    }

    fn require(&self, dataset: &'static str, required: &[&'static str]) -> AnalyticsResult<()> {
        for column in required {
            if !self.columns.iter().any(|c| c == column) {
                return Err(AnalyticsError::MissingColumn { dataset, column });
            }
        }
        Ok(())
    }

    /// Rows where every cell is null or empty carry no data and are
    /// skipped during coercion.
    fn is_blank(row: &BTreeMap<String, Value>) -> bool {
        row.values().all(|v| match v {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        })
    }
}

// ---------------------------------------------------------------------------
// Cell coercion
// ---------------------------------------------------------------------------

fn cell<'a>(row: &'a BTreeMap<String, Value>, column: &str) -> &'a Value {
    row.get(column).unwrap_or(&Value::Null)
}

/// Coerce a cell to a non-negative float. Numbers pass through, numeric
/// strings parse, everything else (including NaN and negatives, which are
/// outside the documented column domains) reads as 0.
pub fn as_money(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    };
    if parsed.is_finite() && parsed > 0.0 {
        parsed
    } else {
        0.0
    }
}

/// Coerce a cell to a non-negative count. Fractional values truncate.
pub fn as_count(value: &Value) -> u64 {
    as_money(value) as u64
}

/// Coerce a cell to a signed integer id; invalid ids read as 0 and then
/// surface as orphans in the integrity report rather than erroring here.
pub fn as_id(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .or_else(|_| s.trim().parse::<f64>().map(|f| f as i64))
            .unwrap_or(0),
        _ => 0,
    }
}

pub fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"];

/// Coerce a cell to a calendar date. Unparseable dates become `None` and
/// the row stays in non-date aggregates.
pub fn as_date(value: &Value) -> Option<NaiveDate> {
    let text = match value {
        Value::String(s) => s.trim(),
        _ => return None,
    };
    if text.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    // RFC 3339 timestamps keep just the calendar date.
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(text) {
        return Some(ts.date_naive());
    }
    if text.len() >= 10 {
        if let Ok(date) = NaiveDate::parse_from_str(&text[..10], "%Y-%m-%d") {
            return Some(date);
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Table coercion
// ---------------------------------------------------------------------------

pub(crate) fn coerce_influencers(table: &RawTable) -> AnalyticsResult<Vec<Influencer>> {
    table.require(
        "influencers",
        &["id", "name", "category", "gender", "follower_count", "platform"],
    )?;
    Ok(table
        .rows
        .iter()
        .filter(|row| !RawTable::is_blank(row))
        .map(|row| Influencer {
            id: as_id(cell(row, "id")),
            name: as_text(cell(row, "name")),
            category: as_text(cell(row, "category")),
            gender: as_text(cell(row, "gender")),
            follower_count: as_count(cell(row, "follower_count")),
            platform: as_text(cell(row, "platform")),
        })
        .collect())
}

pub(crate) fn coerce_posts(table: &RawTable) -> AnalyticsResult<Vec<Post>> {
    table.require(
        "posts",
        &["influencer_id", "platform", "date", "url", "caption", "reach", "likes", "comments"],
    )?;
    Ok(table
        .rows
        .iter()
        .filter(|row| !RawTable::is_blank(row))
        .map(|row| Post {
            influencer_id: as_id(cell(row, "influencer_id")),
            platform: as_text(cell(row, "platform")),
            date: as_date(cell(row, "date")),
            url: as_text(cell(row, "url")),
            caption: as_text(cell(row, "caption")),
            reach: as_count(cell(row, "reach")),
            likes: as_count(cell(row, "likes")),
            comments: as_count(cell(row, "comments")),
        })
        .collect())
}

pub(crate) fn coerce_tracking(table: &RawTable) -> AnalyticsResult<Vec<TrackingRecord>> {
    table.require(
        "tracking_data",
        &["source", "campaign", "influencer_id", "user_id", "product", "date", "orders", "revenue"],
    )?;
    Ok(table
        .rows
        .iter()
        .filter(|row| !RawTable::is_blank(row))
        .map(|row| TrackingRecord {
            source: as_text(cell(row, "source")),
            campaign: as_text(cell(row, "campaign")),
            influencer_id: as_id(cell(row, "influencer_id")),
            user_id: as_text(cell(row, "user_id")),
            product: as_text(cell(row, "product")),
            date: as_date(cell(row, "date")),
            orders: as_count(cell(row, "orders")),
            revenue: as_money(cell(row, "revenue")),
        })
        .collect())
}

pub(crate) fn coerce_payouts(table: &RawTable) -> AnalyticsResult<Vec<Payout>> {
    table.require(
        "payouts",
        &["influencer_id", "basis", "rate", "orders", "total_payout"],
    )?;
    Ok(table
        .rows
        .iter()
        .filter(|row| !RawTable::is_blank(row))
        .map(|row| Payout {
            influencer_id: as_id(cell(row, "influencer_id")),
            basis: PayoutBasis::parse(&as_text(cell(row, "basis"))),
            rate: as_money(cell(row, "rate")),
            orders: as_count(cell(row, "orders")),
            total_payout: as_money(cell(row, "total_payout")),
        })
        .collect())
}
