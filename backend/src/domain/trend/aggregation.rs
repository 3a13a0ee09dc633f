//! Monthly bucketing of raw transactions for the trend pipeline.
//!
//! Builds the fixed six-month historical window (current month and the five
//! preceding) and sums income/expense amounts per calendar month. Calendar
//! months are determined by local year/month, not elapsed days.

use chrono::{Datelike, NaiveDate};
use tracing::warn;

use shared::TransactionKind;

use super::TrendTransaction;

/// Number of historical calendar months the pipeline looks at.
pub const HISTORY_MONTHS: usize = 6;

/// Income/expense totals for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthBucket {
    /// Sortable month key ("YYYY-MM")
    pub month_key: String,
    /// Human-readable month label (e.g. "Mar 2026")
    pub label: String,
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

/// First day of the calendar month `offset` months after the month
/// containing `date` (negative offsets go back in time).
pub(crate) fn shift_month(date: NaiveDate, offset: i32) -> NaiveDate {
    let months = date.year() * 12 + date.month0() as i32 + offset;
    let (year, month0) = (months.div_euclid(12), months.rem_euclid(12) as u32);
    NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap()
}

pub(crate) fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

pub(crate) fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// Parse a transaction date as either a plain calendar date or an RFC 3339
/// timestamp. Returns None when neither form parses.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Bucket transactions into the trailing six calendar months ending at
/// `today`'s month, oldest first.
///
/// Records whose date is missing or unparseable are skipped with a warning;
/// non-numeric amounts count as zero. Neither aborts the run.
pub fn aggregate_months(transactions: &[TrendTransaction], today: NaiveDate) -> Vec<MonthBucket> {
    let mut buckets: Vec<MonthBucket> = (0..HISTORY_MONTHS)
        .rev()
        .map(|back| {
            let month = shift_month(today, -(back as i32));
            MonthBucket {
                month_key: month_key(month),
                label: month_label(month),
                income: 0.0,
                expenses: 0.0,
                balance: 0.0,
            }
        })
        .collect();

    for transaction in transactions {
        let raw_date = match transaction.recorded_date() {
            Some(raw) => raw,
            None => {
                warn!("skipping transaction without a date field");
                continue;
            }
        };
        let date = match parse_date(raw_date) {
            Some(date) => date,
            None => {
                warn!(date = raw_date, "skipping transaction with unparseable date");
                continue;
            }
        };

        let key = month_key(date);
        if let Some(bucket) = buckets.iter_mut().find(|b| b.month_key == key) {
            let amount = transaction.amount.trim().parse::<f64>().unwrap_or(0.0);
            match transaction.kind {
                TransactionKind::Income => bucket.income += amount,
                TransactionKind::Expense => bucket.expenses += amount,
            }
        }
    }

    for bucket in &mut buckets {
        bucket.balance = bucket.income - bucket.expenses;
    }

    buckets
}
