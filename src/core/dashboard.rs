//! Dashboard aggregation business logic.
//!
//! Reduces a trailing window of transactions into the three summaries the
//! dashboard renders: current-month totals, a per-category expense
//! breakdown, and a 6-month income/expense/balance series. The reduction
//! itself ([`summarize`]) is a pure, single-pass function over rows that
//! have already been loaded; [`load_dashboard`] is the thin database-facing
//! wrapper that fetches the window with category names joined at query
//! time.
//!
//! Bucketing is by calendar month: each row is routed to one of six fixed
//! buckets by truncating its date to month granularity, so the pass is
//! O(n) with O(1) extra state. Months with no transactions still appear in
//! the series with zero values.

use crate::{
    entities::{Category, Transaction, TransactionKind, transaction},
    errors::Result,
};
use chrono::{Datelike, Months, NaiveDate};
use sea_orm::{DatabaseConnection, QueryOrder, prelude::*};
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of calendar months in the rollup window, current month included.
pub const WINDOW_MONTHS: usize = 6;

/// One already-loaded ledger row, with the category name denormalized at
/// query time. A row whose category was deleted carries `None` and is
/// excluded from the breakdown.
#[derive(Debug, Clone)]
pub struct TransactionRow {
    /// Transaction amount, always positive
    pub amount: f64,
    /// Income or expense
    pub kind: TransactionKind,
    /// Date the transaction happened
    pub transaction_date: NaiveDate,
    /// Joined category name, if the category still exists
    pub category_name: Option<String>,
}

/// Totals for the reference month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    /// Sum of income amounts in the reference month
    pub income: f64,
    /// Sum of expense amounts in the reference month
    pub expenses: f64,
    /// `income - expenses`
    pub balance: f64,
}

/// One slice of the current-month expense breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    /// Category name
    pub name: String,
    /// Summed expense amount for that category
    pub value: f64,
}

/// One month of the rollup series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    /// Month key, `YYYY-MM`
    pub month: String,
    /// Income total for the month
    pub income: f64,
    /// Expense total for the month
    pub expense: f64,
    /// `income - expense`
    pub balance: f64,
}

/// Everything the dashboard needs, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Totals for the reference month
    pub current_month: MonthSummary,
    /// Current-month expenses grouped by category name, uncategorized
    /// rows excluded; sorted by name for determinism
    pub category_breakdown: Vec<CategorySlice>,
    /// Exactly [`WINDOW_MONTHS`] entries, oldest first, zero-filled for
    /// empty months
    pub monthly_series: Vec<MonthBucket>,
}

/// Months since year zero; signed so differences never underflow.
fn month_ordinal(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

/// First day of the month `date` falls in.
fn start_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 is valid for every month, so the fallback is unreachable.
    date.with_day(1).unwrap_or(date)
}

/// First day of the oldest month in the window ending at `reference`.
#[must_use]
pub fn window_start(reference: NaiveDate) -> NaiveDate {
    let start = start_of_month(reference);
    start
        .checked_sub_months(Months::new(WINDOW_MONTHS as u32 - 1))
        .unwrap_or(start)
}

/// Reduces `rows` into the dashboard summaries for the window ending at
/// `reference`. Pure function: same input, same output, no I/O.
///
/// Rows dated outside the window are ignored; the reference month is the
/// window's last bucket by construction, so a current-month row always
/// counts toward both the series and the month summary.
#[must_use]
pub fn summarize(rows: &[TransactionRow], reference: NaiveDate) -> DashboardSummary {
    let start = window_start(reference);
    let start_ordinal = month_ordinal(start);
    let current_index = WINDOW_MONTHS - 1;

    // Pre-seed the six buckets so gap months are not silently dropped.
    let mut labels = Vec::with_capacity(WINDOW_MONTHS);
    let mut month = start;
    for _ in 0..WINDOW_MONTHS {
        labels.push(format!("{:04}-{:02}", month.year(), month.month()));
        month = month.checked_add_months(Months::new(1)).unwrap_or(month);
    }
    let mut buckets = vec![(0.0_f64, 0.0_f64); WINDOW_MONTHS];

    let mut current_income = 0.0;
    let mut current_expenses = 0.0;
    let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();

    for row in rows {
        let offset = month_ordinal(row.transaction_date) - start_ordinal;
        let Ok(index) = usize::try_from(offset) else {
            continue; // before the window
        };
        if index >= WINDOW_MONTHS {
            continue; // after the window
        }

        match row.kind {
            TransactionKind::Income => buckets[index].0 += row.amount,
            TransactionKind::Expense => buckets[index].1 += row.amount,
        }

        if index == current_index {
            match row.kind {
                TransactionKind::Income => current_income += row.amount,
                TransactionKind::Expense => {
                    current_expenses += row.amount;
                    if let Some(name) = row.category_name.as_deref() {
                        *by_category.entry(name).or_insert(0.0) += row.amount;
                    }
                }
            }
        }
    }

    let monthly_series = labels
        .into_iter()
        .zip(buckets)
        .map(|(month, (income, expense))| MonthBucket {
            month,
            income,
            expense,
            balance: income - expense,
        })
        .collect();

    let category_breakdown = by_category
        .into_iter()
        .map(|(name, value)| CategorySlice {
            name: name.to_string(),
            value,
        })
        .collect();

    DashboardSummary {
        current_month: MonthSummary {
            income: current_income,
            expenses: current_expenses,
            balance: current_income - current_expenses,
        },
        category_breakdown,
        monthly_series,
    }
}

/// Loads the caller's trailing transaction window with category names
/// joined at read time and reduces it with [`summarize`].
pub async fn load_dashboard(
    db: &DatabaseConnection,
    profile_id: i64,
    reference: NaiveDate,
) -> Result<DashboardSummary> {
    let rows = Transaction::find()
        .filter(transaction::Column::ProfileId.eq(profile_id))
        .filter(transaction::Column::TransactionDate.gte(window_start(reference)))
        .order_by_asc(transaction::Column::TransactionDate)
        .find_also_related(Category)
        .all(db)
        .await?;

    let rows: Vec<TransactionRow> = rows
        .into_iter()
        .map(|(txn, category)| TransactionRow {
            amount: txn.amount,
            kind: txn.kind,
            transaction_date: txn.transaction_date,
            category_name: category.map(|c| c.name),
        })
        .collect();

    Ok(summarize(&rows, reference))
}
