//! Run-rate balance forecast.
//!
//! Average daily income and expense over the observed date span, projected
//! linearly over a fixed horizon and added to the latest known balance.

use cashcast_core::Transaction;
use serde::{Deserialize, Serialize};

/// Default projection horizon in days
pub const DEFAULT_HORIZON_DAYS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub predicted_balance: f64,
    /// Inclusive day span of dated transactions, at least 1
    pub days_with_data: i64,
    pub avg_daily_income: f64,
    pub avg_daily_expense: f64,
}

impl Forecast {
    fn flat(balance: Option<f64>) -> Self {
        Self {
            predicted_balance: balance.unwrap_or(0.0),
            days_with_data: 0,
            avg_daily_income: 0.0,
            avg_daily_expense: 0.0,
        }
    }
}

/// Inclusive span between the earliest and latest parseable transaction
/// date. Day keys that are not real calendar dates are left out; no usable
/// dates counts as a single day.
pub fn days_with_data(txns: &[Transaction]) -> i64 {
    let mut dates = txns.iter().filter_map(Transaction::calendar_date);
    let Some(first) = dates.next() else {
        return 1;
    };
    let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
    ((max - min).num_days() + 1).max(1)
}

/// Project the balance `horizon_days` ahead.
pub fn predict_balance(
    txns: &[Transaction],
    latest_known_balance: Option<f64>,
    horizon_days: u32,
) -> Forecast {
    if txns.is_empty() {
        return Forecast::flat(latest_known_balance);
    }

    let income: f64 = txns.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
    let expense: f64 = txns.iter().filter(|t| t.is_expense()).map(|t| t.amount).sum();

    let days = days_with_data(txns);
    let avg_daily_income = income / days as f64;
    let avg_daily_expense = expense / days as f64;

    let horizon = f64::from(horizon_days);
    let predicted_income = avg_daily_income * horizon;
    let predicted_expenses = avg_daily_expense * horizon;

    Forecast {
        predicted_balance: latest_known_balance.unwrap_or(0.0) + predicted_income - predicted_expenses,
        days_with_data: days,
        avg_daily_income,
        avg_daily_expense,
    }
}
