//! Recommendation rules: one guidance line from the aggregate numbers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Savings rate (percent) below which saving more is advised
pub const LOW_SAVINGS_RATE_PCT: f64 = 10.0;
/// A single day above this share of income counts as heavy spending
pub const HIGH_DAILY_SHARE: f64 = 0.1;
/// Net cash flow above this share of income earns praise
pub const EXCELLENT_NET_SHARE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    NoData,
    SpendingExceedsIncome,
    LowSavingsRate,
    HighDailySpending,
    ExcellentSavings,
    GoodHealth,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::NoData => "No data",
            Recommendation::SpendingExceedsIncome => {
                "You're spending more than you earn. Cut back on non-essential expenses to avoid running short."
            }
            Recommendation::LowSavingsRate => {
                "Your savings rate is below 10%. Try setting aside a fixed amount as soon as income arrives."
            }
            Recommendation::HighDailySpending => {
                "Some days show high spending compared to your income. Watch out for impulse purchases."
            }
            Recommendation::ExcellentSavings => {
                "Excellent! You're saving over 30% of your income. Consider investing the surplus."
            }
            Recommendation::GoodHealth => {
                "Your finances look healthy. Keep tracking your spending to stay on course."
            }
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Ordered decision list; the first rule that matches wins.
pub fn recommend(
    income: f64,
    expenses: f64,
    net_cash_flow: f64,
    daily_spending: &BTreeMap<String, f64>,
) -> Recommendation {
    if net_cash_flow < 0.0 {
        return Recommendation::SpendingExceedsIncome;
    }

    let savings_rate = if income > 0.0 {
        (income - expenses) / income * 100.0
    } else {
        0.0
    };
    if savings_rate < LOW_SAVINGS_RATE_PCT {
        return Recommendation::LowSavingsRate;
    }

    let daily_cap = income * HIGH_DAILY_SHARE;
    if daily_spending.values().any(|v| *v > daily_cap) {
        return Recommendation::HighDailySpending;
    }

    if net_cash_flow > income * EXCELLENT_NET_SHARE {
        return Recommendation::ExcellentSavings;
    }

    Recommendation::GoodHealth
}
