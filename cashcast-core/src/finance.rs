//! Finance record types for normalized transactions and cash-flow output

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::time::parse_iso_date;

/// Direction of a money movement as reported by the extractor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnKind {
    Debit,
    Credit,
    Info,
    /// Any other label; ignored by every aggregate
    #[serde(untagged)]
    Other(String),
}

impl TxnKind {
    /// Parse a raw `type` label. Case and surrounding whitespace are ignored.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return TxnKind::Info;
        };
        match raw.trim().to_lowercase().as_str() {
            "debit" => TxnKind::Debit,
            "credit" => TxnKind::Credit,
            "info" | "" => TxnKind::Info,
            other => TxnKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TxnKind::Debit => "debit",
            TxnKind::Credit => "credit",
            TxnKind::Info => "info",
            TxnKind::Other(s) => s,
        }
    }

    pub fn is_debit(&self) -> bool {
        matches!(self, TxnKind::Debit)
    }

    pub fn is_credit(&self) -> bool {
        matches!(self, TxnKind::Credit)
    }
}

/// Coarse spending buckets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodDining,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Transport")]
    Transport,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Utilities")]
    Utilities,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Other Expenses")]
    OtherExpenses,
    #[serde(rename = "Income")]
    Income,
    #[serde(rename = "Uncategorized")]
    Uncategorized,
}

impl Category {
    /// Human-readable label, identical to the serialized form
    pub fn label(&self) -> &'static str {
        match self {
            Category::FoodDining => "Food & Dining",
            Category::Shopping => "Shopping",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Healthcare => "Healthcare",
            Category::OtherExpenses => "Other Expenses",
            Category::Income => "Income",
            Category::Uncategorized => "Uncategorized",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A normalized money movement derived from one extractor record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Source message id
    pub id: String,
    /// Non-negative magnitude of the movement
    pub amount: f64,
    pub kind: TxnKind,
    /// Day key as `YYYY-MM-DD`, if one could be determined. ISO-shaped source
    /// text is kept verbatim, so this may name an impossible day.
    pub date_iso: Option<String>,
    pub merchant: Option<String>,
    pub category: Category,
}

impl Transaction {
    /// The day key as a real calendar date, if it is one
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        self.date_iso.as_deref().and_then(parse_iso_date)
    }

    pub fn is_expense(&self) -> bool {
        self.kind.is_debit()
    }

    pub fn is_income(&self) -> bool {
        self.kind.is_credit()
    }
}

/// One entry of the ranked category breakdown
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CategorySpend {
    pub category: Category,
    pub amount: f64,
}

/// Final output of one engine run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CashFlowPrediction {
    pub total_income: f64,
    pub total_expenses: f64,
    /// Always `total_income - total_expenses`
    pub net_cash_flow: f64,
    /// Latest known balance plus the run-rate extrapolation
    pub predicted_balance: f64,
    /// Days projected by `predicted_balance`
    pub horizon_days: u32,
    /// Highest-spend categories, descending
    pub top_categories: Vec<CategorySpend>,
    /// Outlier spending days as `YYYY-MM-DD`, full list in detector order
    pub risky_days: Vec<String>,
    pub recommendation: String,

    pub latest_known_balance: Option<f64>,
    pub transaction_count: usize,
    pub skipped_records: usize,
    pub days_with_data: i64,
}

impl CashFlowPrediction {
    /// The degenerate result for an empty input set
    pub fn empty(recommendation: impl Into<String>) -> Self {
        Self {
            total_income: 0.0,
            total_expenses: 0.0,
            net_cash_flow: 0.0,
            predicted_balance: 0.0,
            horizon_days: 0,
            top_categories: Vec::new(),
            risky_days: Vec::new(),
            recommendation: recommendation.into(),
            latest_known_balance: None,
            transaction_count: 0,
            skipped_records: 0,
            days_with_data: 0,
        }
    }

    /// Risky days truncated for display
    pub fn risky_days_shown(&self, limit: usize) -> &[String] {
        &self.risky_days[..limit.min(self.risky_days.len())]
    }

    /// Savings rate in percent; zero when there is no income
    pub fn savings_rate(&self) -> f64 {
        if self.total_income > 0.0 {
            (self.total_income - self.total_expenses) / self.total_income * 100.0
        } else {
            0.0
        }
    }
}
