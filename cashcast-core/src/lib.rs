//! cashcast-core: Core types and utilities for the cash-flow engine

pub mod finance;
pub mod stats;
pub mod time;

pub use finance::{CashFlowPrediction, Category, CategorySpend, Transaction, TxnKind};
pub use stats::{mean, population_std_dev};
pub use time::{millis_to_local_date, parse_iso_date, parse_timezone, to_iso_date};

/// Utility for categorizing merchants named in bank SMS
pub mod categorizer {
    use super::{Category, TxnKind};

    /// Keyword table, checked top to bottom. First match wins.
    const RULES: &[(Category, &[&str])] = &[
        (Category::FoodDining, &["zomato", "swiggy", "restaurant", "cafe"]),
        (Category::Shopping, &["amazon", "flipkart", "myntra", "shopping"]),
        (Category::Transport, &["uber", "ola", "petrol", "fuel"]),
        (Category::Entertainment, &["netflix", "prime", "hotstar", "subscription"]),
        (Category::Utilities, &["electricity", "water", "bill"]),
        (Category::Healthcare, &["med", "hospital", "pharma"]),
    ];

    /// Categorize a transaction from its merchant name and direction
    pub fn categorize(merchant: Option<&str>, kind: &TxnKind) -> Category {
        if !kind.is_debit() {
            return Category::Income;
        }

        let Some(merchant) = merchant else {
            return Category::Uncategorized;
        };

        let name = merchant.to_lowercase();
        RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| name.contains(k)))
            .map(|(category, _)| *category)
            .unwrap_or(Category::OtherExpenses)
    }

}

pub use categorizer::categorize;
