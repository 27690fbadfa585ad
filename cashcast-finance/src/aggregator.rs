//! Aggregator: income/expense totals, per-category and per-day spend.

use cashcast_core::{Category, CategorySpend, Transaction};
use std::collections::BTreeMap;

/// Totals over one batch of transactions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregates {
    pub total_income: f64,
    pub total_expenses: f64,
    /// Debit spend per category
    pub category_spending: BTreeMap<Category, f64>,
    /// Debit spend per `YYYY-MM-DD` day key; undated debits are not included
    pub daily_spending: BTreeMap<String, f64>,
}

impl Aggregates {
    pub fn net_cash_flow(&self) -> f64 {
        self.total_income - self.total_expenses
    }

    /// The `n` largest categories by spend, descending.
    /// Equal amounts are ordered by category label.
    pub fn top_categories(&self, n: usize) -> Vec<CategorySpend> {
        let mut ranked: Vec<CategorySpend> = self
            .category_spending
            .iter()
            .map(|(category, amount)| CategorySpend {
                category: *category,
                amount: *amount,
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.amount
                .total_cmp(&a.amount)
                .then_with(|| a.category.label().cmp(b.category.label()))
        });
        ranked.truncate(n);
        ranked
    }
}

/// Sum a batch of transactions. Only `debit` and `credit` rows count.
pub fn aggregate(txns: &[Transaction]) -> Aggregates {
    let mut agg = Aggregates::default();

    for t in txns {
        if t.is_income() {
            agg.total_income += t.amount;
        } else if t.is_expense() {
            agg.total_expenses += t.amount;
            *agg.category_spending.entry(t.category).or_insert(0.0) += t.amount;
            if let Some(day) = &t.date_iso {
                *agg.daily_spending.entry(day.clone()).or_insert(0.0) += t.amount;
            }
        }
    }

    agg
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashcast_core::TxnKind;

    fn txn(amount: f64, kind: TxnKind, date: Option<&str>, category: Category) -> Transaction {
        Transaction {
            id: format!("t-{amount}"),
            amount,
            kind,
            date_iso: date.map(str::to_string),
            merchant: None,
            category,
        }
    }

    #[test]
    fn test_totals_ignore_info_rows() {
        let txns = vec![
            txn(200.0, TxnKind::Credit, None, Category::Income),
            txn(50.0, TxnKind::Debit, None, Category::Shopping),
            txn(999.0, TxnKind::Info, None, Category::Income),
            txn(7.0, TxnKind::Other("otp".into()), None, Category::Income),
        ];
        let agg = aggregate(&txns);
        assert_eq!(agg.total_income, 200.0);
        assert_eq!(agg.total_expenses, 50.0);
        assert_eq!(agg.net_cash_flow(), 150.0);
    }

    #[test]
    fn test_category_and_daily_buckets() {
        let txns = vec![
            txn(30.0, TxnKind::Debit, Some("2025-01-01"), Category::FoodDining),
            txn(20.0, TxnKind::Debit, Some("2025-01-01"), Category::FoodDining),
            txn(15.0, TxnKind::Debit, Some("2025-01-02"), Category::Transport),
            txn(40.0, TxnKind::Debit, None, Category::Shopping),
            txn(500.0, TxnKind::Credit, Some("2025-01-03"), Category::Income),
        ];
        let agg = aggregate(&txns);
        assert_eq!(agg.category_spending[&Category::FoodDining], 50.0);
        assert_eq!(agg.category_spending[&Category::Shopping], 40.0);
        assert!(!agg.category_spending.contains_key(&Category::Income));

        // Undated debit and the credit stay out of the day map
        assert_eq!(agg.daily_spending.len(), 2);
        assert_eq!(agg.daily_spending["2025-01-01"], 50.0);
    }

    #[test]
    fn test_impossible_day_still_keys_daily_spend() {
        let txns = vec![
            txn(500.0, TxnKind::Debit, Some("2025-02-30"), Category::Shopping),
            txn(5.0, TxnKind::Debit, Some("2025-02-01"), Category::Shopping),
        ];
        let agg = aggregate(&txns);
        assert_eq!(agg.daily_spending["2025-02-30"], 500.0);
        let days: Vec<_> = agg.daily_spending.keys().map(String::as_str).collect();
        assert_eq!(days, vec!["2025-02-01", "2025-02-30"]);
    }

    #[test]
    fn test_top_categories_match_full_spending_map() {
        let txns: Vec<_> = [
            (Category::FoodDining, 12.0),
            (Category::Shopping, 80.0),
            (Category::Transport, 5.0),
            (Category::Entertainment, 44.0),
            (Category::Utilities, 61.0),
            (Category::Healthcare, 7.0),
            (Category::OtherExpenses, 19.0),
            (Category::Shopping, 30.0),
        ]
        .into_iter()
        .map(|(c, a)| txn(a, TxnKind::Debit, None, c))
        .collect();

        let agg = aggregate(&txns);
        assert_eq!(agg.category_spending.len(), 7);

        let top = agg.top_categories(5);
        assert_eq!(top.len(), 5);
        let max = agg.category_spending.values().copied().fold(f64::MIN, f64::max);
        assert_eq!(top[0].amount, max);
        assert_eq!(top[0].category, Category::Shopping);

        // Nothing left out outspends anything kept
        let smallest_kept = top[4].amount;
        let dropped = agg
            .category_spending
            .iter()
            .filter(|(c, _)| !top.iter().any(|t| t.category == **c));
        for (_, amount) in dropped {
            assert!(*amount <= smallest_kept);
        }
    }

    #[test]
    fn test_top_categories_capped_and_sorted() {
        let mut agg = Aggregates::default();
        for (i, c) in [
            Category::FoodDining,
            Category::Shopping,
            Category::Transport,
            Category::Entertainment,
            Category::Utilities,
            Category::Healthcare,
            Category::OtherExpenses,
        ]
        .into_iter()
        .enumerate()
        {
            agg.category_spending.insert(c, (i as f64 + 1.0) * 10.0);
        }

        let top = agg.top_categories(5);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].category, Category::OtherExpenses);
        assert_eq!(top[0].amount, 70.0);
        for w in top.windows(2) {
            assert!(w[0].amount >= w[1].amount);
        }
    }

    #[test]
    fn test_top_category_ties_break_by_label() {
        let mut agg = Aggregates::default();
        agg.category_spending.insert(Category::Transport, 10.0);
        agg.category_spending.insert(Category::Healthcare, 10.0);
        agg.category_spending.insert(Category::Shopping, 10.0);

        let labels: Vec<_> = agg.top_categories(5).iter().map(|c| c.category.label()).collect();
        assert_eq!(labels, vec!["Healthcare", "Shopping", "Transport"]);
    }
}
