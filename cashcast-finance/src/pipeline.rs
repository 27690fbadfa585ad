//! Cash-flow pipeline: normalize -> aggregate -> risky days -> top categories
//! -> recommendation -> forecast.
//!
//! A run never fails once the engine is built. Bad records are skipped by the
//! normalizer and thin data degrades toward zeroed fields.

use anyhow::Result;
use cashcast_core::{parse_timezone, CashFlowPrediction};
use cashcast_ingest::{into_maps, Normalizer, RawMessage};
use log::info;
use std::collections::HashMap;

use crate::aggregator::aggregate;
use crate::anomaly::detect_risky_days;
use crate::config::EngineConfig;
use crate::forecast::predict_balance;
use crate::progress::{ProgressSink, ProgressTracker};
use crate::recommend::{recommend, Recommendation};

#[derive(Debug, Clone)]
pub struct CashFlowEngine {
    config: EngineConfig,
    normalizer: Normalizer,
}

impl CashFlowEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        let tz = parse_timezone(&config.timezone)?;
        Ok(Self {
            normalizer: Normalizer::new(tz)?,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn run_messages(
        &self,
        messages: &[RawMessage],
        progress: &mut dyn ProgressSink,
    ) -> CashFlowPrediction {
        let (records, timestamps) = into_maps(messages);
        self.run(&records, &timestamps, progress)
    }

    /// Run the whole pipeline over one snapshot of extractor output.
    pub fn run(
        &self,
        records: &HashMap<String, String>,
        timestamps: &HashMap<String, i64>,
        progress: &mut dyn ProgressSink,
    ) -> CashFlowPrediction {
        let mut tracker = ProgressTracker::new(progress);

        if records.is_empty() {
            tracker.report("No data", 0.0);
            return CashFlowPrediction {
                horizon_days: self.config.horizon_days,
                ..CashFlowPrediction::empty(Recommendation::NoData.message())
            };
        }

        tracker.report("Reading transactions", 0.05);
        let normalized = self
            .normalizer
            .normalize_with_progress(records, timestamps, |done, total| {
                tracker.report_fraction("Reading transactions", done, total, 0.05, 0.45);
            });
        info!(
            "normalized {} transactions ({} skipped)",
            normalized.transactions.len(),
            normalized.skipped
        );

        tracker.report("Aggregating", 0.50);
        let agg = aggregate(&normalized.transactions);
        let net_cash_flow = agg.net_cash_flow();

        tracker.report("Detecting risky days", 0.60);
        let risky_days = detect_risky_days(&agg.daily_spending, self.config.risky_sigma);
        tracker.report("Detecting risky days", 0.72);
        info!(
            "{} of {} spending days flagged as risky",
            risky_days.len(),
            agg.daily_spending.len()
        );

        tracker.report("Ranking categories", 0.80);
        let top_categories = agg.top_categories(self.config.top_categories);

        tracker.report("Generating recommendation", 0.90);
        let recommendation = recommend(
            agg.total_income,
            agg.total_expenses,
            net_cash_flow,
            &agg.daily_spending,
        );

        tracker.report("Forecasting balance", 0.95);
        let forecast = predict_balance(
            &normalized.transactions,
            normalized.latest_known_balance,
            self.config.horizon_days,
        );

        tracker.report("Done", 1.0);

        CashFlowPrediction {
            total_income: agg.total_income,
            total_expenses: agg.total_expenses,
            net_cash_flow,
            predicted_balance: forecast.predicted_balance,
            horizon_days: self.config.horizon_days,
            top_categories,
            risky_days,
            recommendation: recommendation.message().to_string(),
            latest_known_balance: normalized.latest_known_balance,
            transaction_count: normalized.transactions.len(),
            skipped_records: normalized.skipped,
            days_with_data: forecast.days_with_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoProgress;

    fn engine() -> CashFlowEngine {
        CashFlowEngine::new(EngineConfig::default()).unwrap()
    }

    fn records(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_empty_input_is_no_data() {
        let mut seen = Vec::new();
        let mut sink = |s: &str, p: f32| seen.push((s.to_string(), p));
        let p = engine().run(&HashMap::new(), &HashMap::new(), &mut sink);
        assert_eq!(p.recommendation, "No data");
        assert_eq!(p.total_income, 0.0);
        assert_eq!(p.predicted_balance, 0.0);
        assert!(p.top_categories.is_empty());
        assert!(p.risky_days.is_empty());
        assert_eq!(p.horizon_days, 30);
        assert_eq!(seen, vec![("No data".to_string(), 0.0)]);
    }

    #[test]
    fn test_only_invalid_records_yield_zeroed_totals() {
        let p = engine().run(&records(&[("id1", "not json")]), &HashMap::new(), &mut NoProgress);
        assert_eq!(p.total_income, 0.0);
        assert_eq!(p.total_expenses, 0.0);
        assert_eq!(p.net_cash_flow, 0.0);
        assert_eq!(p.predicted_balance, 0.0);
        assert!(p.top_categories.is_empty());
        assert!(p.risky_days.is_empty());
        assert_eq!(p.skipped_records, 1);
        assert_eq!(p.recommendation, Recommendation::LowSavingsRate.message());
    }

    #[test]
    fn test_same_day_prediction() {
        let r = records(&[
            ("a", r#"{"amount": 100, "type": "debit", "date": "2025-01-01", "merchant": "Zomato"}"#),
            ("b", r#"{"amount": 200, "type": "credit", "date": "2025-01-01"}"#),
        ]);
        let p = engine().run(&r, &HashMap::new(), &mut NoProgress);
        assert_eq!(p.predicted_balance, 3000.0);
        assert_eq!(p.net_cash_flow, 100.0);
        assert_eq!(p.days_with_data, 1);
        assert_eq!(p.top_categories.len(), 1);
        assert_eq!(p.top_categories[0].amount, 100.0);
    }

    #[test]
    fn test_impossible_iso_day_still_drives_daily_rules() {
        // 500 on one day is above 10% of income even though Feb 30 does not exist
        let r = records(&[
            ("a", r#"{"amount": 1000, "type": "credit", "date": "2025-02-01"}"#),
            ("b", r#"{"amount": 500, "type": "debit", "date": "2025-02-30", "merchant": "Amazon"}"#),
        ]);
        let p = engine().run(&r, &HashMap::new(), &mut NoProgress);
        assert_eq!(p.recommendation, Recommendation::HighDailySpending.message());
        // Only Feb 1 parses, so the forecast span is one day
        assert_eq!(p.days_with_data, 1);
        assert_eq!(p.predicted_balance, 1000.0 * 30.0 - 500.0 * 30.0);
    }

    #[test]
    fn test_impossible_iso_day_can_be_risky() {
        let mut pairs: Vec<(String, String)> = (1..=6)
            .map(|d| {
                (
                    format!("d{d}"),
                    format!(r#"{{"amount": 10, "type": "debit", "date": "2025-02-0{d}"}}"#),
                )
            })
            .collect();
        pairs.push((
            "spike".to_string(),
            r#"{"amount": 400, "type": "debit", "date": "2025-02-30"}"#.to_string(),
        ));
        let r: HashMap<String, String> = pairs.into_iter().collect();

        let p = engine().run(&r, &HashMap::new(), &mut NoProgress);
        assert_eq!(p.risky_days, vec!["2025-02-30".to_string()]);
    }

    #[test]
    fn test_progress_is_monotonic_and_finishes() {
        let r = records(&[
            ("a", r#"{"amount": 100, "type": "debit", "date": "2025-01-01"}"#),
            ("b", "oops"),
            ("c", r#"{"amount": 300, "type": "credit", "date": "2025-01-02"}"#),
        ]);
        let mut values = Vec::new();
        let mut sink = |_: &str, p: f32| values.push(p);
        engine().run(&r, &HashMap::new(), &mut sink);

        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(values.last().copied(), Some(1.0));
    }

    #[test]
    fn test_panicking_progress_does_not_abort() {
        let r = records(&[("a", r#"{"amount": 100, "type": "debit"}"#)]);
        let mut sink = |_: &str, p: f32| {
            if p >= 0.0 {
                panic!("listener crashed");
            }
        };
        let p = engine().run(&r, &HashMap::new(), &mut sink);
        assert_eq!(p.total_expenses, 100.0);
    }

    #[test]
    fn test_invalid_timezone_rejected_at_build() {
        let cfg = EngineConfig {
            timezone: "Nowhere/Special".to_string(),
            ..EngineConfig::default()
        };
        assert!(CashFlowEngine::new(cfg).is_err());
    }
}
