//! Risky-day detection: days whose spend is an outlier against the
//! distribution of daily totals.

use cashcast_core::{mean, population_std_dev};
use std::collections::BTreeMap;

/// Default outlier width, in population standard deviations
pub const DEFAULT_RISKY_SIGMA: f64 = 1.5;

/// Days whose total strictly exceeds `mean + sigma * stddev`, in ascending
/// day-key order. The full list is returned; display truncation is up to callers.
pub fn detect_risky_days(daily_spending: &BTreeMap<String, f64>, sigma: f64) -> Vec<String> {
    if daily_spending.is_empty() {
        return Vec::new();
    }

    let values: Vec<f64> = daily_spending.values().copied().collect();
    let threshold = mean(&values) + sigma * population_std_dev(&values);

    daily_spending
        .iter()
        .filter(|(_, total)| **total > threshold)
        .map(|(day, _)| day.clone())
        .collect()
}
