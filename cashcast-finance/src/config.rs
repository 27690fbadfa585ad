//! Engine tuning knobs. Defaults reproduce the reference behavior exactly.

use serde::{Deserialize, Serialize};

use crate::anomaly::DEFAULT_RISKY_SIGMA;
use crate::forecast::DEFAULT_HORIZON_DAYS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Forecast horizon in days
    pub horizon_days: u32,
    /// Risky-day threshold width in population standard deviations
    pub risky_sigma: f64,
    /// Number of categories kept in the ranked breakdown
    pub top_categories: usize,
    /// IANA zone used to turn receipt timestamps into calendar days
    pub timezone: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            risky_sigma: DEFAULT_RISKY_SIGMA,
            top_categories: 5,
            timezone: "UTC".to_string(),
        }
    }
}
