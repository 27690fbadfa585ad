//! cashcast-finance: aggregation, risky-day detection, run-rate forecast,
//! recommendations and the pipeline that ties them together

pub mod aggregator;
pub mod anomaly;
pub mod config;
pub mod forecast;
pub mod pipeline;
pub mod progress;
pub mod recommend;

pub use aggregator::{aggregate, Aggregates};
pub use anomaly::detect_risky_days;
pub use config::EngineConfig;
pub use forecast::{predict_balance, Forecast};
pub use pipeline::CashFlowEngine;
pub use progress::{NoProgress, ProgressSink, ProgressTracker};
pub use recommend::{recommend, Recommendation};
