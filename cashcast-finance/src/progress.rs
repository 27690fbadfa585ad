//! Progress reporting for pipeline runs.
//!
//! Reports are advisory: the pipeline calls the sink inline and never waits on
//! or reacts to it. A sink that panics is logged and muted for the rest of the
//! run.

use log::warn;
use std::panic::{self, AssertUnwindSafe};

/// Receives `(status, progress)` notifications; `progress` is in `[0, 1]`.
pub trait ProgressSink {
    fn report(&mut self, status: &str, progress: f32);
}

impl<F> ProgressSink for F
where
    F: FnMut(&str, f32),
{
    fn report(&mut self, status: &str, progress: f32) {
        self(status, progress)
    }
}

/// Sink that ignores every report
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _status: &str, _progress: f32) {}
}

/// Wraps a sink so it only ever sees clamped, non-decreasing values.
pub struct ProgressTracker<'a> {
    sink: &'a mut dyn ProgressSink,
    last: f32,
    muted: bool,
}

impl<'a> ProgressTracker<'a> {
    pub fn new(sink: &'a mut dyn ProgressSink) -> Self {
        Self {
            sink,
            last: 0.0,
            muted: false,
        }
    }

    pub fn report(&mut self, status: &str, progress: f32) {
        if self.muted {
            return;
        }

        let value = if progress.is_nan() { self.last } else { progress.clamp(0.0, 1.0) };
        let value = value.max(self.last);
        self.last = value;

        let sink = &mut *self.sink;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| sink.report(status, value)));
        if outcome.is_err() {
            warn!("progress sink panicked at {status:?}; further reports dropped");
            self.muted = true;
        }
    }

    /// Map `done / total` into the `[from, to]` band.
    pub fn report_fraction(&mut self, status: &str, done: usize, total: usize, from: f32, to: f32) {
        let fraction = if total == 0 { 1.0 } else { done as f32 / total as f32 };
        self.report(status, from + (to - from) * fraction);
    }

    pub fn last(&self) -> f32 {
        self.last
    }
}
