use serde::Serialize;
use std::sync::Mutex;

/// Thread-safe per-stage counters; shared by rayon workers during batch extraction.
pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub processed: usize,
    pub no_signal: usize,
    pub invalid_geometry: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_processed(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.processed += 1;
        }
    }

    /// Ring selected no pixels; the tank still counts as processed.
    pub fn record_no_signal(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.no_signal += 1;
        }
    }

    pub fn record_invalid_geometry(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.invalid_geometry += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner.lock().map(|m| *m).unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
