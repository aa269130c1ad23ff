//! Site totals and simple weekly nowcast helpers.

use crate::calibration::VolumeEstimate;
use crate::interface::SiteAggregate;

pub fn sum_volumes(estimates: &[VolumeEstimate]) -> f64 {
    estimates.iter().map(|e| e.volume_bbl).sum()
}

pub fn site_aggregate(week: Option<&str>, estimates: &[VolumeEstimate]) -> SiteAggregate {
    SiteAggregate {
        week: week.unwrap_or("unknown").to_string(),
        total_volume_bbl: sum_volumes(estimates),
        num_tanks: estimates.len(),
    }
}

/// First difference; the first week has no predecessor.
pub fn weekly_change(series: &[f64]) -> Vec<Option<f64>> {
    let mut changes = Vec::with_capacity(series.len());
    if !series.is_empty() {
        changes.push(None);
    }
    changes.extend(series.windows(2).map(|w| Some(w[1] - w[0])));
    changes
}

/// Exponentially weighted moving average without bias adjustment:
/// `y[0] = x[0]`, `y[t] = alpha * x[t] + (1 - alpha) * y[t-1]`.
pub fn ewma(series: &[f64], alpha: f64) -> Vec<f64> {
    let mut smoothed = Vec::with_capacity(series.len());
    let mut state: Option<f64> = None;
    for &value in series {
        let next = match state {
            Some(prev) => alpha * value + (1.0 - alpha) * prev,
            None => value,
        };
        smoothed.push(next);
        state = Some(next);
    }
    smoothed
}
