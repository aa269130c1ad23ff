//! Per-tank calibration: feature value → height fraction → volume.
//!
//! Each tank carries `lo`/`hi` reference values for the chosen index; the
//! current value is min-max scaled into `[0, 1]` and treated as the fill
//! fraction of a right cylinder.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::features::{FeatureKind, FeatureSet};
use crate::interface::FeatureRecord;
use crate::prelude::EPSILON;

/// US oil barrels per cubic meter.
pub const BBL_PER_M3: f64 = 6.28981;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationBounds {
    pub lo: f64,
    pub hi: f64,
}

impl CalibrationBounds {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub fn is_degenerate(&self) -> bool {
        self.hi <= self.lo + EPSILON
    }

    pub fn fraction(&self, index_value: f64) -> f64 {
        height_fraction(index_value, self.lo, self.hi)
    }
}

/// Min-max scale `index_value` into `[0, 1]`.
///
/// Collapsed or inverted bounds (`hi <= lo + 1e-6`) return the neutral `0.5`.
pub fn height_fraction(index_value: f64, lo: f64, hi: f64) -> f64 {
    if hi <= lo + EPSILON {
        return 0.5;
    }
    ((index_value - lo) / (hi - lo)).clamp(0.0, 1.0)
}

/// Stored volume in barrels for a cylinder filled to `frac` of its shell height.
pub fn volume_from_fraction(diameter_m: f64, shell_height_m: f64, frac: f64) -> f64 {
    volume_from_fraction_with(diameter_m, shell_height_m, frac, BBL_PER_M3)
}

pub fn volume_from_fraction_with(
    diameter_m: f64,
    shell_height_m: f64,
    frac: f64,
    bbl_per_m3: f64,
) -> f64 {
    let r = diameter_m / 2.0;
    PI * r * r * shell_height_m * frac * bbl_per_m3
}

/// Calibrated output for one tank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeEstimate {
    pub tank_id: String,
    pub index_value: f64,
    pub height_fraction: f64,
    pub volume_bbl: f64,
}

pub fn calibrate(
    tank_id: impl Into<String>,
    features: &FeatureSet,
    index: FeatureKind,
    bounds: CalibrationBounds,
    diameter_m: f64,
    shell_height_m: f64,
) -> VolumeEstimate {
    let index_value = features.get(index);
    let height_fraction = bounds.fraction(index_value);
    VolumeEstimate {
        tank_id: tank_id.into(),
        index_value,
        height_fraction,
        volume_bbl: volume_from_fraction(diameter_m, shell_height_m, height_fraction),
    }
}

/// Calibrate a feature row using its own bounds.
pub fn calibrate_record(
    record: &FeatureRecord,
    index: FeatureKind,
    diameter_m: f64,
    shell_height_m: f64,
) -> VolumeEstimate {
    calibrate(
        record.tank_id.clone(),
        &record.features(),
        index,
        record.bounds(),
        diameter_m,
        shell_height_m,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_tank_volume_matches_cylinder() {
        let expected = PI * 50.0 * 50.0 * 18.0 * 6.28981;
        let volume = volume_from_fraction(100.0, 18.0, 1.0);
        assert!((volume - expected).abs() < 1e-6 * expected);
        assert_eq!(volume_from_fraction(100.0, 18.0, 0.0), 0.0);
    }

    #[test]
    fn collapsed_bounds_yield_neutral_fraction() {
        assert_eq!(height_fraction(3.0, 1.0, 1.0), 0.5);
        assert_eq!(height_fraction(3.0, 1.0, 1.0 + 1e-7), 0.5);
        assert_eq!(height_fraction(3.0, 2.0, 1.0), 0.5);
        assert!(CalibrationBounds::new(1.0, 1.0).is_degenerate());
    }

    #[test]
    fn fraction_is_clamped_and_monotonic() {
        let (lo, hi) = (1.15, 2.6);
        let mut previous = f64::NEG_INFINITY;
        for step in 0..=100 {
            let value = -1.0 + step as f64 * 0.05;
            let frac = height_fraction(value, lo, hi);
            assert!((0.0..=1.0).contains(&frac));
            assert!(frac >= previous);
            previous = frac;
        }
        assert_eq!(height_fraction(0.0, lo, hi), 0.0);
        assert_eq!(height_fraction(10.0, lo, hi), 1.0);
    }

    #[test]
    fn calibrate_uses_selected_index() {
        let features = FeatureSet {
            peak_to_mean: 2.0,
            concentration: 0.9,
            ..Default::default()
        };
        let estimate = calibrate(
            "t1",
            &features,
            FeatureKind::PeakToMean,
            CalibrationBounds::new(1.0, 3.0),
            100.0,
            18.0,
        );
        assert_eq!(estimate.index_value, 2.0);
        assert!((estimate.height_fraction - 0.5).abs() < 1e-12);
        let half = volume_from_fraction(100.0, 18.0, 0.5);
        assert!((estimate.volume_bbl - half).abs() < 1e-6);
    }
}
