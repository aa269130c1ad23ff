//! Scalar summaries of a circular azimuth profile.
//!
//! A tilted floating roof shows up as a bright arc on one side of the rim; the
//! features below measure how strong, wide and concentrated that arc is.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::math::{FftHelper, StatsHelper};
use crate::prelude::{FeatureError, EPSILON};

/// Named scalar features extracted from one profile.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureSet {
    pub peak: f64,
    pub mean: f64,
    pub std: f64,
    pub peak_to_mean: f64,
    pub arc_width_deg: f64,
    pub concentration: f64,
    /// First-harmonic magnitude relative to the profile total.
    pub asymmetry: f64,
    /// Circular mean azimuth of the profile, in degrees.
    pub arc_direction_deg: f64,
}

/// Column names used to select a feature for calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Peak,
    Mean,
    Std,
    PeakToMean,
    ArcWidthDeg,
    Concentration,
    Asymmetry,
    ArcDirectionDeg,
}

impl FeatureKind {
    pub const ALL: [FeatureKind; 8] = [
        FeatureKind::Peak,
        FeatureKind::Mean,
        FeatureKind::Std,
        FeatureKind::PeakToMean,
        FeatureKind::ArcWidthDeg,
        FeatureKind::Concentration,
        FeatureKind::Asymmetry,
        FeatureKind::ArcDirectionDeg,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::Peak => "peak",
            FeatureKind::Mean => "mean",
            FeatureKind::Std => "std",
            FeatureKind::PeakToMean => "peak_to_mean",
            FeatureKind::ArcWidthDeg => "arc_width_deg",
            FeatureKind::Concentration => "concentration",
            FeatureKind::Asymmetry => "asymmetry",
            FeatureKind::ArcDirectionDeg => "arc_direction_deg",
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureKind {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| FeatureError::UnknownFeature(s.to_string()))
    }
}

impl FeatureSet {
    pub fn get(&self, kind: FeatureKind) -> f64 {
        match kind {
            FeatureKind::Peak => self.peak,
            FeatureKind::Mean => self.mean,
            FeatureKind::Std => self.std,
            FeatureKind::PeakToMean => self.peak_to_mean,
            FeatureKind::ArcWidthDeg => self.arc_width_deg,
            FeatureKind::Concentration => self.concentration,
            FeatureKind::Asymmetry => self.asymmetry,
            FeatureKind::ArcDirectionDeg => self.arc_direction_deg,
        }
    }

    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        FeatureKind::ALL
            .iter()
            .map(|&kind| (kind.as_str(), self.get(kind)))
            .collect()
    }
}

/// Extract the feature set of a circular profile.
///
/// An empty profile yields all-zero features. Every ratio is guarded with
/// [`EPSILON`], so dark rings never produce NaN.
pub fn arc_features(profile: &[f64]) -> FeatureSet {
    if profile.is_empty() {
        return FeatureSet::default();
    }
    let n = profile.len();

    let peak = StatsHelper::max(profile);
    let mean = StatsHelper::mean(profile);
    let std = StatsHelper::std(profile);
    let peak_to_mean = peak / (mean + EPSILON);

    let threshold = mean + std;
    let hot: Vec<bool> = profile.iter().map(|&v| v > threshold).collect();
    let arc_width_deg = 360.0 * longest_circular_run(&hot) as f64 / n as f64;

    // top quartile, at least one bin
    let k = (n / 4).max(1);
    let total: f64 = profile.iter().sum();
    let concentration = StatsHelper::top_k_sum(profile, k) / (total + EPSILON);

    let (asymmetry, arc_direction_deg) = first_harmonic(profile);

    FeatureSet {
        peak,
        mean,
        std,
        peak_to_mean,
        arc_width_deg,
        concentration,
        asymmetry,
        arc_direction_deg,
    }
}

/// Longest run of `true` on a circle, so a run may wrap from the last element
/// to the first. Scans the doubled sequence; the result never exceeds `flags.len()`.
pub fn longest_circular_run(flags: &[bool]) -> usize {
    let mut best = 0;
    let mut run = 0;
    for &hot in flags.iter().chain(flags.iter()) {
        if hot {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }
    best.min(flags.len())
}

/// `(asymmetry, direction_deg)` from the DC and first DFT bins.
///
/// Bin `i` is centered at `(i + 0.5)` bin widths, so the phase of the first
/// harmonic is shifted by half a bin before converting to an azimuth.
fn first_harmonic(profile: &[f64]) -> (f64, f64) {
    let n = profile.len();
    if n < 2 {
        return (0.0, 0.0);
    }
    let spectrum = FftHelper::new(n).forward(profile);
    let dc = spectrum[0].norm();
    let first = spectrum[1];
    let asymmetry = first.norm() / (dc + EPSILON);
    if first.norm() <= EPSILON {
        return (asymmetry, 0.0);
    }
    let half_bin = PI / n as f64;
    let direction = (half_bin - first.arg()).to_degrees().rem_euclid(360.0);
    (asymmetry, if direction >= 360.0 { 0.0 } else { direction })
}
