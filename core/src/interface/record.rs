use serde::{Deserialize, Serialize};

use crate::calibration::CalibrationBounds;
use crate::features::FeatureSet;

fn default_roof_type() -> String {
    "floating".to_string()
}

/// One tank's features for one week, flattened for CSV exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub tank_id: String,
    pub week: String,
    pub radius_m: f64,
    #[serde(default = "default_roof_type")]
    pub roof_type: String,
    pub peak: f64,
    pub mean: f64,
    pub std: f64,
    pub peak_to_mean: f64,
    pub arc_width_deg: f64,
    pub concentration: f64,
    #[serde(default)]
    pub asymmetry: f64,
    #[serde(default)]
    pub arc_direction_deg: f64,
    pub lo: f64,
    pub hi: f64,
}

impl FeatureRecord {
    pub fn from_features(
        tank_id: impl Into<String>,
        week: impl Into<String>,
        radius_m: f64,
        features: &FeatureSet,
        bounds: CalibrationBounds,
    ) -> Self {
        Self {
            tank_id: tank_id.into(),
            week: week.into(),
            radius_m,
            roof_type: default_roof_type(),
            peak: features.peak,
            mean: features.mean,
            std: features.std,
            peak_to_mean: features.peak_to_mean,
            arc_width_deg: features.arc_width_deg,
            concentration: features.concentration,
            asymmetry: features.asymmetry,
            arc_direction_deg: features.arc_direction_deg,
            lo: bounds.lo,
            hi: bounds.hi,
        }
    }

    pub fn features(&self) -> FeatureSet {
        FeatureSet {
            peak: self.peak,
            mean: self.mean,
            std: self.std,
            peak_to_mean: self.peak_to_mean,
            arc_width_deg: self.arc_width_deg,
            concentration: self.concentration,
            asymmetry: self.asymmetry,
            arc_direction_deg: self.arc_direction_deg,
        }
    }

    pub fn bounds(&self) -> CalibrationBounds {
        CalibrationBounds::new(self.lo, self.hi)
    }
}

/// Site-level total for one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteAggregate {
    pub week: String,
    pub total_volume_bbl: f64,
    pub num_tanks: usize,
}
