use rand::{rngs::StdRng, Rng, SeedableRng};
use tankcore::calibration::CalibrationBounds;
use tankcore::interface::FeatureRecord;

use crate::workflow::tanks::TankRecord;

pub const SYNTHETIC_SEED: u64 = 42;

/// Reference `peak_to_mean` bounds for an empty and a full tank.
pub const SYNTHETIC_BOUNDS: CalibrationBounds = CalibrationBounds { lo: 1.15, hi: 2.60 };

/// Plausible feature rows for one week, driven by a hidden fill fraction per tank.
///
/// Lets the aggregation path run end to end without imagery.
pub fn generate_week(tanks: &[TankRecord], week: &str, seed: u64) -> Vec<FeatureRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let CalibrationBounds { lo, hi } = SYNTHETIC_BOUNDS;

    tanks
        .iter()
        .map(|tank| {
            let frac: f64 = rng.gen_range(0.1..0.9);
            let index = lo + frac * (hi - lo);

            let peak = index * 0.6 + rng.gen_range(0.0..0.2);
            let mean = peak / index;
            let std = mean * rng.gen_range(0.05..0.25);
            // lower roofs cast a wider bright arc
            let arc_width_deg = 20.0 + (1.0 - frac) * 80.0 + rng.gen_range(-5.0..5.0);
            let concentration =
                0.25 + (0.5 - (frac - 0.5).abs()) * 0.3 + rng.gen_range(-0.03..0.03);
            let asymmetry = ((index - 1.0) / index * 0.5).clamp(0.0, 1.0);
            let arc_direction_deg = rng.gen_range(0.0..360.0);

            FeatureRecord {
                tank_id: tank.id.clone(),
                week: week.to_string(),
                radius_m: tank.radius_m,
                roof_type: tank.roof_type.clone(),
                peak,
                mean,
                std,
                peak_to_mean: index,
                arc_width_deg,
                concentration,
                asymmetry,
                arc_direction_deg,
                lo,
                hi,
            }
        })
        .collect()
}
