//! Azimuth binning of annulus pixels into a dense circular profile.
//!
//! Angles follow image conventions: 0° points along +x (increasing column) and
//! the row axis is flipped, so 90° points toward row 0 ("up" in the image).

use ndarray::{ArrayView2, Zip};
use serde::{Deserialize, Serialize};

use crate::geometry::{ring_mask, TankGeometry};
use crate::prelude::{FeatureError, FeatureResult, RingSpec};

/// Mean ring intensity per equal-width azimuth bin over `[0°, 360°)`.
///
/// Bins that received no pixels hold `0.0`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AzimuthProfile {
    values: Vec<f64>,
}

impl AzimuthProfile {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn zeros(bins: usize) -> Self {
        Self::new(vec![0.0; bins])
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Azimuth of pixel `(x, y)` seen from `(cx, cy)`, in `[0, 360)` degrees.
#[inline]
pub fn azimuth_deg(x: f64, y: f64, cx: f64, cy: f64) -> f64 {
    let deg = (-(y - cy)).atan2(x - cx).to_degrees();
    (deg + 360.0) % 360.0
}

#[inline]
fn azimuth_bin(theta_deg: f64, bins: usize) -> usize {
    let index = (theta_deg * bins as f64 / 360.0).floor() as usize;
    index.min(bins - 1)
}

/// Bin the intensities of ring pixels by azimuth.
///
/// The ring spans `[r_px * r_in_frac, r_px * r_out_frac]` (inclusive). A ring
/// that selects no pixels is not an error: the result is an all-zero profile of
/// length `azimuth_bins`.
pub fn azimuth_profile(
    image: ArrayView2<f32>,
    cx: f64,
    cy: f64,
    r_px: f64,
    r_in_frac: f64,
    r_out_frac: f64,
    azimuth_bins: usize,
) -> FeatureResult<AzimuthProfile> {
    RingSpec::new(r_in_frac, r_out_frac, azimuth_bins)?;
    if !(r_px > 0.0 && r_px.is_finite()) {
        return Err(FeatureError::InvalidGeometry(format!(
            "tank radius {} px must be positive",
            r_px
        )));
    }

    let (height, width) = image.dim();
    let mask = ring_mask(height, width, cx, cy, r_px * r_in_frac, r_px * r_out_frac)?;

    let mut sums = vec![0.0f64; azimuth_bins];
    let mut counts = vec![0usize; azimuth_bins];
    Zip::indexed(&image)
        .and(&mask)
        .for_each(|(y, x), &value, &selected| {
            if selected {
                let bin = azimuth_bin(azimuth_deg(x as f64, y as f64, cx, cy), azimuth_bins);
                sums[bin] += f64::from(value);
                counts[bin] += 1;
            }
        });

    if counts.iter().all(|&c| c == 0) {
        return Ok(AzimuthProfile::zeros(azimuth_bins));
    }

    let values = sums
        .iter()
        .zip(&counts)
        .map(|(&sum, &count)| {
            if count > 0 {
                sum / count as f64
            } else {
                0.0
            }
        })
        .collect();
    Ok(AzimuthProfile::new(values))
}

/// [`azimuth_profile`] driven by a tank record and a shared ring spec.
pub fn tank_profile(
    image: ArrayView2<f32>,
    tank: &TankGeometry,
    spec: &RingSpec,
) -> FeatureResult<AzimuthProfile> {
    tank.validate()?;
    azimuth_profile(
        image,
        tank.cx,
        tank.cy,
        tank.r_px,
        spec.inner_frac,
        spec.outer_frac,
        spec.azimuth_bins,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn azimuth_convention_is_clockwise_in_image_coordinates() {
        assert_eq!(azimuth_deg(6.0, 5.0, 5.0, 5.0), 0.0);
        assert!((azimuth_deg(5.0, 4.0, 5.0, 5.0) - 90.0).abs() < 1e-12);
        assert!((azimuth_deg(4.0, 5.0, 5.0, 5.0) - 180.0).abs() < 1e-12);
        assert!((azimuth_deg(5.0, 6.0, 5.0, 5.0) - 270.0).abs() < 1e-12);
    }

    #[test]
    fn bright_upper_half_lands_in_low_bins() {
        let mut image = Array2::<f32>::zeros((41, 41));
        for ((y, _), value) in image.indexed_iter_mut() {
            if y < 20 {
                *value = 1.0;
            }
        }
        let profile = azimuth_profile(image.view(), 20.0, 20.0, 10.0, 0.8, 1.2, 4).unwrap();
        let values = profile.values();
        assert_eq!(values.len(), 4);
        // bins 0 and 1 cover 0°..180°, the half toward row 0
        assert!(values[0] > 0.4 && values[1] > 0.4);
        assert_eq!(values[2], 0.0);
        assert_eq!(values[3], 0.0);
    }

    #[test]
    fn profile_is_deterministic() {
        let image = Array2::from_shape_fn((64, 64), |(y, x)| ((x * 7 + y * 13) % 17) as f32 / 17.0);
        let a = azimuth_profile(image.view(), 31.5, 30.2, 20.0, 0.7, 1.1, 90).unwrap();
        let b = azimuth_profile(image.view(), 31.5, 30.2, 20.0, 0.7, 1.1, 90).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_ring_yields_zero_profile() {
        let image = Array2::<f32>::from_elem((20, 20), 3.0);
        let profile = azimuth_profile(image.view(), 500.0, 500.0, 10.0, 0.7, 1.1, 36).unwrap();
        assert_eq!(profile.len(), 36);
        assert!(profile.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn uncovered_bins_are_zero_not_nan() {
        // a 1-pixel-wide ring cannot fill 3600 bins
        let image = Array2::<f32>::from_elem((21, 21), 1.0);
        let profile = azimuth_profile(image.view(), 10.0, 10.0, 5.0, 1.0, 1.0, 3600).unwrap();
        assert!(profile.values().iter().all(|v| v.is_finite()));
        assert!(profile.values().iter().any(|&v| v == 0.0));
        assert!(profile.values().iter().any(|&v| v == 1.0));
    }

    #[test]
    fn malformed_ring_is_invalid_geometry() {
        let image = Array2::<f32>::zeros((10, 10));
        assert!(azimuth_profile(image.view(), 5.0, 5.0, 4.0, 1.1, 0.7, 360).is_err());
        assert!(azimuth_profile(image.view(), 5.0, 5.0, 4.0, 0.7, 1.1, 0).is_err());
        assert!(azimuth_profile(image.view(), 5.0, 5.0, 0.0, 0.7, 1.1, 360).is_err());
    }
}
