use serde::{Deserialize, Serialize};

/// Guard added to every denominator that may approach zero on dark rings.
pub const EPSILON: f64 = 1e-6;

/// Annulus and binning parameters shared by every tank in a run.
///
/// Fractions are relative to the tank radius in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingSpec {
    pub inner_frac: f64,
    pub outer_frac: f64,
    pub azimuth_bins: usize,
}

impl Default for RingSpec {
    fn default() -> Self {
        Self {
            inner_frac: 0.7,
            outer_frac: 1.1,
            azimuth_bins: 360,
        }
    }
}

impl RingSpec {
    pub fn new(inner_frac: f64, outer_frac: f64, azimuth_bins: usize) -> FeatureResult<Self> {
        let spec = Self {
            inner_frac,
            outer_frac,
            azimuth_bins,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> FeatureResult<()> {
        if self.azimuth_bins == 0 {
            return Err(FeatureError::InvalidGeometry(
                "azimuth_bins must be positive".into(),
            ));
        }
        if !(self.inner_frac > 0.0 && self.inner_frac.is_finite()) {
            return Err(FeatureError::InvalidGeometry(format!(
                "inner fraction {} must be positive",
                self.inner_frac
            )));
        }
        if !self.outer_frac.is_finite() || self.outer_frac < self.inner_frac {
            return Err(FeatureError::InvalidGeometry(format!(
                "outer fraction {} smaller than inner fraction {}",
                self.outer_frac, self.inner_frac
            )));
        }
        Ok(())
    }

    /// Width of one azimuth bin in degrees.
    pub fn bin_width_deg(&self) -> f64 {
        360.0 / self.azimuth_bins.max(1) as f64
    }
}

/// Common error type for ring sampling and feature extraction.
///
/// Degenerate but well-formed inputs (empty rings, empty profiles,
/// collapsed calibration bounds) are not errors; they map to fallback values.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("unknown feature: {0}")]
    UnknownFeature(String),
}

pub type FeatureResult<T> = Result<T, FeatureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ring_spec_is_valid() {
        let spec = RingSpec::default();
        assert!(spec.validate().is_ok());
        assert_eq!(spec.bin_width_deg(), 1.0);
    }

    #[test]
    fn ring_spec_rejects_inverted_fractions() {
        let err = RingSpec::new(1.1, 0.7, 360).unwrap_err();
        assert!(matches!(err, FeatureError::InvalidGeometry(_)));
    }

    #[test]
    fn ring_spec_rejects_zero_bins() {
        assert!(RingSpec::new(0.7, 1.1, 0).is_err());
    }
}
