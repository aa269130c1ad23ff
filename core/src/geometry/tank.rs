use serde::{Deserialize, Serialize};

use crate::prelude::{FeatureError, FeatureResult, RingSpec};

/// Pixel-space footprint of one tank plus the physical shell used for volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TankGeometry {
    pub cx: f64,
    pub cy: f64,
    pub r_px: f64,
    pub diameter_m: f64,
    pub shell_height_m: f64,
}

impl TankGeometry {
    pub fn new(cx: f64, cy: f64, r_px: f64, diameter_m: f64, shell_height_m: f64) -> Self {
        Self {
            cx,
            cy,
            r_px,
            diameter_m,
            shell_height_m,
        }
    }

    /// Geometry for pixel-only work, without physical attributes.
    pub fn in_pixels(cx: f64, cy: f64, r_px: f64) -> Self {
        Self::new(cx, cy, r_px, 0.0, 0.0)
    }

    pub fn validate(&self) -> FeatureResult<()> {
        if !self.cx.is_finite() || !self.cy.is_finite() {
            return Err(FeatureError::InvalidGeometry(format!(
                "non-finite tank center ({}, {})",
                self.cx, self.cy
            )));
        }
        if !(self.r_px > 0.0 && self.r_px.is_finite()) {
            return Err(FeatureError::InvalidGeometry(format!(
                "tank radius {} px must be positive",
                self.r_px
            )));
        }
        Ok(())
    }

    /// Inner and outer ring radii in pixels for the given spec.
    pub fn ring_radii(&self, spec: &RingSpec) -> (f64, f64) {
        (self.r_px * spec.inner_frac, self.r_px * spec.outer_frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_radii_scale_with_pixel_radius() {
        let tank = TankGeometry::in_pixels(50.0, 50.0, 40.0);
        let (inner, outer) = tank.ring_radii(&RingSpec::default());
        assert!((inner - 28.0).abs() < 1e-12);
        assert!((outer - 44.0).abs() < 1e-12);
    }

    #[test]
    fn zero_radius_is_rejected() {
        assert!(TankGeometry::in_pixels(1.0, 1.0, 0.0).validate().is_err());
    }
}
