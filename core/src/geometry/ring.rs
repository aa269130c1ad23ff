//! Annulus selection over a pixel grid.

use ndarray::Array2;

use crate::prelude::{FeatureError, FeatureResult};

/// Boolean mask of pixels whose centers lie inside the annulus around `(cx, cy)`.
///
/// Pixel `(x, y)` sits at column `x`, row `y`. Both boundaries are inclusive:
/// a pixel is selected iff `r_inner² <= (x-cx)² + (y-cy)² <= r_outer²`.
/// A ring lying entirely outside the grid yields an all-false mask.
pub fn ring_mask(
    height: usize,
    width: usize,
    cx: f64,
    cy: f64,
    r_inner_px: f64,
    r_outer_px: f64,
) -> FeatureResult<Array2<bool>> {
    if height == 0 || width == 0 {
        return Err(FeatureError::InvalidGeometry(format!(
            "grid must be non-empty, got {}x{}",
            height, width
        )));
    }
    if !cx.is_finite() || !cy.is_finite() {
        return Err(FeatureError::InvalidGeometry(format!(
            "non-finite ring center ({}, {})",
            cx, cy
        )));
    }
    if r_inner_px.is_nan() || r_inner_px < 0.0 || !r_outer_px.is_finite() {
        return Err(FeatureError::InvalidGeometry(format!(
            "ring radii must be finite and non-negative, got [{}, {}]",
            r_inner_px, r_outer_px
        )));
    }
    if r_outer_px < r_inner_px {
        return Err(FeatureError::InvalidGeometry(format!(
            "outer radius {} smaller than inner radius {}",
            r_outer_px, r_inner_px
        )));
    }

    let inner_sq = r_inner_px * r_inner_px;
    let outer_sq = r_outer_px * r_outer_px;
    Ok(Array2::from_shape_fn((height, width), |(y, x)| {
        let dist_sq = squared_distance(x, y, cx, cy);
        dist_sq >= inner_sq && dist_sq <= outer_sq
    }))
}

#[inline]
pub(crate) fn squared_distance(x: usize, y: usize, cx: f64, cy: f64) -> f64 {
    let dx = x as f64 - cx;
    let dy = y as f64 - cy;
    dx * dx + dy * dy
}
