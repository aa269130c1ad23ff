use ndarray::Array2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tankcore::features::azimuth_deg;
use tankcore::TankGeometry;

/// Synthetic tank crop: a noisy disk with a bright arc near the rim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub radius_px: usize,
    pub peak_angle_deg: f64,
    pub arc_half_width_deg: f64,
    pub background: f32,
    pub arc_boost: f32,
    pub noise: f32,
    pub seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            radius_px: 50,
            peak_angle_deg: 45.0,
            arc_half_width_deg: 25.0,
            background: 0.5,
            arc_boost: 0.5,
            noise: 0.1,
            seed: 0,
        }
    }
}

impl SceneConfig {
    fn normalized_radius(&self) -> usize {
        self.radius_px.max(1)
    }
}

/// Build the raster and the tank it contains. Outside the disk the image is 0;
/// the arc adds `arc_boost` over the `0.8r..1.05r` band within `arc_half_width_deg`
/// of the peak angle, including the part of the band past the rim.
pub fn build_scene(config: &SceneConfig) -> (Array2<f32>, TankGeometry) {
    let radius = config.normalized_radius();
    let size = 2 * radius + 20;
    let center = (size / 2) as f64;
    let r = radius as f64;
    let r_in = (r * 0.8).floor();
    let r_out = (r * 1.05).floor();

    let mut rng = StdRng::seed_from_u64(config.seed);
    let image = Array2::from_shape_fn((size, size), |(y, x)| {
        let (xf, yf) = (x as f64, y as f64);
        let d2 = (xf - center).powi(2) + (yf - center).powi(2);
        let mut value = if d2 <= r * r {
            let jitter = if config.noise > 0.0 {
                rng.gen_range(-config.noise..config.noise)
            } else {
                0.0
            };
            config.background + jitter
        } else {
            0.0
        };
        let theta = azimuth_deg(xf, yf, center, center);
        let offset = ((theta - config.peak_angle_deg + 180.0).rem_euclid(360.0) - 180.0).abs();
        if d2 >= r_in * r_in && d2 <= r_out * r_out && offset < config.arc_half_width_deg {
            value += config.arc_boost;
        }
        value
    });

    (image, TankGeometry::in_pixels(center, center, r))
}
