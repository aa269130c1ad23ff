use ndarray::ArrayView2;
use rayon::prelude::*;

use crate::geometry::TankGeometry;
use crate::prelude::FeatureResult;
use crate::processing::stage::{ArcFeatureStage, TankFeatures};
use crate::telemetry::LogManager;

/// Extract features for every tank in one image in parallel.
///
/// Results keep the order of `tanks`; a malformed tank yields its own error
/// without affecting the others.
pub fn extract_batch(
    stage: &ArcFeatureStage,
    image: ArrayView2<f32>,
    tanks: &[TankGeometry],
) -> Vec<FeatureResult<TankFeatures>> {
    let results: Vec<_> = tanks
        .par_iter()
        .map(|tank| stage.execute(image, tank))
        .collect();

    let metrics = stage.metrics();
    LogManager::new("extract_batch").record(&format!(
        "batch of {} tanks: processed {}, no signal {}, invalid {}",
        tanks.len(),
        metrics.processed,
        metrics.no_signal,
        metrics.invalid_geometry
    ));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::RingSpec;
    use ndarray::Array2;

    #[test]
    fn batch_matches_sequential_and_keeps_order() {
        let image = Array2::from_shape_fn((80, 120), |(y, x)| ((x * 31 + y * 17) % 23) as f32 / 23.0);
        let tanks = vec![
            TankGeometry::in_pixels(30.0, 40.0, 15.0),
            TankGeometry::in_pixels(90.0, 40.0, 12.5),
            TankGeometry::in_pixels(60.0, 20.0, 0.0),
            TankGeometry::in_pixels(1000.0, 1000.0, 5.0),
        ];
        let stage = ArcFeatureStage::new(RingSpec::new(0.7, 1.1, 72).unwrap()).unwrap();

        let batch = extract_batch(&stage, image.view(), &tanks);
        assert_eq!(batch.len(), tanks.len());

        let sequential = ArcFeatureStage::new(*stage.spec()).unwrap();
        for (tank, result) in tanks.iter().zip(&batch) {
            match (sequential.execute(image.view(), tank), result) {
                (Ok(expected), Ok(actual)) => assert_eq!(&expected, actual),
                (Err(expected), Err(actual)) => assert_eq!(&expected, actual),
                _ => panic!("batch and sequential disagree for {:?}", tank),
            }
        }

        let metrics = stage.metrics();
        assert_eq!(metrics.processed, 3);
        assert_eq!(metrics.no_signal, 1);
        assert_eq!(metrics.invalid_geometry, 1);
    }
}
