use ndarray::ArrayView2;
use serde::Serialize;

use crate::features::{arc_features, tank_profile, AzimuthProfile, FeatureSet};
use crate::geometry::TankGeometry;
use crate::prelude::{FeatureResult, RingSpec};
use crate::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};

/// Profile and features extracted for one tank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TankFeatures {
    pub profile: AzimuthProfile,
    pub features: FeatureSet,
    /// The profile is all zero (empty or completely dark ring); features are the zero fallback.
    pub no_signal: bool,
}

/// Ring → profile → features for every tank sharing one ring spec.
///
/// Holds no per-tank state, so one stage can serve many threads.
pub struct ArcFeatureStage {
    spec: RingSpec,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl ArcFeatureStage {
    pub fn new(spec: RingSpec) -> FeatureResult<Self> {
        spec.validate()?;
        Ok(Self {
            spec,
            logger: LogManager::new("ArcFeatureStage"),
            metrics: MetricsRecorder::new(),
        })
    }

    pub fn spec(&self) -> &RingSpec {
        &self.spec
    }

    pub fn execute(
        &self,
        image: ArrayView2<f32>,
        tank: &TankGeometry,
    ) -> FeatureResult<TankFeatures> {
        let profile = match tank_profile(image, tank, &self.spec) {
            Ok(profile) => profile,
            Err(err) => {
                self.metrics.record_invalid_geometry();
                self.logger
                    .degenerate(&format!("tank at ({:.1}, {:.1}) rejected: {}", tank.cx, tank.cy, err));
                return Err(err);
            }
        };

        let no_signal = profile.values().iter().all(|&v| v == 0.0);
        let features = arc_features(profile.values());
        self.metrics.record_processed();
        if no_signal {
            self.metrics.record_no_signal();
            self.logger.degenerate(&format!(
                "no ring signal for tank at ({:.1}, {:.1}) r={:.1}px",
                tank.cx, tank.cy, tank.r_px
            ));
        } else {
            self.logger.detail(&format!(
                "tank at ({:.1}, {:.1}) peak_to_mean {:.3} arc {:.1}deg",
                tank.cx, tank.cy, features.peak_to_mean, features.arc_width_deg
            ));
        }

        Ok(TankFeatures {
            profile,
            features,
            no_signal,
        })
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
