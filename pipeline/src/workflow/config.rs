use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tankcore::prelude::RingSpec;
use tankcore::FeatureKind;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub areas: BTreeMap<String, AreaConfig>,
    pub features: FeatureConfig,
    pub calibration: CalibrationConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AreaConfig {
    pub aoi_geojson: PathBuf,
    pub tanks_geojson: PathBuf,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    pub sar_arc: ArcConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcConfig {
    pub annulus_inner_frac: f64,
    pub annulus_outer_frac: f64,
    pub azimuth_bins: usize,
}

impl Default for ArcConfig {
    fn default() -> Self {
        let spec = RingSpec::default();
        Self {
            annulus_inner_frac: spec.inner_frac,
            annulus_outer_frac: spec.outer_frac,
            azimuth_bins: spec.azimuth_bins,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Feature column mapped to height fraction.
    pub index: FeatureKind,
    pub shell_height_m: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            index: FeatureKind::PeakToMean,
            shell_height_m: 18.0,
        }
    }
}

impl PipelineConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading pipeline config {}", path_ref.display()))?;
        let config: PipelineConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing pipeline config {}", path_ref.display()))?;
        config.to_ring_spec()?;
        Ok(config)
    }

    pub fn to_ring_spec(&self) -> anyhow::Result<RingSpec> {
        let arc = &self.features.sar_arc;
        let spec = RingSpec::new(
            arc.annulus_inner_frac,
            arc.annulus_outer_frac,
            arc.azimuth_bins,
        )
        .context("features.sar_arc")?;
        Ok(spec)
    }
}
