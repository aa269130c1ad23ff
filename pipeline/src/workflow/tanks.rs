use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tank attributes carried in GeoJSON feature properties.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TankRecord {
    pub id: String,
    pub radius_m: f64,
    pub roof_type: String,
}

impl Default for TankRecord {
    fn default() -> Self {
        Self {
            id: "tank_unknown".into(),
            radius_m: 50.0,
            roof_type: "floating".into(),
        }
    }
}

impl TankRecord {
    pub fn diameter_m(&self) -> f64 {
        self.radius_m * 2.0
    }
}

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<GeoFeature>,
}

#[derive(Deserialize)]
struct GeoFeature {
    #[serde(default)]
    properties: Option<TankRecord>,
}

pub fn parse_tanks(geojson: &str) -> anyhow::Result<Vec<TankRecord>> {
    let collection: FeatureCollection =
        serde_json::from_str(geojson).context("parsing tank feature collection")?;
    Ok(collection
        .features
        .into_iter()
        .map(|feature| feature.properties.unwrap_or_default())
        .collect())
}

pub fn load_tanks<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<TankRecord>> {
    let path_ref = path.as_ref();
    let contents = fs::read_to_string(path_ref)
        .with_context(|| format!("reading tanks {}", path_ref.display()))?;
    parse_tanks(&contents).with_context(|| format!("in {}", path_ref.display()))
}
