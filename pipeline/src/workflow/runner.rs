use crate::generator::scene::{build_scene, SceneConfig};
use crate::generator::week::generate_week;
use crate::workflow::config::PipelineConfig;
use crate::workflow::table::{read_rows, write_rows};
use crate::workflow::tanks::{load_tanks, TankRecord};
use anyhow::Context;
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;
use tankcore::aggregate::site_aggregate;
use tankcore::calibration::{calibrate_record, VolumeEstimate};
use tankcore::interface::{FeatureRecord, SiteAggregate};
use tankcore::{ArcFeatureStage, FeatureKind, TankFeatures};

/// Overrides for one aggregation run; `None` falls back to the config.
#[derive(Debug, Clone, Default)]
pub struct AggregateOptions {
    pub shell_height_m: Option<f64>,
    pub index: Option<FeatureKind>,
}

#[derive(Clone)]
pub struct Runner {
    config: PipelineConfig,
}

impl Runner {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Extract features from a synthetic tank crop with the configured ring.
    pub fn run_scene(&self, scene: &SceneConfig) -> anyhow::Result<TankFeatures> {
        let spec = self.config.to_ring_spec()?;
        let stage = ArcFeatureStage::new(spec).context("initializing arc feature stage")?;
        let (image, tank) = build_scene(scene);
        let result = stage
            .execute(image.view(), &tank)
            .context("executing arc feature stage")?;
        info!(
            "scene r={}px peak {:.1}deg -> peak_to_mean {:.3}, arc {:.1}deg",
            scene.radius_px,
            scene.peak_angle_deg,
            result.features.peak_to_mean,
            result.features.arc_width_deg
        );
        Ok(result)
    }

    pub fn synthetic_week(
        &self,
        tanks_geojson: &Path,
        out_csv: &Path,
        week: &str,
        seed: u64,
    ) -> anyhow::Result<Vec<FeatureRecord>> {
        let tanks = load_tanks(tanks_geojson)?;
        let rows = generate_week(&tanks, week, seed);
        write_rows(out_csv, &rows)
            .with_context(|| format!("writing synthetic features {}", out_csv.display()))?;
        info!("wrote {} synthetic rows for week {}", rows.len(), week);
        Ok(rows)
    }

    /// Calibrate feature rows into volumes and write the site total as one CSV row.
    pub fn aggregate(
        &self,
        features_csv: &Path,
        tanks_geojson: &Path,
        out_csv: &Path,
        options: &AggregateOptions,
    ) -> anyhow::Result<SiteAggregate> {
        let rows: Vec<FeatureRecord> = read_rows(features_csv)
            .with_context(|| format!("reading features {}", features_csv.display()))?;
        let tanks = load_tanks(tanks_geojson)?;
        let estimates = self.calibrate_rows(&rows, &tanks, options);

        let week = rows.first().map(|row| row.week.as_str());
        let site = site_aggregate(week, &estimates);
        write_rows(out_csv, std::slice::from_ref(&site))
            .with_context(|| format!("writing site aggregate {}", out_csv.display()))?;
        info!(
            "week {}: {} tanks, {:.0} bbl",
            site.week, site.num_tanks, site.total_volume_bbl
        );
        Ok(site)
    }

    /// Tank size comes from the GeoJSON when the tank is known there, else from the row radius.
    pub fn calibrate_rows(
        &self,
        rows: &[FeatureRecord],
        tanks: &[TankRecord],
        options: &AggregateOptions,
    ) -> Vec<VolumeEstimate> {
        let index = options.index.unwrap_or(self.config.calibration.index);
        let shell_height_m = options
            .shell_height_m
            .unwrap_or(self.config.calibration.shell_height_m);
        let diameters: HashMap<&str, f64> = tanks
            .iter()
            .map(|tank| (tank.id.as_str(), tank.diameter_m()))
            .collect();

        rows.iter()
            .map(|row| {
                let diameter_m = match diameters.get(row.tank_id.as_str()) {
                    Some(&diameter) => diameter,
                    None => {
                        warn!("tank {} missing from geometry, using row radius", row.tank_id);
                        row.radius_m * 2.0
                    }
                };
                if row.bounds().is_degenerate() {
                    warn!("tank {} has collapsed calibration bounds", row.tank_id);
                }
                calibrate_record(row, index, diameter_m, shell_height_m)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::week::SYNTHETIC_SEED;
    use std::fs;
    use tankcore::calibration::volume_from_fraction;
    use tempfile::tempdir;

    const TANKS: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "geometry": null, "properties": {"id": "A", "radius_m": 30.0}},
        {"type": "Feature", "geometry": null, "properties": {"id": "B", "radius_m": 45.0}}
    ]}"#;

    #[test]
    fn runner_extracts_demo_arc() {
        let runner = Runner::new(PipelineConfig::default());
        let result = runner.run_scene(&SceneConfig::default()).unwrap();
        assert!(result.features.peak_to_mean > 1.0);
        assert!(result.features.arc_width_deg > 10.0);
        assert_eq!(result.profile.len(), 360);
    }

    #[test]
    fn synthetic_week_then_aggregate_round_trips_through_csv() {
        let dir = tempdir().unwrap();
        let tanks_path = dir.path().join("tanks.geojson");
        fs::write(&tanks_path, TANKS).unwrap();
        let features_path = dir.path().join("features/2025-01-03.csv");
        let out_path = dir.path().join("outputs/2025-01-03/site_aggregate.csv");

        let runner = Runner::new(PipelineConfig::default());
        let rows = runner
            .synthetic_week(&tanks_path, &features_path, "2025-01-03", SYNTHETIC_SEED)
            .unwrap();
        let site = runner
            .aggregate(&features_path, &tanks_path, &out_path, &AggregateOptions::default())
            .unwrap();

        assert_eq!(site.week, "2025-01-03");
        assert_eq!(site.num_tanks, 2);
        let expected: f64 = rows
            .iter()
            .map(|row| {
                let radius = if row.tank_id == "A" { 30.0 } else { 45.0 };
                let frac = row.bounds().fraction(row.peak_to_mean);
                volume_from_fraction(radius * 2.0, 18.0, frac)
            })
            .sum();
        assert!((site.total_volume_bbl - expected).abs() < 1e-6 * expected);

        let written: Vec<SiteAggregate> = read_rows(&out_path).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].num_tanks, 2);
    }

    #[test]
    fn unknown_tank_uses_row_radius_and_index_override() {
        let runner = Runner::new(PipelineConfig::default());
        let row = FeatureRecord {
            tank_id: "Z".into(),
            week: "w".into(),
            radius_m: 10.0,
            roof_type: "floating".into(),
            peak: 0.0,
            mean: 0.0,
            std: 0.0,
            peak_to_mean: 0.0,
            arc_width_deg: 0.0,
            concentration: 0.75,
            asymmetry: 0.0,
            arc_direction_deg: 0.0,
            lo: 0.5,
            hi: 1.0,
        };
        let options = AggregateOptions {
            shell_height_m: Some(10.0),
            index: Some(FeatureKind::Concentration),
        };
        let estimates = runner.calibrate_rows(&[row], &[], &options);
        assert!((estimates[0].height_fraction - 0.5).abs() < 1e-12);
        let expected = volume_from_fraction(20.0, 10.0, 0.5);
        assert!((estimates[0].volume_bbl - expected).abs() < 1e-9);
    }
}
