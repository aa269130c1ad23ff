use anyhow::Context;
use clap::{Parser, Subcommand};
use generator::scene::SceneConfig;
use generator::week::SYNTHETIC_SEED;
use std::path::PathBuf;
use tankcore::FeatureKind;
use workflow::config::PipelineConfig;
use workflow::runner::{AggregateOptions, Runner};

mod generator;
mod workflow;

const DEFAULT_CONFIG: &str = "config/default.yaml";

#[derive(Parser)]
#[command(author, version, about = "Tank fill-level feature pipeline")]
struct Args {
    /// Pipeline config in YAML; built-in defaults when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load and print the pipeline config
    ValidateConfig,
    /// Synthesize a tank crop with a bright arc and print its features
    DemoArc {
        #[arg(long, default_value_t = 50)]
        radius_px: usize,
        #[arg(long, default_value_t = 45.0)]
        peak_angle_deg: f64,
        #[arg(long, default_value_t = 0.1)]
        noise: f32,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Write deterministic per-tank feature rows for one week
    SyntheticWeek {
        /// Tanks GeoJSON (properties: id, radius_m, roof_type)
        #[arg(long)]
        tanks: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Week label, e.g. 2025-01-03
        #[arg(long)]
        week: String,
        #[arg(long, default_value_t = SYNTHETIC_SEED)]
        seed: u64,
    },
    /// Calibrate feature rows into volumes and write the site total
    Aggregate {
        #[arg(long)]
        features: PathBuf,
        #[arg(long)]
        tanks: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        shell_height: Option<f64>,
        /// Feature column used as the fill index
        #[arg(long)]
        index: Option<FeatureKind>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match (&args.config, &args.command) {
        (Some(path), _) => PipelineConfig::load(path)?,
        (None, Command::ValidateConfig) => PipelineConfig::load(DEFAULT_CONFIG)?,
        (None, _) => PipelineConfig::default(),
    };

    if let Command::ValidateConfig = args.command {
        let rendered =
            serde_json::to_string_pretty(&config).context("rendering loaded config")?;
        println!("Loaded config: {}", rendered);
        return Ok(());
    }

    let runner = Runner::new(config);
    match args.command {
        Command::ValidateConfig => {}
        Command::DemoArc {
            radius_px,
            peak_angle_deg,
            noise,
            seed,
        } => {
            let scene = SceneConfig {
                radius_px,
                peak_angle_deg,
                noise,
                seed,
                ..Default::default()
            };
            let result = runner.run_scene(&scene)?;
            let rendered = serde_json::to_string_pretty(&result.features.to_map())
                .context("rendering arc features")?;
            println!("Arc features: {}", rendered);
        }
        Command::SyntheticWeek {
            tanks,
            out,
            week,
            seed,
        } => {
            let rows = runner.synthetic_week(&tanks, &out, &week, seed)?;
            println!("Wrote {} rows to {}", rows.len(), out.display());
        }
        Command::Aggregate {
            features,
            tanks,
            out,
            shell_height,
            index,
        } => {
            let options = AggregateOptions {
                shell_height_m: shell_height,
                index,
            };
            let site = runner.aggregate(&features, &tanks, &out, &options)?;
            println!(
                "week={} total_volume_bbl={:.0} num_tanks={}",
                site.week, site.total_volume_bbl, site.num_tanks
            );
        }
    }

    Ok(())
}
