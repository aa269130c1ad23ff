pub mod batch;
pub mod stage;

pub use batch::extract_batch;
pub use stage::{ArcFeatureStage, TankFeatures};
