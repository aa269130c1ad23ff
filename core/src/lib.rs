//! Azimuthal ring features for floating-roof storage tanks.
//!
//! An annulus around each tank rim is sampled from a raster, binned by azimuth
//! and summarized into scalar features whose strength tracks roof tilt, a proxy
//! for fill level. Calibration maps a chosen feature to a height fraction and a
//! volume in barrels.

pub mod aggregate;
pub mod calibration;
pub mod features;
pub mod geometry;
pub mod interface;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use features::{arc_features, azimuth_profile, FeatureKind, FeatureSet};
pub use geometry::{ring_mask, TankGeometry};
pub use prelude::{FeatureError, FeatureResult, RingSpec};
pub use processing::{extract_batch, ArcFeatureStage, TankFeatures};
