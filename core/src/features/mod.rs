pub mod arc;
pub mod azimuth;

pub use arc::{arc_features, longest_circular_run, FeatureKind, FeatureSet};
pub use azimuth::{azimuth_deg, azimuth_profile, tank_profile, AzimuthProfile};
