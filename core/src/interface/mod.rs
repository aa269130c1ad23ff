pub mod record;

pub use record::{FeatureRecord, SiteAggregate};
