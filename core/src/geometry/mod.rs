pub mod ring;
pub mod tank;

pub use ring::ring_mask;
pub use tank::TankGeometry;
