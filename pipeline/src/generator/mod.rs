pub mod scene;
pub mod week;
