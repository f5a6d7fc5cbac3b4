pub mod camera;
pub mod lifecycle;
pub mod material;
pub mod mesh;
pub mod pacing;
pub mod render;
pub mod surface;
pub mod transform;
pub mod window;

pub use lifecycle::{Phase, RunSummary, ShutdownReason, Visualizer};
pub use mesh::{CubeMesh, CUBE};
pub use surface::Surface;
