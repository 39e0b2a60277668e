pub mod coord;
pub mod painter;
pub mod progress;
pub mod raster;
pub mod session;
pub mod solver;
pub mod tga;

pub use crate::session::{ConfigError, RenderConfig, RenderSession};
