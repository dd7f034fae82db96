// core holds the diamond–square heightfield engine:
// point/grid model, tile geometry, sampler, stage driver and the image hand-off
pub mod config;
pub mod driver;
pub mod error;
pub mod generator;
pub mod grid;
pub mod point;
pub mod sampler;
pub mod tile;
pub mod utils;

pub use config::GeneratorConfig;
pub use driver::{Schedule, run};
pub use error::GridError;
pub use generator::DiamondSquare;
pub use grid::{Grid, Height, MAX_BASE};
pub use point::Point;
pub use tile::{Tile, diamond_tile, enumerate_tiles, square_tile};
