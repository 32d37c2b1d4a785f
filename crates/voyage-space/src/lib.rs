//! Space backdrop: the procedural starfield point cloud and the random source
//! it is generated from.

pub mod random;
pub mod starfield;

pub use random::{RandomSource, source_from_seed};
pub use starfield::{PointCloud, Star, StarfieldGenerator, generate};
