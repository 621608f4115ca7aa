//! Pixel response tables: the sparse voxel → pixel mapping of a grism observation.

pub mod builder;
pub mod model;

pub use builder::*;
pub use model::*;
