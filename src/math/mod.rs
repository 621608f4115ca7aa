//! Geometry utilities: centered grids, overlap weights and the dispersion relation.

pub mod dispersion;
pub mod grid;

pub use dispersion::*;
pub use grid::*;
