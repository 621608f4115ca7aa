//! In-memory input generation.

pub mod synthetic;
pub mod velocity;

pub use synthetic::*;
pub use velocity::*;
