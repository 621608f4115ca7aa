//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - observation configuration (`ImagingConfig`, `GrismConfig`, `ObservationConfig`)
//! - per-slice spectral inputs (`SpectralBin`)
//! - sparse response table entries (`PixelResponse`, `TableSummary`)

pub mod types;

pub use types::*;
