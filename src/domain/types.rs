//! Shared domain types.
//!
//! Configuration structs use the host's key names (`model_Nx`, `R_spec`, ...)
//! for serde so a flat mapping coming from a host interpreter deserialises
//! directly into them.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Geometry and photometry shared by every observation.
///
/// This is everything a photometry-only observation needs; grism observations
/// add [`DispersionParams`] on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagingConfig {
    /// Theory cube width (pixels).
    #[serde(rename = "model_Nx")]
    pub model_nx: usize,
    /// Theory cube height (pixels).
    #[serde(rename = "model_Ny")]
    pub model_ny: usize,
    /// Number of wavelength slices in the theory cube.
    #[serde(rename = "model_Nlam")]
    pub model_nlam: usize,
    /// Theory cube pixel scale (arcsec/pixel).
    pub model_scale: f64,

    /// Observed image width (pixels).
    #[serde(rename = "Nx")]
    pub nx: usize,
    /// Observed image height (pixels).
    #[serde(rename = "Ny")]
    pub ny: usize,
    /// Observed image pixel scale (arcsec/pixel).
    pub pix_scale: f64,

    /// Telescope aperture diameter (cm).
    pub diameter: f64,
    /// Exposure time (s).
    pub exp_time: f64,
    /// Detector gain.
    pub gain: f64,
}

impl ImagingConfig {
    /// Aperture area × exposure time, gain corrected.
    ///
    /// Applied identically to every response table entry.
    pub fn flux_scale(&self) -> f64 {
        PI * (self.diameter / 2.0).powi(2) * self.exp_time / self.gain
    }

    /// Theory cube shape as `[model_Nlam, model_Ny, model_Nx]`.
    pub fn cube_shape(&self) -> [usize; 3] {
        [self.model_nlam, self.model_ny, self.model_nx]
    }

    /// Observed image shape as `[Ny, Nx]`.
    pub fn image_shape(&self) -> [usize; 2] {
        [self.ny, self.nx]
    }
}

/// Grism-specific dispersion parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DispersionParams {
    /// Spectral resolution at the reference wavelength.
    #[serde(rename = "R_spec")]
    pub r_spec: f64,
    /// Dispersion angle (radians).
    pub disp_ang: f64,
    /// Fixed positional offset along the dispersion direction (observed pixels).
    pub offset: f64,
}

/// Full configuration of a dispersed (grism) observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrismConfig {
    #[serde(flatten)]
    pub imaging: ImagingConfig,
    #[serde(flatten)]
    pub dispersion: DispersionParams,
}

/// Configuration of a registered observation.
#[derive(Debug, Clone, PartialEq)]
pub enum ObservationConfig {
    /// Slitless spectroscopy: the response table is built from the dispersion.
    Grism(GrismConfig),
    /// Direct imaging: no dispersion, empty response table.
    Photometry(ImagingConfig),
}

impl ObservationConfig {
    pub fn imaging(&self) -> &ImagingConfig {
        match self {
            ObservationConfig::Grism(config) => &config.imaging,
            ObservationConfig::Photometry(imaging) => imaging,
        }
    }

    pub fn dispersion(&self) -> Option<&DispersionParams> {
        match self {
            ObservationConfig::Grism(config) => Some(&config.dispersion),
            ObservationConfig::Photometry(_) => None,
        }
    }
}

/// One sparse contribution from a theory-cube voxel to an observed pixel.
///
/// Entries are independent: a table may be processed in any order or
/// partition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelResponse {
    /// Column of the observed image.
    pub image_x: usize,
    /// Row of the observed image.
    pub image_y: usize,
    /// Wavelength slice of the theory cube.
    pub cube_z: usize,
    /// Column of the theory cube.
    pub cube_x: usize,
    /// Row of the theory cube.
    pub cube_y: usize,
    pub weight: f64,
}

/// Wavelength range and bandpass throughput of one theory-cube slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralBin {
    /// Blue edge (nm).
    pub blue: f64,
    /// Red edge (nm).
    pub red: f64,
    /// Throughput at the blue edge.
    pub bp_low: f64,
    /// Throughput at the red edge.
    pub bp_high: f64,
}

impl SpectralBin {
    /// Representative wavelength of the slice.
    pub fn mean_wave(&self) -> f64 {
        (self.blue + self.red) / 2.0
    }

    /// Linear average of the bandpass over the slice.
    ///
    /// Only accurate when the wavelength grid is fine compared to the
    /// curvature of the bandpass.
    pub fn mean_bandpass(&self) -> f64 {
        (self.bp_low + self.bp_high) / 2.0
    }
}

/// Aggregate statistics of a response table.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TableSummary {
    pub entries: usize,
    pub total_weight: f64,
}
