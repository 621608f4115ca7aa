//! Per-observation dispersion model: configuration plus its response table.

use ndarray::ArrayView2;

use crate::domain::{GrismConfig, ImagingConfig, ObservationConfig, PixelResponse, TableSummary};
use crate::error::GrismError;
use crate::response::builder::{build_table, spectral_bins};

/// Configuration and derived pixel response table of one observation.
///
/// Photometry-only models carry an empty table.
#[derive(Debug, Clone)]
pub struct DispersionModel {
    config: ObservationConfig,
    table: Vec<PixelResponse>,
}

impl DispersionModel {
    /// Build the model of a grism observation.
    ///
    /// `lambdas` and `bandpasses` are `[model_Nlam, 2]`: blue/red wavelength
    /// edges and bandpass throughput at those edges, one row per slice.
    pub fn grism(
        config: GrismConfig,
        lambdas: ArrayView2<'_, f64>,
        bandpasses: ArrayView2<'_, f64>,
    ) -> Result<Self, GrismError> {
        let bins = spectral_bins(lambdas, bandpasses, config.imaging.model_nlam)?;
        let table = build_table(&config, &bins);
        Ok(Self {
            config: ObservationConfig::Grism(config),
            table,
        })
    }

    /// Model of a direct-imaging observation (no dispersion).
    pub fn photometry(config: ImagingConfig) -> Self {
        Self {
            config: ObservationConfig::Photometry(config),
            table: Vec::new(),
        }
    }

    /// Replace the configuration and rebuild the table from scratch.
    ///
    /// Inputs are validated first; on error the model is left untouched.
    pub fn rebuild(
        &mut self,
        config: GrismConfig,
        lambdas: ArrayView2<'_, f64>,
        bandpasses: ArrayView2<'_, f64>,
    ) -> Result<(), GrismError> {
        let bins = spectral_bins(lambdas, bandpasses, config.imaging.model_nlam)?;
        self.table = build_table(&config, &bins);
        self.config = ObservationConfig::Grism(config);
        Ok(())
    }

    pub fn config(&self) -> &ObservationConfig {
        &self.config
    }

    pub fn imaging(&self) -> &ImagingConfig {
        self.config.imaging()
    }

    /// True for grism models, false for photometry.
    pub fn is_dispersed(&self) -> bool {
        matches!(self.config, ObservationConfig::Grism(_))
    }

    pub fn table(&self) -> &[PixelResponse] {
        &self.table
    }

    pub fn summary(&self) -> TableSummary {
        TableSummary {
            entries: self.table.len(),
            total_weight: self.table.iter().map(|e| e.weight).sum(),
        }
    }

    pub fn nx(&self) -> usize {
        self.imaging().nx
    }

    pub fn ny(&self) -> usize {
        self.imaging().ny
    }

    pub fn pix_scale(&self) -> f64 {
        self.imaging().pix_scale
    }

    pub fn model_nx(&self) -> usize {
        self.imaging().model_nx
    }

    pub fn model_ny(&self) -> usize {
        self.imaging().model_ny
    }

    pub fn model_nlam(&self) -> usize {
        self.imaging().model_nlam
    }

    pub fn model_scale(&self) -> f64 {
        self.imaging().model_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DispersionParams;
    use ndarray::Array2;

    fn config(nlam: usize) -> GrismConfig {
        GrismConfig {
            imaging: ImagingConfig {
                model_nx: 5,
                model_ny: 5,
                model_nlam: nlam,
                model_scale: 0.2,
                nx: 4,
                ny: 3,
                pix_scale: 0.25,
                diameter: 10.0,
                exp_time: 1.0,
                gain: 1.0,
            },
            dispersion: DispersionParams {
                r_spec: 100.0,
                disp_ang: 0.0,
                offset: -120.0,
            },
        }
    }

    fn inputs(nlam: usize) -> (Array2<f64>, Array2<f64>) {
        let lambdas = Array2::from_shape_fn((nlam, 2), |(i, j)| 600.0 + (i + j) as f64);
        let bps = Array2::from_elem((nlam, 2), 0.5);
        (lambdas, bps)
    }

    #[test]
    fn grism_model_builds_table() {
        let (l, b) = inputs(3);
        let model = DispersionModel::grism(config(3), l.view(), b.view()).unwrap();
        assert!(model.is_dispersed());
        assert_eq!(model.nx(), 4);
        assert_eq!(model.ny(), 3);
        assert_eq!(model.model_nlam(), 3);
        let summary = model.summary();
        assert_eq!(summary.entries, model.table().len());
        assert!(summary.entries > 0);
        assert!(summary.total_weight > 0.0);
    }

    #[test]
    fn photometry_model_has_empty_table() {
        let model = DispersionModel::photometry(config(2).imaging);
        assert!(!model.is_dispersed());
        assert!(model.table().is_empty());
        assert_eq!(model.summary(), TableSummary::default());
        assert!(model.config().dispersion().is_none());
    }

    #[test]
    fn rebuild_replaces_table() {
        let (l, b) = inputs(2);
        let mut model = DispersionModel::grism(config(2), l.view(), b.view()).unwrap();
        assert!(model.table().iter().all(|e| e.cube_z < 2));

        let (l, b) = inputs(4);
        model.rebuild(config(4), l.view(), b.view()).unwrap();
        let fresh = DispersionModel::grism(config(4), l.view(), b.view()).unwrap();
        assert_eq!(model.model_nlam(), 4);
        assert_eq!(model.table(), fresh.table());
        assert!(model.table().iter().any(|e| e.cube_z == 3));
    }

    #[test]
    fn failed_rebuild_keeps_previous_state() {
        let (l, b) = inputs(2);
        let mut model = DispersionModel::grism(config(2), l.view(), b.view()).unwrap();
        let before = model.table().to_vec();

        let (l, b) = inputs(3);
        let err = model.rebuild(config(4), l.view(), b.view()).unwrap_err();
        assert!(err.is_dimensionality());
        assert_eq!(model.model_nlam(), 2);
        assert_eq!(model.table(), before.as_slice());
    }
}
