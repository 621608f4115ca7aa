//! Rotating-disk velocity field.
//!
//! Centered arctan rotation curve, evaluated in the disk plane:
//!
//! ```text
//! v_r(r) = v0 + (2/pi) * vcirc * atan(r / rscale)
//! v_los  = sini * cos(phi) * v_r,    phi = atan2(y_d, x_d)
//! ```
//!
//! Observed positions are rotated by `-theta_int` into the galaxy frame and
//! deprojected (`y_d = y_g / cos i`) before evaluation. Velocities are km/s,
//! positions arcsec.

use nalgebra::{Rotation2, Vector2};

use crate::error::AppError;

/// Speed of light (km/s).
pub const SPEED_OF_LIGHT_KMS: f64 = 299_792.458;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityModel {
    v0: f64,
    vcirc: f64,
    rscale: f64,
    sini: f64,
    theta_int: f64,
    cosi: f64,
}

impl VelocityModel {
    /// `sini` must lie in `[0, 1)`; an edge-on disk cannot be deprojected.
    pub fn new(
        v0: f64,
        vcirc: f64,
        rscale: f64,
        sini: f64,
        theta_int: f64,
    ) -> Result<Self, AppError> {
        if ![v0, vcirc, rscale, sini, theta_int].iter().all(|v| v.is_finite()) {
            return Err(AppError::new(2, "Velocity model parameters must be finite."));
        }
        if rscale <= 0.0 {
            return Err(AppError::new(
                2,
                format!("Velocity scale radius must be > 0, got {rscale}."),
            ));
        }
        if !(0.0..1.0).contains(&sini) {
            return Err(AppError::new(2, format!("sini must lie in [0, 1), got {sini}.")));
        }
        Ok(Self {
            v0,
            vcirc,
            rscale,
            sini,
            theta_int,
            cosi: (1.0 - sini * sini).sqrt(),
        })
    }

    pub fn sini(&self) -> f64 {
        self.sini
    }

    pub fn vcirc(&self) -> f64 {
        self.vcirc
    }

    /// Rotation speed at disk-plane radius `r`.
    pub fn speed(&self, r: f64) -> f64 {
        self.v0 + std::f64::consts::FRAC_2_PI * self.vcirc * (r / self.rscale).atan()
    }

    /// Observed-plane position to disk-plane position.
    pub fn to_disk(&self, x: f64, y: f64) -> Vector2<f64> {
        let gal = Rotation2::new(-self.theta_int) * Vector2::new(x, y);
        Vector2::new(gal.x, gal.y / self.cosi)
    }

    /// Line-of-sight velocity at an observed-plane position.
    pub fn line_of_sight(&self, x: f64, y: f64) -> f64 {
        let disk = self.to_disk(x, y);
        let phi = disk.y.atan2(disk.x);
        self.sini * phi.cos() * self.speed(disk.norm())
    }

    /// Observed wavelength of rest-frame `lambda` at an observed-plane position.
    pub fn doppler_shift(&self, lambda: f64, x: f64, y: f64) -> f64 {
        lambda * (1.0 + self.line_of_sight(x, y) / SPEED_OF_LIGHT_KMS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn disk() -> VelocityModel {
        VelocityModel::new(0.0, 200.0, 0.5, 0.6, 0.0).unwrap()
    }

    #[test]
    fn rotation_curve_flattens_at_vcirc() {
        let m = disk();
        assert_eq!(m.speed(0.0), 0.0);
        assert!((m.speed(1e6) - 200.0).abs() < 1e-3);
        assert!((m.speed(0.5) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn major_axis_sides_move_in_opposite_directions() {
        let m = disk();
        let red = m.line_of_sight(0.4, 0.0);
        let blue = m.line_of_sight(-0.4, 0.0);
        assert!(red > 0.0);
        assert!((red + blue).abs() < 1e-9);
        assert!((red - 0.6 * m.speed(0.4)).abs() < 1e-9);
        // Minor axis is perpendicular to the rotation.
        assert!(m.line_of_sight(0.0, 0.4).abs() < 1e-9);
    }

    #[test]
    fn position_angle_rotates_the_field() {
        let m = VelocityModel::new(0.0, 200.0, 0.5, 0.6, FRAC_PI_2).unwrap();
        assert!((m.line_of_sight(0.0, 0.4) - disk().line_of_sight(0.4, 0.0)).abs() < 1e-9);
    }

    #[test]
    fn minor_axis_is_stretched_by_inclination() {
        let m = disk();
        let d = m.to_disk(0.0, 0.4);
        assert!((d.y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn doppler_shift_redshifts_receding_side() {
        let m = disk();
        assert!(m.doppler_shift(656.3, 0.4, 0.0) > 656.3);
        assert!(m.doppler_shift(656.3, -0.4, 0.0) < 656.3);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(VelocityModel::new(0.0, 200.0, 0.0, 0.5, 0.0).is_err());
        assert!(VelocityModel::new(0.0, 200.0, 1.0, 1.0, 0.0).is_err());
        assert!(VelocityModel::new(0.0, 200.0, 1.0, -0.1, 0.0).is_err());
        assert!(VelocityModel::new(f64::NAN, 200.0, 1.0, 0.5, 0.0).is_err());
    }
}
