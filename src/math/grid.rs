//! Centered pixel grids and 1-D overlap weights.
//!
//! For a dimension of `n` pixels with pixel scale `s`, pixel `i` sits at
//!
//! ```text
//! x_i = (i - R) * s,    R = floor(n/2) - 0.5 * ((n - 1) mod 2)
//! ```
//!
//! which centres odd and even grids about zero in the same way.

/// Index of the grid centre (may be a half-integer for even `n`).
pub fn center_index(n: usize) -> f64 {
    let half = (n / 2) as f64;
    // (n - 1) mod 2, written so that n = 0 does not underflow.
    let even = if n % 2 == 0 { 1.0 } else { 0.0 };
    half - 0.5 * even
}

/// Pixel centre coordinates (arcsec) of a centered grid.
pub fn centered_grid(n: usize, scale: f64) -> Vec<f64> {
    let r = center_index(n);
    (0..n).map(|i| (i as f64 - r) * scale).collect()
}

/// Lower edge of the first pixel of a centered grid.
pub fn lower_corner(n: usize, scale: f64) -> f64 {
    -center_index(n) * scale - 0.5 * scale
}

/// Overlap of the interval `[lo, hi]` (in pixel units, already clamped to the
/// grid) with the integer cells it touches.
///
/// Returns the index of the first touched cell and one weight per cell, or
/// `None` when the interval touches no cell. Interior cells weigh 1, the two
/// boundary cells weigh their covered fraction, and a single touched cell
/// weighs `hi - lo`. The weights always sum to `hi - lo`.
///
/// Empty, reversed, NaN or unbounded intervals touch nothing.
pub fn overlap_weights(lo: f64, hi: f64) -> Option<(usize, Vec<f64>)> {
    if !(lo.is_finite() && hi.is_finite()) || hi <= lo {
        return None;
    }
    let first = lo.floor();
    let last = hi.ceil();

    let n = (last - first) as usize;
    let mut weights = vec![1.0; n];
    if n > 1 {
        weights[0] = 1.0 + first - lo;
        weights[n - 1] = 1.0 + hi - last;
    } else {
        weights[0] = hi - lo;
    }
    Some((first as usize, weights))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_grid_has_pixel_at_zero() {
        assert_eq!(centered_grid(3, 1.0), vec![-1.0, 0.0, 1.0]);
        assert_eq!(centered_grid(5, 0.5), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn even_grid_straddles_zero() {
        assert_eq!(centered_grid(4, 1.0), vec![-1.5, -0.5, 0.5, 1.5]);
        assert_eq!(center_index(2), 0.5);
    }

    #[test]
    fn lower_corner_is_half_pixel_below_first_centre() {
        assert_eq!(lower_corner(3, 1.0), -1.5);
        assert_eq!(lower_corner(4, 0.5), -1.0);
        let grid = centered_grid(7, 0.13);
        assert!((lower_corner(7, 0.13) - (grid[0] - 0.065)).abs() < 1e-12);
    }

    #[test]
    fn aligned_interval_covers_one_cell() {
        let (start, w) = overlap_weights(1.0, 2.0).unwrap();
        assert_eq!(start, 1);
        assert_eq!(w, vec![1.0]);
    }

    #[test]
    fn straddling_interval_splits_weights() {
        let (start, w) = overlap_weights(0.25, 2.5).unwrap();
        assert_eq!(start, 0);
        assert_eq!(w, vec![0.75, 1.0, 0.5]);
    }

    #[test]
    fn weights_sum_to_interval_length() {
        for &(lo, hi) in &[(0.1, 0.4), (0.3, 3.7), (2.0, 5.0), (1.5, 2.0), (0.0, 0.9)] {
            let (_, w) = overlap_weights(lo, hi).unwrap();
            let sum: f64 = w.iter().sum();
            assert!((sum - (hi - lo)).abs() < 1e-12, "[{lo}, {hi}] summed to {sum}");
        }
    }

    #[test]
    fn degenerate_interval_on_boundary_is_empty() {
        assert!(overlap_weights(0.0, 0.0).is_none());
        assert!(overlap_weights(3.0, 3.0).is_none());
    }

    #[test]
    fn reversed_or_non_finite_interval_is_empty() {
        assert!(overlap_weights(2.5, 1.5).is_none());
        assert!(overlap_weights(f64::NAN, f64::NAN).is_none());
        assert!(overlap_weights(0.0, f64::NAN).is_none());
        assert!(overlap_weights(f64::NEG_INFINITY, 2.0).is_none());
        assert!(overlap_weights(0.5, f64::INFINITY).is_none());
    }
}
