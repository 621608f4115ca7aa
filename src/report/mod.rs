//! Reporting utilities: comparisons and formatted terminal output.

use ndarray::Array2;

pub mod format;

pub use format::*;

/// Largest `|a - b| / max(|a|, |b|)` over matching pixels.
///
/// Pixels that are zero in both images are ignored.
pub fn max_relative_difference(a: &Array2<f64>, b: &Array2<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .filter_map(|(&x, &y)| {
            let scale = x.abs().max(y.abs());
            (scale > 0.0).then(|| (x - y).abs() / scale)
        })
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn relative_difference_ignores_shared_zeros() {
        let a = array![[0.0, 2.0], [4.0, 1.0]];
        let b = array![[0.0, 2.0], [5.0, 1.0]];
        assert!((max_relative_difference(&a, &b) - 0.2).abs() < 1e-15);
        assert_eq!(max_relative_difference(&a, &a), 0.0);
    }
}
