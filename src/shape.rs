//! Rank and shape checks for buffers crossing the library boundary.

use ndarray::{ArrayBase, ArrayView, ArrayViewMut, Data, Dimension, IxDyn};

use crate::error::GrismError;

/// Convert a dynamic-rank view into a fixed-rank one, reporting a rank error
/// if the number of axes does not match.
pub fn fixed_rank<'a, D: Dimension>(
    name: &'static str,
    view: ArrayView<'a, f64, IxDyn>,
) -> Result<ArrayView<'a, f64, D>, GrismError> {
    let actual = view.ndim();
    view.into_dimensionality::<D>().map_err(|_| GrismError::Rank {
        name,
        expected: D::NDIM.unwrap_or(actual),
        actual,
    })
}

/// Mutable counterpart of [`fixed_rank`].
pub fn fixed_rank_mut<'a, D: Dimension>(
    name: &'static str,
    view: ArrayViewMut<'a, f64, IxDyn>,
) -> Result<ArrayViewMut<'a, f64, D>, GrismError> {
    let actual = view.ndim();
    view.into_dimensionality::<D>().map_err(|_| GrismError::Rank {
        name,
        expected: D::NDIM.unwrap_or(actual),
        actual,
    })
}

/// Require an exact shape.
pub fn expect_shape<S, D>(
    name: &'static str,
    array: &ArrayBase<S, D>,
    expected: &[usize],
) -> Result<(), GrismError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    if array.shape() == expected {
        Ok(())
    } else {
        Err(GrismError::Shape {
            name,
            expected: expected.to_vec(),
            actual: array.shape().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, Array2, Ix2, Ix3};

    #[test]
    fn fixed_rank_accepts_matching_rank() {
        let a = Array2::<f64>::zeros((2, 3)).into_dyn();
        let v = fixed_rank::<Ix2>("a", a.view()).unwrap();
        assert_eq!(v.dim(), (2, 3));
    }

    #[test]
    fn fixed_rank_reports_actual_rank() {
        let a = Array::<f64, _>::zeros(vec![2, 3]);
        let err = fixed_rank::<Ix3>("theory_data", a.view()).unwrap_err();
        match err {
            GrismError::Rank {
                name,
                expected,
                actual,
            } => {
                assert_eq!(name, "theory_data");
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn expect_shape_reports_both_shapes() {
        let a = Array2::<f64>::zeros((4, 5));
        assert!(expect_shape("data", &a, &[4, 5]).is_ok());
        let err = expect_shape("data", &a, &[5, 4]).unwrap_err();
        assert_eq!(err.to_string(), "`data` has shape [4, 5], expected [5, 4]");
    }
}
