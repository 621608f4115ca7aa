//! Error types.
//!
//! The library reports [`GrismError`]; the `grism` binary wraps it in
//! [`AppError`], which carries the process exit code.

use thiserror::Error;

/// Errors reported by the library.
#[derive(Debug, Error)]
pub enum GrismError {
    /// An input buffer has the wrong number of dimensions.
    #[error("`{name}` must be {expected}-dimensional, got {actual} dimensions")]
    Rank {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
    /// An input buffer has the right rank but the wrong extents.
    #[error("`{name}` has shape {actual:?}, expected {expected:?}")]
    Shape {
        name: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
    /// An observation index past the end of the registry.
    #[error("observation index {index} out of range ({count} registered)")]
    IndexOutOfRange { index: usize, count: usize },
    /// The render worker pool could not be started.
    #[error("failed to start render worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl GrismError {
    /// True for rank and shape mismatches.
    pub fn is_dimensionality(&self) -> bool {
        matches!(self, GrismError::Rank { .. } | GrismError::Shape { .. })
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<GrismError> for AppError {
    fn from(err: GrismError) -> Self {
        let exit_code = match err {
            GrismError::Rank { .. } | GrismError::Shape { .. } => 2,
            GrismError::IndexOutOfRange { .. } => 3,
            GrismError::WorkerPool(_) => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
