//! Render worker configuration.
//!
//! The worker count is read from `GRISM_NUM_THREADS`, falling back to
//! `OMP_NUM_THREADS` only when the former is unset. A set but unparsable
//! `GRISM_NUM_THREADS` still wins and resolves to one worker. A `.env` file
//! in the working directory is honoured. Anything missing, unparsable, zero
//! or negative means a single worker.

use log::warn;

pub const WORKERS_ENV: &str = "GRISM_NUM_THREADS";
pub const FALLBACK_WORKERS_ENV: &str = "OMP_NUM_THREADS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    /// Number of render workers (always >= 1).
    pub workers: usize,
}

impl RenderSettings {
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let primary = std::env::var(WORKERS_ENV).ok();
        let fallback = std::env::var(FALLBACK_WORKERS_ENV).ok();
        Self::from_vars(primary.as_deref(), fallback.as_deref())
    }

    /// Resolve the worker count from raw `GRISM_NUM_THREADS` and
    /// `OMP_NUM_THREADS` values.
    ///
    /// The first is authoritative whenever it is present, valid or not.
    pub fn from_vars(primary: Option<&str>, fallback: Option<&str>) -> Self {
        Self::with_workers(parse_workers(primary.or(fallback)))
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::with_workers(1)
    }
}

/// Interpret a raw worker-count value.
pub fn parse_workers(raw: Option<&str>) -> usize {
    let Some(raw) = raw else {
        return 1;
    };
    match raw.trim().parse::<i64>() {
        Ok(n) if n > 0 => usize::try_from(n).unwrap_or(1),
        Ok(_) => 1,
        Err(_) => {
            warn!("ignoring invalid render worker count {raw:?}; using 1");
            1
        }
    }
}
