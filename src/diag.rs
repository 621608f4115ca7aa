//! Process-wide diagnostic identity.
//!
//! When several processes of a distributed job each run their own registry,
//! log lines are prefixed with `[rank/size]` so interleaved output can be told
//! apart. The values are never read by any computation.

use std::sync::atomic::{AtomicI64, Ordering};

static PROCESS_SIZE: AtomicI64 = AtomicI64::new(-1);
static PROCESS_RANK: AtomicI64 = AtomicI64::new(-1);

/// Record this process's rank within a job of `size` processes.
pub fn set_mpi_info(size: i64, rank: i64) {
    PROCESS_SIZE.store(size, Ordering::Relaxed);
    PROCESS_RANK.store(rank, Ordering::Relaxed);
}

/// `(size, rank)`; both are -1 until [`set_mpi_info`] is called.
pub fn mpi_info() -> (i64, i64) {
    (
        PROCESS_SIZE.load(Ordering::Relaxed),
        PROCESS_RANK.load(Ordering::Relaxed),
    )
}

/// Log-line prefix, e.g. `[0/4]`.
pub fn prefix() -> String {
    let (size, rank) = mpi_info();
    format!("[{rank}/{size}]")
}
