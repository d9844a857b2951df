//! Process CPU-time measurement of a single call.

use std::hint::black_box;

use cpu_time::ProcessTime;

use crate::error::{Error, Result};

/// Runs `op` once and returns its output with the process CPU time it used,
/// in seconds.
///
/// Only `op` sits between the two clock readings; callers build operands
/// beforehand.
pub fn measure<T>(op: impl FnOnce() -> T) -> Result<(T, f64)> {
    try_measure(|| Ok(op()))
}

/// Like [`measure`] for operations that can fail. A failed operation yields
/// its error and no sample.
pub fn try_measure<T>(op: impl FnOnce() -> Result<T>) -> Result<(T, f64)> {
    let start = ProcessTime::try_now().map_err(Error::Clock)?;
    let out = black_box(op())?;
    let elapsed = start.try_elapsed().map_err(Error::Clock)?;
    Ok((out, elapsed.as_secs_f64()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_never_negative() {
        for _ in 0..100 {
            let (_, secs) = measure(|| 1u64 + 1).unwrap();
            assert!(secs >= 0.0);
        }
    }

    #[test]
    fn returns_the_operation_output() {
        let (v, _) = measure(|| (0..1000u64).sum::<u64>()).unwrap();
        assert_eq!(v, 499_500);
    }

    #[test]
    fn busy_work_is_measured() {
        let (_, secs) = measure(|| {
            let mut acc = 0u64;
            for i in 0..5_000_000u64 {
                acc = black_box(acc.wrapping_mul(31).wrapping_add(i));
            }
            acc
        })
        .unwrap();
        assert!(secs > 0.0);
    }

    #[test]
    fn failures_propagate() {
        let res = try_measure::<()>(|| Err(Error::provider("boom")));
        assert!(matches!(res, Err(Error::Provider(ref m)) if m == "boom"));
    }
}
