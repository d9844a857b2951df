//! Sample collection and aggregation.

use crate::error::{Error, Result};

/// Elapsed CPU times, in seconds, for one (curve, operation) pair.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleSet {
    samples: Vec<f64>,
}

impl SampleSet {
    pub fn with_capacity(n: usize) -> Self {
        Self { samples: Vec::with_capacity(n) }
    }

    /// Records one measurement. Samples are finite and non-negative.
    pub fn push(&mut self, seconds: f64) {
        debug_assert!(seconds.is_finite() && seconds >= 0.0, "invalid sample {seconds}");
        self.samples.push(seconds);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }
}

impl From<Vec<f64>> for SampleSet {
    fn from(xs: Vec<f64>) -> Self {
        let mut set = SampleSet::with_capacity(xs.len());
        for x in xs {
            set.push(x);
        }
        set
    }
}

/// Aggregate of one [`SampleSet`], all values in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub n: usize,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub p50: f64,
    pub p95: f64,
    pub stddev: f64,
}

/// Reduces `samples` to min/max/mean plus the median, p95 and sample
/// standard deviation.
pub fn aggregate(samples: &SampleSet) -> Result<Summary> {
    if samples.is_empty() {
        return Err(Error::EmptySampleSet);
    }
    let mut xs = samples.as_slice().to_vec();
    xs.sort_unstable_by(f64::total_cmp);

    let n = xs.len();
    let min = xs[0];
    let max = xs[n - 1];
    let p50 = xs[n / 2];
    let p95 = xs[(n * 95) / 100];

    let sum: f64 = xs.iter().sum();
    let avg = sum / n as f64;

    let mut var = 0.0;
    for &x in &xs {
        let d = x - avg;
        var += d * d;
    }
    let stddev = if n > 1 { (var / ((n - 1) as f64)).sqrt() } else { 0.0 };

    Ok(Summary { n, min, max, avg, p50, p95, stddev })
}
