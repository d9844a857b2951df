//! Run configuration.

use crate::error::Result;
use crate::provider::CurveId;

/// Repetitions per operation and curve.
pub const REPEAT: usize = 10_000;

/// Seconds to microseconds.
pub const TO_MICRO: f64 = 1_000_000.0;

/// A curve as it appears in the report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurveSpec {
    pub id: CurveId,
    pub display_name: &'static str,
}

impl CurveSpec {
    pub const fn new(id: CurveId) -> Self {
        Self { id, display_name: id.name() }
    }
}

// prime256v1  - 128-bit security, NIST P-256
// secp256k1   - 128-bit security, Koblitz prime curve
// secp384r1   - 192-bit security, NIST P-384
// secp521r1   - 256-bit security, NIST P-521
// sect233r1   - 112-bit security, binary field, NIST B-233
pub const DEFAULT_CURVES: [CurveSpec; 5] = [
    CurveSpec::new(CurveId::Prime256v1),
    CurveSpec::new(CurveId::Secp256k1),
    CurveSpec::new(CurveId::Secp384r1),
    CurveSpec::new(CurveId::Secp521r1),
    CurveSpec::new(CurveId::Sect233r1),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Timed repetitions per operation.
    pub repeat: usize,
    /// Curves in report order.
    pub curves: Vec<CurveSpec>,
    /// Untimed iterations per operation before sampling starts.
    pub warmup: usize,
    /// Derive every curve's RNG from this seed instead of OS entropy.
    pub seed: Option<u64>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self { repeat: REPEAT, curves: DEFAULT_CURVES.to_vec(), warmup: 0, seed: None }
    }
}

impl HarnessConfig {
    /// Replaces the curve list with the named curves, in the given order.
    pub fn with_curve_names<S: AsRef<str>>(mut self, names: &[S]) -> Result<Self> {
        self.curves = names
            .iter()
            .map(|name| name.as_ref().parse().map(CurveSpec::new))
            .collect::<Result<_>>()?;
        Ok(self)
    }
}
