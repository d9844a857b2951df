//! The two measurement drivers.
//!
//! [`arithmetic_cost`] times point addition and scalar multiplication over
//! pre-generated operands; [`elgamal_cost`] times encryption and decryption
//! of fresh random messages under one key pair per curve. Both walk the
//! configured curves in order, time exactly one provider call per sample and
//! abort on the first error.

use std::hint::black_box;
use std::io::Write;

use rand_chacha::ChaCha20Rng;
use rand_core::{OsRng, SeedableRng};
use tracing::{debug, info};

use crate::config::{CurveSpec, HarnessConfig, TO_MICRO};
use crate::error::{Error, Result};
use crate::input::{operand_batch, random_message};
use crate::provider::{CurveGroup, CurveId, CurveVisitor, ElGamal};
use crate::stats::{aggregate, SampleSet, Summary};
use crate::timer::{measure, try_measure};

const ARITHMETIC_TAG: &[u8] = b"ecbench/arithmetic/v1";
const ELGAMAL_TAG: &[u8] = b"ecbench/elgamal/v1";

/// Summaries of both timed operations on one curve: add/mul for the
/// arithmetic run, enc/dec for the ElGamal run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveResult {
    pub curve: CurveSpec,
    pub first: Summary,
    pub second: Summary,
}

/// Which of the two timed operations of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    First,
    Second,
}

impl Operation {
    pub const BOTH: [Operation; 2] = [Operation::First, Operation::Second];
}

impl CurveResult {
    pub fn summary(&self, op: Operation) -> &Summary {
        match op {
            Operation::First => &self.first,
            Operation::Second => &self.second,
        }
    }
}

/// Results in configured curve order.
pub type ResultTable = Vec<CurveResult>;

fn seed_for(tag: &[u8], label: &str, seed: u64) -> [u8; 32] {
    let mut h = blake3::Hasher::new();
    h.update(tag);
    h.update(label.as_bytes());
    h.update(&seed.to_le_bytes());
    *h.finalize().as_bytes()
}

/// One independent stream per `(tag, label)`: derived from `seed` when set,
/// otherwise drawn from OS entropy.
pub(crate) fn seeded_rng(tag: &[u8], label: &str, seed: Option<u64>) -> Result<ChaCha20Rng> {
    match seed {
        Some(seed) => Ok(ChaCha20Rng::from_seed(seed_for(tag, label, seed))),
        None => ChaCha20Rng::from_rng(OsRng)
            .map_err(|e| Error::provider(format!("seeding from OS entropy failed: {e}"))),
    }
}

/// Times `add(a[i], b[i])` and then, in a separate pass, `exp(x[i], y[i])`
/// for every configured curve.
pub fn arithmetic_cost<W: Write>(config: &HarnessConfig, progress: &mut W) -> Result<ResultTable> {
    run(
        config,
        progress,
        ARITHMETIC_TAG,
        |config, rng| ArithmeticCost { config, rng },
        |id, visitor: ArithmeticCost<'_>| id.visit(visitor),
    )
}

/// Times `encrypt` and `decrypt` of a fresh random message per repetition
/// for every configured curve.
pub fn elgamal_cost<W: Write>(config: &HarnessConfig, progress: &mut W) -> Result<ResultTable> {
    run(
        config,
        progress,
        ELGAMAL_TAG,
        |config, rng| ElGamalCost { config, rng },
        |id, visitor: ElGamalCost<'_>| id.visit(visitor),
    )
}

/// Drives one visitor per configured curve. `dispatch` hands the visitor to
/// the curve's provider; the first error ends the run and no table is
/// returned.
fn run<'a, W, V, F, D>(
    config: &'a HarnessConfig,
    progress: &mut W,
    tag: &[u8],
    mut visitor: F,
    mut dispatch: D,
) -> Result<ResultTable>
where
    W: Write,
    V: CurveVisitor<Output = Result<(Summary, Summary)>>,
    F: FnMut(&'a HarnessConfig, ChaCha20Rng) -> V,
    D: FnMut(CurveId, V) -> Result<(Summary, Summary)>,
{
    let mut table = ResultTable::with_capacity(config.curves.len());
    for curve in &config.curves {
        writeln!(progress, "Benchmarking '{}'...", curve.display_name)?;
        progress.flush()?;

        let rng = seeded_rng(tag, curve.display_name, config.seed)?;
        let (first, second) = dispatch(curve.id, visitor(config, rng))?;
        info!(
            curve = curve.display_name,
            samples = first.n,
            first_avg_us = first.avg * TO_MICRO,
            second_avg_us = second.avg * TO_MICRO,
            "curve done"
        );
        table.push(CurveResult { curve: *curve, first, second });
    }
    Ok(table)
}

struct ArithmeticCost<'a> {
    config: &'a HarnessConfig,
    rng: ChaCha20Rng,
}

impl CurveVisitor for ArithmeticCost<'_> {
    type Output = Result<(Summary, Summary)>;

    fn visit<G: CurveGroup>(self, group: G) -> Self::Output {
        let n = self.config.repeat;
        let mut rng = self.rng;
        let ops = operand_batch(&group, n, &mut rng);
        debug!(curve = group.name(), n, "operands ready");
        if ops.is_empty() {
            return Err(Error::EmptySampleSet);
        }

        for i in 0..self.config.warmup {
            let j = i % n;
            black_box(group.add(&ops.a[j], &ops.b[j]));
        }
        let mut add = SampleSet::with_capacity(n);
        for i in 0..n {
            let (_, secs) = measure(|| group.add(&ops.a[i], &ops.b[i]))?;
            add.push(secs);
        }

        for i in 0..self.config.warmup {
            let j = i % n;
            black_box(group.exp(&ops.x[j], &ops.y[j]));
        }
        let mut mul = SampleSet::with_capacity(n);
        for i in 0..n {
            let (_, secs) = measure(|| group.exp(&ops.x[i], &ops.y[i]))?;
            mul.push(secs);
        }

        debug_assert_eq!(add.len(), n);
        debug_assert_eq!(mul.len(), n);
        Ok((aggregate(&add)?, aggregate(&mul)?))
    }
}

struct ElGamalCost<'a> {
    config: &'a HarnessConfig,
    rng: ChaCha20Rng,
}

impl CurveVisitor for ElGamalCost<'_> {
    type Output = Result<(Summary, Summary)>;

    fn visit<G: CurveGroup>(self, group: G) -> Self::Output {
        let n = self.config.repeat;
        let mut rng = self.rng;
        let scheme = ElGamal::new(&group);
        let keys = scheme.keygen(&mut rng);
        debug!(curve = group.name(), bitsize = group.bitsize(), "key pair ready");

        for _ in 0..self.config.warmup {
            let msg = random_message(&group, &mut rng)?;
            let ct = scheme.encrypt(&keys.public, &msg, &mut rng)?;
            black_box(scheme.decrypt(&keys, &ct)?);
        }

        let mut enc = SampleSet::with_capacity(n);
        let mut dec = SampleSet::with_capacity(n);
        for _ in 0..n {
            let msg = random_message(&group, &mut rng)?;
            let (ct, secs) = try_measure(|| scheme.encrypt(&keys.public, &msg, &mut rng))?;
            enc.push(secs);
            let (plain, secs) = try_measure(|| scheme.decrypt(&keys, &ct))?;
            dec.push(secs);

            if plain != msg {
                return Err(Error::provider(format!(
                    "{}: decryption does not recover the plaintext",
                    group.name()
                )));
            }
        }

        debug_assert_eq!(enc.len(), n);
        debug_assert_eq!(dec.len(), n);
        Ok((aggregate(&enc)?, aggregate(&dec)?))
    }
}
