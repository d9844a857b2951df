//! Modular arithmetic in prime-order subgroups of `Z_p^*`.
//!
//! For each `(order_bits, modulus_bits)` size a prime `q` is drawn, then
//! `p = k*q + 1` is searched until it is prime with exactly `modulus_bits`
//! bits, and `g = h^((p-1)/q)` is taken for a random `h` until `g != 1`.
//! The run then times one `a*b mod p` and one `a^b mod p` per repetition on
//! fresh operands `a = g^r1`, `b = g^r2`.

use std::fmt;
use std::hint::black_box;
use std::io::Write;
use std::str::FromStr;

use glass_pumpkin::prime;
use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand_core::{CryptoRng, RngCore};
use tracing::{debug, info};

use crate::config::{REPEAT, TO_MICRO};
use crate::error::{Error, Result};
use crate::harness::seeded_rng;
use crate::report;
use crate::stats::{aggregate, SampleSet, Summary};
use crate::timer::measure;

const MODP_TAG: &[u8] = b"ecbench/modp/v1";

/// Attempts at finding a prime `p = k*q + 1` for one `q`.
const MAX_MODULUS_ATTEMPTS: usize = 10_000;

/// Attempts at finding `h` with `h^((p-1)/q) != 1`.
const MAX_GENERATOR_ATTEMPTS: usize = 1_000;

/// Bit lengths of the subgroup order `q` and the modulus `p`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupSize {
    pub order_bits: usize,
    pub modulus_bits: usize,
}

impl GroupSize {
    pub const fn new(order_bits: usize, modulus_bits: usize) -> Self {
        Self { order_bits, modulus_bits }
    }
}

pub const DEFAULT_SIZES: [GroupSize; 4] = [
    GroupSize::new(160, 1024),
    GroupSize::new(192, 2048),
    GroupSize::new(256, 2048),
    GroupSize::new(256, 4096),
];

impl fmt::Display for GroupSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}-p{}", self.order_bits, self.modulus_bits)
    }
}

/// Parses `order:modulus`, e.g. `160:1024`.
impl FromStr for GroupSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidGroup(s.to_string());
        let (order, modulus) = s.trim().split_once(':').ok_or_else(invalid)?;
        let order_bits = order.trim().parse().map_err(|_| invalid())?;
        let modulus_bits = modulus.trim().parse().map_err(|_| invalid())?;
        Ok(Self { order_bits, modulus_bits })
    }
}

/// `p`, `q` and a generator `g` of the order-`q` subgroup of `Z_p^*`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimeOrderGroup {
    pub size: GroupSize,
    pub p: BigUint,
    pub q: BigUint,
    pub g: BigUint,
}

impl PrimeOrderGroup {
    /// Two random subgroup elements `g^r` with `r` in `[1, p)`.
    pub fn operands<R: RngCore + CryptoRng>(&self, rng: &mut R) -> (BigUint, BigUint) {
        let a = self.g.modpow(&rng.gen_biguint_range(&BigUint::one(), &self.p), &self.p);
        let b = self.g.modpow(&rng.gen_biguint_range(&BigUint::one(), &self.p), &self.p);
        (a, b)
    }

    pub fn mul_mod(&self, a: &BigUint, b: &BigUint) -> BigUint {
        a * b % &self.p
    }

    pub fn pow_mod(&self, a: &BigUint, e: &BigUint) -> BigUint {
        a.modpow(e, &self.p)
    }
}

/// Generates a group of the requested size.
///
/// Fails with [`Error::InvalidGroup`] when the modulus is not longer than the
/// order, and with [`Error::Provider`] when no prime modulus or generator
/// turns up within the attempt limits.
pub fn generate_prime_order_group<R: RngCore + CryptoRng>(
    size: GroupSize,
    rng: &mut R,
) -> Result<PrimeOrderGroup> {
    if size.modulus_bits <= size.order_bits {
        return Err(Error::InvalidGroup(size.to_string()));
    }
    let q = prime::from_rng(size.order_bits, rng)
        .map_err(|e| Error::provider(format!("generating {}-bit prime: {e:?}", size.order_bits)))?;
    let one = BigUint::one();

    // k*q + 1 has exactly modulus_bits bits iff k lies in [lo, hi].
    let lo = ((&one << (size.modulus_bits - 1)) + &q - &one) / &q;
    let hi = ((&one << size.modulus_bits) - 2u32) / &q;
    if lo > hi {
        return Err(Error::InvalidGroup(size.to_string()));
    }
    let hi_excl = &hi + &one;

    for attempt in 0..MAX_MODULUS_ATTEMPTS {
        let mut k = rng.gen_biguint_range(&lo, &hi_excl);
        if k.bit(0) {
            k += 1u32;
        }
        if k > hi {
            continue;
        }
        let p = &k * &q + &one;
        if !prime::check(&p) {
            continue;
        }
        debug!(%size, attempt, "prime modulus found");
        let g = find_generator(&p, &q, rng)?;
        return Ok(PrimeOrderGroup { size, p, q, g });
    }
    Err(Error::provider(format!("no prime modulus for {size} after {MAX_MODULUS_ATTEMPTS} attempts")))
}

/// A generator of the order-`q` subgroup: `h^((p-1)/q)` for random `h != 1`.
fn find_generator<R: RngCore + CryptoRng>(p: &BigUint, q: &BigUint, rng: &mut R) -> Result<BigUint> {
    let one = BigUint::one();
    let exponent = (p - &one) / q;
    let two = BigUint::from(2u32);
    for _ in 0..MAX_GENERATOR_ATTEMPTS {
        let h = rng.gen_biguint_range(&two, p);
        let g = h.modpow(&exponent, p);
        if g != one {
            return Ok(g);
        }
    }
    Err(Error::provider("no subgroup generator found"))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModpConfig {
    pub repeat: usize,
    pub sizes: Vec<GroupSize>,
    pub warmup: usize,
    pub seed: Option<u64>,
}

impl Default for ModpConfig {
    fn default() -> Self {
        Self { repeat: REPEAT, sizes: DEFAULT_SIZES.to_vec(), warmup: 0, seed: None }
    }
}

/// The group that was timed and the summaries of both operations.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupResult {
    pub size: GroupSize,
    pub group: PrimeOrderGroup,
    pub mul: Summary,
    pub exp: Summary,
}

/// Generates and times every configured group in order.
///
/// Group parameters and each group's min/mean/max go to `progress` as soon
/// as they are known; the first error ends the run.
pub fn modp_cost<W: Write>(config: &ModpConfig, progress: &mut W) -> Result<Vec<GroupResult>> {
    let mut results = Vec::with_capacity(config.sizes.len());
    for &size in &config.sizes {
        let mut rng = seeded_rng(MODP_TAG, &size.to_string(), config.seed)?;
        let group = generate_prime_order_group(size, &mut rng)?;
        write!(progress, "{}", report::render_group_header(&group))?;
        progress.flush()?;

        for _ in 0..config.warmup {
            let (a, b) = group.operands(&mut rng);
            black_box(group.mul_mod(&a, &b));
            black_box(group.pow_mod(&a, &b));
        }

        let mut mul = SampleSet::with_capacity(config.repeat);
        let mut exp = SampleSet::with_capacity(config.repeat);
        for _ in 0..config.repeat {
            let (a, b) = group.operands(&mut rng);
            let (_, secs) = measure(|| group.mul_mod(&a, &b))?;
            mul.push(secs);
            let (_, secs) = measure(|| group.pow_mod(&a, &b))?;
            exp.push(secs);
        }

        let result = GroupResult { size, mul: aggregate(&mul)?, exp: aggregate(&exp)?, group };
        info!(%size, samples = result.mul.n, "group done");
        write!(progress, "{}", report::render_group_summary(&result, TO_MICRO))?;
        results.push(result);
    }
    Ok(results)
}
