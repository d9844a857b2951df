//! Curve providers.
//!
//! The harnesses only ever talk to a curve through [`CurveGroup`]: random
//! sampling, the two timed group operations, and the plaintext embedding the
//! ElGamal scheme needs. The four prime-field curves come from the RustCrypto
//! crates ([`prime`]); the binary-field curve is implemented in
//! [`sect233r1`].

pub mod elgamal;
pub mod prime;
pub mod sect233r1;

use std::fmt;
use std::str::FromStr;

use rand_core::CryptoRngCore;

use crate::error::{Error, Result};

pub use elgamal::{Ciphertext, ElGamal, KeyPair, PublicKey, SecretKey};
pub use prime::PrimeGroup;
pub use sect233r1::Sect233r1;

/// Bytes of an x-coordinate not available to the message: the leading zero,
/// the length byte and the trailing try-and-increment counter.
pub const RESERVED_ENCODING_BYTES: usize = 3;

/// Group operations of one named curve.
pub trait CurveGroup {
    type Element: Copy + Eq + fmt::Debug;
    type Scalar: Copy + fmt::Debug;

    /// Canonical curve name, e.g. `prime256v1`.
    fn name(&self) -> &'static str;

    fn generator(&self) -> Self::Element;

    /// Uniformly random group element.
    fn random_element<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Self::Element;

    /// Uniformly random scalar modulo the group order.
    fn random_scalar<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Self::Scalar;

    /// Point addition (the group operation).
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    fn neg(&self, a: &Self::Element) -> Self::Element;

    /// Scalar exponentiation `base^k`, i.e. scalar multiplication.
    fn exp(&self, base: &Self::Element, k: &Self::Scalar) -> Self::Element;

    /// Plaintext capacity in bytes: the longest message [`Self::encode`]
    /// accepts.
    fn bitsize(&self) -> usize;

    /// Embeds `msg` into a group element.
    fn encode(&self, msg: &[u8]) -> Result<Self::Element>;

    /// Recovers the message embedded by [`Self::encode`].
    fn decode(&self, element: &Self::Element) -> Result<Vec<u8>>;
}

/// Something that runs against a concrete [`CurveGroup`].
///
/// Curves are selected at runtime by [`CurveId`] but every provider is its
/// own type; [`CurveId::visit`] bridges the two.
pub trait CurveVisitor {
    type Output;

    fn visit<G: CurveGroup>(self, group: G) -> Self::Output;
}

/// The named curves the harnesses know about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CurveId {
    Prime256v1,
    Secp256k1,
    Secp384r1,
    Secp521r1,
    Sect233r1,
}

impl CurveId {
    pub const ALL: [CurveId; 5] = [
        CurveId::Prime256v1,
        CurveId::Secp256k1,
        CurveId::Secp384r1,
        CurveId::Secp521r1,
        CurveId::Sect233r1,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            CurveId::Prime256v1 => "prime256v1",
            CurveId::Secp256k1 => "secp256k1",
            CurveId::Secp384r1 => "secp384r1",
            CurveId::Secp521r1 => "secp521r1",
            CurveId::Sect233r1 => "sect233r1",
        }
    }

    /// Instantiates this curve's provider and hands it to `visitor`.
    pub fn visit<V: CurveVisitor>(self, visitor: V) -> V::Output {
        match self {
            CurveId::Prime256v1 => visitor.visit(PrimeGroup::<p256::NistP256>::new(self.name())),
            CurveId::Secp256k1 => visitor.visit(PrimeGroup::<k256::Secp256k1>::new(self.name())),
            CurveId::Secp384r1 => visitor.visit(PrimeGroup::<p384::NistP384>::new(self.name())),
            CurveId::Secp521r1 => visitor.visit(PrimeGroup::<p521::NistP521>::new(self.name())),
            CurveId::Sect233r1 => visitor.visit(Sect233r1),
        }
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CurveId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        CurveId::ALL
            .into_iter()
            .find(|id| id.name() == wanted)
            .ok_or_else(|| Error::InvalidCurve(s.to_string()))
    }
}

// Plaintext embedding shared by all providers.
//
// x = 0x00 || len || msg || zero padding || ctr

pub(crate) fn message_capacity(field_len: usize) -> usize {
    field_len
        .saturating_sub(RESERVED_ENCODING_BYTES)
        .min(u8::MAX as usize)
}

fn embed(x: &mut [u8], msg: &[u8], ctr: u8) -> Result<()> {
    let capacity = message_capacity(x.len());
    if msg.len() > capacity {
        return Err(Error::Encoding { len: msg.len(), capacity });
    }
    x.fill(0);
    x[1] = msg.len() as u8;
    x[2..2 + msg.len()].copy_from_slice(msg);
    let last = x.len() - 1;
    x[last] = ctr;
    Ok(())
}

/// Try-and-increment: bumps the counter byte until `lift` accepts the
/// x-coordinate.
pub(crate) fn embed_with<T>(
    field_len: usize,
    msg: &[u8],
    mut lift: impl FnMut(&[u8]) -> Option<T>,
) -> Result<T> {
    let mut x = vec![0u8; field_len];
    for ctr in 0..=u8::MAX {
        embed(&mut x, msg, ctr)?;
        if let Some(point) = lift(&x) {
            return Ok(point);
        }
    }
    Err(Error::provider("no curve point found for message encoding"))
}

pub(crate) fn extract(x: &[u8]) -> Result<Vec<u8>> {
    let capacity = message_capacity(x.len());
    if x.len() < RESERVED_ENCODING_BYTES || x[0] != 0 || x[1] as usize > capacity {
        return Err(Error::provider("group element does not carry an encoded message"));
    }
    let len = x[1] as usize;
    Ok(x[2..2 + len].to_vec())
}
