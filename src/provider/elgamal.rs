//! Textbook ElGamal over any [`CurveGroup`].
//!
//! Messages are embedded into the group with [`CurveGroup::encode`], so the
//! plaintext space is `bitsize()` bytes.

use rand_core::CryptoRngCore;

use super::CurveGroup;
use crate::error::Result;

/// Public key `(g, h = g^x)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey<E> {
    pub g: E,
    pub h: E,
}

/// Secret exponent `x`.
#[derive(Clone, Copy, Debug)]
pub struct SecretKey<S> {
    x: S,
}

/// The key pair produced by [`ElGamal::keygen`].
pub struct KeyPair<G: CurveGroup> {
    pub public: PublicKey<G::Element>,
    pub secret: SecretKey<G::Scalar>,
}

/// `(c1, c2) = (g^y, M * h^y)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ciphertext<E> {
    pub c1: E,
    pub c2: E,
}

pub struct ElGamal<'a, G> {
    group: &'a G,
}

impl<'a, G: CurveGroup> ElGamal<'a, G> {
    pub fn new(group: &'a G) -> Self {
        Self { group }
    }

    pub fn keygen<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> KeyPair<G> {
        let g = self.group.random_element(rng);
        let x = self.group.random_scalar(rng);
        let h = self.group.exp(&g, &x);
        KeyPair { public: PublicKey { g, h }, secret: SecretKey { x } }
    }

    /// Fails with [`crate::Error::Encoding`] if `msg` is longer than the
    /// group's plaintext space.
    pub fn encrypt<R: CryptoRngCore + ?Sized>(
        &self,
        pk: &PublicKey<G::Element>,
        msg: &[u8],
        rng: &mut R,
    ) -> Result<Ciphertext<G::Element>> {
        let m = self.group.encode(msg)?;
        let y = self.group.random_scalar(rng);
        let c1 = self.group.exp(&pk.g, &y);
        let shared = self.group.exp(&pk.h, &y);
        let c2 = self.group.add(&m, &shared);
        Ok(Ciphertext { c1, c2 })
    }

    pub fn decrypt(&self, keys: &KeyPair<G>, ct: &Ciphertext<G::Element>) -> Result<Vec<u8>> {
        let shared = self.group.exp(&ct.c1, &keys.secret.x);
        let m = self.group.add(&ct.c2, &self.group.neg(&shared));
        self.group.decode(&m)
    }
}
