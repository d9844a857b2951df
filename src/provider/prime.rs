//! Prime-field curves backed by the RustCrypto `elliptic-curve` stack.

use std::marker::PhantomData;

use elliptic_curve::group::Curve as _;
use elliptic_curve::point::{AffineCoordinates, DecompressPoint};
use elliptic_curve::subtle::Choice;
use elliptic_curve::{
    AffinePoint, CurveArithmetic, Field, FieldBytes, Group, ProjectivePoint, Scalar,
};
use rand_core::CryptoRngCore;

use super::{embed_with, extract, message_capacity, CurveGroup};
use crate::error::{Error, Result};

/// A short-Weierstrass prime-order curve `C` (`p256::NistP256`, ...).
#[derive(Clone, Copy, Debug)]
pub struct PrimeGroup<C> {
    name: &'static str,
    _curve: PhantomData<C>,
}

impl<C> PrimeGroup<C> {
    pub const fn new(name: &'static str) -> Self {
        Self { name, _curve: PhantomData }
    }
}

fn field_len<C: CurveArithmetic>() -> usize {
    FieldBytes::<C>::default().len()
}

impl<C> CurveGroup for PrimeGroup<C>
where
    C: CurveArithmetic,
    AffinePoint<C>: DecompressPoint<C>,
{
    type Element = ProjectivePoint<C>;
    type Scalar = Scalar<C>;

    fn name(&self) -> &'static str {
        self.name
    }

    fn generator(&self) -> Self::Element {
        ProjectivePoint::<C>::generator()
    }

    fn random_element<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Self::Element {
        ProjectivePoint::<C>::random(rng.as_rngcore())
    }

    fn random_scalar<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Self::Scalar {
        Scalar::<C>::random(rng.as_rngcore())
    }

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        *a + *b
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        -*a
    }

    fn exp(&self, base: &Self::Element, k: &Self::Scalar) -> Self::Element {
        *base * *k
    }

    fn bitsize(&self) -> usize {
        message_capacity(field_len::<C>())
    }

    fn encode(&self, msg: &[u8]) -> Result<Self::Element> {
        embed_with(field_len::<C>(), msg, |x| {
            let x = FieldBytes::<C>::clone_from_slice(x);
            Option::<AffinePoint<C>>::from(AffinePoint::<C>::decompress(&x, Choice::from(0)))
                .map(ProjectivePoint::<C>::from)
        })
    }

    fn decode(&self, element: &Self::Element) -> Result<Vec<u8>> {
        if bool::from(element.is_identity()) {
            return Err(Error::provider("cannot decode the identity element"));
        }
        extract(element.to_affine().x().as_ref())
    }
}
