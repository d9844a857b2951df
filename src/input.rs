//! Randomised operands for the timed operations.

use rand_core::CryptoRngCore;

use crate::error::{Error, Result};
use crate::provider::CurveGroup;

/// Operands of one arithmetic repetition: `a + b` and `x^y`.
pub struct OperandTuple<G: CurveGroup> {
    pub a: G::Element,
    pub b: G::Element,
    pub x: G::Element,
    pub y: G::Scalar,
}

/// `n` operand tuples split into columns, indexed by repetition.
pub struct OperandBatch<G: CurveGroup> {
    pub a: Vec<G::Element>,
    pub b: Vec<G::Element>,
    pub x: Vec<G::Element>,
    pub y: Vec<G::Scalar>,
}

impl<G: CurveGroup> OperandBatch<G> {
    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }
}

/// Three independent random elements and one independent random scalar.
pub fn arithmetic_operands<G, R>(group: &G, rng: &mut R) -> OperandTuple<G>
where
    G: CurveGroup,
    R: CryptoRngCore + ?Sized,
{
    OperandTuple {
        a: group.random_element(rng),
        b: group.random_element(rng),
        x: group.random_element(rng),
        y: group.random_scalar(rng),
    }
}

/// Pre-generates `n` tuples.
pub fn operand_batch<G, R>(group: &G, n: usize, rng: &mut R) -> OperandBatch<G>
where
    G: CurveGroup,
    R: CryptoRngCore + ?Sized,
{
    let mut batch = OperandBatch {
        a: Vec::with_capacity(n),
        b: Vec::with_capacity(n),
        x: Vec::with_capacity(n),
        y: Vec::with_capacity(n),
    };
    for _ in 0..n {
        let t = arithmetic_operands(group, rng);
        batch.a.push(t.a);
        batch.b.push(t.b);
        batch.x.push(t.x);
        batch.y.push(t.y);
    }
    batch
}

/// A random plaintext filling the group's message space, first byte zero.
pub fn random_message<G, R>(group: &G, rng: &mut R) -> Result<Vec<u8>>
where
    G: CurveGroup,
    R: CryptoRngCore + ?Sized,
{
    let len = group.bitsize();
    if len == 0 {
        return Err(Error::InvalidCurve(group.name().to_string()));
    }
    let mut msg = vec![0u8; len];
    rng.fill_bytes(&mut msg[1..]);
    Ok(msg)
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    use super::*;
    use crate::provider::{CurveId, CurveVisitor, PrimeGroup};

    struct MessageShape<'a>(&'a mut ChaCha20Rng);

    impl CurveVisitor for MessageShape<'_> {
        type Output = (usize, Vec<u8>);

        fn visit<G: CurveGroup>(self, group: G) -> Self::Output {
            (group.bitsize(), random_message(&group, self.0).unwrap())
        }
    }

    #[test]
    fn messages_fit_every_curve() {
        let mut rng = ChaCha20Rng::from_seed([5u8; 32]);
        for id in CurveId::ALL {
            for _ in 0..8 {
                let (bitsize, msg) = id.visit(MessageShape(&mut rng));
                assert_eq!(msg.len(), bitsize, "{id}");
                assert_eq!(msg[0], 0x00, "{id}");
            }
        }
    }

    #[test]
    fn messages_are_random() {
        let group = PrimeGroup::<p256::NistP256>::new("prime256v1");
        let mut rng = ChaCha20Rng::from_seed([6u8; 32]);
        let m1 = random_message(&group, &mut rng).unwrap();
        let m2 = random_message(&group, &mut rng).unwrap();
        assert_ne!(m1, m2);
    }

    #[test]
    fn batch_has_requested_length() {
        let group = PrimeGroup::<k256::Secp256k1>::new("secp256k1");
        let mut rng = ChaCha20Rng::from_seed([8u8; 32]);
        let batch = operand_batch(&group, 5, &mut rng);
        assert_eq!(batch.len(), 5);
        assert_eq!((batch.b.len(), batch.x.len(), batch.y.len()), (5, 5, 5));
        assert_ne!(batch.a[0], batch.b[0]);
    }
}
