//! sect233r1 (NIST B-233), the binary-field curve of the benchmark set.
//!
//! `E: y^2 + xy = x^3 + x^2 + b` over `GF(2^233)`, reduction polynomial
//! `f(z) = z^233 + z^74 + 1`. Field elements are four little-endian `u64`
//! limbs; points are kept in affine coordinates and inverses use the
//! Itoh-Tsujii chain. Constants are the SEC 2 domain parameters.

use std::ops::{Add, Mul, Neg};

use rand_core::CryptoRngCore;

use super::{embed_with, extract, message_capacity, CurveGroup};
use crate::error::{Error, Result};

/// Field element size in bytes (233 bits, big-endian).
pub const FIELD_BYTES: usize = 30;

/// Extension degree `m` of the field.
const FIELD_DEGREE: usize = 233;

/// Mask for the top limb: bits 192..233.
const TOP_MASK: u64 = (1 << 41) - 1;

const B: FieldElement = FieldElement([
    0x81fe115f7d8f90ad,
    0x213b333b20e9ce42,
    0x332c7f8c0923bb58,
    0x00000066647ede6c,
]);

const GX: FieldElement = FieldElement([
    0xf8f8eb7371fd558b,
    0x5fef65bc391f8b36,
    0x8313bb2139f1bb75,
    0x000000fac9dfcbac,
]);

const GY: FieldElement = FieldElement([
    0x36716f7e01f81052,
    0xbf8a0beff867a7ca,
    0x03350678e58528be,
    0x000001006a08a419,
]);

/// Order of the base point.
const N: [u64; 4] = [
    0x22031d2603cfe0d7,
    0x0013e974e72f8a69,
    0x0000000000000000,
    0x0000010000000000,
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldElement([u64; 4]);

impl FieldElement {
    pub const ZERO: Self = Self([0; 4]);
    pub const ONE: Self = Self([1, 0, 0, 0]);

    /// Parses a 30-byte big-endian encoding; values of 233 bits or more are
    /// rejected.
    pub fn from_be_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != FIELD_BYTES || bytes[0] & 0xfe != 0 {
            return None;
        }
        let mut limbs = [0u64; 4];
        for (k, &byte) in bytes.iter().enumerate() {
            let pos = FIELD_BYTES - 1 - k;
            limbs[pos / 8] |= (byte as u64) << (8 * (pos % 8));
        }
        Some(Self(limbs))
    }

    pub fn to_be_bytes(&self) -> [u8; FIELD_BYTES] {
        let mut out = [0u8; FIELD_BYTES];
        for (k, byte) in out.iter_mut().enumerate() {
            let pos = FIELD_BYTES - 1 - k;
            *byte = (self.0[pos / 8] >> (8 * (pos % 8))) as u8;
        }
        out
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; 4]
    }

    pub fn square(&self) -> Self {
        let mut c = [0u64; 8];
        for (i, &limb) in self.0.iter().enumerate() {
            c[2 * i] = spread(limb as u32);
            c[2 * i + 1] = spread((limb >> 32) as u32);
        }
        reduce(c)
    }

    fn square_n(&self, n: usize) -> Self {
        let mut r = *self;
        for _ in 0..n {
            r = r.square();
        }
        r
    }

    /// Multiplicative inverse, `a^(2^233 - 2)`. Zero maps to zero.
    pub fn invert(&self) -> Self {
        // b_k = a^(2^k - 1), built along 1, 2, 3, 6, 7, 14, 28, 29, 58, 116, 232.
        let a = *self;
        let b2 = a.square() * a;
        let b3 = b2.square() * a;
        let b6 = b3.square_n(3) * b3;
        let b7 = b6.square() * a;
        let b14 = b7.square_n(7) * b7;
        let b28 = b14.square_n(14) * b14;
        let b29 = b28.square() * a;
        let b58 = b29.square_n(29) * b29;
        let b116 = b58.square_n(58) * b58;
        let b232 = b116.square_n(116) * b116;
        b232.square()
    }

    /// The unique square root, `a^(2^232)`.
    pub fn sqrt(&self) -> Self {
        self.square_n(FIELD_DEGREE - 1)
    }

    /// Half-trace; solves `z^2 + z = self` whenever the trace is zero.
    fn half_trace(&self) -> Self {
        let mut h = *self;
        let mut t = *self;
        for _ in 0..(FIELD_DEGREE - 1) / 2 {
            t = t.square().square();
            h = h + t;
        }
        h
    }
}

impl Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self([
            self.0[0] ^ rhs.0[0],
            self.0[1] ^ rhs.0[1],
            self.0[2] ^ rhs.0[2],
            self.0[3] ^ rhs.0[3],
        ])
    }
}

impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut c = [0u64; 8];
        for (i, &a) in self.0.iter().enumerate() {
            let table = clmul_table(a);
            for (j, &b) in rhs.0.iter().enumerate() {
                let p = clmul(&table, b);
                c[i + j] ^= p as u64;
                c[i + j + 1] ^= (p >> 64) as u64;
            }
        }
        reduce(c)
    }
}

/// Multiples of `a` by every 4-bit polynomial.
fn clmul_table(a: u64) -> [u128; 16] {
    let mut u = [0u128; 16];
    u[1] = a as u128;
    for i in 2..16 {
        u[i] = if i & 1 == 0 { u[i >> 1] << 1 } else { u[i - 1] ^ u[1] };
    }
    u
}

/// Carry-less 64x64 -> 128 multiply, one nibble of `b` at a time.
fn clmul(table: &[u128; 16], b: u64) -> u128 {
    let mut r = 0u128;
    for j in (0..16).rev() {
        r = (r << 4) ^ table[((b >> (4 * j)) & 0xf) as usize];
    }
    r
}

/// Interleaves zero bits: the square of a polynomial with 32 coefficients.
fn spread(x: u32) -> u64 {
    let mut x = x as u64;
    x = (x | (x << 16)) & 0x0000_ffff_0000_ffff;
    x = (x | (x << 8)) & 0x00ff_00ff_00ff_00ff;
    x = (x | (x << 4)) & 0x0f0f_0f0f_0f0f_0f0f;
    x = (x | (x << 2)) & 0x3333_3333_3333_3333;
    x = (x | (x << 1)) & 0x5555_5555_5555_5555;
    x
}

/// Reduces a product of up to 466 bits modulo `z^233 + z^74 + 1`.
fn reduce(mut c: [u64; 8]) -> FieldElement {
    // z^(64i + j) = z^(64(i-4) + 23 + j) + z^(64(i-3) + 33 + j)
    for i in (4..8).rev() {
        let t = c[i];
        c[i - 4] ^= t << 23;
        c[i - 3] ^= (t >> 41) ^ (t << 33);
        c[i - 2] ^= t >> 31;
    }
    let t = c[3] >> 41;
    c[0] ^= t;
    c[1] ^= t << 10;
    c[3] &= TOP_MASK;
    FieldElement([c[0], c[1], c[2], c[3]])
}

/// A point of B-233 in affine coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Point {
    Identity,
    Affine { x: FieldElement, y: FieldElement },
}

impl Point {
    pub const GENERATOR: Self = Point::Affine { x: GX, y: GY };

    pub fn is_on_curve(&self) -> bool {
        match *self {
            Point::Identity => true,
            Point::Affine { x, y } => {
                let x2 = x.square();
                y.square() + x * y == x2 * x + x2 + B
            }
        }
    }

    pub fn double(&self) -> Self {
        match *self {
            Point::Identity => Point::Identity,
            Point::Affine { x, .. } if x.is_zero() => Point::Identity,
            Point::Affine { x, y } => {
                let lambda = x + y * x.invert();
                let x3 = lambda.square() + lambda + FieldElement::ONE;
                let y3 = x.square() + lambda * x3 + x3;
                Point::Affine { x: x3, y: y3 }
            }
        }
    }

    /// Double-and-add over the little-endian limbs of `k`.
    fn mul_limbs(&self, k: &[u64; 4]) -> Self {
        let mut acc = Point::Identity;
        for bit in (0..256).rev() {
            acc = acc.double();
            if (k[bit / 64] >> (bit % 64)) & 1 == 1 {
                acc = acc + *self;
            }
        }
        acc
    }

    /// Some point with the given x-coordinate, if one exists.
    fn lift_x(x: FieldElement) -> Option<Self> {
        if x.is_zero() {
            return Some(Point::Affine { x, y: B.sqrt() });
        }
        let beta = x + FieldElement::ONE + B * x.square().invert();
        let z = beta.half_trace();
        if z.square() + z != beta {
            return None;
        }
        Some(Point::Affine { x, y: x * z })
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Point::Identity, q) => q,
            (p, Point::Identity) => p,
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => {
                if x1 == x2 {
                    return if y2 == x1 + y1 { Point::Identity } else { self.double() };
                }
                let lambda = (y1 + y2) * (x1 + x2).invert();
                let x3 = lambda.square() + lambda + x1 + x2 + FieldElement::ONE;
                let y3 = lambda * (x1 + x3) + x3 + y1;
                Point::Affine { x: x3, y: y3 }
            }
        }
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Point::Identity => Point::Identity,
            Point::Affine { x, y } => Point::Affine { x, y: x + y },
        }
    }
}

/// Scalar modulo the base-point order, little-endian limbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scalar([u64; 4]);

impl Scalar {
    /// Uniform in `[1, n)` by rejection sampling.
    pub fn random<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Self {
        loop {
            let mut limbs = [0u64; 4];
            for limb in limbs.iter_mut() {
                *limb = rng.next_u64();
            }
            limbs[3] &= TOP_MASK;
            if limbs != [0; 4] && less_than(&limbs, &N) {
                return Scalar(limbs);
            }
        }
    }

    pub fn from_u64(v: u64) -> Self {
        Scalar([v, 0, 0, 0])
    }
}

fn less_than(a: &[u64; 4], b: &[u64; 4]) -> bool {
    for i in (0..4).rev() {
        if a[i] != b[i] {
            return a[i] < b[i];
        }
    }
    false
}

/// The sect233r1 provider.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sect233r1;

impl CurveGroup for Sect233r1 {
    type Element = Point;
    type Scalar = Scalar;

    fn name(&self) -> &'static str {
        "sect233r1"
    }

    fn generator(&self) -> Point {
        Point::GENERATOR
    }

    /// A random x-coordinate, lifted and cleared of the cofactor 2.
    fn random_element<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Point {
        loop {
            let mut bytes = [0u8; FIELD_BYTES];
            rng.fill_bytes(&mut bytes);
            bytes[0] &= 0x01;
            if let Some(p) = FieldElement::from_be_bytes(&bytes).and_then(Point::lift_x) {
                let q = p.double();
                if q != Point::Identity {
                    return q;
                }
            }
        }
    }

    fn random_scalar<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Scalar {
        Scalar::random(rng)
    }

    fn add(&self, a: &Point, b: &Point) -> Point {
        *a + *b
    }

    fn neg(&self, a: &Point) -> Point {
        -*a
    }

    fn exp(&self, base: &Point, k: &Scalar) -> Point {
        base.mul_limbs(&k.0)
    }

    fn bitsize(&self) -> usize {
        message_capacity(FIELD_BYTES)
    }

    fn encode(&self, msg: &[u8]) -> Result<Point> {
        embed_with(FIELD_BYTES, msg, |x| {
            FieldElement::from_be_bytes(x).and_then(Point::lift_x)
        })
    }

    fn decode(&self, element: &Point) -> Result<Vec<u8>> {
        match element {
            Point::Identity => Err(Error::provider("cannot decode the identity element")),
            Point::Affine { x, .. } => extract(&x.to_be_bytes()),
        }
    }
}
