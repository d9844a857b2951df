//! CPU-time benchmarks of elliptic-curve point arithmetic and EC-ElGamal over
//! five named curves, plus modular multiplication and exponentiation in
//! prime-order subgroups of `Z_p^*`.
//!
//! The `bench_curve` and `bench_elgamal` binaries drive
//! [`harness::arithmetic_cost`] and [`harness::elgamal_cost`] and print the
//! tables built by [`report::render`]; `bench_modp` drives
//! [`modp::modp_cost`].

pub mod cli;
pub mod config;
pub mod error;
pub mod harness;
pub mod input;
pub mod logging;
pub mod modp;
pub mod provider;
pub mod report;
pub mod stats;
pub mod timer;

pub use config::{CurveSpec, HarnessConfig, DEFAULT_CURVES, REPEAT, TO_MICRO};
pub use error::{Error, Result};
pub use harness::{arithmetic_cost, elgamal_cost, CurveResult, Operation, ResultTable};
pub use provider::{CurveGroup, CurveId};
pub use stats::{aggregate, SampleSet, Summary};
