use std::io;

use ecbench::provider::{CurveVisitor, ElGamal};
use ecbench::report::{self, ARITHMETIC_LABELS, ELGAMAL_LABELS};
use ecbench::{
    arithmetic_cost, elgamal_cost, CurveGroup, CurveId, CurveSpec, HarnessConfig, Operation, TO_MICRO,
};
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

fn config(curves: &[CurveId], repeat: usize) -> HarnessConfig {
    HarnessConfig {
        repeat,
        curves: curves.iter().copied().map(CurveSpec::new).collect(),
        ..HarnessConfig::default()
    }
}

#[test]
fn prime256v1_end_to_end() {
    let cfg = config(&[CurveId::Prime256v1], 3);

    let arith = arithmetic_cost(&cfg, &mut io::sink()).unwrap();
    assert_eq!(arith.len(), 1);
    for op in Operation::BOTH {
        let s = arith[0].summary(op);
        let eps = s.max * 1e-12;
        assert_eq!(s.n, 3);
        assert!(s.min - eps <= s.avg && s.avg <= s.max + eps);
    }

    let elgamal = elgamal_cost(&cfg, &mut io::sink()).unwrap();
    assert_eq!((elgamal[0].first.n, elgamal[0].second.n), (3, 3));

    let text = report::render(&elgamal, &ELGAMAL_LABELS, TO_MICRO);
    assert_eq!(text.lines().filter(|l| l.starts_with("prime256v1 ")).count(), 2);
}

#[test]
fn table_follows_configured_order() {
    let order = [CurveId::Secp521r1, CurveId::Prime256v1, CurveId::Secp256k1];
    let table = arithmetic_cost(&config(&order, 2), &mut io::sink()).unwrap();
    let ids: Vec<_> = table.iter().map(|r| r.curve.id).collect();
    assert_eq!(ids, order);
}

#[test]
fn every_default_curve_completes_both_variants() {
    let mut cfg = config(&CurveId::ALL, 2);
    cfg.seed = Some(42);
    let arith = arithmetic_cost(&cfg, &mut io::sink()).unwrap();
    let elgamal = elgamal_cost(&cfg, &mut io::sink()).unwrap();
    assert_eq!(arith.len(), 5);
    assert_eq!(elgamal.len(), 5);
    assert_eq!(elgamal[4].curve.display_name, "sect233r1");

    let rows = report::render_rows(&arith, &ARITHMETIC_LABELS, cfg.warmup);
    assert_eq!(rows.lines().count(), 1 + 5 * 2);
    assert!(rows.lines().nth(1).unwrap().starts_with("prime256v1 add 2 0 "));
}

#[test]
fn progress_then_banner_shapes() {
    let mut progress = Vec::new();
    elgamal_cost(&config(&[CurveId::Sect233r1], 1), &mut progress).unwrap();
    assert_eq!(String::from_utf8(progress).unwrap(), "Benchmarking 'sect233r1'...\n");

    let banner = report::elgamal_banner(10_000);
    assert!(banner.starts_with(
        "Starting benchmark of elgamal encryption and decryption scheme with 10000 operations per test\n"
    ));
    assert!(banner.ends_with(&"-".repeat(100)));
}

struct RoundTrip(u64);

impl CurveVisitor for RoundTrip {
    type Output = bool;

    fn visit<G: CurveGroup>(self, group: G) -> bool {
        let mut rng = ChaCha20Rng::seed_from_u64(self.0);
        let scheme = ElGamal::new(&group);
        let keys = scheme.keygen(&mut rng);
        (0..4).all(|_| {
            let msg = ecbench::input::random_message(&group, &mut rng).unwrap();
            let ct = scheme.encrypt(&keys.public, &msg, &mut rng).unwrap();
            scheme.decrypt(&keys, &ct).unwrap() == msg
        })
    }
}

#[test]
fn elgamal_round_trips_on_every_curve() {
    for (i, id) in CurveId::ALL.into_iter().enumerate() {
        assert!(id.visit(RoundTrip(i as u64)), "{id}");
    }
}

#[test]
fn modp_run_feeds_the_statistics_rows() {
    use ecbench::modp::{modp_cost, GroupSize, ModpConfig};

    let config =
        ModpConfig { repeat: 2, sizes: vec![GroupSize::new(128, 384)], warmup: 0, seed: Some(3) };
    let results = modp_cost(&config, &mut io::sink()).unwrap();
    let rows = report::render_group_rows(&results, config.warmup);
    let lines: Vec<_> = rows.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("q128-p384 mulmod 2 0 "));
    assert!(lines[2].starts_with("q128-p384 powmod 2 0 "));
}
