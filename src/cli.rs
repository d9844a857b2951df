//! Command-line flags shared by both binaries.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{HarnessConfig, DEFAULT_CURVES, REPEAT};
use crate::error::Result;
use crate::logging::LevelFilter;
use crate::modp::{GroupSize, ModpConfig, DEFAULT_SIZES};

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct BenchArgs {
    /// Timed repetitions per operation and curve.
    #[arg(long, default_value_t = REPEAT)]
    pub repeat: usize,

    /// Comma-separated curve names, in report order. Defaults to all five.
    #[arg(long, value_delimiter = ',')]
    pub curves: Vec<String>,

    /// Untimed iterations per operation before sampling.
    #[arg(long = "warmup-iters", default_value_t = 0)]
    pub warmup_iters: usize,

    /// Derive every curve's random stream from this seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also write the extended statistics rows to this file.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Log at debug level instead of warn.
    #[arg(short, long)]
    pub verbose: bool,
}

impl BenchArgs {
    pub fn into_config(self) -> Result<HarnessConfig> {
        let config = HarnessConfig {
            repeat: self.repeat,
            curves: DEFAULT_CURVES.to_vec(),
            warmup: self.warmup_iters,
            seed: self.seed,
        };
        if self.curves.is_empty() {
            Ok(config)
        } else {
            config.with_curve_names(&self.curves[..])
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::WARN
        }
    }
}

/// Flags of `bench_modp`.
#[derive(Debug, Parser)]
#[command(version, about = "Modular multiplication and exponentiation cost in prime-order groups")]
pub struct ModpArgs {
    /// Timed repetitions per operation and group.
    #[arg(long, default_value_t = REPEAT)]
    pub repeat: usize,

    /// Comma-separated `order:modulus` bit sizes, e.g. `160:1024,256:2048`.
    /// Defaults to 160:1024, 192:2048, 256:2048 and 256:4096.
    #[arg(long, value_delimiter = ',')]
    pub sizes: Vec<String>,

    /// Untimed iterations per operation before sampling.
    #[arg(long = "warmup-iters", default_value_t = 0)]
    pub warmup_iters: usize,

    /// Derive every group's random stream from this seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also write the extended statistics rows to this file.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Log at debug level instead of warn.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ModpArgs {
    pub fn into_config(self) -> Result<ModpConfig> {
        let sizes = if self.sizes.is_empty() {
            DEFAULT_SIZES.to_vec()
        } else {
            self.sizes.iter().map(|s| s.parse::<GroupSize>()).collect::<Result<_>>()?
        };
        Ok(ModpConfig { repeat: self.repeat, sizes, warmup: self.warmup_iters, seed: self.seed })
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::WARN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CurveSpec;
    use crate::error::Error;
    use crate::provider::CurveId;

    fn parse(args: &[&str]) -> BenchArgs {
        BenchArgs::try_parse_from(std::iter::once("bench").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_flags_is_the_reference_run() {
        let args = parse(&[]);
        assert_eq!(args.log_level(), LevelFilter::WARN);
        assert!(args.out.is_none());
        assert_eq!(args.into_config().unwrap(), HarnessConfig::default());
    }

    #[test]
    fn flags_map_onto_config() {
        let args = parse(&[
            "--repeat",
            "3",
            "--curves",
            "sect233r1,prime256v1",
            "--warmup-iters",
            "2",
            "--seed",
            "9",
            "-v",
        ]);
        assert_eq!(args.log_level(), LevelFilter::DEBUG);
        let config = args.into_config().unwrap();
        assert_eq!(config.repeat, 3);
        assert_eq!(config.warmup, 2);
        assert_eq!(config.seed, Some(9));
        assert_eq!(
            config.curves,
            vec![CurveSpec::new(CurveId::Sect233r1), CurveSpec::new(CurveId::Prime256v1)]
        );
    }

    #[test]
    fn unknown_curve_is_reported() {
        let err = parse(&["--curves", "p256"]).into_config().unwrap_err();
        assert!(matches!(err, Error::InvalidCurve(ref name) if name == "p256"));
    }

    #[test]
    fn modp_defaults_and_sizes() {
        let args = ModpArgs::try_parse_from(["bench_modp"]).unwrap();
        assert_eq!(args.into_config().unwrap(), ModpConfig::default());

        let args =
            ModpArgs::try_parse_from(["bench_modp", "--sizes", "128:256,160:1024", "--repeat", "5"]).unwrap();
        let config = args.into_config().unwrap();
        assert_eq!(config.repeat, 5);
        assert_eq!(config.sizes, vec![GroupSize::new(128, 256), GroupSize::new(160, 1024)]);

        let args = ModpArgs::try_parse_from(["bench_modp", "--sizes", "1024"]).unwrap();
        assert!(matches!(args.into_config(), Err(Error::InvalidGroup(_))));
    }

    #[test]
    fn malformed_repeat_is_a_usage_error() {
        assert!(BenchArgs::try_parse_from(["bench", "--repeat", "many"]).is_err());
    }
}
