//! Point addition and scalar multiplication cost per curve.

use std::fs;
use std::io;

use clap::Parser;
use ecbench::cli::BenchArgs;
use ecbench::logging::setup_system_logger;
use ecbench::report::{self, ARITHMETIC_LABELS};
use ecbench::{arithmetic_cost, TO_MICRO};
use tracing::info;

fn main() -> Result<(), ecbench::Error> {
    let args = BenchArgs::parse();
    setup_system_logger(args.log_level());
    let out = args.out.clone();
    let config = args.into_config()?;

    println!("{}", report::arithmetic_banner(config.repeat));
    let table = arithmetic_cost(&config, &mut io::stdout())?;
    print!("{}", report::render(&table, &ARITHMETIC_LABELS, TO_MICRO));

    if let Some(path) = out {
        fs::write(&path, report::render_rows(&table, &ARITHMETIC_LABELS, config.warmup))?;
        info!(path = %path.display(), "statistics written");
    }
    Ok(())
}
