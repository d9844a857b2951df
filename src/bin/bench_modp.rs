//! Modular multiplication and exponentiation cost in prime-order subgroups
//! of `Z_p^*`.

use std::fs;
use std::io;

use clap::Parser;
use ecbench::cli::ModpArgs;
use ecbench::logging::setup_system_logger;
use ecbench::modp::modp_cost;
use ecbench::report;
use tracing::info;

fn main() -> Result<(), ecbench::Error> {
    let args = ModpArgs::parse();
    setup_system_logger(args.log_level());
    let out = args.out.clone();
    let config = args.into_config()?;

    println!("{}", report::modp_banner(config.repeat));
    let results = modp_cost(&config, &mut io::stdout())?;

    if let Some(path) = out {
        fs::write(&path, report::render_group_rows(&results, config.warmup))?;
        info!(path = %path.display(), "statistics written");
    }
    Ok(())
}
