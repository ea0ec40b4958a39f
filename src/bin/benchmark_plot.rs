//! Per-category plots over the concatenation of headerless result files.
#![forbid(unsafe_code)]

use std::io;
use std::process;

use benchplot::cli::{run_per_category, usage, CommonArgs};
use benchplot::logging::init_logging;
use clap::Parser;

const BIN: &str = "benchmark-plot";

#[derive(Parser, Debug)]
#[command(
    name = "benchmark-plot",
    version,
    about = "Plots every benchmark category across the given result files"
)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() {
    let cli = Cli::parse();
    if cli.common.files.is_empty() {
        println!("{}", usage(BIN));
        process::exit(1);
    }
    if let Err(err) = try_main(cli) {
        eprintln!("{BIN} failed: {err}");
        process::exit(1);
    }
}

fn try_main(cli: Cli) -> benchplot::Result<()> {
    init_logging(&cli.common.log_level)?;
    let config = cli.common.resolve_config()?;
    run_per_category(
        &cli.common.files,
        &config,
        cli.common.format,
        io::stdout().lock(),
    )?;
    Ok(())
}
