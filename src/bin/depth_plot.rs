//! Time against depth per update bucket, one panel per labeled run.
#![forbid(unsafe_code)]

use std::io;
use std::process;

use benchplot::cli::{run_update_buckets, usage, CommonArgs};
use benchplot::logging::init_logging;
use clap::Parser;

const BIN: &str = "depth-plot";

#[derive(Parser, Debug)]
#[command(
    name = "depth-plot",
    version,
    about = "Plots time against depth for each update bucket of headered result files"
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
    run_update_buckets(
        &cli.common.files,
        &config,
        cli.common.format,
        io::stdout().lock(),
    )?;
    Ok(())
}
