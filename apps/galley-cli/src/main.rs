//! `galley` binary entry point.

use clap::Parser;
use galley_cli::{init_tracing, run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = run(cli)?;
    print!("{output}");
    Ok(())
}
