use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use ordkit::{
    demo::{self, Console},
    Record,
};

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_max_level(cli.log_level())
        .init();

    let stdout = io::stdout().lock();

    let mut stdout = match &cli.record {
        Some(literal) => {
            let record = Record::parse(literal).context("Failed to parse --record")?;
            info!(fields = record.size(), "converting record");

            let mut console = Console::new(stdout, cli.annotate);
            demo::convert_record(&mut console, &record).context("Failed to write to stdout")?;
            console.into_inner()
        }
        None => {
            let options = cli.demo_options();
            info!(?options, "running walkthrough");
            demo::run(stdout, &options).context("Failed to write to stdout")?
        }
    };

    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}
