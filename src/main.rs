use anyhow::Result;
use clap::Parser;
use condo_ledger::cli::Cli;
use condo_ledger::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_subscriber(cli.verbose);
    cli.run().await
}
