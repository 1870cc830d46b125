use anyhow::Result;
use clap::Parser;
use cpf_ledger::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    Cli::parse().run().await
}
