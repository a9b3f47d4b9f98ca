use anyhow::Result;
use clap::{Parser, Subcommand};

mod logging;
mod rank;
mod serve;

use logging::*;
use rank::*;
use serve::*;

#[derive(Debug, Clone, Subcommand)]
pub enum CliSubcommand {
    Serve(ServeCommand),
    Rank(RankCommand),
}

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    subcommand: CliSubcommand,
}

impl Cli {
    pub fn new() -> Self {
        Self::parse()
    }

    pub async fn run(self) -> Result<()> {
        setup_tracing();

        match self.subcommand {
            CliSubcommand::Serve(cmd) => cmd.run().await,
            CliSubcommand::Rank(cmd) => cmd.run().await,
        }
    }
}
