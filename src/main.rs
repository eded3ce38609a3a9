use anyhow::Result;
use clap::Parser;

use transit_atlas::cli::{Cli, Commands};
use transit_atlas::commands::{process, render};

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Process(args) => process(&cli, args),
        Commands::Render(args) => render(&cli, args),
    }
}
