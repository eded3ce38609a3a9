use std::path::PathBuf;

use crate::catalogue::MissingStopPolicy;

/// Transit catalogue CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "transit-atlas", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Run the full query pipeline over a JSON document
    Process(ProcessArgs),

    /// Render only the network map of a JSON document as SVG
    Render(RenderArgs),
}

#[derive(clap::Args, Debug)]
pub struct ProcessArgs {
    /// Input document; omitted or "-" reads stdin
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// How to treat route stops missing from the stop table
    #[arg(long, value_enum, default_value_t = MissingStopArg::Warn)]
    pub missing_stop: MissingStopArg,
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Input document; omitted or "-" reads stdin
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// How to treat route stops missing from the stop table
    #[arg(long, value_enum, default_value_t = MissingStopArg::Warn)]
    pub missing_stop: MissingStopArg,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingStopArg {
    Skip,
    Warn,
    Reject,
}

impl From<MissingStopArg> for MissingStopPolicy {
    fn from(arg: MissingStopArg) -> Self {
        match arg {
            MissingStopArg::Skip => MissingStopPolicy::Skip,
            MissingStopArg::Warn => MissingStopPolicy::Warn,
            MissingStopArg::Reject => MissingStopPolicy::Reject,
        }
    }
}
