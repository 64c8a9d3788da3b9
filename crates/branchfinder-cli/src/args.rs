use branchfinder_core::ConfigArgs;
use clap::Parser;

/// CLI arguments for branchfinder
#[derive(Debug, Parser)]
#[command(
    name = "branchfinder",
    version,
    about = "Find bank branches by state, city or branch name, with an OpenStreetMap fallback"
)]
pub struct CliArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Run a single query, print the outcome and exit instead of prompting
    #[arg(short = 'q', long = "query")]
    pub query: Option<String>,
}
