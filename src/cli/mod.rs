pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ncm-report", version, about = "Render dependency risk reports")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the risk table and summaries for a report
    Show(commands::show::ShowArgs),
    /// Write a report to a timestamped JSON file
    Export(commands::export::ExportArgs),
}
