use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::cli::commands::{load_settings, SettingsArgs};
use crate::cli::output::OutputFormatter;
use crate::core::report::{load_report, ReportSource};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Report JSON produced by the analyzer (`-` or omitted reads stdin)
    pub report: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", value_parser = ["table", "json"])]
    pub format: String,

    /// Draw a divider between every table row
    #[arg(long)]
    pub all_dividers: bool,

    /// Print only the vulnerability and license summaries
    #[arg(long)]
    pub summary_only: bool,

    /// Also write the report to a timestamped JSON file
    #[arg(long)]
    pub save: bool,

    /// Directory for the saved report (defaults to current directory)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

pub async fn execute(args: &ShowArgs) -> Result<()> {
    let settings = load_settings(&args.settings);
    let mut packages = load_report(&ReportSource::from_arg(args.report.as_ref())).await?;

    let formatter = OutputFormatter::new(settings.theme.clone())
        .with_all_dividers(args.all_dividers || settings.config.all_dividers)
        .with_machine_output(args.format == "json");

    match args.format.as_str() {
        "json" => formatter.display_json(&packages),
        _ => {
            if !args.summary_only {
                formatter.display_table(&mut packages);
            }
            formatter.display_summary(&packages);
        }
    }

    if args.save {
        let dir = args
            .output_dir
            .as_deref()
            .or(settings.config.output_dir.as_deref());
        formatter.save(&packages, dir).await;
    }

    Ok(())
}
