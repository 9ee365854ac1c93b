use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::cli::commands::{load_settings, SettingsArgs};
use crate::cli::output::OutputFormatter;
use crate::core::report::{load_report, ReportSource};

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Report JSON produced by the analyzer (`-` or omitted reads stdin)
    pub report: Option<PathBuf>,

    /// Directory to write into (defaults to current directory)
    #[arg(long, short)]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

pub async fn execute(args: &ExportArgs) -> Result<()> {
    let settings = load_settings(&args.settings);
    let packages = load_report(&ReportSource::from_arg(args.report.as_ref())).await?;

    let dir = args
        .output_dir
        .as_deref()
        .or(settings.config.output_dir.as_deref());
    OutputFormatter::new(settings.theme)
        .save(&packages, dir)
        .await;

    Ok(())
}
