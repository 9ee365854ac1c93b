pub mod export;
pub mod show;

use clap::Args;
use std::path::{Path, PathBuf};

use crate::cli::output::report_failure;
use crate::core::config::Config;
use crate::core::error::ReportError;
use crate::core::theme::Theme;

#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// Configuration file (defaults to .ncm-report.yml in the current directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

pub struct Settings {
    pub config: Config,
    pub theme: Theme,
}

/// Resolves config and theme. A broken config file is reported and the
/// defaults are used instead.
pub fn load_settings(args: &SettingsArgs) -> Settings {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let no_color_env = std::env::var_os("NO_COLOR").is_some();
    resolve_settings(args, &cwd, no_color_env, report_failure)
}

/// Problems are handed to `report` with a theme that already honors
/// `--no-color` and `NO_COLOR`, and the config's `color` key once the file
/// has been read.
fn resolve_settings(
    args: &SettingsArgs,
    cwd: &Path,
    no_color_env: bool,
    mut report: impl FnMut(&Theme, &ReportError),
) -> Settings {
    let path = Config::locate(cwd, args.config.as_deref());

    let early = Theme::default().with_color(color_enabled(args.no_color, no_color_env, None));
    let config = Config::load(&path).unwrap_or_else(|err| {
        report(&early, &err);
        Config::default()
    });

    let color = color_enabled(args.no_color, no_color_env, config.color);
    let theme = Theme::from_palette(&config.palette, &path).unwrap_or_else(|err| {
        report(&Theme::default().with_color(color), &err);
        Theme::default()
    });

    tracing::debug!(config = %path.display(), color, "Resolved settings");
    Settings {
        theme: theme.with_color(color),
        config,
    }
}

fn color_enabled(no_color_flag: bool, no_color_env: bool, configured: Option<bool>) -> bool {
    !no_color_flag && !no_color_env && configured.unwrap_or(true)
}
