use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::error::ReportError;

pub const CONFIG_FILE_NAME: &str = ".ncm-report.yml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub all_dividers: bool,
    pub color: Option<bool>,
    pub output_dir: Option<PathBuf>,
    pub palette: PaletteConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub positive: Option<String>,
    pub negative: Option<String>,
    pub warning: Option<String>,
    pub neutral: Option<String>,
    pub base: Option<String>,
    pub severity: SeverityPaletteConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityPaletteConfig {
    pub critical: Option<String>,
    pub high: Option<String>,
    pub medium: Option<String>,
    pub low: Option<String>,
    pub none: Option<String>,
}

impl Config {
    /// Config file to use: the explicit one, else `.ncm-report.yml` in `dir`.
    pub fn locate(dir: &Path, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(|| dir.join(CONFIG_FILE_NAME))
    }

    /// Loads `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| ReportError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_yaml::from_str::<Config>(&content).map_err(|e| ReportError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
