use std::path::{Path, PathBuf};

use crate::core::error::ReportError;
use crate::core::report::PackageResult;
use crate::utils::fs::{epoch_millis, report_file_name, resolve_output_dir};

/// Writes the report as compact JSON to
/// `{dir}/ncm-score-report-{millis}.json` and returns the path written.
pub async fn write_report_file(
    packages: &[PackageResult],
    dir: Option<&Path>,
) -> Result<PathBuf, ReportError> {
    let fallback = || PathBuf::from(report_file_name(epoch_millis()));
    let dir = resolve_output_dir(dir).map_err(|source| ReportError::UnableToFormatOutput {
        path: fallback(),
        source,
    })?;
    let path = dir.join(report_file_name(epoch_millis()));

    let body = serde_json::to_string(packages).map_err(|e| ReportError::UnableToFormatOutput {
        path: path.clone(),
        source: e.into(),
    })?;

    tokio::fs::write(&path, body)
        .await
        .map_err(|source| ReportError::UnableToFormatOutput {
            path: path.clone(),
            source,
        })?;
    tracing::info!(path = %path.display(), packages = packages.len(), "Wrote report file");
    Ok(path)
}
