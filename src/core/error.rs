use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Serializing the report for the terminal failed.
    #[error("Unable to serialize report: {0}")]
    UnableToParseReport(#[source] serde_json::Error),

    /// Serializing or writing the report file failed.
    #[error("Unable to write report to {}: {source}", path.display())]
    UnableToFormatOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to read report from {origin}: {source}")]
    UnableToReadReport {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Report from {origin} is not valid: {source}")]
    MalformedReport {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration in {}: {message}", path.display())]
    InvalidConfig { path: PathBuf, message: String },
}

impl ReportError {
    /// Stable name of the failure, shown next to the message.
    pub fn kind(&self) -> &'static str {
        match self {
            ReportError::UnableToParseReport(_) => "UnableToParseReport",
            ReportError::UnableToFormatOutput { .. } => "UnableToFormatOutput",
            ReportError::UnableToReadReport { .. } => "UnableToReadReport",
            ReportError::MalformedReport { .. } => "MalformedReport",
            ReportError::InvalidConfig { .. } => "InvalidConfig",
        }
    }
}
