use crate::core::error::ReportError;
use crate::core::report::PackageResult;
use crate::reporters::traits::Reporter;

/// Raw report dump for machine consumers.
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &str {
        "json"
    }

    fn render(&self, packages: &[PackageResult]) -> Result<Vec<String>, ReportError> {
        let pretty =
            serde_json::to_string_pretty(packages).map_err(ReportError::UnableToParseReport)?;
        Ok(vec![pretty])
    }
}
