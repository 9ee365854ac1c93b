use crate::core::error::ReportError;
use crate::core::report::PackageResult;

pub trait Reporter {
    /// Reporter name for logs
    fn name(&self) -> &str;

    /// Render the report as terminal lines
    fn render(&self, packages: &[PackageResult]) -> Result<Vec<String>, ReportError>;
}
