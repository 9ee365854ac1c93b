pub mod file;
pub mod json;
pub mod layout;
pub mod summary;
pub mod table;
pub mod traits;

pub use file::write_report_file;
pub use json::JsonReporter;
pub use summary::{LicenseSummary, VulnerabilitySummary};
pub use table::TableReporter;
