use std::collections::BTreeSet;

use crate::core::error::ReportError;
use crate::core::report::{PackageResult, SeverityCounts};
use crate::core::severity::Severity;
use crate::core::theme::{Theme, Tone};
use crate::reporters::layout::{pad, Align};
use crate::reporters::traits::Reporter;

/// Width of the right-aligned count column in the severity lines.
const COUNT_WIDTH: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VulnerabilityTotals {
    pub counts: SeverityCounts,
    pub affected: BTreeSet<String>,
}

impl VulnerabilityTotals {
    /// Sums security failures over every record, published or not.
    pub fn collect(packages: &[PackageResult]) -> Self {
        let mut totals = Self::default();
        for pkg in packages {
            let counts = SeverityCounts::of_security(pkg.failures());
            if counts.total() > 0 {
                totals.affected.insert(pkg.name.clone());
            }
            totals.counts.merge(&counts);
        }
        totals
    }

    pub fn total(&self) -> usize {
        self.counts.total()
    }
}

pub struct VulnerabilitySummary<'a> {
    theme: &'a Theme,
}

impl<'a> VulnerabilitySummary<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Reporter for VulnerabilitySummary<'_> {
    fn name(&self) -> &str {
        "vulnerability summary"
    }

    fn render(&self, packages: &[PackageResult]) -> Result<Vec<String>, ReportError> {
        let totals = VulnerabilityTotals::collect(packages);
        let total = totals.total();

        let mut headline = format!("{} found", plural(total, "vulnerability", "vulnerabilities"));
        if !totals.affected.is_empty() {
            headline.push_str(&format!(
                " in {}",
                plural(totals.affected.len(), "module", "modules")
            ));
        }
        let headline = if total == 0 {
            format!("{} {}", self.theme.paint("✓", Tone::Positive), headline)
        } else {
            format!(
                "{} {}",
                self.theme.paint("⚠", Tone::Warning),
                self.theme.bold(&headline, Tone::Base)
            )
        };

        let mut lines = vec![headline];
        for severity in Severity::BUCKETS {
            lines.push(format!(
                "  {} {:<9}{}",
                self.theme.paint("■", Tone::Severity(severity)),
                severity.title(),
                pad(&totals.counts.get(severity).to_string(), COUNT_WIDTH, Align::Right)
            ));
        }
        Ok(lines)
    }
}

pub struct LicenseSummary<'a> {
    theme: &'a Theme,
}

impl<'a> LicenseSummary<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Reporter for LicenseSummary<'_> {
    fn name(&self) -> &str {
        "license summary"
    }

    fn render(&self, packages: &[PackageResult]) -> Result<Vec<String>, ReportError> {
        let failing: BTreeSet<&str> = packages
            .iter()
            .filter(|p| p.published)
            .filter(|p| p.license().is_some_and(|l| !l.pass))
            .map(|p| p.name.as_str())
            .collect();
        let unpublished = packages.iter().filter(|p| !p.published).count();

        let mut lines = Vec::new();
        if failing.is_empty() {
            lines.push(format!(
                "{} 0 license risks found",
                self.theme.paint("✓", Tone::Positive)
            ));
        } else {
            lines.push(format!(
                "{} {}",
                self.theme.paint("✗", Tone::Negative),
                self.theme.bold(
                    &format!(
                        "{} found",
                        plural(failing.len(), "license risk", "license risks")
                    ),
                    Tone::Base
                )
            ));
            for name in &failing {
                lines.push(format!("  {} {}", self.theme.paint("-", Tone::Neutral), name));
            }
        }
        if unpublished > 0 {
            lines.push(self.theme.paint(
                &format!(
                    "  {} without registry data",
                    plural(unpublished, "module", "modules")
                ),
                Tone::Neutral,
            ));
        }
        Ok(lines)
    }
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}
