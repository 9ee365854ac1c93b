use std::path::{Path, PathBuf};

use crate::core::error::ReportError;
use crate::core::report::{sort_report, PackageResult};
use crate::core::theme::{Theme, Tone};
use crate::reporters::layout::display_width;
use crate::reporters::traits::Reporter;
use crate::reporters::{
    write_report_file, JsonReporter, LicenseSummary, TableReporter, VulnerabilitySummary,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

pub struct OutputFormatter {
    theme: Theme,
    all_dividers: bool,
    machine_output: bool,
}

impl OutputFormatter {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            all_dividers: false,
            machine_output: false,
        }
    }

    pub fn with_all_dividers(mut self, all_dividers: bool) -> Self {
        self.all_dividers = all_dividers;
        self
    }

    /// Stdout carries data meant for another program (the JSON dump), so
    /// human-facing confirmations move to stderr.
    pub fn with_machine_output(mut self, machine_output: bool) -> Self {
        self.machine_output = machine_output;
        self
    }

    pub fn confirmation_stream(&self) -> Stream {
        if self.machine_output {
            Stream::Stderr
        } else {
            Stream::Stdout
        }
    }

    /// Sorts `packages` in place and prints the risk table.
    pub fn display_table(&self, packages: &mut [PackageResult]) {
        sort_report(packages);
        let reporter = TableReporter::new(&self.theme).with_all_dividers(self.all_dividers);
        println!();
        self.emit(&reporter, packages);
    }

    pub fn display_summary(&self, packages: &[PackageResult]) {
        println!();
        self.emit(&VulnerabilitySummary::new(&self.theme), packages);
        println!();
        self.emit(&LicenseSummary::new(&self.theme), packages);
        println!();
    }

    pub fn display_json(&self, packages: &[PackageResult]) {
        self.emit(&JsonReporter, packages);
    }

    /// Writes the report file. Failures are reported, not returned.
    pub async fn save(&self, packages: &[PackageResult], dir: Option<&Path>) -> Option<PathBuf> {
        match write_report_file(packages, dir).await {
            Ok(path) => {
                let stream = self.confirmation_stream();
                for line in success_box(&self.theme, &path) {
                    match stream {
                        Stream::Stdout => println!("{line}"),
                        Stream::Stderr => eprintln!("{line}"),
                    }
                }
                Some(path)
            }
            Err(err) => {
                self.report_failure(&err);
                None
            }
        }
    }

    pub fn report_failure(&self, err: &ReportError) {
        report_failure(&self.theme, err);
    }

    fn emit(&self, reporter: &dyn Reporter, packages: &[PackageResult]) {
        tracing::debug!(reporter = reporter.name(), packages = packages.len(), "Rendering");
        match reporter.render(packages) {
            Ok(lines) => {
                for line in lines {
                    println!("{line}");
                }
            }
            Err(err) => self.report_failure(&err),
        }
    }
}

/// Shared error reporter: logs the failure and prints it to stderr.
pub fn report_failure(theme: &Theme, err: &ReportError) {
    tracing::error!(kind = err.kind(), error = %err, "Report output failed");
    eprintln!("{}", failure_line(theme, err));
}

pub fn failure_line(theme: &Theme, err: &ReportError) -> String {
    format!(
        "  {} {}: {}",
        theme.bold("ERROR", Tone::Negative),
        err.kind(),
        err
    )
}

/// Confirmation framed in a rounded box.
pub fn success_box(theme: &Theme, path: &Path) -> Vec<String> {
    let body = vec![
        "✓ Report saved".to_string(),
        path.display().to_string(),
    ];
    let inner = body.iter().map(|l| display_width(l)).max().unwrap_or(0) + 2;

    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(theme.paint(&format!("╭{}╮", "─".repeat(inner)), Tone::Positive));
    for text in &body {
        let pad = " ".repeat(inner - 1 - display_width(text));
        lines.push(format!(
            "{} {}{}{}",
            theme.paint("│", Tone::Positive),
            theme.paint(text, Tone::Base),
            pad,
            theme.paint("│", Tone::Positive)
        ));
    }
    lines.push(theme.paint(&format!("╰{}╯", "─".repeat(inner)), Tone::Positive));
    lines
}
