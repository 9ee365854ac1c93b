use crate::core::error::ReportError;
use crate::core::report::{compare_risk, License, PackageResult, SeverityCounts};
use crate::core::severity::Severity;
use crate::core::theme::{Theme, Tone};
use crate::reporters::layout::{display_width, truncate, Cell, Column, TableLayout, ELLIPSIS};
use crate::reporters::traits::Reporter;

pub const COLUMNS: [Column; 4] = [
    Column::left("Module Name", 40),
    Column::left("Risk Score", 12),
    Column::left("License", 23),
    Column::left("Security", 15),
];

const METER_SLOTS: u8 = 4;
const METER_FILLED: &str = "■";
const METER_EMPTY: &str = "□";
const PASS: &str = "✓";
const FAIL: &str = "✗";

pub struct TableReporter<'a> {
    theme: &'a Theme,
    all_dividers: bool,
}

impl<'a> TableReporter<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            all_dividers: false,
        }
    }

    pub fn with_all_dividers(mut self, all_dividers: bool) -> Self {
        self.all_dividers = all_dividers;
        self
    }
}

impl Reporter for TableReporter<'_> {
    fn name(&self) -> &str {
        "table"
    }

    fn render(&self, packages: &[PackageResult]) -> Result<Vec<String>, ReportError> {
        let mut sorted: Vec<&PackageResult> = packages.iter().collect();
        sorted.sort_by(|a, b| compare_risk(a, b));

        let table = TableLayout::new(&COLUMNS, self.theme);
        let mut lines = vec![table.top(), table.header()];
        if !sorted.is_empty() {
            lines.push(table.divider());
        }
        for (index, pkg) in sorted.iter().enumerate() {
            if index > 0 && self.all_dividers {
                lines.push(table.divider());
            }
            lines.push(table.row(&package_cells(pkg)));
        }
        lines.push(table.bottom());
        Ok(lines)
    }
}

fn package_cells(pkg: &PackageResult) -> Vec<Cell> {
    let name = Cell::text(
        module_label(&pkg.name, &pkg.version, COLUMNS[0].content_width()),
        Tone::Base,
    );
    if !pkg.published {
        return vec![name];
    }

    let license = match pkg.license() {
        Some(license) => license_cell(license, COLUMNS[2].content_width()),
        None => Cell::blank(),
    };
    vec![
        name,
        risk_cell(pkg.max_severity),
        license,
        security_cell(
            &SeverityCounts::of_security(pkg.failures()),
            COLUMNS[3].content_width(),
        ),
    ]
}

/// `name @ version`, shortening the name (never the version) to fit `max`.
pub fn module_label(name: &str, version: &str, max: usize) -> String {
    let full = format!("{name} @ {version}");
    if display_width(&full) <= max {
        return full;
    }
    let suffix = format!("{ELLIPSIS} @ {version}");
    let keep = max.saturating_sub(display_width(&suffix));
    let head: String = name.chars().take(keep).collect();
    format!("{head}{suffix}")
}

fn risk_cell(severity: Severity) -> Cell {
    let filled = severity.ordinal().min(METER_SLOTS);
    let tone = Tone::Severity(severity);
    Cell::blank()
        .push(METER_FILLED.repeat(filled as usize), tone)
        .push(METER_EMPTY.repeat((METER_SLOTS - filled) as usize), Tone::Neutral)
        .push(" ", Tone::Base)
        .push(severity.label(), tone)
}

fn license_cell(license: &License, max: usize) -> Cell {
    let (glyph, tone) = if license.pass {
        (PASS, Tone::Positive)
    } else {
        (FAIL, Tone::Negative)
    };
    let title = truncate(license.short_title(), max.saturating_sub(2));
    Cell::text(glyph, tone).push(" ", Tone::Base).push(title, Tone::Base)
}

/// Badges for non-empty buckets, most severe first. Only whole badges are
/// shown; when the next one would not fit in `max`, the cell ends in ` …`.
fn security_cell(counts: &SeverityCounts, max: usize) -> Cell {
    if counts.total() == 0 {
        return Cell::text(PASS, Tone::Positive).push(" 0", Tone::Base);
    }
    let badges: Vec<(Severity, String)> = Severity::BUCKETS
        .into_iter()
        .filter(|s| counts.get(*s) > 0)
        .map(|s| (s, format!("{}{}", counts.get(s), s.letter())))
        .collect();

    let mut cell = Cell::text(FAIL, Tone::Negative);
    for (index, (severity, badge)) in badges.iter().enumerate() {
        // room for " …" unless this is the last badge
        let reserve = if index + 1 == badges.len() { 0 } else { 2 };
        if cell.width() + 1 + display_width(badge) + reserve > max {
            return cell
                .push(" ", Tone::Base)
                .push(ELLIPSIS.to_string(), Tone::Neutral);
        }
        cell = cell
            .push(" ", Tone::Base)
            .push(badge.as_str(), Tone::Severity(*severity));
    }
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::fixtures::{failure, package, unpublished};
    use serde_json::Map;

    fn render(packages: &[PackageResult], all_dividers: bool) -> Vec<String> {
        let theme = Theme::plain();
        TableReporter::new(&theme)
            .with_all_dividers(all_dividers)
            .render(packages)
            .unwrap()
    }

    fn cells(line: &str) -> Vec<String> {
        line.split('│')
            .filter(|s| !s.is_empty())
            .map(|s| s.trim().to_string())
            .collect()
    }

    #[test]
    fn test_empty_report_has_only_frame() {
        let lines = render(&[], false);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('┌'));
        assert_eq!(
            cells(&lines[1]),
            vec!["Module Name", "Risk Score", "License", "Security"]
        );
        assert!(lines[2].starts_with('└'));
    }

    #[test]
    fn test_rows_are_sorted_and_fixed_width() {
        let packages = vec![
            package("zeta", Severity::Low, vec![failure("security", Severity::Low)]),
            package("alpha", Severity::None, vec![]),
            package("mid", Severity::Critical, vec![failure("security", Severity::Critical)]),
        ];
        let lines = render(&packages, false);
        // top, header, divider, 3 rows, bottom
        assert_eq!(lines.len(), 7);
        assert!(lines[3].contains("mid @ 1.0.0"));
        assert!(lines[4].contains("zeta @ 1.0.0"));
        assert!(lines[5].contains("alpha @ 1.0.0"));

        let width = display_width(&lines[0]);
        assert_eq!(width, 1 + 40 + 1 + 12 + 1 + 23 + 1 + 15 + 1);
        for line in &lines {
            assert_eq!(display_width(line), width, "{line}");
        }
    }

    #[test]
    fn test_all_dividers_between_rows() {
        let packages = vec![
            package("a", Severity::None, vec![]),
            package("b", Severity::None, vec![]),
            package("c", Severity::None, vec![]),
        ];
        let dividers = |lines: &[String]| lines.iter().filter(|l| l.starts_with('├')).count();
        assert_eq!(dividers(&render(&packages, false)), 1);
        assert_eq!(dividers(&render(&packages, true)), 3);
    }

    #[test]
    fn test_risk_meter_and_label() {
        let lines = render(&[package("a", Severity::Medium, vec![])], false);
        assert_eq!(cells(&lines[3])[1], "■■□□ Med");
        let lines = render(&[package("a", Severity::Critical, vec![])], false);
        assert_eq!(cells(&lines[3])[1], "■■■■ Crit");
        let lines = render(&[package("a", Severity::None, vec![])], false);
        assert_eq!(cells(&lines[3])[1], "□□□□ None");
    }

    #[test]
    fn test_license_cell() {
        let mut pkg = package("a", Severity::None, vec![]);
        assert_eq!(cells(&render(&[pkg.clone()], false)[3])[2], "✓ MIT");

        pkg.license = Some(Some(License {
            title: "SPDX:GPL-3.0-or-later-with-a-very-long-exception".to_string(),
            pass: false,
            extra: Map::new(),
        }));
        let cell = cells(&render(&[pkg], false)[3])[2].clone();
        assert!(cell.starts_with("✗ GPL-3.0"));
        assert!(cell.ends_with('…'));
        assert_eq!(display_width(&cell), COLUMNS[2].content_width());
    }

    #[test]
    fn test_security_badges_omit_empty_buckets() {
        let pkg = package(
            "a",
            Severity::High,
            vec![
                failure("security", Severity::High),
                failure("security", Severity::Low),
                failure("security", Severity::High),
                failure("license", Severity::Critical),
            ],
        );
        let security = cells(&render(&[pkg], false)[3])[3].clone();
        assert_eq!(security, "✗ 2H 1L");
        assert!(!security.contains('C'));
        assert!(!security.contains('M'));
    }

    #[test]
    fn test_security_badges_fit_column() {
        let mut failures = Vec::new();
        for severity in Severity::BUCKETS {
            failures.extend((0..12).map(|_| failure("security", severity)));
        }
        let lines = render(&[package("noisy", Severity::Critical, failures)], false);
        let security = cells(&lines[3])[3].clone();
        assert_eq!(security, "✗ 12C 12H …");
        assert!(display_width(&security) <= COLUMNS[3].content_width());
        assert_eq!(display_width(&lines[3]), display_width(&lines[0]));
    }

    #[test]
    fn test_security_badges_exactly_filling_column_are_kept() {
        let failures = Severity::BUCKETS
            .into_iter()
            .map(|s| failure("security", s))
            .collect();
        let lines = render(&[package("a", Severity::Critical, failures)], false);
        assert_eq!(cells(&lines[3])[3], "✗ 1C 1H 1M 1L");
    }

    #[test]
    fn test_security_pass() {
        let security = cells(&render(&[package("a", Severity::None, vec![])], false)[3])[3].clone();
        assert_eq!(security, "✓ 0");
    }

    #[test]
    fn test_unpublished_row_is_blank() {
        let mut pkg = unpublished("ghost");
        pkg.max_severity = Severity::Critical;
        pkg.license = Some(Some(License {
            title: "MIT".to_string(),
            pass: true,
            extra: Map::new(),
        }));
        pkg.failures = Some(vec![failure("security", Severity::Critical)]);
        let row = cells(&render(&[pkg], false)[3]);
        assert_eq!(row[0], "ghost @ 1.0.0");
        assert_eq!(&row[1..], &["", "", ""]);
    }

    #[test]
    fn test_module_label_truncates_name_only() {
        let name = "a-really-long-package-name-that-keeps-going-and-going";
        let label = module_label(name, "10.2.3-beta.1", 38);
        assert_eq!(display_width(&label), 38);
        assert!(label.ends_with("… @ 10.2.3-beta.1"));
        assert!(label.starts_with("a-really-long"));

        assert_eq!(module_label("short", "1.0.0", 38), "short @ 1.0.0");
    }

    #[test]
    fn test_long_names_fit_in_table() {
        let mut pkg = package("x", Severity::None, vec![]);
        pkg.name = "@scope/".to_string() + &"n".repeat(60);
        pkg.version = "2.0.0".to_string();
        let lines = render(&[pkg], false);
        let name = cells(&lines[3])[0].clone();
        assert!(name.contains('…'));
        assert!(name.ends_with("@ 2.0.0"));
        assert_eq!(display_width(&lines[3]), display_width(&lines[0]));
    }
}
