use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

use crate::core::error::ReportError;
use crate::core::severity::{self, Severity};

/// Failure group whose entries count as vulnerabilities.
pub const SECURITY_GROUP: &str = "security";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub title: String,
    pub pass: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl License {
    /// Title without any `qualifier:` prefixes, e.g. `SPDX:MIT` -> `MIT`.
    pub fn short_title(&self) -> &str {
        self.title.rsplit(':').next().unwrap_or(&self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Failure {
    pub group: String,
    pub severity: Severity,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Failure {
    pub fn is_security(&self) -> bool {
        self.group == SECURITY_GROUP
    }
}

/// One analyzed package. Fields the renderer does not know about are kept in
/// `extra` so the report can be written back out unchanged.
///
/// `license` and `failures` remember whether the key was present at all: the
/// outer `None` means absent, `Some(None)` for `license` means an explicit
/// `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageResult {
    pub name: String,
    pub version: String,
    pub published: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub license: Option<Option<License>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failures: Option<Vec<Failure>>,
    #[serde(with = "severity::ordinal")]
    pub max_severity: Severity,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PackageResult {
    pub fn license(&self) -> Option<&License> {
        self.license.as_ref().and_then(Option::as_ref)
    }

    pub fn failures(&self) -> &[Failure] {
        self.failures.as_deref().unwrap_or(&[])
    }
}

/// Marks a key as present, whatever its value (including `null`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Security failure tally per severity. `None`-level entries are recorded
/// but never counted as vulnerabilities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    counts: [usize; 5],
}

impl SeverityCounts {
    pub fn of_security<'a>(failures: impl IntoIterator<Item = &'a Failure>) -> Self {
        let mut counts = Self::default();
        for failure in failures.into_iter().filter(|f| f.is_security()) {
            counts.add(failure.severity);
        }
        counts
    }

    pub fn add(&mut self, severity: Severity) {
        self.counts[severity.ordinal() as usize] += 1;
    }

    pub fn merge(&mut self, other: &SeverityCounts) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts) {
            *mine += theirs;
        }
    }

    pub fn get(&self, severity: Severity) -> usize {
        self.counts[severity.ordinal() as usize]
    }

    pub fn total(&self) -> usize {
        Severity::BUCKETS.iter().map(|s| self.get(*s)).sum()
    }
}

/// Worst severity first, then by name.
pub fn compare_risk(a: &PackageResult, b: &PackageResult) -> Ordering {
    b.max_severity
        .cmp(&a.max_severity)
        .then_with(|| a.name.cmp(&b.name))
}

pub fn sort_report(packages: &mut [PackageResult]) -> &mut [PackageResult] {
    packages.sort_by(compare_risk);
    packages
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportSource {
    Stdin,
    File(PathBuf),
}

impl ReportSource {
    pub fn from_arg(arg: Option<&PathBuf>) -> Self {
        match arg {
            Some(path) if path.as_os_str() != "-" => ReportSource::File(path.clone()),
            _ => ReportSource::Stdin,
        }
    }

    fn describe(&self) -> String {
        match self {
            ReportSource::Stdin => "stdin".to_string(),
            ReportSource::File(path) => path.display().to_string(),
        }
    }
}

pub async fn load_report(source: &ReportSource) -> Result<Vec<PackageResult>, ReportError> {
    let origin = source.describe();
    let content = match source {
        ReportSource::File(path) => tokio::fs::read_to_string(path).await,
        ReportSource::Stdin => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await.map(|_| buf)
        }
    }
    .map_err(|source| ReportError::UnableToReadReport {
        origin: origin.clone(),
        source,
    })?;

    let packages: Vec<PackageResult> = serde_json::from_str(&content)
        .map_err(|source| ReportError::MalformedReport { origin: origin.clone(), source })?;
    tracing::debug!(origin = %origin, packages = packages.len(), "Loaded report");
    Ok(packages)
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_sort_by_severity_then_name() {
        let mut packages = vec![
            package("zlib", Severity::Low, vec![]),
            package("alpha", Severity::Critical, vec![]),
            package("beta", Severity::Low, vec![]),
            package("aardvark", Severity::None, vec![]),
            package("able", Severity::Critical, vec![]),
        ];
        sort_report(&mut packages);
        let names: Vec<_> = packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["able", "alpha", "beta", "zlib", "aardvark"]);

        for window in packages.windows(2) {
            assert!(window[0].max_severity >= window[1].max_severity);
            if window[0].max_severity == window[1].max_severity {
                assert!(window[0].name <= window[1].name);
            }
        }
    }

    #[test]
    fn test_sort_is_idempotent_and_handles_empty() {
        let mut empty: Vec<PackageResult> = vec![];
        assert!(sort_report(&mut empty).is_empty());

        let mut packages = vec![
            package("b", Severity::High, vec![]),
            package("a", Severity::High, vec![]),
        ];
        sort_report(&mut packages);
        let once = packages.clone();
        sort_report(&mut packages);
        assert_eq!(once, packages);
    }

    #[test]
    fn test_equal_keys_compare_equal() {
        let a = package("same", Severity::Medium, vec![]);
        let b = package("same", Severity::Medium, vec![]);
        assert_eq!(compare_risk(&a, &b), Ordering::Equal);
    }

    #[test]
    fn test_short_license_title() {
        let pkg = package("x", Severity::None, vec![]);
        assert_eq!(pkg.license().unwrap().short_title(), "MIT");
        let plain = License {
            title: "Apache-2.0".to_string(),
            pass: true,
            extra: Map::new(),
        };
        assert_eq!(plain.short_title(), "Apache-2.0");
    }

    #[test]
    fn test_deserialize_keeps_unknown_fields() {
        let json = r#"[{
            "name": "left-pad",
            "version": "1.3.0",
            "published": true,
            "license": {"title": "SPDX:WTFPL", "pass": false},
            "failures": [{"group": "security", "severity": "HIGH", "title": "ReDoS"}],
            "maxSeverity": 3,
            "scores": [1, 2]
        }]"#;
        let packages: Vec<PackageResult> = serde_json::from_str(json).unwrap();
        let pkg = &packages[0];
        assert_eq!(pkg.max_severity, Severity::High);
        assert_eq!(pkg.failures()[0].extra["title"], "ReDoS");
        assert_eq!(pkg.extra["scores"], serde_json::json!([1, 2]));

        let back = serde_json::to_value(&packages).unwrap();
        let original: Value = serde_json::from_str(json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_absent_and_null_keys_survive_round_trip() {
        let json = r#"[
            {"name":"a","version":"1","published":false,"license":null,"maxSeverity":0},
            {"name":"b","version":"2","published":false,"maxSeverity":0},
            {"name":"c","version":"3","published":true,"failures":[],"maxSeverity":0}
        ]"#;
        let packages: Vec<PackageResult> = serde_json::from_str(json).unwrap();
        assert_eq!(packages[0].license, Some(None));
        assert!(packages[0].license().is_none());
        assert_eq!(packages[1].license, None);
        assert_eq!(packages[1].failures, None);
        assert!(packages[1].failures().is_empty());
        assert_eq!(packages[2].failures, Some(vec![]));

        let back = serde_json::to_value(&packages).unwrap();
        let original: Value = serde_json::from_str(json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_severity_counts_ignore_other_groups_and_none() {
        let failures = vec![
            failure("security", Severity::High),
            failure("security", Severity::High),
            failure("security", Severity::None),
            failure("license", Severity::Critical),
        ];
        let counts = SeverityCounts::of_security(&failures);
        assert_eq!(counts.get(Severity::High), 2);
        assert_eq!(counts.get(Severity::Critical), 0);
        assert_eq!(counts.total(), 2);

        let mut merged = counts;
        merged.merge(&SeverityCounts::of_security(&[failure("security", Severity::Low)]));
        assert_eq!(merged.total(), 3);
    }

    #[test]
    fn test_report_source_from_arg() {
        assert_eq!(ReportSource::from_arg(None), ReportSource::Stdin);
        assert_eq!(
            ReportSource::from_arg(Some(&PathBuf::from("-"))),
            ReportSource::Stdin
        );
        assert_eq!(
            ReportSource::from_arg(Some(&PathBuf::from("r.json"))),
            ReportSource::File(PathBuf::from("r.json"))
        );
    }

    #[tokio::test]
    async fn test_load_report_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("report.json");
        fs::write(
            &path,
            r#"[{"name":"a","version":"1.0.0","published":false,"maxSeverity":0}]"#,
        )
        .unwrap();
        let packages = load_report(&ReportSource::File(path)).await.unwrap();
        assert_eq!(packages.len(), 1);
        assert!(!packages[0].published);
        assert!(packages[0].failures().is_empty());
    }

    #[tokio::test]
    async fn test_load_report_errors() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing.json");
        let err = load_report(&ReportSource::File(missing)).await.unwrap_err();
        assert_eq!(err.kind(), "UnableToReadReport");

        let bad = tmp.path().join("bad.json");
        fs::write(&bad, "{not json").unwrap();
        let err = load_report(&ReportSource::File(bad)).await.unwrap_err();
        assert_eq!(err.kind(), "MalformedReport");
    }
}
