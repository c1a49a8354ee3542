//! Test report reading.
//!
//! The inspector only needs one thing from a test report: which suites had
//! errors or failures. [`TestReportReader`] is the seam for that capability;
//! [`SurefireReportReader`] implements it for the `TEST-*.xml` files that
//! Maven Surefire writes to `target/surefire-reports/`.

use std::{fs, path::Path};

use roxmltree::{Document, Node};
use tracing::debug;

use crate::error::{Error, Result};

/// Outcome of one persisted test suite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestSuiteRecord {
    /// Fully qualified class name of the suite (e.g. `com.acme.FooTest`)
    pub full_class_name: String,
    pub errors: u32,
    pub failures: u32,
}

impl TestSuiteRecord {
    /// Whether the suite reported at least one error or failure.
    #[must_use]
    pub const fn is_failing(&self) -> bool {
        self.errors.saturating_add(self.failures) > 0
    }
}

/// Reads persisted test-execution reports from a directory.
pub trait TestReportReader: Sync {
    /// Read every suite record found in `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReportReadFailure`] if a report exists but cannot be
    /// read or parsed.
    fn read_suites(&self, dir: &Path) -> Result<Vec<TestSuiteRecord>>;
}

/// Reader for Maven Surefire XML reports.
#[derive(Clone, Copy, Debug, Default)]
pub struct SurefireReportReader;

impl TestReportReader for SurefireReportReader {
    /// Reads `TEST-*.xml` files in `dir`, in file name order.
    ///
    /// A missing directory simply means the tests never ran and yields no
    /// records.
    fn read_suites(&self, dir: &Path) -> Result<Vec<TestSuiteRecord>> {
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "no test report directory");
            return Ok(Vec::new());
        }

        let pattern = format!(
            "{}/TEST-*.xml",
            glob::Pattern::escape(&dir.to_string_lossy())
        );

        let paths = glob::glob(&pattern).map_err(|e| Error::ReportReadFailure {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut reports = Vec::new();
        for entry in paths {
            let path = entry.map_err(|e| Error::ReportReadFailure {
                path: e.path().to_path_buf(),
                reason: e.error().to_string(),
            })?;
            reports.push(path);
        }
        reports.sort();

        let mut suites = Vec::new();
        for path in reports {
            let content = fs::read_to_string(&path).map_err(|e| Error::ReportReadFailure {
                path: path.clone(),
                reason: e.to_string(),
            })?;

            let parsed = parse_report(&content).map_err(|reason| Error::ReportReadFailure {
                path: path.clone(),
                reason,
            })?;
            suites.extend(parsed);
        }

        Ok(suites)
    }
}

/// Parse the content of one Surefire XML report.
///
/// Accepts either a `<testsuite>` root or a `<testsuites>` wrapper holding
/// several suites.
fn parse_report(content: &str) -> std::result::Result<Vec<TestSuiteRecord>, String> {
    let doc = Document::parse(content).map_err(|e| e.to_string())?;
    let root = doc.root_element();

    match root.tag_name().name() {
        "testsuite" => Ok(vec![parse_suite(root)?]),
        "testsuites" => root
            .children()
            .filter(|n| n.has_tag_name("testsuite"))
            .map(parse_suite)
            .collect(),
        other => Err(format!("unexpected root element <{other}>")),
    }
}

fn parse_suite(node: Node<'_, '_>) -> std::result::Result<TestSuiteRecord, String> {
    let full_class_name = node
        .attribute("name")
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| "testsuite without a name attribute".to_string())?;

    Ok(TestSuiteRecord {
        full_class_name: full_class_name.to_string(),
        errors: parse_counter(node, "errors")?,
        failures: parse_counter(node, "failures")?,
    })
}

fn parse_counter(node: Node<'_, '_>, attribute: &str) -> std::result::Result<u32, String> {
    node.attribute(attribute).map_or(Ok(0), |raw| {
        raw.trim()
            .parse()
            .map_err(|_| format!("invalid {attribute} count {raw:?}"))
    })
}
