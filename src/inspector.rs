//! Per-module build fact extraction.
//!
//! [`ModuleInspector`] turns one [`BuildModule`] into a [`ModuleDescriptor`].
//! Inspection never fails: any lookup that goes wrong is logged and leaves
//! the corresponding field empty.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
};

use tracing::{debug, warn};

use crate::{
    classpath::ClasspathResolver,
    config::InspectOptions,
    model::BuildModule,
    project::ModuleDescriptor,
    reports::{SurefireReportReader, TestReportReader},
    utils::{absolute_path_string, existing_path_string},
    version::parse_compliance_level,
};

/// Compliance level used when no source declares one.
pub const DEFAULT_COMPLIANCE_LEVEL: u32 = 7;

/// Artifact id of the plugin whose `source` configuration sets the language level.
pub const COMPILER_PLUGIN: &str = "maven-compiler-plugin";

/// Property value meaning "not set".
pub const UNSET_PROPERTY: &str = "-1";

/// Generated sources live under the output directory.
pub const GENERATED_SOURCES_DIR: &str = "generated-sources";

/// Where a declared compliance level can come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComplianceSource {
    /// `<source>` in the compiler plugin configuration
    CompilerPlugin,

    /// A user or module property
    Property(&'static str),
}

/// Compliance sources in precedence order; the first one that yields a
/// parseable version wins.
pub const COMPLIANCE_SOURCES: [ComplianceSource; 4] = [
    ComplianceSource::CompilerPlugin,
    ComplianceSource::Property("maven.compiler.source"),
    ComplianceSource::Property("maven.compile.source"),
    ComplianceSource::Property("java.version"),
];

/// Extracts the build facts of a single module.
#[derive(Debug)]
pub struct ModuleInspector<R = SurefireReportReader> {
    /// User properties, taking precedence over module properties
    properties: BTreeMap<String, String>,

    /// Report directory name under the build directory
    reports_dir: String,

    report_reader: R,

    classpath: ClasspathResolver,
}

impl ModuleInspector {
    /// Create an inspector reading Surefire reports.
    #[must_use]
    pub fn new(options: &InspectOptions) -> Self {
        Self::with_reader(options, SurefireReportReader)
    }
}

impl<R: TestReportReader> ModuleInspector<R> {
    /// Create an inspector using a custom test report reader.
    #[must_use]
    pub fn with_reader(options: &InspectOptions, report_reader: R) -> Self {
        Self {
            properties: options.properties.clone(),
            reports_dir: options.reports_dir.clone(),
            report_reader,
            classpath: ClasspathResolver,
        }
    }

    /// Compute the descriptor of `module`.
    ///
    /// The descriptor carries the module's declared name; the aggregator
    /// renames the root module.
    #[must_use]
    pub fn inspect(&self, module: &dyn BuildModule) -> ModuleDescriptor {
        debug!(module = module.name(), base_dir = %module.base_dir().display(), "inspecting module");

        ModuleDescriptor {
            name: module.name().to_string(),
            base_dir: absolute_path_string(module.base_dir())
                .unwrap_or_else(|| module.base_dir().to_string_lossy().into_owned()),
            compliance_level: self.compliance_level(module),
            source_directories: Self::source_directories(module),
            test_directories: existing([module.test_source_directory()]),
            output_directories: existing([module.output_directory()]),
            test_output_directories: existing([module.test_output_directory()]),
            classpath: self.classpath.resolve(module),
            failing_tests: self.failing_tests(module),
        }
    }

    /// Resolve the module's compliance level.
    ///
    /// Sources are tried in [`COMPLIANCE_SOURCES`] order. A source whose
    /// value does not parse is skipped. Falls back to
    /// [`DEFAULT_COMPLIANCE_LEVEL`].
    #[must_use]
    pub fn compliance_level(&self, module: &dyn BuildModule) -> u32 {
        COMPLIANCE_SOURCES
            .iter()
            .find_map(|&source| {
                let raw = self.lookup(source, module)?;
                match parse_compliance_level(raw) {
                    Ok(level) => Some(level),
                    Err(e) => {
                        warn!(module = module.name(), ?source, "{e}, trying next source");
                        None
                    }
                }
            })
            .unwrap_or(DEFAULT_COMPLIANCE_LEVEL)
    }

    fn lookup<'a>(&'a self, source: ComplianceSource, module: &'a dyn BuildModule) -> Option<&'a str> {
        match source {
            ComplianceSource::CompilerPlugin => compiler_plugin_source(module),
            ComplianceSource::Property(key) => self.property(module, key),
        }
    }

    fn property<'a>(&'a self, module: &'a dyn BuildModule, key: &str) -> Option<&'a str> {
        let is_set = |value: &&str| *value != UNSET_PROPERTY;

        self.properties
            .get(key)
            .map(String::as_str)
            .filter(is_set)
            .or_else(|| module.property(key).filter(is_set))
    }

    fn source_directories(module: &dyn BuildModule) -> BTreeSet<String> {
        let generated = module.output_directory().join(GENERATED_SOURCES_DIR);
        existing([module.source_directory(), generated.as_path()])
    }

    /// Names of the test classes whose last persisted run errored or failed.
    ///
    /// An unreadable report is logged and treated as "no known failures".
    fn failing_tests(&self, module: &dyn BuildModule) -> BTreeSet<String> {
        let reports = module.build_directory().join(&self.reports_dir);

        match self.report_reader.read_suites(&reports) {
            Ok(suites) => suites
                .into_iter()
                .filter(|suite| suite.is_failing())
                .map(|suite| suite.full_class_name)
                .collect(),
            Err(e) => {
                warn!(module = module.name(), "{e}");
                BTreeSet::new()
            }
        }
    }
}

/// `<source>` of the first compiler plugin, unless it is an unresolved
/// `${...}` placeholder.
fn compiler_plugin_source(module: &dyn BuildModule) -> Option<&str> {
    module
        .build_plugins()
        .iter()
        .find(|plugin| plugin.artifact_id == COMPILER_PLUGIN)?
        .configuration
        .as_ref()?
        .child("source")?
        .value()
        .filter(|value| !value.starts_with('$'))
}

fn existing<'a>(paths: impl IntoIterator<Item = &'a Path>) -> BTreeSet<String> {
    paths.into_iter().filter_map(existing_path_string).collect()
}
