//! Options controlling how the reactor is loaded and inspected.

use std::collections::BTreeMap;

/// Surefire's report directory under the build directory.
pub const DEFAULT_REPORTS_DIR: &str = "surefire-reports";

/// Classpath file written by `mvn dependency:build-classpath -Dmdep.outputFile=target/classpath.txt`.
pub const DEFAULT_CLASSPATH_FILE: &str = "classpath.txt";

/// Configuration for module inspection.
#[derive(Clone, Debug)]
pub struct InspectOptions {
    /// User properties (`-D key=value`), overriding module properties
    pub properties: BTreeMap<String, String>,

    /// Test report directory name, relative to each module's build directory
    pub reports_dir: String,

    /// Number of threads used to inspect modules (0 = all cores)
    pub threads: usize,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            properties: BTreeMap::new(),
            reports_dir: DEFAULT_REPORTS_DIR.to_string(),
            threads: 0,
        }
    }
}

/// Configuration for loading a reactor from `pom.xml` files.
#[derive(Clone, Debug)]
pub struct LoadOptions {
    /// Resolved classpath file name, relative to each module's build directory
    pub classpath_file: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            classpath_file: DEFAULT_CLASSPATH_FILE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_options_defaults() {
        let opts = InspectOptions::default();

        assert!(opts.properties.is_empty());
        assert_eq!(opts.reports_dir, "surefire-reports");
        assert_eq!(opts.threads, 0);
    }

    #[test]
    fn test_load_options_defaults() {
        assert_eq!(LoadOptions::default().classpath_file, "classpath.txt");
    }
}
