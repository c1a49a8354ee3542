//! Per-module build facts.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Name given to the module whose base directory is the project base directory.
pub const ROOT_MODULE_NAME: &str = "root";

/// Build facts of one reactor module.
///
/// All path sets hold absolute path strings of entries that existed on disk
/// when the module was inspected. Sets are ordered so the rendered output is
/// stable across runs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// `"root"` for the project's own module, the declared name otherwise
    pub name: String,

    pub base_dir: String,

    /// Java language level the module is compiled against
    pub compliance_level: u32,

    /// Main source roots, including generated sources
    pub source_directories: BTreeSet<String>,

    pub test_directories: BTreeSet<String>,

    pub output_directories: BTreeSet<String>,

    pub test_output_directories: BTreeSet<String>,

    /// Test-scope classpath without the module's own output directories
    pub classpath: BTreeSet<String>,

    /// Fully qualified names of test classes that errored or failed
    pub failing_tests: BTreeSet<String>,
}

impl ModuleDescriptor {
    /// Whether this descriptor was named as the project root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.name == ROOT_MODULE_NAME
    }
}
