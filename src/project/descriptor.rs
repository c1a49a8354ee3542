//! Root-level project descriptor.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::ModuleDescriptor;

/// Build facts of a whole multi-module project.
///
/// `base_dir` and `compliance_level` describe the root project itself. The
/// path and test sets are the union of the corresponding sets of every
/// module, root included. `modules` keeps the reactor order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    pub base_dir: String,
    pub compliance_level: u32,
    pub source_directories: BTreeSet<String>,
    pub test_directories: BTreeSet<String>,
    pub output_directories: BTreeSet<String>,
    pub test_output_directories: BTreeSet<String>,
    pub classpath: BTreeSet<String>,
    pub failing_tests: BTreeSet<String>,
    pub modules: Vec<ModuleDescriptor>,
}

impl ProjectDescriptor {
    /// Start a descriptor for the root project, with empty union sets and no modules.
    #[must_use]
    pub fn new(base_dir: impl Into<String>, compliance_level: u32) -> Self {
        Self {
            base_dir: base_dir.into(),
            compliance_level,
            ..Self::default()
        }
    }

    /// Merge a module's sets into the root-level union sets.
    ///
    /// The module is not appended to [`Self::modules`].
    pub fn absorb(&mut self, module: &ModuleDescriptor) {
        fn union(into: &mut BTreeSet<String>, from: &BTreeSet<String>) {
            into.extend(from.iter().cloned());
        }

        union(&mut self.source_directories, &module.source_directories);
        union(&mut self.test_directories, &module.test_directories);
        union(&mut self.output_directories, &module.output_directories);
        union(
            &mut self.test_output_directories,
            &module.test_output_directories,
        );
        union(&mut self.classpath, &module.classpath);
        union(&mut self.failing_tests, &module.failing_tests);
    }

    /// Merge a module's sets into the union and append it to the module list.
    pub fn push_module(&mut self, module: ModuleDescriptor) {
        self.absorb(&module);
        self.modules.push(module);
    }

    /// Look up a module descriptor by name.
    #[must_use]
    pub fn module(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.modules.iter().find(|m| m.name == name)
    }
}
