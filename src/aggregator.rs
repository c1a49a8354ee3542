//! Reactor-wide aggregation.
//!
//! The aggregator inspects the root project and every reactor module, names
//! the root module, and merges all module facts into one
//! [`ProjectDescriptor`]. Modules are independent of each other, so they are
//! inspected in parallel; the module order of the result is the reactor
//! order.

use rayon::prelude::*;
use tracing::debug;

use crate::{
    config::InspectOptions,
    inspector::ModuleInspector,
    model::{BuildModule, Reactor},
    project::{ModuleDescriptor, ProjectDescriptor, ROOT_MODULE_NAME},
    reports::{SurefireReportReader, TestReportReader},
};

/// Builds the project descriptor of a whole reactor.
#[derive(Debug)]
pub struct ProjectAggregator<R = SurefireReportReader> {
    inspector: ModuleInspector<R>,
}

impl ProjectAggregator {
    /// Create an aggregator reading Surefire reports.
    #[must_use]
    pub fn new(options: &InspectOptions) -> Self {
        Self::with_inspector(ModuleInspector::new(options))
    }
}

impl<R: TestReportReader> ProjectAggregator<R> {
    #[must_use]
    pub const fn with_inspector(inspector: ModuleInspector<R>) -> Self {
        Self { inspector }
    }

    /// Describe `root` and all `modules`.
    ///
    /// The root-level `base_dir` and `compliance_level` come from `root`
    /// itself. The root-level sets are the union of every module's sets plus
    /// the root's own, so a module list that omits the root still yields a
    /// complete union. A module is named `"root"` when its base directory
    /// equals the root's, whatever its declared name.
    #[must_use]
    pub fn aggregate<M: BuildModule>(&self, root: &dyn BuildModule, modules: &[M]) -> ProjectDescriptor {
        let root_module = self.inspector.inspect(root);

        let mut project =
            ProjectDescriptor::new(root_module.base_dir.clone(), root_module.compliance_level);
        project.absorb(&root_module);

        let described: Vec<ModuleDescriptor> = modules
            .par_iter()
            .map(|module| self.inspector.inspect(module))
            .collect();

        for mut module in described {
            if module.base_dir == project.base_dir {
                module.name = ROOT_MODULE_NAME.to_string();
            }
            project.push_module(module);
        }

        debug!(
            modules = project.modules.len(),
            classpath = project.classpath.len(),
            failing_tests = project.failing_tests.len(),
            "aggregated project"
        );

        project
    }

    /// Describe a loaded reactor.
    #[must_use]
    pub fn aggregate_reactor(&self, reactor: &Reactor) -> ProjectDescriptor {
        self.aggregate(&reactor.root, &reactor.modules)
    }
}
