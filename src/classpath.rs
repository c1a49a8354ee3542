//! Effective test classpath of a module.

use std::collections::BTreeSet;

use tracing::warn;

use crate::{
    model::BuildModule,
    utils::{absolute_path_string, existing_path_string},
};

/// Computes the classpath entries a module depends on.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClasspathResolver;

impl ClasspathResolver {
    /// Resolve the module's test-scope classpath.
    ///
    /// Each element is made absolute and kept only if it exists on disk. The
    /// module's own output and test-output directories are dropped since they
    /// are already reported as output directories. A module whose
    /// dependencies cannot be resolved contributes an empty classpath.
    #[must_use]
    pub fn resolve(&self, module: &dyn BuildModule) -> BTreeSet<String> {
        let elements = match module.test_classpath_elements() {
            Ok(elements) => elements,
            Err(e) => {
                warn!(module = module.name(), "{e}");
                return BTreeSet::new();
            }
        };

        let own_outputs: BTreeSet<String> = [module.output_directory(), module.test_output_directory()]
            .into_iter()
            .filter_map(absolute_path_string)
            .collect();

        elements
            .iter()
            .filter_map(|element| existing_path_string(element))
            .filter(|entry| !own_outputs.contains(entry))
            .collect()
    }
}
