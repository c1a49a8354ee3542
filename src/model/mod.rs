//! Read-only view of the host build tool's project model.
//!
//! The inspection core never talks to Maven directly. It only sees the
//! [`BuildModule`] trait, which exposes exactly what is needed to describe a
//! module: its directories, its compiler plugin configuration, a handful of
//! properties and its resolved test classpath.
//!
//! Two loaders produce [`Reactor`]s of [`DeclaredModule`]s:
//!
//! - [`pom`] - reads `pom.xml` files straight from disk
//! - [`snapshot`] - reads a JSON export of an already-resolved reactor

pub mod pom;
pub mod snapshot;

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// One module of the reactor as seen by the inspection core.
pub trait BuildModule: Sync {
    /// Directory containing the module's `pom.xml`.
    fn base_dir(&self) -> &Path;

    /// Declared module name (`<name>`, falling back to `<artifactId>`).
    fn name(&self) -> &str;

    /// Build plugins declared for the module, in declaration order.
    fn build_plugins(&self) -> &[BuildPlugin];

    /// Module-scoped property value, if declared.
    fn property(&self, key: &str) -> Option<&str>;

    fn source_directory(&self) -> &Path;

    fn test_source_directory(&self) -> &Path;

    fn output_directory(&self) -> &Path;

    fn test_output_directory(&self) -> &Path;

    /// Root of the build output tree (`target/` by convention).
    fn build_directory(&self) -> &Path;

    /// Resolved test-scope classpath elements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DependencyResolutionFailure`] when the host has not
    /// resolved the module's dependencies.
    fn test_classpath_elements(&self) -> Result<Vec<PathBuf>>;
}

/// A build plugin and its configuration tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildPlugin {
    pub artifact_id: String,
    pub configuration: Option<ConfigNode>,
}

impl BuildPlugin {
    #[must_use]
    pub fn new(artifact_id: impl Into<String>, configuration: Option<ConfigNode>) -> Self {
        Self {
            artifact_id: artifact_id.into(),
            configuration,
        }
    }
}

/// A node of a plugin configuration tree, shaped like a `<configuration>`
/// XML element: a name, an optional text value and ordered children.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigNode {
    pub name: String,
    pub value: Option<String>,
    pub children: Vec<Self>,
}

impl ConfigNode {
    /// Create a leaf node carrying a text value.
    #[must_use]
    pub fn leaf(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            children: Vec::new(),
        }
    }

    /// Create a node with children and no text value.
    #[must_use]
    pub fn with_children(name: impl Into<String>, children: Vec<Self>) -> Self {
        Self {
            name: name.into(),
            value: None,
            children,
        }
    }

    /// First direct child with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// Plain-data module produced by the loaders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclaredModule {
    pub name: String,
    pub base_dir: PathBuf,
    pub plugins: Vec<BuildPlugin>,
    pub properties: BTreeMap<String, String>,
    pub source_directory: PathBuf,
    pub test_source_directory: PathBuf,
    pub output_directory: PathBuf,
    pub test_output_directory: PathBuf,
    pub build_directory: PathBuf,

    /// `None` when the host could not resolve the module's dependencies.
    pub test_classpath: Option<Vec<PathBuf>>,
}

impl DeclaredModule {
    /// Create a module laid out with Maven's default directories under
    /// `base_dir` and no plugins, properties or resolved classpath.
    #[must_use]
    pub fn with_conventions(name: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        let build_directory = base_dir.join("target");

        Self {
            name: name.into(),
            source_directory: base_dir.join("src").join("main").join("java"),
            test_source_directory: base_dir.join("src").join("test").join("java"),
            output_directory: build_directory.join("classes"),
            test_output_directory: build_directory.join("test-classes"),
            build_directory,
            base_dir,
            plugins: Vec::new(),
            properties: BTreeMap::new(),
            test_classpath: None,
        }
    }
}

impl BuildModule for DeclaredModule {
    fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn build_plugins(&self) -> &[BuildPlugin] {
        &self.plugins
    }

    fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    fn source_directory(&self) -> &Path {
        &self.source_directory
    }

    fn test_source_directory(&self) -> &Path {
        &self.test_source_directory
    }

    fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    fn test_output_directory(&self) -> &Path {
        &self.test_output_directory
    }

    fn build_directory(&self) -> &Path {
        &self.build_directory
    }

    fn test_classpath_elements(&self) -> Result<Vec<PathBuf>> {
        self.test_classpath
            .clone()
            .ok_or_else(|| Error::DependencyResolutionFailure {
                module: self.name.clone(),
                reason: "dependencies have not been resolved".to_string(),
            })
    }
}

/// The root project plus every module taking part in the build, in the
/// order the host reported them. The root usually appears in `modules` too.
#[derive(Clone, Debug)]
pub struct Reactor {
    pub root: DeclaredModule,
    pub modules: Vec<DeclaredModule>,
}
