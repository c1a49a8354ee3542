//! Reactor loading from a JSON snapshot.
//!
//! A host build tool that has already resolved its project model (plugins,
//! properties, dependencies) can export it as a JSON document:
//!
//! ```json
//! {
//!   "root": { "name": "parent", "base_dir": "/work/app" },
//!   "modules": [
//!     { "name": "parent", "base_dir": "/work/app" },
//!     {
//!       "name": "lib",
//!       "base_dir": "/work/app/lib",
//!       "plugins": [
//!         { "artifact_id": "maven-compiler-plugin", "configuration": { "source": "1.8" } }
//!       ],
//!       "properties": { "maven.compiler.source": "11" },
//!       "test_classpath": ["/work/app/lib/target/test-classes", "/m2/junit.jar"]
//!     }
//!   ]
//! }
//! ```
//!
//! Directories that are not given follow Maven's conventions. Relative paths
//! are resolved against the module's base directory, and relative base
//! directories against the snapshot file's directory. A missing
//! `test_classpath` means the dependencies were not resolved.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::Value;

use super::{BuildPlugin, ConfigNode, DeclaredModule, Reactor};
use crate::error::{Error, Result};

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct SnapshotDocument {
    root: ModuleSnapshot,

    #[serde(default)]
    modules: Vec<ModuleSnapshot>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct ModuleSnapshot {
    name: String,
    base_dir: PathBuf,

    #[serde(default)]
    plugins: Vec<PluginSnapshot>,

    #[serde(default)]
    properties: BTreeMap<String, String>,

    source_directory: Option<PathBuf>,
    test_source_directory: Option<PathBuf>,
    output_directory: Option<PathBuf>,
    test_output_directory: Option<PathBuf>,
    build_directory: Option<PathBuf>,
    test_classpath: Option<Vec<PathBuf>>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct PluginSnapshot {
    artifact_id: String,
    configuration: Option<Value>,
}

/// Load a reactor from the snapshot file at `path`.
///
/// # Errors
///
/// Returns [`Error::Snapshot`] if the file cannot be read or is not a valid
/// snapshot document.
pub fn load_snapshot(path: &Path) -> Result<Reactor> {
    let snapshot_error = |reason: String| Error::Snapshot {
        path: path.to_path_buf(),
        reason,
    };

    let content = fs::read_to_string(path).map_err(|e| snapshot_error(e.to_string()))?;
    let anchor = std::path::absolute(path)?
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    parse_snapshot(&content, &anchor).map_err(snapshot_error)
}

/// Parse a snapshot document, resolving relative base directories against `anchor`.
fn parse_snapshot(content: &str, anchor: &Path) -> std::result::Result<Reactor, String> {
    let document: SnapshotDocument = serde_json::from_str(content).map_err(|e| e.to_string())?;

    Ok(Reactor {
        root: document.root.into_module(anchor),
        modules: document
            .modules
            .into_iter()
            .map(|m| m.into_module(anchor))
            .collect(),
    })
}

impl ModuleSnapshot {
    fn into_module(self, anchor: &Path) -> DeclaredModule {
        let mut module = DeclaredModule::with_conventions(self.name, anchor.join(self.base_dir));
        let base_dir = module.base_dir.clone();
        let resolve = |path: PathBuf| base_dir.join(path);

        if let Some(build) = self.build_directory {
            module.build_directory = resolve(build);
            module.output_directory = module.build_directory.join("classes");
            module.test_output_directory = module.build_directory.join("test-classes");
        }
        if let Some(dir) = self.output_directory {
            module.output_directory = resolve(dir);
        }
        if let Some(dir) = self.test_output_directory {
            module.test_output_directory = resolve(dir);
        }
        if let Some(dir) = self.source_directory {
            module.source_directory = resolve(dir);
        }
        if let Some(dir) = self.test_source_directory {
            module.test_source_directory = resolve(dir);
        }

        module.test_classpath = self
            .test_classpath
            .map(|elements| elements.into_iter().map(resolve).collect());
        module.properties = self.properties;
        module.plugins = self
            .plugins
            .into_iter()
            .map(|p| {
                BuildPlugin::new(
                    p.artifact_id,
                    p.configuration.map(|v| config_from_json("configuration", &v)),
                )
            })
            .collect();

        module
    }
}

/// Convert a JSON configuration value into a configuration tree.
///
/// Objects become nodes with one child per key, arrays become nodes whose
/// children all carry the array's name, scalars become leaf values.
fn config_from_json(name: &str, value: &Value) -> ConfigNode {
    match value {
        Value::Object(map) => ConfigNode::with_children(
            name,
            map.iter().map(|(k, v)| config_from_json(k, v)).collect(),
        ),
        Value::Array(items) => ConfigNode::with_children(
            name,
            items.iter().map(|v| config_from_json(name, v)).collect(),
        ),
        Value::String(s) => ConfigNode::leaf(name, s.as_str()),
        Value::Null => ConfigNode {
            name: name.to_string(),
            ..ConfigNode::default()
        },
        Value::Bool(_) | Value::Number(_) => ConfigNode::leaf(name, value.to_string()),
    }
}
