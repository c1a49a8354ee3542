//! Reactor loading from `pom.xml` files.
//!
//! This is a lightweight reading of Maven's project model, enough to feed
//! the inspector without running Maven:
//!
//! - `<artifactId>`, `<name>`, `<properties>` and `<build><plugins>`
//! - `<build>` directory overrides, falling back to Maven's conventions
//! - `<modules>`, followed recursively in declaration order
//! - `${...}` interpolation of declared properties and a few `project.*`
//!   expressions; unknown references are left untouched
//! - inheritance of properties and plugins from the aggregating pom when the
//!   module names it as `<parent>`
//!
//! Dependencies are not resolved here. The resolved test classpath is read
//! from a classpath file in the build directory, as written by
//! `mvn dependency:build-classpath -Dmdep.outputFile=target/classpath.txt`.

use std::{
    collections::{BTreeMap, HashSet},
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::{Captures, Regex};
use roxmltree::{Document, Node};
use tracing::{debug, warn};

use super::{BuildPlugin, ConfigNode, DeclaredModule, Reactor};
use crate::{
    config::LoadOptions,
    error::{Error, Result},
};

/// Name of the project file in every module directory.
pub const POM_FILE: &str = "pom.xml";

#[allow(clippy::unwrap_used)]
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

/// Declarations read from one `pom.xml`, before interpolation.
#[derive(Clone, Debug, Default)]
struct RawPom {
    artifact_id: String,
    name: Option<String>,
    parent_artifact_id: Option<String>,
    properties: BTreeMap<String, String>,
    plugins: Vec<BuildPlugin>,
    plugin_management: Vec<BuildPlugin>,
    directories: BTreeMap<String, String>,
    modules: Vec<String>,
}

impl RawPom {
    /// Fold in what this pom inherits from `parent`. Own declarations win.
    fn inherit(&mut self, parent: &Self) {
        let mut properties = parent.properties.clone();
        properties.append(&mut self.properties);
        self.properties = properties;

        self.plugins = merge_plugins(&parent.plugins, &self.plugins);
        self.plugin_management = merge_plugins(&parent.plugin_management, &self.plugin_management);
    }
}

/// Parent plugins (merged with same-id child plugins) followed by the
/// child's own additional plugins.
fn merge_plugins(parent: &[BuildPlugin], child: &[BuildPlugin]) -> Vec<BuildPlugin> {
    let mut merged: Vec<BuildPlugin> = parent
        .iter()
        .map(|p| {
            child
                .iter()
                .find(|c| c.artifact_id == p.artifact_id)
                .map_or_else(|| p.clone(), |c| inherit_plugin(c, p))
        })
        .collect();

    merged.extend(
        child
            .iter()
            .filter(|c| !parent.iter().any(|p| p.artifact_id == c.artifact_id))
            .cloned(),
    );
    merged
}

/// Load the reactor rooted at `base_dir`.
///
/// The root module comes first in [`Reactor::modules`], followed by its
/// modules depth-first in declaration order.
///
/// # Errors
///
/// Returns [`Error::PomLoad`] if a `pom.xml` is missing, unreadable or
/// malformed, and [`Error::Io`] if `base_dir` cannot be made absolute.
pub fn load_reactor(base_dir: &Path, options: &LoadOptions) -> Result<Reactor> {
    let base_dir = std::path::absolute(base_dir)?;
    let mut modules = Vec::new();
    let mut visited = HashSet::new();

    load_module(
        &base_dir,
        &base_dir.join(POM_FILE),
        None,
        options,
        &mut visited,
        &mut modules,
    )?;

    let root = modules
        .first()
        .cloned()
        .ok_or_else(|| Error::PomLoad {
            path: base_dir.join(POM_FILE),
            reason: "no root module".to_string(),
        })?;

    Ok(Reactor { root, modules })
}

fn load_module(
    dir: &Path,
    pom_path: &Path,
    aggregator: Option<&RawPom>,
    options: &LoadOptions,
    visited: &mut HashSet<PathBuf>,
    modules: &mut Vec<DeclaredModule>,
) -> Result<()> {
    if !visited.insert(dir.to_path_buf()) {
        warn!(dir = %dir.display(), "module listed more than once, skipping");
        return Ok(());
    }

    let content = fs::read_to_string(pom_path).map_err(|e| Error::PomLoad {
        path: pom_path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut raw = parse_pom(&content).map_err(|reason| Error::PomLoad {
        path: pom_path.to_path_buf(),
        reason,
    })?;

    if let Some(parent) = aggregator
        && raw.parent_artifact_id.as_deref() == Some(parent.artifact_id.as_str())
    {
        raw.inherit(parent);
    }

    debug!(module = %raw.artifact_id, dir = %dir.display(), "loaded pom");
    modules.push(declare(dir, &raw, options));

    for module in &raw.modules {
        let target = dir.join(module);
        let (child_dir, child_pom) = if target.is_file() {
            let parent = target.parent().unwrap_or(dir).to_path_buf();
            (parent, target)
        } else {
            let pom = target.join(POM_FILE);
            (target, pom)
        };

        load_module(&child_dir, &child_pom, Some(&raw), options, visited, modules)?;
    }

    Ok(())
}

/// Interpolate a raw pom into a module rooted at `dir`.
fn declare(dir: &Path, raw: &RawPom, options: &LoadOptions) -> DeclaredModule {
    let mut builtins = BTreeMap::new();
    builtins.insert("basedir", dir.to_string_lossy().into_owned());
    builtins.insert("project.basedir", dir.to_string_lossy().into_owned());
    builtins.insert("project.artifactId", raw.artifact_id.clone());

    let mut interpolator = Interpolator::new(&raw.properties, builtins);

    let resolve_dir = |interpolator: &Interpolator<'_>, key: &str, default: PathBuf| {
        raw.directories
            .get(key)
            .map_or(default, |declared| dir.join(interpolator.apply(declared)))
    };

    let build_directory = resolve_dir(&interpolator, "directory", dir.join("target"));
    interpolator.define(
        "project.build.directory",
        build_directory.to_string_lossy().into_owned(),
    );

    let output_directory =
        resolve_dir(&interpolator, "outputDirectory", build_directory.join("classes"));
    let test_output_directory = resolve_dir(
        &interpolator,
        "testOutputDirectory",
        build_directory.join("test-classes"),
    );
    interpolator.define(
        "project.build.outputDirectory",
        output_directory.to_string_lossy().into_owned(),
    );

    let source_directory = resolve_dir(
        &interpolator,
        "sourceDirectory",
        dir.join("src").join("main").join("java"),
    );
    let test_source_directory = resolve_dir(
        &interpolator,
        "testSourceDirectory",
        dir.join("src").join("test").join("java"),
    );

    let plugins = raw
        .plugins
        .iter()
        .map(|plugin| {
            let plugin = raw
                .plugin_management
                .iter()
                .find(|managed| managed.artifact_id == plugin.artifact_id)
                .map_or_else(|| plugin.clone(), |managed| inherit_plugin(plugin, managed));
            BuildPlugin::new(
                plugin.artifact_id,
                plugin.configuration.map(|node| interpolator.apply_tree(&node)),
            )
        })
        .collect();

    let properties = raw
        .properties
        .iter()
        .map(|(key, value)| (key.clone(), interpolator.apply(value)))
        .collect();

    let name = raw
        .name
        .as_deref()
        .map_or_else(|| raw.artifact_id.clone(), |n| interpolator.apply(n));

    let test_classpath = read_classpath_file(
        &build_directory.join(&options.classpath_file),
        &output_directory,
        &test_output_directory,
    );

    DeclaredModule {
        name,
        base_dir: dir.to_path_buf(),
        plugins,
        properties,
        source_directory,
        test_source_directory,
        output_directory,
        test_output_directory,
        build_directory,
        test_classpath,
    }
}

/// Test classpath as Maven orders it: test classes, main classes, then the
/// resolved dependencies listed in `path`. `None` if the file is absent.
fn read_classpath_file(
    path: &Path,
    output_directory: &Path,
    test_output_directory: &Path,
) -> Option<Vec<PathBuf>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no resolved classpath file");
            return None;
        }
        Err(e) => {
            warn!(path = %path.display(), "failed to read classpath file: {e}");
            return None;
        }
    };

    let mut elements = vec![
        test_output_directory.to_path_buf(),
        output_directory.to_path_buf(),
    ];
    elements.extend(
        content
            .lines()
            .flat_map(std::env::split_paths)
            .filter(|p| !p.as_os_str().is_empty()),
    );
    Some(elements)
}

/// `plugin` with the configuration of `inherited` filled in underneath its own.
fn inherit_plugin(plugin: &BuildPlugin, inherited: &BuildPlugin) -> BuildPlugin {
    let configuration = match (&plugin.configuration, &inherited.configuration) {
        (Some(own), Some(base)) => Some(merge_config(own, base)),
        (own, base) => own.clone().or_else(|| base.clone()),
    };
    BuildPlugin::new(plugin.artifact_id.clone(), configuration)
}

/// Merge two configuration trees by element name. Values and children of
/// `own` win; elements only present in `base` are appended.
fn merge_config(own: &ConfigNode, base: &ConfigNode) -> ConfigNode {
    if own.children.is_empty() && own.value.as_deref().is_some_and(|v| !v.is_empty()) {
        return own.clone();
    }
    if own.children.is_empty() && !base.children.is_empty() {
        return base.clone();
    }

    let mut children: Vec<ConfigNode> = own
        .children
        .iter()
        .map(|c| base.child(&c.name).map_or_else(|| c.clone(), |b| merge_config(c, b)))
        .collect();
    children.extend(
        base.children
            .iter()
            .filter(|b| own.child(&b.name).is_none())
            .cloned(),
    );

    ConfigNode {
        name: own.name.clone(),
        value: if children.is_empty() { own.value.clone() } else { None },
        children,
    }
}

/// `${...}` substitution over declared properties and `project.*` builtins.
struct Interpolator<'a> {
    properties: &'a BTreeMap<String, String>,
    builtins: BTreeMap<&'static str, String>,
}

impl<'a> Interpolator<'a> {
    fn new(
        properties: &'a BTreeMap<String, String>,
        builtins: BTreeMap<&'static str, String>,
    ) -> Self {
        Self {
            properties,
            builtins,
        }
    }

    fn define(&mut self, key: &'static str, value: String) {
        self.builtins.insert(key, value);
    }

    /// Single-pass substitution; unknown references are kept verbatim.
    fn apply(&self, value: &str) -> String {
        PLACEHOLDER
            .replace_all(value, |caps: &Captures<'_>| {
                let key = &caps[1];
                self.builtins
                    .get(key)
                    .or_else(|| self.properties.get(key))
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    fn apply_tree(&self, node: &ConfigNode) -> ConfigNode {
        ConfigNode {
            name: node.name.clone(),
            value: node.value.as_deref().map(|v| self.apply(v)),
            children: node.children.iter().map(|c| self.apply_tree(c)).collect(),
        }
    }
}

fn parse_pom(content: &str) -> std::result::Result<RawPom, String> {
    let doc = Document::parse(content).map_err(|e| e.to_string())?;
    let project = doc.root_element();

    if !project.has_tag_name("project") {
        return Err(format!(
            "expected <project> root element, found <{}>",
            project.tag_name().name()
        ));
    }

    let artifact_id =
        child_text(project, "artifactId").ok_or_else(|| "missing <artifactId>".to_string())?;

    let properties = child(project, "properties")
        .map(|props| {
            props
                .children()
                .filter(Node::is_element)
                .map(|p| {
                    (
                        p.tag_name().name().to_string(),
                        p.text().map(str::trim).unwrap_or_default().to_string(),
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    let build = child(project, "build");

    let directories = build
        .map(|b| {
            [
                "directory",
                "outputDirectory",
                "testOutputDirectory",
                "sourceDirectory",
                "testSourceDirectory",
            ]
            .iter()
            .filter_map(|key| child_text(b, key).map(|v| ((*key).to_string(), v)))
            .collect()
        })
        .unwrap_or_default();

    let plugins = build
        .and_then(|b| child(b, "plugins"))
        .map(parse_plugins)
        .unwrap_or_default();

    let plugin_management = build
        .and_then(|b| child(b, "pluginManagement"))
        .and_then(|m| child(m, "plugins"))
        .map(parse_plugins)
        .unwrap_or_default();

    let modules = child(project, "modules")
        .map(|m| {
            m.children()
                .filter(|n| n.has_tag_name("module"))
                .filter_map(|n| n.text().map(str::trim))
                .filter(|text| !text.is_empty())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(RawPom {
        artifact_id,
        name: child_text(project, "name"),
        parent_artifact_id: child(project, "parent").and_then(|p| child_text(p, "artifactId")),
        properties,
        plugins,
        plugin_management,
        directories,
        modules,
    })
}

fn parse_plugins(plugins: Node<'_, '_>) -> Vec<BuildPlugin> {
    plugins
        .children()
        .filter(|n| n.has_tag_name("plugin"))
        .filter_map(|plugin| {
            let artifact_id = child_text(plugin, "artifactId")?;
            let configuration = child(plugin, "configuration").map(config_node);
            Some(BuildPlugin::new(artifact_id, configuration))
        })
        .collect()
}

fn config_node(node: Node<'_, '_>) -> ConfigNode {
    let children: Vec<ConfigNode> = node
        .children()
        .filter(Node::is_element)
        .map(config_node)
        .collect();

    let value = if children.is_empty() {
        Some(node.text().map(str::trim).unwrap_or_default().to_string())
    } else {
        None
    };

    ConfigNode {
        name: node.tag_name().name().to_string(),
        value,
        children,
    }
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    child(node, name)
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
}
