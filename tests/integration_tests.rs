//! Integration tests for project-info
//!
//! These tests create temporary Maven project trees and run the real
//! loading, inspection and aggregation pipeline over them.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use project_info::aggregator::ProjectAggregator;
use project_info::config::{InspectOptions, LoadOptions};
use project_info::model::{pom::load_reactor, snapshot::load_snapshot};
use project_info::output::to_json;
use project_info::project::{ProjectDescriptor, ROOT_MODULE_NAME};

/// Helper function to create a temporary directory structure for testing
fn create_test_directory() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a file with specified content
fn create_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directories");
    }
    fs::write(path, content).expect("Failed to write file");
}

/// Helper function to create a directory
fn create_dir(path: &Path) {
    fs::create_dir_all(path).expect("Failed to create directory");
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn pom(artifact_id: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <groupId>com.acme</groupId>
  <artifactId>{artifact_id}</artifactId>
  <version>1.0.0</version>
{body}
</project>
"#
    )
}

/// Create a two-module Maven project:
///
/// - the parent declares the compiler plugin with `source = 1.8`
/// - `lib` sets `maven.compiler.source = 11`, has compiled classes, a
///   resolved classpath and a failing test report
/// - `app` is a plain module with no build output
fn create_maven_project(base: &Path) {
    create_file(
        &base.join("pom.xml"),
        &pom(
            "acme-parent",
            r"
  <packaging>pom</packaging>
  <modules>
    <module>lib</module>
    <module>app</module>
  </modules>
  <build>
    <plugins>
      <plugin>
        <groupId>org.apache.maven.plugins</groupId>
        <artifactId>maven-compiler-plugin</artifactId>
        <configuration>
          <source>1.8</source>
          <target>1.8</target>
        </configuration>
      </plugin>
    </plugins>
  </build>",
        ),
    );
    create_dir(&base.join("src/main/java"));

    let lib = base.join("lib");
    create_file(
        &lib.join("pom.xml"),
        &pom(
            "acme-lib",
            r"
  <name>lib</name>
  <properties>
    <maven.compiler.source>11</maven.compiler.source>
  </properties>",
        ),
    );
    create_dir(&lib.join("src/main/java"));
    create_dir(&lib.join("src/test/java"));
    create_dir(&lib.join("target/classes"));
    create_dir(&lib.join("target/test-classes"));
    create_dir(&lib.join("target/classes/generated-sources"));

    let junit = base.join("repo/junit-4.13.jar");
    create_file(&junit, "");
    create_file(
        &lib.join("target/classpath.txt"),
        &format!(
            "{}\n",
            std::env::join_paths([
                junit.as_path(),
                base.join("repo/missing.jar").as_path(),
                lib.join("target/classes").as_path(),
            ])
            .expect("Failed to join classpath")
            .to_string_lossy()
        ),
    );

    create_file(
        &lib.join("target/surefire-reports/TEST-com.acme.FooTest.xml"),
        r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuite name="com.acme.FooTest" tests="3" errors="1" failures="0" skipped="0">
  <testcase name="works" classname="com.acme.FooTest"/>
</testsuite>"#,
    );
    create_file(
        &lib.join("target/surefire-reports/TEST-com.acme.BarTest.xml"),
        r#"<testsuite name="com.acme.BarTest" tests="2" errors="0" failures="0"/>"#,
    );

    create_file(
        &base.join("app/pom.xml"),
        &pom("app", "  <name>app</name>"),
    );
}

fn describe(base: &Path, options: &InspectOptions) -> ProjectDescriptor {
    let reactor = load_reactor(base, &LoadOptions::default()).expect("Failed to load reactor");
    ProjectAggregator::new(options).aggregate_reactor(&reactor)
}

#[test]
fn test_describes_multi_module_project() {
    let temp_dir = create_test_directory();
    let base = temp_dir.path();
    create_maven_project(base);

    let project = describe(base, &InspectOptions::default());

    assert_eq!(project.base_dir, path_string(base));
    assert_eq!(project.compliance_level, 8);

    let names: Vec<_> = project.modules.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec![ROOT_MODULE_NAME, "lib", "app"]);

    let lib = project.module("lib").expect("lib module");
    assert_eq!(lib.compliance_level, 11);
    assert_eq!(lib.base_dir, path_string(&base.join("lib")));
    assert_eq!(
        lib.failing_tests,
        BTreeSet::from(["com.acme.FooTest".to_string()])
    );
}

#[test]
fn test_directories_only_list_existing_paths() {
    let temp_dir = create_test_directory();
    let base = temp_dir.path();
    create_maven_project(base);

    let project = describe(base, &InspectOptions::default());

    let app = project.module("app").expect("app module");
    assert!(app.source_directories.is_empty());
    assert!(app.test_directories.is_empty());
    assert!(app.output_directories.is_empty());
    assert!(app.classpath.is_empty());
    assert!(app.failing_tests.is_empty());

    let lib = project.module("lib").expect("lib module");
    assert_eq!(
        lib.source_directories,
        BTreeSet::from([
            path_string(&base.join("lib/src/main/java")),
            path_string(&base.join("lib/target/classes/generated-sources")),
        ])
    );
    assert_eq!(
        lib.test_output_directories,
        BTreeSet::from([path_string(&base.join("lib/target/test-classes"))])
    );

    let root = project.module(ROOT_MODULE_NAME).expect("root module");
    assert_eq!(
        root.source_directories,
        BTreeSet::from([path_string(&base.join("src/main/java"))])
    );
}

#[test]
fn test_classpath_excludes_own_outputs_and_missing_entries() {
    let temp_dir = create_test_directory();
    let base = temp_dir.path();
    create_maven_project(base);

    let project = describe(base, &InspectOptions::default());

    let lib = project.module("lib").expect("lib module");
    assert_eq!(
        lib.classpath,
        BTreeSet::from([path_string(&base.join("repo/junit-4.13.jar"))])
    );
    assert_eq!(project.classpath, lib.classpath);
}

#[test]
fn test_project_sets_are_union_of_modules() {
    let temp_dir = create_test_directory();
    let base = temp_dir.path();
    create_maven_project(base);

    let project = describe(base, &InspectOptions::default());

    let union = |field: fn(&project_info::ModuleDescriptor) -> &BTreeSet<String>| {
        project
            .modules
            .iter()
            .flat_map(|m| field(m).iter().cloned())
            .collect::<BTreeSet<_>>()
    };

    assert_eq!(project.source_directories, union(|m| &m.source_directories));
    assert_eq!(project.test_directories, union(|m| &m.test_directories));
    assert_eq!(project.output_directories, union(|m| &m.output_directories));
    assert_eq!(
        project.test_output_directories,
        union(|m| &m.test_output_directories)
    );
    assert_eq!(project.classpath, union(|m| &m.classpath));
    assert_eq!(project.failing_tests, union(|m| &m.failing_tests));
    assert_eq!(project.source_directories.len(), 3);
}

#[test]
fn test_user_property_overrides_module_levels() {
    let temp_dir = create_test_directory();
    let base = temp_dir.path();
    create_maven_project(base);

    let mut options = InspectOptions::default();
    options
        .properties
        .insert("maven.compiler.source".to_string(), "17".to_string());

    let project = describe(base, &options);

    // The compiler plugin still wins at the root.
    assert_eq!(project.compliance_level, 8);
    assert_eq!(project.module("lib").map(|m| m.compliance_level), Some(17));
    assert_eq!(project.module("app").map(|m| m.compliance_level), Some(17));
}

#[test]
fn test_unset_property_falls_back_to_default() {
    let temp_dir = create_test_directory();
    let base = temp_dir.path();
    create_file(
        &base.join("pom.xml"),
        &pom(
            "single",
            r"
  <properties>
    <java.version>-1</java.version>
  </properties>",
        ),
    );

    let project = describe(base, &InspectOptions::default());

    assert_eq!(project.compliance_level, 7);
    assert_eq!(project.modules.len(), 1);
    assert_eq!(project.modules[0].name, ROOT_MODULE_NAME);
}

#[test]
fn test_custom_reports_dir() {
    let temp_dir = create_test_directory();
    let base = temp_dir.path();
    create_maven_project(base);
    create_file(
        &base.join("app/target/failsafe-reports/TEST-com.acme.ItTest.xml"),
        r#"<testsuite name="com.acme.ItTest" tests="1" errors="0" failures="1"/>"#,
    );

    let options = InspectOptions {
        reports_dir: "failsafe-reports".to_string(),
        ..InspectOptions::default()
    };
    let project = describe(base, &options);

    assert_eq!(
        project.failing_tests,
        BTreeSet::from(["com.acme.ItTest".to_string()])
    );
}

#[test]
fn test_missing_root_pom_errors() {
    let temp_dir = create_test_directory();

    let result = load_reactor(temp_dir.path(), &LoadOptions::default());
    assert!(matches!(result, Err(project_info::Error::PomLoad { .. })));
}

#[test]
fn test_snapshot_reactor() {
    let temp_dir = create_test_directory();
    let base = temp_dir.path();
    create_dir(&base.join("app/src/main/java"));
    create_dir(&base.join("app/core/src/main/java"));
    let jar = base.join("m2/guava.jar");
    create_file(&jar, "");

    let snapshot = base.join("reactor.json");
    create_file(
        &snapshot,
        &serde_json::json!({
            "root": { "name": "parent", "base_dir": "app" },
            "modules": [
                { "name": "parent", "base_dir": "app", "test_classpath": [] },
                {
                    "name": "core",
                    "base_dir": "app/core",
                    "plugins": [{
                        "artifact_id": "maven-compiler-plugin",
                        "configuration": { "source": "${java.version}" }
                    }],
                    "properties": { "java.version": "1.8.0_282" },
                    "test_classpath": ["target/test-classes", path_string(&jar)]
                }
            ]
        })
        .to_string(),
    );

    let reactor = load_snapshot(&snapshot).expect("Failed to load snapshot");
    let project = ProjectAggregator::new(&InspectOptions::default()).aggregate_reactor(&reactor);

    assert_eq!(project.base_dir, path_string(&base.join("app")));
    let names: Vec<_> = project.modules.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec![ROOT_MODULE_NAME, "core"]);

    let core = project.module("core").expect("core module");
    assert_eq!(core.compliance_level, 8);
    assert_eq!(core.classpath, BTreeSet::from([path_string(&jar)]));
    assert_eq!(project.source_directories.len(), 2);
}

#[test]
fn test_json_output_reconstructs_descriptor() {
    let temp_dir = create_test_directory();
    let base = temp_dir.path();
    create_maven_project(base);

    let project = describe(base, &InspectOptions::default());
    let json = to_json(&project, false).expect("Failed to serialize");
    let restored: ProjectDescriptor = serde_json::from_str(&json).expect("Failed to parse");

    assert_eq!(restored, project);
    assert_eq!(json, to_json(&describe(base, &InspectOptions::default()), false).expect("Failed to serialize"));
}
