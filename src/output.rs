//! Descriptor rendering for stdout.
//!
//! JSON is the format meant for tools: field order follows the descriptor
//! structs and every set is sorted, so identical inputs always produce
//! identical output. The text format is a colored summary for humans.

use std::collections::BTreeSet;

use colored::Colorize;

use crate::{
    config::{OutputFormat, OutputOptions},
    project::{ModuleDescriptor, ProjectDescriptor},
};

/// Render `project` in the configured format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(project: &ProjectDescriptor, options: OutputOptions) -> serde_json::Result<String> {
    match options.format {
        OutputFormat::Json => to_json(project, options.pretty),
        OutputFormat::Text => Ok(to_text(project)),
    }
}

/// Serialize `project` as a JSON document.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(project: &ProjectDescriptor, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(project)
    } else {
        serde_json::to_string(project)
    }
}

/// Human-readable summary of `project`.
#[must_use]
pub fn to_text(project: &ProjectDescriptor) -> String {
    let mut lines = vec![format!(
        "{} {} {}",
        "☕".bold(),
        project.base_dir.bold(),
        format!("(Java {})", project.compliance_level).bright_black()
    )];
    lines.extend(set_lines("  ", &project_sets(project)));

    lines.push(String::new());
    lines.push(
        format!("Modules ({}):", project.modules.len())
            .bold()
            .to_string(),
    );
    for module in &project.modules {
        let name = if module.is_root() {
            module.name.yellow().bold()
        } else {
            module.name.green().bold()
        };
        lines.push(format!(
            "  {name} {} {}",
            module.base_dir,
            format!("(Java {})", module.compliance_level).bright_black()
        ));
        lines.extend(set_lines("    ", &module_sets(module)));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

type NamedSet<'a> = (&'static str, &'a BTreeSet<String>);

fn project_sets(p: &ProjectDescriptor) -> [NamedSet<'_>; 6] {
    [
        ("sources", &p.source_directories),
        ("tests", &p.test_directories),
        ("output", &p.output_directories),
        ("test output", &p.test_output_directories),
        ("classpath", &p.classpath),
        ("failing tests", &p.failing_tests),
    ]
}

fn module_sets(m: &ModuleDescriptor) -> [NamedSet<'_>; 6] {
    [
        ("sources", &m.source_directories),
        ("tests", &m.test_directories),
        ("output", &m.output_directories),
        ("test output", &m.test_output_directories),
        ("classpath", &m.classpath),
        ("failing tests", &m.failing_tests),
    ]
}

fn set_lines(indent: &str, sets: &[NamedSet<'_>]) -> Vec<String> {
    let mut lines = Vec::new();

    for (label, set) in sets {
        lines.push(format!(
            "{indent}{}",
            format!("{label} ({}):", set.len()).cyan()
        ));
        lines.extend(set.iter().map(|entry| {
            if *label == "failing tests" {
                format!("{indent}  {}", entry.red())
            } else {
                format!("{indent}  {entry}")
            }
        }));
    }

    lines
}
