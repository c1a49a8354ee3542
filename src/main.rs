//! # project-info
//!
//! A CLI tool that describes a multi-module Maven project as a single JSON
//! document: Java compliance level, source/test/output directories, resolved
//! test classpath and failing test classes, for the whole reactor and per
//! module.
//!
//! ## Usage
//!
//! ```bash
//! # Describe the project in the current directory
//! project-info
//!
//! # Resolve the classpath first so it can be reported
//! mvn dependency:build-classpath -Dmdep.outputFile=target/classpath.txt
//! project-info ~/work/my-app
//!
//! # Override the Java version, print a summary
//! project-info -D java.version=17 --format text
//!
//! # Describe a reactor exported by another tool
//! project-info --snapshot reactor.json
//! ```

mod cli;

use std::process::exit;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommand};
use colored::Colorize;
use project_info::{
    aggregator::ProjectAggregator,
    config::FileConfig,
    model::{pom::load_reactor, snapshot::load_snapshot},
    output,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Entry point for the project-info application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and printing
/// any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// Parses arguments, loads the reactor from `pom.xml` files or a snapshot,
/// aggregates the project descriptor and prints it.
///
/// # Errors
///
/// Returns errors from thread-pool configuration, reactor loading, or
/// JSON serialization.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    init_logging(args.verbose());

    if let Some(Commands::Config { command }) = &args.subcommand {
        return handle_config_command(command);
    }

    let file_config = load_config();

    let inspect_options = args.inspect_options(&file_config);
    let load_options = args.load_options(&file_config);
    let output_options = args.output_options(&file_config);

    if inspect_options.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(inspect_options.threads)
            .build_global()?;
    }

    let reactor = if let Some(snapshot) = args.snapshot() {
        info!(snapshot = %snapshot.display(), "loading reactor snapshot");
        load_snapshot(snapshot)?
    } else {
        let dir = args.directory(&file_config);
        info!(dir = %dir.display(), "loading reactor");
        load_reactor(&dir, &load_options)?
    };

    let project = ProjectAggregator::new(&inspect_options).aggregate_reactor(&reactor);

    println!("{}", output::render(&project, output_options)?);
    Ok(())
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
/// output with `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("project_info={default_level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

// ── Config subcommand ────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# project-info configuration
# All values shown are their defaults. Uncomment and change as needed.

# Output format: json or text
# format = "json"

# Pretty-print JSON output
# pretty = true

# Default project directory (defaults to current directory when not set)
# dir = "."

[inspection]
# Number of threads used to inspect modules (0 = all CPU cores)
# threads = 0

# Test report directory, relative to each module's build directory
# reports_dir = "surefire-reports"

# Resolved classpath file, relative to each module's build directory
# classpath_file = "classpath.txt"

[properties]
# User properties applied to every module, like `-D key=value`
# "java.version" = "17"
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load()?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_str(val: Option<&str>, default: &str) -> String {
        val.map_or_else(
            || format!("\"{default}\"  (default)"),
            |v| format!("\"{v}\""),
        )
    }
    fn show_bool(val: Option<bool>, default: bool) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }
    fn show_usize(val: Option<usize>, default: &str) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }

    let dir_str = config.dir.as_ref().map_or_else(
        || "\".\"  (default)".to_string(),
        |p| format!("\"{}\"", p.display()),
    );

    let properties = if config.properties.is_empty() {
        "(none)".to_string()
    } else {
        config
            .properties
            .iter()
            .map(|(k, v)| format!("\"{k}\" = \"{v}\""))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "\
format         = {format}
pretty         = {pretty}
dir            = {dir}

[inspection]
threads        = {threads}
reports_dir    = {reports_dir}
classpath_file = {classpath_file}

[properties]
{properties}",
        format = show_str(config.format.as_deref(), "json"),
        pretty = show_bool(config.pretty, true),
        dir = dir_str,
        threads = show_usize(config.inspection.threads, "0 (all cores)"),
        reports_dir = show_str(config.inspection.reports_dir.as_deref(), "surefire-reports"),
        classpath_file = show_str(config.inspection.classpath_file.as_deref(), "classpath.txt"),
    )
}

/// Write a default config template to the config file path if it does not exist yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    std::fs::write(&path, CONFIG_TEMPLATE)
        .map_err(|e| anyhow::anyhow!("Failed to write config file {}: {e}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config() -> FileConfig {
    FileConfig::load().unwrap_or_else(|e| {
        eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
        FileConfig::default()
    })
}
