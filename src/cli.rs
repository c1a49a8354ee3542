//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments and options using the
//! [clap](https://docs.rs/clap/) library.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand, ValueEnum};

use project_info::config::file::{FileConfig, expand_tilde};
use project_info::config::{
    DEFAULT_CLASSPATH_FILE, DEFAULT_REPORTS_DIR, InspectOptions, LoadOptions, OutputFormat,
    OutputOptions,
};

/// Parse a `-D` definition the way Maven does: `key=value`, or a bare `key`
/// which sets the property to `"true"`.
fn parse_define(s: &str) -> Result<(String, String), String> {
    let (key, value) = s.split_once('=').unwrap_or((s, "true"));
    let key = key.trim();

    if key.is_empty() {
        return Err(format!("invalid property definition \"{s}\": empty key"));
    }

    Ok((key.to_string(), value.to_string()))
}

/// Command-line arguments controlling the descriptor output.
#[derive(Parser)]
struct OutputArgs {
    /// Output format (json, text)
    #[arg(short = 'f', long, value_enum)]
    format: Option<OutputFormat>,

    /// Print JSON on a single line instead of pretty-printing it
    #[arg(long)]
    compact: bool,
}

/// Command-line arguments controlling how modules are loaded and inspected.
#[derive(Parser)]
struct InspectionArgs {
    /// Set a user property, overriding module properties (repeatable)
    ///
    /// Behaves like Maven's `-D`: `-D java.version=17` or `-Dskip` (= "true").
    /// The value "-1" is treated as not set.
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE", value_parser = parse_define)]
    defines: Vec<(String, String)>,

    /// The number of threads used to inspect modules
    ///
    /// A value of 0 uses the default number of threads (typically the number of CPU cores).
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Test report directory, relative to each module's build directory
    #[arg(long)]
    reports_dir: Option<String>,

    /// Resolved classpath file, relative to each module's build directory
    ///
    /// Generate it with `mvn dependency:build-classpath -Dmdep.outputFile=target/classpath.txt`.
    #[arg(long)]
    classpath_file: Option<String>,

    /// Log inspection details to stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
///
/// Helper methods accept a [`FileConfig`] reference so that config-file values act as
/// defaults when the corresponding CLI argument is not provided.
#[derive(Parser)]
#[command(name = "project-info")]
#[command(
    about = "Describe a multi-module Maven project: compliance level, source/test/output directories, test classpath and failing tests"
)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand (e.g. `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// Maven project directory (the one holding the root pom.xml)
    ///
    /// Defaults to the current directory if not specified.
    dir: Option<PathBuf>,

    /// Read the reactor from a JSON snapshot instead of pom.xml files
    #[arg(long, value_name = "FILE", conflicts_with = "dir")]
    snapshot: Option<PathBuf>,

    /// Output options
    #[command(flatten)]
    output: OutputArgs,

    /// Inspection options
    #[command(flatten)]
    inspection: InspectionArgs,
}

impl Cli {
    /// Whether `--verbose` logging is enabled.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.inspection.verbose
    }

    /// Snapshot file to load the reactor from, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<&Path> {
        self.snapshot.as_deref()
    }

    /// Resolve the project directory from CLI args, config file, or default.
    ///
    /// Priority: CLI argument > config file `dir` > current directory (`.`).
    /// Tilde expansion is applied to paths originating from the config file.
    #[must_use]
    pub fn directory(&self, config: &FileConfig) -> PathBuf {
        if let Some(ref dir) = self.dir {
            return dir.clone();
        }

        config
            .dir
            .as_ref()
            .map_or_else(|| PathBuf::from("."), |dir| expand_tilde(dir))
    }

    /// Extract inspection options from CLI args and config file.
    ///
    /// - **properties**: config `[properties]` first, then every `-D`, later ones winning
    /// - **`reports_dir`**: CLI > config > `surefire-reports`
    /// - **threads**: CLI > config > `0` (default)
    #[must_use]
    pub fn inspect_options(&self, config: &FileConfig) -> InspectOptions {
        let mut properties: BTreeMap<String, String> = config.properties.clone();
        properties.extend(self.inspection.defines.iter().cloned());

        InspectOptions {
            properties,
            reports_dir: self
                .inspection
                .reports_dir
                .clone()
                .or_else(|| config.inspection.reports_dir.clone())
                .unwrap_or_else(|| DEFAULT_REPORTS_DIR.to_string()),
            threads: self
                .inspection
                .threads
                .or(config.inspection.threads)
                .unwrap_or(0),
        }
    }

    /// Extract reactor loading options from CLI args and config file.
    ///
    /// Priority: CLI argument > config file > `classpath.txt`.
    #[must_use]
    pub fn load_options(&self, config: &FileConfig) -> LoadOptions {
        LoadOptions {
            classpath_file: self
                .inspection
                .classpath_file
                .clone()
                .or_else(|| config.inspection.classpath_file.clone())
                .unwrap_or_else(|| DEFAULT_CLASSPATH_FILE.to_string()),
        }
    }

    /// Extract output options from CLI args and config file.
    ///
    /// - **format**: CLI > config (case-insensitive) > JSON
    /// - **pretty**: `--compact` wins, then the config value, then `true`
    #[must_use]
    pub fn output_options(&self, config: &FileConfig) -> OutputOptions {
        OutputOptions {
            format: self
                .output
                .format
                .or_else(|| {
                    config
                        .format
                        .as_ref()
                        .and_then(|s| OutputFormat::from_str(s, true).ok())
                })
                .unwrap_or_default(),
            pretty: !self.output.compact && config.pretty.unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use project_info::config::file::FileInspectConfig;

    #[test]
    fn test_default_values() {
        let args = Cli::parse_from(["project-info"]);
        let config = FileConfig::default();

        assert!(args.subcommand.is_none());
        assert!(args.snapshot().is_none());
        assert!(!args.verbose());
        assert_eq!(args.directory(&config), PathBuf::from("."));

        let inspect = args.inspect_options(&config);
        assert!(inspect.properties.is_empty());
        assert_eq!(inspect.reports_dir, "surefire-reports");
        assert_eq!(inspect.threads, 0);

        assert_eq!(args.load_options(&config).classpath_file, "classpath.txt");

        let output = args.output_options(&config);
        assert_eq!(output.format, OutputFormat::Json);
        assert!(output.pretty);
    }

    #[test]
    fn test_custom_directory() {
        let args = Cli::parse_from(["project-info", "/work/app"]);
        assert_eq!(
            args.directory(&FileConfig::default()),
            PathBuf::from("/work/app")
        );
    }

    #[test]
    fn test_snapshot_flag() {
        let args = Cli::parse_from(["project-info", "--snapshot", "reactor.json"]);
        assert_eq!(args.snapshot(), Some(Path::new("reactor.json")));
    }

    #[test]
    fn test_snapshot_conflicts_with_dir() {
        assert!(Cli::try_parse_from(["project-info", "/work/app", "--snapshot", "r.json"]).is_err());
    }

    #[test]
    fn test_defines() {
        let args = Cli::parse_from([
            "project-info",
            "-D",
            "java.version=17",
            "-Dmaven.compiler.source=1.8",
            "--define",
            "skipTests",
        ]);
        let props = args.inspect_options(&FileConfig::default()).properties;

        assert_eq!(props.get("java.version").map(String::as_str), Some("17"));
        assert_eq!(
            props.get("maven.compiler.source").map(String::as_str),
            Some("1.8")
        );
        assert_eq!(props.get("skipTests").map(String::as_str), Some("true"));
    }

    #[test]
    fn test_define_value_may_contain_equals() {
        assert_eq!(
            parse_define("argLine=-Dfoo=bar").unwrap(),
            ("argLine".to_string(), "-Dfoo=bar".to_string())
        );
    }

    #[test]
    fn test_define_rejects_empty_key() {
        assert!(parse_define("=11").is_err());
        assert!(Cli::try_parse_from(["project-info", "-D", "=11"]).is_err());
    }

    #[test]
    fn test_later_define_wins() {
        let args = Cli::parse_from(["project-info", "-Djava.version=8", "-Djava.version=11"]);
        let props = args.inspect_options(&FileConfig::default()).properties;
        assert_eq!(props.get("java.version").map(String::as_str), Some("11"));
    }

    #[test]
    fn test_short_flags() {
        let args = Cli::parse_from(["project-info", "-f", "text", "-t", "4", "-v"]);
        let config = FileConfig::default();

        assert_eq!(args.output_options(&config).format, OutputFormat::Text);
        assert_eq!(args.inspect_options(&config).threads, 4);
        assert!(args.verbose());
    }

    #[test]
    fn test_compact_disables_pretty() {
        let args = Cli::parse_from(["project-info", "--compact"]);
        assert!(!args.output_options(&FileConfig::default()).pretty);
    }

    #[test]
    fn test_config_values_used_when_cli_absent() {
        let config = FileConfig {
            format: Some("text".to_string()),
            pretty: Some(false),
            dir: Some(PathBuf::from("/from/config")),
            inspection: FileInspectConfig {
                threads: Some(8),
                reports_dir: Some("failsafe-reports".to_string()),
                classpath_file: Some("cp.txt".to_string()),
            },
            properties: BTreeMap::from([("java.version".to_string(), "17".to_string())]),
        };
        let args = Cli::parse_from(["project-info"]);

        assert_eq!(args.directory(&config), PathBuf::from("/from/config"));

        let inspect = args.inspect_options(&config);
        assert_eq!(inspect.threads, 8);
        assert_eq!(inspect.reports_dir, "failsafe-reports");
        assert_eq!(
            inspect.properties.get("java.version").map(String::as_str),
            Some("17")
        );

        assert_eq!(args.load_options(&config).classpath_file, "cp.txt");

        let output = args.output_options(&config);
        assert_eq!(output.format, OutputFormat::Text);
        assert!(!output.pretty);
    }

    #[test]
    fn test_cli_overrides_config_values() {
        let config = FileConfig {
            format: Some("text".to_string()),
            dir: Some(PathBuf::from("/from/config")),
            inspection: FileInspectConfig {
                threads: Some(8),
                reports_dir: Some("failsafe-reports".to_string()),
                classpath_file: Some("cp.txt".to_string()),
            },
            properties: BTreeMap::from([("java.version".to_string(), "17".to_string())]),
            ..FileConfig::default()
        };
        let args = Cli::parse_from([
            "project-info",
            "/from/cli",
            "--format",
            "json",
            "--threads",
            "2",
            "--reports-dir",
            "my-reports",
            "--classpath-file",
            "deps.txt",
            "-Djava.version=11",
        ]);

        assert_eq!(args.directory(&config), PathBuf::from("/from/cli"));
        assert_eq!(args.output_options(&config).format, OutputFormat::Json);
        assert_eq!(args.load_options(&config).classpath_file, "deps.txt");

        let inspect = args.inspect_options(&config);
        assert_eq!(inspect.threads, 2);
        assert_eq!(inspect.reports_dir, "my-reports");
        assert_eq!(
            inspect.properties.get("java.version").map(String::as_str),
            Some("11")
        );
    }

    #[test]
    fn test_config_format_case_insensitive() {
        let config = FileConfig {
            format: Some("TEXT".to_string()),
            ..FileConfig::default()
        };
        let args = Cli::parse_from(["project-info"]);
        assert_eq!(args.output_options(&config).format, OutputFormat::Text);
    }

    #[test]
    fn test_invalid_config_format_falls_back_to_default() {
        let config = FileConfig {
            format: Some("yaml".to_string()),
            ..FileConfig::default()
        };
        let args = Cli::parse_from(["project-info"]);
        assert_eq!(args.output_options(&config).format, OutputFormat::Json);
    }

    #[test]
    fn test_config_dir_with_tilde_expansion() {
        let config = FileConfig {
            dir: Some(PathBuf::from("~/work/app")),
            ..FileConfig::default()
        };
        let args = Cli::parse_from(["project-info"]);

        if let Some(home) = dirs::home_dir() {
            assert_eq!(args.directory(&config), home.join("work/app"));
        }
    }

    #[test]
    fn test_config_subcommands() {
        for (name, expected) in [("show", "show"), ("init", "init"), ("path", "path")] {
            let args = Cli::parse_from(["project-info", "config", name]);
            let Some(Commands::Config { command }) = args.subcommand else {
                panic!("expected config subcommand");
            };
            let parsed = match command {
                ConfigCommand::Show => "show",
                ConfigCommand::Init => "init",
                ConfigCommand::Path => "path",
            };
            assert_eq!(parsed, expected);
        }
    }
}
