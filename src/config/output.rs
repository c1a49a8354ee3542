//! Output configuration.

use clap::ValueEnum;

/// Rendering of the project descriptor on stdout.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum, Default)]
pub enum OutputFormat {
    /// Single JSON document, meant for tools
    #[default]
    Json,

    /// Human-readable summary
    Text,
}

/// Configuration for descriptor output.
#[derive(Clone, Copy, Debug)]
pub struct OutputOptions {
    pub format: OutputFormat,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
        }
    }
}
