//! Configuration types for the application.
//!
//! Options are assembled from three layers: command-line arguments, the
//! TOML configuration file, and hardcoded defaults.

pub mod file;
pub mod inspect;
pub mod output;

pub use file::FileConfig;
pub use inspect::{DEFAULT_CLASSPATH_FILE, DEFAULT_REPORTS_DIR, InspectOptions, LoadOptions};
pub use output::{OutputFormat, OutputOptions};
