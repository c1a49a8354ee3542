//! # project-info
//!
//! Extracts a normalized description of a multi-module Maven project: the
//! Java compliance level, source and test directories, output directories,
//! the resolved test classpath and the test classes that failed in the last
//! run. The result is a single [`ProjectDescriptor`] meant to be consumed by
//! external tools (analysis, repair, test generation).
//!
//! ## Pipeline
//!
//! 1. [`model`] loads the reactor, either from `pom.xml` files on disk
//!    ([`model::pom`]) or from a JSON snapshot ([`model::snapshot`])
//! 2. [`inspector::ModuleInspector`] describes each module
//! 3. [`aggregator::ProjectAggregator`] names the root module and merges the
//!    module descriptors into the project-level union
//! 4. [`output`] renders the descriptor as JSON or as a colored summary
//!
//! ## Example
//!
//! ```no_run
//! use project_info::{
//!     aggregator::ProjectAggregator,
//!     config::{InspectOptions, LoadOptions},
//!     model::pom::load_reactor,
//! };
//!
//! let reactor = load_reactor("my-app".as_ref(), &LoadOptions::default())?;
//! let project = ProjectAggregator::new(&InspectOptions::default()).aggregate_reactor(&reactor);
//! println!("{}", project_info::output::to_json(&project, true)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod aggregator;
pub mod classpath;
pub mod config;
pub mod error;
pub mod inspector;
pub mod model;
pub mod output;
pub mod project;
pub mod reports;
pub mod utils;
pub mod version;

pub use error::{Error, Result};
pub use project::{ModuleDescriptor, ProjectDescriptor};
