//! Project descriptors produced by the aggregation.
//!
//! ## Main Parts
//!
//! - [`ModuleDescriptor`] - build facts of a single reactor module
//! - [`ProjectDescriptor`] - root-level facts plus every module descriptor

pub mod descriptor;
pub mod module;

pub use descriptor::ProjectDescriptor;
pub use module::{ModuleDescriptor, ROOT_MODULE_NAME};
