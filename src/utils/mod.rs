//! Utility functions and helpers.
//!
//! This module contains utility functions used throughout the application,
//! such as path normalization helpers.

pub mod paths;

pub use paths::{absolute_path_string, existing_path_string};
