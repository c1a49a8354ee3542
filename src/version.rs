//! Java version string parsing.
//!
//! Maven reports Java versions both in the legacy dotted form (`1.8`,
//! `1.8.0_282`) and in the bare form (`8`, `11`, `17.0.2`). This module turns
//! either form into the integer compliance level.

use crate::error::{Error, Result};

/// Parse a Java version string into a compliance level.
///
/// - No `.`: the whole string is the level (`"11"` → `11`).
/// - Dotted, third character is a `.`: the first two characters are the
///   level (`"11.0.2"` → `11`).
/// - Otherwise dotted: the second dot-delimited segment is the level
///   (`"1.8"` → `8`, `"1.8.0_282"` → `8`).
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`Error::InvalidVersionFormat`] if the string is empty or the
/// selected part is not an unsigned integer.
///
/// # Examples
///
/// ```
/// # use project_info::version::parse_compliance_level;
/// assert_eq!(parse_compliance_level("1.8").unwrap(), 8);
/// assert_eq!(parse_compliance_level("17").unwrap(), 17);
/// ```
pub fn parse_compliance_level(version: &str) -> Result<u32> {
    let version = version.trim();
    let invalid = || Error::InvalidVersionFormat(version.to_string());

    if version.is_empty() {
        return Err(invalid());
    }

    let major = if version.contains('.') {
        if version.as_bytes().get(2) == Some(&b'.') {
            version.get(..2).ok_or_else(invalid)?
        } else {
            version.split('.').nth(1).ok_or_else(invalid)?
        }
    } else {
        version
    };

    if major.is_empty() || !major.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    major.parse::<u32>().map_err(|_| invalid())
}
