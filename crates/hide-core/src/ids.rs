//! ID prefix constants and generation.
//!
//! IDs are `{prefix}-{8 hex chars}`, e.g. `msr-a3f8b2c1`.

use crate::errors::CoreError;

/// Prefix for saved measurement records.
pub const PREFIX_MEASUREMENT: &str = "msr";

/// Generate a prefixed random ID from 4 bytes of OS entropy.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] if the OS random source is unavailable.
pub fn generate_id(prefix: &str) -> Result<String, CoreError> {
    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes)
        .map_err(|e| CoreError::Validation(format!("random source unavailable: {e}")))?;
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("{prefix}-{hex}"))
}

/// Check that `id` has the `{prefix}-{8 hex}` shape.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
