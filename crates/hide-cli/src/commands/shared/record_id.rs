use anyhow::bail;
use hide_core::ids::{PREFIX_MEASUREMENT, has_prefix};

/// Reject arguments that cannot name a saved measurement.
pub fn check(id: &str) -> anyhow::Result<()> {
    if !has_prefix(id, PREFIX_MEASUREMENT) {
        bail!("'{id}' is not a measurement id (expected {PREFIX_MEASUREMENT}-xxxxxxxx)");
    }
    Ok(())
}
