use std::path::Path;

use anyhow::Context;

/// Read a photograph from disk.
pub fn read(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read image {}", path.display()))
}

/// File name recorded with a measurement.
pub fn name(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}

/// Learning thumbnail for `path`, or `None` with a warning if it cannot be made.
pub fn thumbnail(path: &Path) -> Option<String> {
    let prepared = read(path).and_then(|bytes| Ok(hide_detect::thumbnail(&bytes)?));
    match prepared {
        Ok(prepared) => Some(prepared.base64),
        Err(error) => {
            tracing::warn!(error = %format!("{error:#}"), "no learning thumbnail");
            None
        }
    }
}
