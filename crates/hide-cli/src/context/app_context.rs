use std::path::PathBuf;

use anyhow::Context;
use hide_config::HideConfig;
use hide_editor::EditorSettings;
use hide_store::{FileStore, MeasurementLog};

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: HideConfig,
    pub settings: EditorSettings,
    pub log: MeasurementLog<FileStore>,
}

impl AppContext {
    /// Open the history store named by `--data-dir` or the storage config.
    pub fn init(config: HideConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let data_dir = match &flags.data_dir {
            Some(dir) => PathBuf::from(dir),
            None => config
                .storage
                .resolved_data_dir()
                .context("no data directory available; set storage.data_dir")?,
        };
        tracing::debug!(dir = %data_dir.display(), "opening history store");

        let store = FileStore::open(&data_dir, config.storage.capacity())
            .with_context(|| format!("failed to open history store at {}", data_dir.display()))?;

        Ok(Self {
            settings: editor_settings(&config),
            log: MeasurementLog::open(store),
            config,
        })
    }
}

/// Editor tuning from the `editor` and `calibration` sections.
#[must_use]
pub fn editor_settings(config: &HideConfig) -> EditorSettings {
    EditorSettings {
        zoom_step: config.editor.zoom_step,
        vertex_hit_radius: config.editor.vertex_hit_radius,
        stroke_width: config.editor.stroke_width,
        reference_sheet: config.calibration.reference_sheet,
        min_original_unit_area: config.calibration.min_original_unit_area,
    }
}
