use hide_config::HideConfig;

/// Warn about `HIDEMETER_*` keys that look mistyped and left a section at its defaults.
pub fn warn_unconfigured(config: &HideConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &HideConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    if !config.detector.is_configured()
        && keys
            .iter()
            .any(|key| key.starts_with("HIDEMETER_DETECTOR") && !key.starts_with("HIDEMETER_DETECTOR__"))
    {
        warnings.push(
            "Detector config appears default while HIDEMETER_DETECTOR* env vars exist. Use double underscores (example: HIDEMETER_DETECTOR__API_KEY)."
                .to_string(),
        );
    }

    if config.storage.data_dir.is_empty()
        && keys
            .iter()
            .any(|key| key.starts_with("HIDEMETER_STORAGE") && !key.starts_with("HIDEMETER_STORAGE__"))
    {
        warnings.push(
            "Storage config appears default while HIDEMETER_STORAGE* env vars exist. Use double underscores (example: HIDEMETER_STORAGE__DATA_DIR)."
                .to_string(),
        );
    }

    warnings
}
