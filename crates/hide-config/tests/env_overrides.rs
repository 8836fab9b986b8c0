//! Environment variable overrides through the full provider chain.

use figment::Jail;
use hide_config::HideConfig;
use hide_core::ReferenceSheet;

#[test]
fn env_fills_every_section() {
    Jail::expect_with(|jail| {
        jail.set_env("HIDEMETER_DETECTOR__ENDPOINT", "http://localhost:8080/measure");
        jail.set_env("HIDEMETER_DETECTOR__API_KEY", "env-key");
        jail.set_env("HIDEMETER_DETECTOR__BACKOFF_MS", "10");
        jail.set_env("HIDEMETER_STORAGE__DATA_DIR", "/tmp/hidemeter-test");
        jail.set_env("HIDEMETER_EDITOR__ZOOM_STEP", "0.25");
        jail.set_env("HIDEMETER_CALIBRATION__REFERENCE_SHEET", "letter");

        let config = HideConfig::load().expect("config loads");
        assert!(config.require_detector().is_ok());
        assert_eq!(config.detector.backoff_ms, 10);
        assert_eq!(config.storage.data_dir, "/tmp/hidemeter-test");
        assert!((config.editor.zoom_step - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.calibration.reference_sheet, ReferenceSheet::Letter);
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".hidemeter")?;
        jail.create_file(
            ".hidemeter/config.toml",
            r#"
[detector]
max_attempts = 4
"#,
        )?;
        jail.set_env("HIDEMETER_DETECTOR__MAX_ATTEMPTS", "6");

        let config = HideConfig::load().expect("config loads");
        assert_eq!(config.detector.max_attempts, 6);
        Ok(())
    });
}

#[test]
fn invalid_env_value_is_reported() {
    Jail::expect_with(|jail| {
        jail.set_env("HIDEMETER_DETECTOR__MAX_ATTEMPTS", "0");
        assert!(HideConfig::load().is_err());
        Ok(())
    });
}
