//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use hide_config::{ConfigError, HideConfig};
use hide_core::ReferenceSheet;
use pretty_assertions::assert_eq;

#[test]
fn loads_detector_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[detector]
endpoint = "https://segment.example.com/v1/measure"
api_key = "toml-key"
model = "hide-seg-large"
timeout_secs = 45
max_attempts = 5
backoff_ms = 250
temperature = 0.2
"#,
        )?;

        let config: HideConfig = Figment::from(Serialized::defaults(HideConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.detector.endpoint, "https://segment.example.com/v1/measure");
        assert_eq!(config.detector.api_key, "toml-key");
        assert_eq!(config.detector.model, "hide-seg-large");
        assert_eq!(config.detector.timeout_secs, 45);
        assert_eq!(config.detector.max_attempts, 5);
        assert_eq!(config.detector.backoff_ms, 250);
        assert!((config.detector.temperature - 0.2).abs() < f32::EPSILON);
        assert!(config.detector.is_configured());
        Ok(())
    });
}

#[test]
fn loads_storage_editor_and_calibration_sections() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[storage]
data_dir = "/var/lib/hidemeter"
max_history_bytes = 5242880

[editor]
zoom_step = 1.0
vertex_hit_radius = 20.0

[calibration]
reference_sheet = "letter"
min_original_unit_area = 25.0
"#,
        )?;

        let config: HideConfig = Figment::from(Serialized::defaults(HideConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.storage.data_dir, "/var/lib/hidemeter");
        assert_eq!(config.storage.capacity(), Some(5_242_880));
        assert!((config.editor.zoom_step - 1.0).abs() < f64::EPSILON);
        assert!((config.editor.vertex_hit_radius - 20.0).abs() < f64::EPSILON);
        assert!((config.editor.stroke_width - 3.0).abs() < f64::EPSILON);
        assert_eq!(config.calibration.reference_sheet, ReferenceSheet::Letter);
        assert!((config.calibration.min_original_unit_area - 25.0).abs() < f64::EPSILON);
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_figment_chain() {
    Jail::expect_with(|jail| {
        jail.create_dir(".hidemeter")?;
        jail.create_file(
            ".hidemeter/config.toml",
            r#"
[calibration]
reference_sheet = "a3"
"#,
        )?;

        let config = HideConfig::load().expect("config loads");
        assert_eq!(config.calibration.reference_sheet, ReferenceSheet::A3);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[detector]
api_key = "from-toml"
max_attempts = 2
"#,
        )?;
        jail.set_env("HIDEMETER_DETECTOR__API_KEY", "from-env");

        let config: HideConfig = Figment::from(Serialized::defaults(HideConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("HIDEMETER_").split("__"))
            .extract()?;

        assert_eq!(config.detector.api_key, "from-env");
        assert_eq!(config.detector.max_attempts, 2);
        Ok(())
    });
}

#[test]
fn unknown_reference_sheet_fails_to_extract() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[calibration]
reference_sheet = "legal"
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(HideConfig::default()))
            .merge(Toml::file("config.toml"));
        assert!(matches!(
            HideConfig::from_figment(&figment),
            Err(ConfigError::Figment(_))
        ));
        Ok(())
    });
}

#[test]
fn out_of_range_values_fail_validation() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[editor]
zoom_step = -0.5
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(HideConfig::default()))
            .merge(Toml::file("config.toml"));
        let err = HideConfig::from_figment(&figment).unwrap_err();
        assert!(err.to_string().contains("editor.zoom_step"), "{err}");
        Ok(())
    });
}
