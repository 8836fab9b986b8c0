//! Serde roundtrip and JsonSchema validation tests for persisted records.

use chrono::Utc;
use hide_core::{LearningReference, MeasurementRecord, MeasurementResult, Polygon, ReferenceSheet};
use schemars::schema_for;

fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn hide_outline() -> Polygon {
    Polygon::from_flat(&[
        120.0, 140.0, 380.0, 90.0, 610.0, 120.0, 820.0, 260.0, 870.0, 480.0, 790.0, 700.0,
        600.0, 860.0, 340.0, 880.0, 170.0, 720.0, 100.0, 500.0, 90.0, 300.0,
    ])
}

fn automatic_result() -> MeasurementResult {
    MeasurementResult {
        detected_reference: true,
        detected_target: true,
        area_m2: 1.734,
        explanation: "Hide and A4 sheet detected".into(),
        confidence: 87,
        target: hide_outline(),
        reference_outline: "M 40 40 L 190 40 L 190 250 L 40 250 Z".into(),
        manual: false,
        edited: false,
    }
}

roundtrip_and_validate!(result_roundtrip, MeasurementResult, automatic_result());

roundtrip_and_validate!(
    record_roundtrip,
    MeasurementRecord,
    MeasurementRecord {
        id: "msr-a3f8b2c1".into(),
        created_at: Utc::now(),
        image_name: Some("hide-042.jpg".into()),
        result: MeasurementResult {
            edited: true,
            ..automatic_result()
        },
    }
);

roundtrip_and_validate!(
    manual_record_without_image_roundtrip,
    MeasurementRecord,
    MeasurementRecord {
        id: "msr-00ff00ff".into(),
        created_at: Utc::now(),
        image_name: None,
        result: MeasurementResult::blank_manual(),
    }
);

roundtrip_and_validate!(
    learning_reference_roundtrip,
    LearningReference,
    LearningReference::new("/9j/4AAQSkZJRg==", hide_outline()).unwrap()
);

roundtrip_and_validate!(sheet_roundtrip, ReferenceSheet, ReferenceSheet::Letter);

#[test]
fn record_flattens_result_fields() {
    let record = MeasurementRecord {
        id: "msr-a3f8b2c1".into(),
        created_at: Utc::now(),
        image_name: None,
        result: automatic_result(),
    };
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["area_m2"], serde_json::json!(1.734));
    assert!(value.get("result").is_none());
    assert_eq!(value["target"].as_array().unwrap().len(), 11);
}

#[test]
fn out_of_grid_points_fail_to_decode() {
    let json = r#"{
        "id": "msr-a3f8b2c1",
        "created_at": "2026-01-01T00:00:00Z",
        "image_name": null,
        "detected_reference": true,
        "detected_target": true,
        "area_m2": 1.0,
        "explanation": "",
        "confidence": 50,
        "target": [{"x": 10, "y": 10}, {"x": 2000, "y": 10}, {"x": 10, "y": 20}],
        "reference_outline": ""
    }"#;
    assert!(serde_json::from_str::<MeasurementRecord>(json).is_err());
}
