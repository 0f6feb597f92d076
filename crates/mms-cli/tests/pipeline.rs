//! Integration tests for the pipeline module.

use std::path::{Path, PathBuf};

use mms_cli::pipeline::{export_path, parse_records, read_records, run_profiles};
use mms_profiles::ProfileRegistry;
use serde_json::json;

#[test]
fn parses_single_object_as_one_record() {
    let records = parse_records(r#"{"product_name": "Test Shirt", "price": "15000"}"#).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("price"), Some(&json!("15000")));
}

#[test]
fn parses_array_in_input_order() {
    let records = parse_records(r#"[{"product_name": "a"}, {"product_name": "b"}, {}]"#).unwrap();
    let names: Vec<_> = records
        .iter()
        .map(|record| record.get("product_name").cloned())
        .collect();
    assert_eq!(names, [Some(json!("a")), Some(json!("b")), None]);
}

#[test]
fn rejects_non_object_records() {
    let error = parse_records(r#"[{"a": 1}, 42]"#).unwrap_err();
    assert!(format!("{error:#}").contains("input record 1"));

    assert!(parse_records("\"just text\"").is_err());
    assert!(parse_records("not json").is_err());
}

#[test]
fn missing_input_file_names_the_path() {
    let path = std::env::temp_dir().join("mms-cli-missing-input.json");
    let _ = std::fs::remove_file(&path);
    let error = read_records(&path).unwrap_err();
    assert!(format!("{error:#}").contains("mms-cli-missing-input.json"));
}

#[test]
fn single_profile_writes_to_the_given_path() {
    let output = Path::new("out/listing.csv");
    assert_eq!(export_path(output, "coupang-wing", 1), output);
}

#[test]
fn several_profiles_get_their_own_files() {
    let output = Path::new("out/listing.csv");
    assert_eq!(
        export_path(output, "naver-smartstore", 2),
        PathBuf::from("out/listing.naver-smartstore.csv")
    );
    assert_eq!(
        export_path(Path::new("listing"), "naver-smartstore-fashion", 2),
        PathBuf::from("listing.naver-smartstore-fashion")
    );
}

#[test]
fn marketplace_run_applies_every_profile() {
    let registry = ProfileRegistry::builtin().unwrap();
    let profiles = registry.get_by_marketplace("naver").unwrap();
    let records = parse_records(
        r#"[
            {"product_name": "Test Shirt", "price": "15000", "category": "상의"},
            {"product_name": "No price"}
        ]"#,
    )
    .unwrap();

    let reports = run_profiles(&registry, &profiles, &records);

    let ids: Vec<&str> = reports.iter().map(|report| report.profile_id.as_str()).collect();
    assert_eq!(ids, ["naver-smartstore", "naver-smartstore-fashion"]);
    for report in &reports {
        assert_eq!(report.total(), 2);
        assert!(!report.outcomes[1].is_success());
    }
}
