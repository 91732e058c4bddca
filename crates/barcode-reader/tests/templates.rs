mod common;

use barcode_reader::{BarcodeReader, ConflictMode, ErrorCode};
use common::{message_for, FakeEngine};
use serde_json::Value;

fn template(name: &str) -> String {
    format!(r#"{{"Version": "3.0", "ImageParameter": {{"Name": "{name}"}}}}"#)
}

#[test]
fn init_overwrite_replaces_templates() {
    let reader = BarcodeReader::new(FakeEngine::new());
    reader
        .init_runtime_settings_with_string(&template("fast"), ConflictMode::default())
        .expect("init");
    assert_eq!(reader.get_all_template_names(), ["fast"]);
}

#[test]
fn append_ignore_keeps_existing_names() {
    let reader = BarcodeReader::new(FakeEngine::new());
    reader
        .append_template_string_to_runtime_settings(&template("dense"), ConflictMode::Ignore)
        .expect("append");
    reader
        .append_template_string_to_runtime_settings(&template("dense"), ConflictMode::Ignore)
        .expect("append again");
    assert_eq!(reader.get_all_template_names(), ["default", "dense"]);
}

#[test]
fn invalid_json_reports_the_parse_position() {
    let reader = BarcodeReader::new(FakeEngine::new());
    let err = reader
        .init_runtime_settings_with_string("{not json", ConflictMode::Overwrite)
        .expect_err("parse failure");
    assert_eq!(err.code(), Some(ErrorCode::JsonParseFailed));
    let message = err.to_string();
    assert!(message.starts_with("Failed to parse JSON string: "), "{message}");
    assert!(message.contains("line 1 column 2"), "{message}");
    assert_ne!(message, message_for(-10030));
}

#[test]
fn template_errors_keep_the_call_specific_message() {
    let reader = BarcodeReader::new(FakeEngine::new());
    let err = reader
        .init_runtime_settings_with_string(r#"{"ImageParameter": 5}"#, ConflictMode::Overwrite)
        .expect_err("no template name");
    assert_eq!(err.code(), Some(ErrorCode::JsonNameKeyMissing));
    assert_eq!(err.to_string(), "ImageParameter: the Name key is missing.");

    let err = reader
        .append_template_string_to_runtime_settings(
            r#"{"ImageParameter": {}}"#,
            ConflictMode::Ignore,
        )
        .expect_err("no template name");
    assert_eq!(err.to_string(), "ImageParameter: the Name key is missing.");
    assert_eq!(reader.get_all_template_names(), ["default"]);
}

#[test]
fn template_files_load_and_save() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("dense.json");
    std::fs::write(&input, template("dense")).expect("write template");

    let reader = BarcodeReader::new(FakeEngine::new());
    reader
        .init_runtime_settings_with_file(&input, ConflictMode::Overwrite)
        .expect("init from file");
    let extra = dir.path().join("extra.json");
    std::fs::write(&extra, template("extra")).expect("write template");
    reader
        .append_template_file_to_runtime_settings(&extra, ConflictMode::Overwrite)
        .expect("append file");
    assert_eq!(reader.get_all_template_names(), ["dense", "extra"]);

    let output = dir.path().join("out.json");
    reader.output_settings_to_json_file(&output).expect("save");
    let saved: Value =
        serde_json::from_str(&std::fs::read_to_string(&output).expect("read back")).expect("json");
    assert_eq!(saved["ImageParameter"]["Name"], "dense");

    let as_string: Value =
        serde_json::from_str(&reader.output_settings_to_json_string().expect("to string"))
            .expect("json");
    assert_eq!(as_string, saved);
}

#[test]
fn missing_template_file_is_an_input_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let reader = BarcodeReader::new(FakeEngine::new());
    let err = reader
        .init_runtime_settings_with_file(dir.path().join("nope.json"), ConflictMode::Overwrite)
        .expect_err("missing file");
    assert_eq!(err.code(), Some(ErrorCode::FileNotFound));
    assert_eq!(err.to_string(), message_for(-10005));
}
