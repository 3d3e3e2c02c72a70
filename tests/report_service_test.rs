//! Tests for ReportService

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use treeshape::application::samples::{self, EMPLOYEE_SAMPLE, GENERIC_SAMPLE};
use treeshape::application::services::ReportService;
use treeshape::application::{to_text, ApplicationError};
use treeshape::config::TransformMode;
use treeshape::domain::{DomainError, Shape};
use treeshape::infrastructure::traits::RealFileSystem;
use treeshape::util::testing;

/// Helper to create temp documents for testing
fn create_document(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write document");
    path
}

fn service() -> ReportService {
    testing::init_test_setup();
    ReportService::new(Arc::new(RealFileSystem))
}

#[test]
fn given_department_file_when_reporting_then_returns_rendered_lines() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = create_document(
        &temp,
        "dept.json",
        r#"{"name": "Eng", "employees": [{"firstName": "A", "lastName": "B", "age": 1, "address": {"street": "S"}}]}"#,
    );
    let service = service();

    // Act
    let node = service.load(&path).unwrap();
    let lines = service.report(&node, TransformMode::Whole).unwrap();

    // Assert
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0].text, "Department: Eng");
    assert_eq!(lines[2].text, "Employee: A B");
    assert_eq!(lines[2].depth, 2);
    assert_eq!(lines[6].depth, 5);
}

#[test]
fn given_missing_file_when_loading_then_operation_failed_with_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.json");

    let err = service().load(&path).unwrap_err();

    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn given_malformed_json_when_loading_then_decode_error() {
    let temp = TempDir::new().unwrap();
    let path = create_document(&temp, "broken.json", r#"{"name": "Eng", "#);

    let err = service().load(&path).unwrap_err();

    match err {
        ApplicationError::Decode { source_name, .. } => {
            assert!(source_name.ends_with("broken.json"))
        }
        other => panic!("expected decode error, got {:?}", other),
    }
}

#[test]
fn given_department_without_name_when_reporting_then_domain_error_propagates() {
    let service = service();
    let node = service.parse(r#"{"employees": []}"#, "inline").unwrap();

    let err = service.report(&node, TransformMode::Whole).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::MissingField {
            record: "Department",
            field: "name"
        })
    ));
}

#[test]
fn given_employee_sample_when_reporting_whole_then_printer_still_finds_employees() {
    // Whole mode leaves the grouped records generic; the printer's own
    // firstName check still shows them as employees.
    let service = service();
    let node = service.parse(EMPLOYEE_SAMPLE, "sample").unwrap();

    let whole = to_text(&service.report(&node, TransformMode::Whole).unwrap(), 2);
    let grouped = to_text(&service.report(&node, TransformMode::Grouped).unwrap(), 2);

    assert_eq!(whole, grouped);
    assert!(whole.contains("    Employee: John Doe\n"));
}

#[test]
fn given_sequence_root_when_reporting_grouped_then_unsupported_shape() {
    let service = service();
    let node = service.parse("[1, 2]", "inline").unwrap();

    let err = service.report(&node, TransformMode::Grouped).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::UnsupportedShape { .. })
    ));
}

#[test]
fn given_generic_sample_when_classifying_then_all_mappings_generic() {
    let service = service();
    let node = service.parse(GENERIC_SAMPLE, "sample").unwrap();

    let shapes = service.classify(&node);

    assert_eq!(
        shapes.iter().map(|(p, _)| p.as_str()).collect::<Vec<_>>(),
        vec!["$", "$.system", "$.system.config"]
    );
    assert!(shapes.iter().all(|(_, s)| *s == Shape::Generic));
}

#[test]
fn given_builtin_samples_when_reporting_with_their_modes_then_all_succeed() {
    let service = service();
    for sample in samples::builtin() {
        let node = service.parse(sample.document, sample.title).unwrap();
        let lines = service.report(&node, sample.mode).unwrap();
        assert!(!lines.is_empty(), "{} rendered nothing", sample.title);
    }
}
