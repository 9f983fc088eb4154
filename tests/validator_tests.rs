//! Validator integration tests
//!
//! Covers [`sql2awk::cli::QueryValidator`] scenarios beyond its own unit
//! tests: schema-less validation, suggestion content, and summary fields
//! across `DISTINCT`/`LIMIT`/aggregate queries.

use sql2awk::cli::{QueryValidator, ValidateResult, ValidationConfig};
use sql2awk::{Datatype, Dialect, Schema};

fn schema() -> Schema {
    let mut s = Schema::new();
    s.push("src", Datatype::Str)
        .push("dst", Datatype::Str)
        .push("bytes", Datatype::Int);
    s
}

#[test]
fn validates_without_a_schema() {
    let validator = QueryValidator::new();
    let result = validator
        .validate("SELECT src, bytes", None, Dialect::Portable)
        .unwrap();
    assert!(matches!(result, ValidateResult::Valid { .. }));
}

#[test]
fn schema_less_validation_cannot_catch_unknown_columns() {
    let validator = QueryValidator::new();
    let result = validator
        .validate("SELECT totally_bogus_column", None, Dialect::Portable)
        .unwrap();
    assert!(matches!(result, ValidateResult::Valid { .. }));
}

#[test]
fn distinct_and_limit_are_reflected_in_the_summary() {
    let validator = QueryValidator::new();
    let result = validator
        .validate(
            "SELECT DISTINCT src LIMIT 5",
            Some(&schema()),
            Dialect::Portable,
        )
        .unwrap();
    match result {
        ValidateResult::Valid { summary } => {
            assert!(summary.has_distinct);
            assert!(summary.has_limit);
            assert!(!summary.has_aggregation);
        }
        other => panic!("expected Valid, got {other:?}"),
    }
}

#[test]
fn where_clause_columns_are_included_in_summary_columns() {
    let validator = QueryValidator::new();
    let result = validator
        .validate(
            "SELECT src WHERE dst = \"x\" AND bytes > 10",
            Some(&schema()),
            Dialect::Portable,
        )
        .unwrap();
    match result {
        ValidateResult::Valid { summary } => {
            assert!(summary.columns.contains(&"dst".to_string()));
            assert!(summary.columns.contains(&"bytes".to_string()));
        }
        other => panic!("expected Valid, got {other:?}"),
    }
}

#[test]
fn syntax_errors_come_with_suggestions() {
    let validator = QueryValidator::new();
    let result = validator
        .validate("SELECT FROM", None, Dialect::Portable)
        .unwrap();
    match result {
        ValidateResult::Invalid { error, suggestions } => {
            assert_eq!(error.error_type, "parse");
            assert!(!suggestions.is_empty());
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[test]
fn type_errors_come_with_schema_focused_suggestions() {
    let validator = QueryValidator::new();
    let result = validator
        .validate("SELECT nope", Some(&schema()), Dialect::Portable)
        .unwrap();
    match result {
        ValidateResult::Invalid { error, suggestions } => {
            assert_eq!(error.error_type, "type");
            assert!(suggestions.iter().any(|s| s.contains("schema")));
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[test]
fn aggregate_in_where_is_invalid_under_a_schema() {
    let validator = QueryValidator::new();
    let result = validator
        .validate(
            "SELECT src WHERE count(*) > 1",
            Some(&schema()),
            Dialect::Portable,
        )
        .unwrap();
    assert!(matches!(result, ValidateResult::Invalid { .. }));
}

#[test]
fn gawk_only_function_is_valid_under_the_gawk_dialect() {
    let validator = QueryValidator::new();
    let result = validator
        .validate("SELECT sqrt(bytes) AS root", Some(&schema()), Dialect::Gawk)
        .unwrap();
    assert!(matches!(result, ValidateResult::Valid { .. }));
}

#[test]
fn gawk_only_function_is_invalid_under_the_portable_dialect() {
    let validator = QueryValidator::new();
    let result = validator
        .validate(
            "SELECT sqrt(bytes) AS root",
            Some(&schema()),
            Dialect::Portable,
        )
        .unwrap();
    assert!(matches!(result, ValidateResult::Invalid { .. }));
}

#[test]
fn empty_query_reports_an_input_error_with_an_example() {
    let validator = QueryValidator::new();
    let result = validator.validate("   ", None, Dialect::Portable).unwrap();
    match result {
        ValidateResult::Invalid { error, suggestions } => {
            assert_eq!(error.error_type, "input");
            assert!(suggestions.iter().any(|s| s.contains("SELECT")));
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[test]
fn validator_can_be_built_with_a_custom_config() {
    let validator = QueryValidator::with_config(ValidationConfig {
        detailed_suggestions: true,
    });
    let result = validator
        .validate("SELECT src", Some(&schema()), Dialect::Portable)
        .unwrap();
    assert!(matches!(result, ValidateResult::Valid { .. }));
}
