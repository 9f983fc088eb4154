//! Integration tests
//!
//! Exercises the full translation pipeline (lex, parse, typecheck, generate)
//! through the public [`sql2awk::Translator`] API across a range of query
//! shapes: scalar projections, `WHERE`, `DISTINCT`, `LIMIT`, aggregates,
//! `LIKE`, and both awk dialects.

use sql2awk::{Datatype, Dialect, Schema, TranslateError, Translator, TypeCheckError};

fn net_schema() -> Schema {
    let mut schema = Schema::new();
    schema
        .push("src", Datatype::Str)
        .push("dst", Datatype::Str)
        .push("bytes", Datatype::Int)
        .push("dur", Datatype::Real);
    schema
}

#[test]
fn test_simple_projection() {
    let translator = Translator::new(Dialect::Portable);
    let program = translator
        .translate("SELECT src, dst", &net_schema())
        .expect("translation should succeed");

    assert!(program.contains("BEGIN"));
    assert!(program.contains("FS = \"\\t\""));
    assert!(program.contains("print record;"));
}

#[test]
fn test_star_projection() {
    let translator = Translator::new(Dialect::Portable);
    let program = translator
        .translate("SELECT *", &net_schema())
        .expect("translation should succeed");

    assert!(program.contains("print record;"));
}

#[test]
fn test_where_filters_rows() {
    let translator = Translator::new(Dialect::Portable);
    let program = translator
        .translate("SELECT src WHERE bytes > 1000", &net_schema())
        .expect("translation should succeed");

    assert!(program.contains("if ("));
}

#[test]
fn test_distinct_uses_seen_set() {
    let translator = Translator::new(Dialect::Portable);
    let program = translator
        .translate("SELECT DISTINCT src", &net_schema())
        .expect("translation should succeed");

    assert!(program.contains("distinct_seen"));
}

#[test]
fn test_limit_emits_exit() {
    let translator = Translator::new(Dialect::Portable);
    let program = translator
        .translate("SELECT src LIMIT 2", &net_schema())
        .expect("translation should succeed");

    assert!(program.contains("exit"));
}

#[test]
fn test_limit_zero_is_a_parse_error() {
    let translator = Translator::new(Dialect::Portable);
    let err = translator
        .translate("SELECT src LIMIT 0", &net_schema())
        .unwrap_err();
    assert!(matches!(err, TranslateError::Syntax(_)));
}

#[test]
fn test_aggregate_query_partitions_by_group_columns() {
    let translator = Translator::new(Dialect::Portable);
    let program = translator
        .translate("SELECT src, sum(bytes) AS total", &net_schema())
        .expect("translation should succeed");

    assert!(program.contains("END"));
}

#[test]
fn test_count_star() {
    let translator = Translator::new(Dialect::Portable);
    let program = translator
        .translate("SELECT count(*) AS n", &net_schema())
        .expect("translation should succeed");

    assert!(program.contains("END"));
}

#[test]
fn test_distinct_aggregate_argument() {
    let translator = Translator::new(Dialect::Portable);
    let program = translator
        .translate("SELECT src, count(DISTINCT dst) AS n", &net_schema())
        .expect("translation should succeed");

    assert!(program.contains("END"));
}

#[test]
fn test_like_translates_to_regex_match() {
    let translator = Translator::new(Dialect::Portable);
    let program = translator
        .translate("SELECT src WHERE src LIKE 'a%'", &net_schema())
        .expect("translation should succeed");

    assert!(program.contains("like2regex"));
}

#[test]
fn test_not_like_translates_to_negated_match() {
    let translator = Translator::new(Dialect::Portable);
    let program = translator
        .translate("SELECT src WHERE src NOT LIKE 'a%'", &net_schema())
        .expect("translation should succeed");

    assert!(program.contains("!~"));
}

#[test]
fn test_min_max_nesting_over_n_args() {
    let translator = Translator::new(Dialect::Portable);
    let program = translator
        .translate("SELECT max(bytes, dur) AS m", &net_schema())
        .expect("translation should succeed");

    assert!(program.contains("max("));
}

#[test]
fn test_boolean_operators_normalize() {
    let translator = Translator::new(Dialect::Portable);
    let program = translator
        .translate(
            "SELECT src WHERE bytes > 10 AND dur < 1.0 OR src = dst",
            &net_schema(),
        )
        .expect("translation should succeed");

    assert!(program.contains("&&"));
    assert!(program.contains("||"));
}

#[test]
fn test_gawk_only_function_rejected_under_portable_dialect() {
    let translator = Translator::new(Dialect::Portable);
    let err = translator
        .translate("SELECT sqrt(bytes) AS root", &net_schema())
        .unwrap_err();
    assert!(matches!(
        err,
        TranslateError::Type(TypeCheckError::UnknownFunction { .. })
    ));
}

#[test]
fn test_gawk_only_function_allowed_under_gawk_dialect() {
    let translator = Translator::new(Dialect::Gawk);
    let program = translator
        .translate("SELECT sqrt(bytes) AS root", &net_schema())
        .expect("translation should succeed");
    assert!(program.contains("sqrt("));
}

#[test]
fn test_unknown_column_is_a_type_error() {
    let translator = Translator::new(Dialect::Portable);
    let err = translator
        .translate("SELECT nonexistent", &net_schema())
        .unwrap_err();
    assert!(matches!(
        err,
        TranslateError::Type(TypeCheckError::UnknownColumn { .. })
    ));
}

#[test]
fn test_aggregate_in_where_is_rejected() {
    let translator = Translator::new(Dialect::Portable);
    let err = translator
        .translate("SELECT src WHERE sum(bytes) > 10", &net_schema())
        .unwrap_err();
    assert!(matches!(
        err,
        TranslateError::Type(TypeCheckError::AggregateInWhere { .. })
    ));
}

#[test]
fn test_syntax_error_is_surfaced() {
    let translator = Translator::new(Dialect::Portable);
    let err = translator.translate("SELECT FROM", &net_schema());
    assert!(matches!(err, Err(TranslateError::Syntax(_))));
}

#[test]
fn test_implicit_select_star_prefix() {
    let translator = Translator::new(Dialect::Portable);
    let program = translator
        .translate("WHERE bytes > 0", &net_schema())
        .expect("translation should succeed");
    assert!(program.contains("print record;"));
}

#[test]
fn test_dialects_agree_on_a_plain_query() {
    let query = "SELECT src, dst WHERE bytes > 0";
    let portable = Translator::new(Dialect::Portable)
        .translate(query, &net_schema())
        .unwrap();
    let gawk = Translator::new(Dialect::Gawk)
        .translate(query, &net_schema())
        .unwrap();
    assert!(portable.contains("print record;"));
    assert!(gawk.contains("print record;"));
}
