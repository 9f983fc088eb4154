//! Query validation (`--validate-only` mode).
//!
//! Runs lex + parse + (when a schema is available) typecheck over a query,
//! without ever invoking the code generator, and reports a structured
//! summary or a structured error with suggestions.

use crate::codegen::dialect::Dialect;
use crate::error::TranslateError;
use crate::parser::ast::{Expr, Query};
use crate::schema::Schema;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("validation failed: {0}")]
    ValidationFailed(String),
}

/// Validation outcome for a query.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidateResult {
    Valid { summary: ValidationSummary },
    Invalid {
        error: ValidationErrorInfo,
        suggestions: Vec<String>,
    },
}

/// Structured summary of a valid query (spec §2.7).
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationSummary {
    pub projection_count: usize,
    pub has_aggregation: bool,
    pub columns: Vec<String>,
    pub has_distinct: bool,
    pub has_limit: bool,
}

/// Detailed error information for validation failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrorInfo {
    /// Error type (`input`, `lex`, `parse`, `type`).
    pub error_type: String,
    pub message: String,
    pub position: Option<usize>,
    pub context: Option<String>,
}

/// Configuration for validation behavior.
#[derive(Debug, Clone, Default)]
pub struct ValidationConfig {
    pub detailed_suggestions: bool,
}

/// Validates SQL `SELECT` queries against this translator's grammar and,
/// when a schema is supplied, its type rules.
#[derive(Debug)]
pub struct QueryValidator {
    #[allow(dead_code)]
    config: ValidationConfig,
}

impl QueryValidator {
    pub fn new() -> Self {
        Self {
            config: ValidationConfig::default(),
        }
    }

    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validates `query_text`, typechecking against `schema` when given.
    pub fn validate(
        &self,
        query_text: &str,
        schema: Option<&Schema>,
        dialect: Dialect,
    ) -> ValidationResult<ValidateResult> {
        if query_text.trim().is_empty() {
            return Ok(ValidateResult::Invalid {
                error: ValidationErrorInfo {
                    error_type: "input".to_string(),
                    message: "empty query".to_string(),
                    position: Some(0),
                    context: None,
                },
                suggestions: vec!["example: SELECT src, bytes WHERE bytes > 100".to_string()],
            });
        }

        let translator = crate::Translator::new(dialect);
        let query = match translator.parse(query_text) {
            Ok(q) => q,
            Err(e) => {
                return Ok(ValidateResult::Invalid {
                    error: self.convert_parse_error(&e),
                    suggestions: self.suggestions_for(&TranslateError::Syntax(e)),
                });
            }
        };

        if let Some(schema) = schema {
            if let Err(e) = translator.resolve(&query, schema) {
                let translate_err = TranslateError::Type(e.clone());
                return Ok(ValidateResult::Invalid {
                    error: ValidationErrorInfo {
                        error_type: "type".to_string(),
                        message: e.to_string(),
                        position: None,
                        context: None,
                    },
                    suggestions: self.suggestions_for(&translate_err),
                });
            }
        }

        Ok(ValidateResult::Valid {
            summary: summarize(&query),
        })
    }

    fn convert_parse_error(&self, error: &crate::error::ParseError) -> ValidationErrorInfo {
        use crate::error::ParseError;
        let error_type = match error {
            ParseError::Lex(_) => "lex",
            _ => "parse",
        };
        ValidationErrorInfo {
            error_type: error_type.to_string(),
            message: error.to_string(),
            position: None,
            context: None,
        }
    }

    fn suggestions_for(&self, error: &TranslateError) -> Vec<String> {
        match error {
            TranslateError::Syntax(_) => vec![
                "check projection, WHERE, and LIMIT placement".to_string(),
                "check that string literals are double-quoted".to_string(),
            ],
            TranslateError::Type(_) => vec![
                "check column names against the schema file".to_string(),
                "aggregates cannot appear in WHERE or nest inside each other".to_string(),
            ],
        }
    }
}

impl Default for QueryValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn summarize(query: &Query) -> ValidationSummary {
    let mut columns = Vec::new();
    if let Some(where_clause) = &query.where_clause {
        collect_columns(&where_clause.expr, &mut columns);
    }
    for projection in &query.projections {
        collect_columns(&projection.expr, &mut columns);
    }
    columns.sort();
    columns.dedup();

    ValidationSummary {
        projection_count: query.projections.len(),
        has_aggregation: query.has_aggregate(),
        columns,
        has_distinct: query.distinct,
        has_limit: query.limit.is_some(),
    }
}

fn collect_columns(expr: &Expr, out: &mut Vec<String>) {
    match expr {
        Expr::ColumnName { name, .. } => out.push(name.clone()),
        Expr::Unary { operand, .. } => collect_columns(operand, out),
        Expr::Binary { left, right, .. } => {
            collect_columns(left, out);
            collect_columns(right, out);
        }
        Expr::Like { left, pattern, .. } => {
            collect_columns(left, out);
            collect_columns(pattern, out);
        }
        Expr::Function { args, .. } => {
            for a in args {
                collect_columns(a, out);
            }
        }
        Expr::AggregateFunction { arg, .. } => {
            if let Some(a) = arg {
                collect_columns(a, out);
            }
        }
        Expr::NumericLiteral { .. } | Expr::StringLiteral { .. } | Expr::RegexLiteral { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Datatype;

    fn schema() -> Schema {
        let mut s = Schema::new();
        s.push("src", Datatype::Str).push("bytes", Datatype::Int);
        s
    }

    #[test]
    fn empty_input_is_invalid() {
        let v = QueryValidator::new();
        let result = v.validate("", None, Dialect::Portable).unwrap();
        assert!(matches!(result, ValidateResult::Invalid { .. }));
    }

    #[test]
    fn valid_query_reports_summary() {
        let v = QueryValidator::new();
        let result = v
            .validate("SELECT src, bytes WHERE bytes > 1", Some(&schema()), Dialect::Portable)
            .unwrap();
        match result {
            ValidateResult::Valid { summary } => {
                assert_eq!(summary.projection_count, 2);
                assert!(!summary.has_aggregation);
                assert!(summary.columns.contains(&"bytes".to_string()));
            }
            _ => panic!("expected Valid"),
        }
    }

    #[test]
    fn unknown_column_reports_type_error() {
        let v = QueryValidator::new();
        let result = v
            .validate("SELECT nope", Some(&schema()), Dialect::Portable)
            .unwrap();
        match result {
            ValidateResult::Invalid { error, .. } => assert_eq!(error.error_type, "type"),
            _ => panic!("expected Invalid"),
        }
    }

    #[test]
    fn syntax_error_is_reported_without_a_schema() {
        let v = QueryValidator::new();
        let result = v.validate("SELECT FROM", None, Dialect::Portable).unwrap();
        assert!(matches!(result, ValidateResult::Invalid { .. }));
    }

    #[test]
    fn aggregate_query_flags_summary() {
        let v = QueryValidator::new();
        let result = v
            .validate("SELECT sum(bytes) AS total", Some(&schema()), Dialect::Portable)
            .unwrap();
        match result {
            ValidateResult::Valid { summary } => assert!(summary.has_aggregation),
            _ => panic!("expected Valid"),
        }
    }
}
