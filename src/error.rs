//! Error type definitions
//!
//! Defines all error types used in sql2awk. Core translation errors
//! (`LexError`, `ParseError`, `TypeCheckError`, `TranslateError`) never
//! mention files, stdin, or signals — those concerns live in `CliError`,
//! kept separate so the core stays a pure function of its inputs.

use thiserror::Error;

/// Errors that occur during lexing (tokenization)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LexError {
    #[error("unexpected character '{0}' at offset {1}")]
    UnexpectedCharacter(char, usize),

    #[error("unterminated string literal starting at offset {0}")]
    UnterminatedString(usize),

    #[error("unterminated regex literal starting at offset {0}")]
    UnterminatedRegex(usize),

    #[error("invalid numeric literal '{0}' at offset {1}")]
    InvalidNumber(String, usize),
}

/// Errors that occur during parsing
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("unexpected token: expected {expected} but found '{found}' at offset {offset}")]
    UnexpectedToken {
        expected: String,
        found: String,
        offset: usize,
    },

    #[error(
        "'*' is only valid as a bare projection or as the sole argument of count() (offset {offset})"
    )]
    InvalidStar { offset: usize },

    #[error("LIMIT must be a positive integer (offset {offset})")]
    BadLimit { offset: usize },

    #[error("lexing error: {0}")]
    Lex(#[from] LexError),
}

/// Errors raised while resolving types or validating aggregate/projection
/// invariants over a parsed query. Corresponds to spec §7's semantic error
/// kinds (everything past pure grammar rejection).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TypeCheckError {
    #[error("unknown column '{column}' (offset {offset})")]
    UnknownColumn { column: String, offset: usize },

    #[error("unknown function '{name}' in the active dialect (offset {offset})")]
    UnknownFunction { name: String, offset: usize },

    #[error("LIMIT value is absent, non-integer, or not greater than zero (offset {offset})")]
    BadLimit { offset: usize },

    #[error("duplicate projection name '{name}' in output schema")]
    DuplicateProjectionName { name: String },

    #[error("WHERE expression must not be aggregate (offset {offset})")]
    AggregateInWhere { offset: usize },

    #[error("aggregate function used as an argument to another aggregate (offset {offset})")]
    NestedAggregate { offset: usize },

    #[error("operator '{op}' is not supported for operand type {operand_type} (offset {offset})")]
    TypeError {
        op: String,
        operand_type: String,
        offset: usize,
    },
}

/// Unified error for the entire `query_text -> awk_program_text` pipeline.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("syntax error: {0}")]
    Syntax(#[from] ParseError),

    #[error("type error: {0}")]
    Type(#[from] TypeCheckError),
}

/// Errors raised by the CLI driver: I/O, schema file handling, signal
/// plumbing, and argument validation. Deliberately distinct from
/// `TranslateError` so the core remains ignorant of all of this.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("translation error: {0}")]
    Translate(#[from] TranslateError),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("schema error: {0}")]
    Schema(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("system error: {0}")]
    System(String),
}

/// Result type aliases
pub type LexResult<T> = Result<T, LexError>;
pub type ParseResult<T> = Result<T, ParseError>;
pub type TypeCheckResult<T> = Result<T, TypeCheckError>;
pub type TranslateResult<T> = Result<T, TranslateError>;
pub type CliResult<T> = Result<T, CliError>;
