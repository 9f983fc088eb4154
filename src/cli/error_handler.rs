//! Error handling and exit code management.
//!
//! Converts a [`CliError`] into an [`ErrorInfo`] with a category, exit
//! code, and actionable suggestions, then prints it to stderr.

use crate::cli::validator::ValidationErrorInfo;
use crate::error::{CliError, TranslateError};
use std::fmt;
use std::io::{self, Write};

/// Standard exit codes for the CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode;

impl ExitCode {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INVALID_ARGUMENTS: i32 = 2;
    pub const IO_ERROR: i32 = 3;
    pub const VALIDATION_ERROR: i32 = 4;
    pub const GENERATION_ERROR: i32 = 5;
    pub const CONFIG_ERROR: i32 = 6;
    pub const PERMISSION_ERROR: i32 = 7;
    pub const SYSTEM_ERROR: i32 = 8;
    pub const NETWORK_ERROR: i32 = 9;
    pub const TIMEOUT_ERROR: i32 = 10;
    pub const INTERNAL_ERROR: i32 = 11;
}

/// Categories of errors for better organization.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorCategory {
    UserInput,
    System,
    Application,
    Configuration,
    Network,
    Internal,
}

/// Comprehensive error information.
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    pub category: ErrorCategory,
    pub exit_code: i32,
    pub message: String,
    pub description: Option<String>,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub use_stderr: bool,
    pub show_help: bool,
}

impl ErrorInfo {
    pub fn new(category: ErrorCategory, exit_code: i32, message: String) -> Self {
        Self {
            category,
            exit_code,
            message,
            description: None,
            context: None,
            suggestions: Vec::new(),
            use_stderr: true,
            show_help: false,
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn with_help(mut self, show_help: bool) -> Self {
        self.show_help = show_help;
        self
    }

    pub fn with_stderr(mut self, use_stderr: bool) -> Self {
        self.use_stderr = use_stderr;
        self
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Converts errors to stderr output with an appropriate exit code.
#[derive(Debug)]
pub struct ErrorHandler {
    pub verbose: bool,
    pub use_colors: bool,
}

impl ErrorHandler {
    pub fn new() -> Self {
        Self {
            verbose: false,
            use_colors: false,
        }
    }

    pub fn with_settings(verbose: bool, use_colors: bool) -> Self {
        Self {
            verbose,
            use_colors,
        }
    }

    pub fn handle_cli_error(&self, error: &CliError) -> i32 {
        let error_info = self.convert_cli_error(error);
        self.print_error(&error_info);
        error_info.exit_code
    }

    pub fn handle_validation_error(&self, error: &ValidationErrorInfo) -> i32 {
        let error_info = self.convert_validation_error(error);
        self.print_error(&error_info);
        error_info.exit_code
    }

    pub fn handle_io_error(&self, error: &std::io::Error) -> i32 {
        let error_info = self.convert_io_error(error);
        self.print_error(&error_info);
        error_info.exit_code
    }

    pub fn handle_general_error(&self, message: &str, category: ErrorCategory) -> i32 {
        let error_info = self.create_general_error(message, category);
        self.print_error(&error_info);
        error_info.exit_code
    }

    fn convert_translate_error(&self, error: &TranslateError) -> ErrorInfo {
        match error {
            TranslateError::Syntax(e) => ErrorInfo::new(
                ErrorCategory::UserInput,
                ExitCode::VALIDATION_ERROR,
                format!("syntax error: {e}"),
            )
            .with_description("the query text does not parse as SELECT grammar".to_string())
            .with_suggestions(vec![
                "check for a missing comma between projections".to_string(),
                "check that string literals are double-quoted".to_string(),
                "check parenthesis and function-argument placement".to_string(),
            ])
            .with_help(true),
            TranslateError::Type(e) => ErrorInfo::new(
                ErrorCategory::UserInput,
                ExitCode::VALIDATION_ERROR,
                format!("type error: {e}"),
            )
            .with_description("the query references an unknown column/function or violates an aggregate rule".to_string())
            .with_suggestions(vec![
                "check column names against the schema file".to_string(),
                "aggregates cannot appear in WHERE or nest inside each other".to_string(),
                "gawk-only functions require --dialect gawk".to_string(),
            ]),
        }
    }

    /// Converts a [`CliError`] to [`ErrorInfo`].
    fn convert_cli_error(&self, error: &CliError) -> ErrorInfo {
        match error {
            CliError::Translate(e) => self.convert_translate_error(e),
            CliError::Io(msg) => ErrorInfo::new(
                ErrorCategory::System,
                ExitCode::IO_ERROR,
                format!("I/O error: {msg}"),
            )
            .with_suggestions(vec!["check the file path and permissions".to_string()]),
            CliError::Schema(msg) => ErrorInfo::new(
                ErrorCategory::UserInput,
                ExitCode::CONFIG_ERROR,
                format!("schema error: {msg}"),
            )
            .with_description("the schema file is missing, malformed, or has a bad column type".to_string())
            .with_suggestions(vec![
                "schema files are a JSON array of {\"name\", \"type\"} objects".to_string(),
                "valid types are int, real, str".to_string(),
            ]),
            CliError::Validation(msg) => ErrorInfo::new(
                ErrorCategory::UserInput,
                ExitCode::VALIDATION_ERROR,
                format!("validation error: {msg}"),
            ),
            CliError::Configuration(msg) => ErrorInfo::new(
                ErrorCategory::Configuration,
                ExitCode::CONFIG_ERROR,
                format!("configuration error: {msg}"),
            )
            .with_suggestions(vec!["check the combination of command-line flags".to_string()]),
            CliError::System(msg) => ErrorInfo::new(
                ErrorCategory::System,
                ExitCode::SYSTEM_ERROR,
                format!("system error: {msg}"),
            ),
        }
    }

    fn convert_validation_error(&self, error: &ValidationErrorInfo) -> ErrorInfo {
        let (message, description, suggestions) = match error.error_type.as_str() {
            "input" => (
                format!("input error: {}", error.message),
                Some("provide a non-empty SQL SELECT query".to_string()),
                vec!["example: SELECT src, bytes WHERE bytes > 100".to_string()],
            ),
            "lex" => (
                format!("lexical error: {}", error.message),
                Some("check the syntax of the input query".to_string()),
                vec![
                    "check string quotes".to_string(),
                    "check for unsupported characters".to_string(),
                ],
            ),
            "parse" => (
                format!("parse error: {}", error.message),
                Some("check the SELECT grammar".to_string()),
                vec![
                    "check projection, WHERE, and LIMIT placement".to_string(),
                    "check function-call argument counts".to_string(),
                ],
            ),
            "type" => (
                format!("type error: {}", error.message),
                Some("check column names and aggregate placement".to_string()),
                vec![
                    "aggregates cannot appear in WHERE or nest".to_string(),
                    "check the active dialect for gawk-only functions".to_string(),
                ],
            ),
            _ => (
                format!("validation error: {}", error.message),
                None,
                vec!["check the query syntax".to_string()],
            ),
        };

        let mut error_info =
            ErrorInfo::new(ErrorCategory::UserInput, ExitCode::VALIDATION_ERROR, message)
                .with_description(description.unwrap_or_default())
                .with_suggestions(suggestions);

        if let Some(context) = &error.context {
            error_info = error_info.with_context(context.clone());
        }

        error_info
    }

    fn convert_io_error(&self, error: &std::io::Error) -> ErrorInfo {
        let (message, description, suggestions) = match error.kind() {
            io::ErrorKind::NotFound => (
                "file not found".to_string(),
                Some("the specified file does not exist".to_string()),
                vec![
                    "check that the file path is correct".to_string(),
                    "verify the file exists".to_string(),
                ],
            ),
            io::ErrorKind::PermissionDenied => (
                "permission denied".to_string(),
                Some("no read/write permission for the file".to_string()),
                vec!["check file permissions".to_string()],
            ),
            io::ErrorKind::InvalidInput => (
                "invalid input".to_string(),
                Some("the input data is not valid UTF-8".to_string()),
                vec!["verify input encoding".to_string()],
            ),
            _ => (
                format!("I/O error: {error}"),
                None,
                vec!["check system status".to_string()],
            ),
        };

        let exit_code = match error.kind() {
            io::ErrorKind::PermissionDenied => ExitCode::PERMISSION_ERROR,
            _ => ExitCode::IO_ERROR,
        };

        ErrorInfo::new(ErrorCategory::System, exit_code, message)
            .with_description(description.unwrap_or_default())
            .with_suggestions(suggestions)
    }

    fn create_general_error(&self, message: &str, category: ErrorCategory) -> ErrorInfo {
        let exit_code = match category {
            ErrorCategory::UserInput => ExitCode::INVALID_ARGUMENTS,
            ErrorCategory::System => ExitCode::IO_ERROR,
            ErrorCategory::Application => ExitCode::GENERAL_ERROR,
            ErrorCategory::Configuration => ExitCode::CONFIG_ERROR,
            ErrorCategory::Network => ExitCode::NETWORK_ERROR,
            ErrorCategory::Internal => ExitCode::INTERNAL_ERROR,
        };

        ErrorInfo::new(category, exit_code, message.to_string())
    }

    pub fn print_error(&self, error_info: &ErrorInfo) {
        let mut stderr = io::stderr();

        let _ = writeln!(stderr, "Error: {}", error_info.message);

        if let Some(description) = &error_info.description {
            let _ = writeln!(stderr, "{description}");
        }

        if let Some(context) = &error_info.context {
            let _ = writeln!(stderr, "Context: {context}");
        }

        if !error_info.suggestions.is_empty() {
            let _ = writeln!(stderr);
            let _ = writeln!(stderr, "Suggestions:");
            for suggestion in &error_info.suggestions {
                let _ = writeln!(stderr, "  - {suggestion}");
            }
        }

        if error_info.show_help {
            let _ = writeln!(stderr);
            let _ = writeln!(stderr, "For help, run:");
            let _ = writeln!(stderr, "  sql2awk --help");
        }

        let _ = stderr.flush();
    }

    pub fn print_success(&self, message: &str) {
        println!("Success: {message}");
    }

    pub fn print_warning(&self, message: &str) {
        let mut stderr = io::stderr();
        let _ = writeln!(stderr, "Warning: {message}");
        let _ = stderr.flush();
    }

    pub fn print_info(&self, message: &str) {
        let mut stderr = io::stderr();
        let _ = writeln!(stderr, "Info: {message}");
        let _ = stderr.flush();
    }

    /// Handles any CLI error and returns its exit code.
    pub fn handle_error(&self, error: &CliError) -> i32 {
        self.handle_cli_error(error)
    }
}

impl Default for ErrorHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::SUCCESS, 0);
        assert_eq!(ExitCode::GENERAL_ERROR, 1);
        assert_eq!(ExitCode::INVALID_ARGUMENTS, 2);
        assert_eq!(ExitCode::IO_ERROR, 3);
        assert_eq!(ExitCode::VALIDATION_ERROR, 4);
        assert_eq!(ExitCode::GENERATION_ERROR, 5);
        assert_eq!(ExitCode::CONFIG_ERROR, 6);
        assert_eq!(ExitCode::PERMISSION_ERROR, 7);
        assert_eq!(ExitCode::SYSTEM_ERROR, 8);
        assert_eq!(ExitCode::NETWORK_ERROR, 9);
        assert_eq!(ExitCode::TIMEOUT_ERROR, 10);
        assert_eq!(ExitCode::INTERNAL_ERROR, 11);
    }

    #[test]
    fn test_error_info_builder() {
        let error_info = ErrorInfo::new(
            ErrorCategory::System,
            ExitCode::IO_ERROR,
            "IO error".to_string(),
        )
        .with_description("File not found".to_string())
        .with_context("Reading input file".to_string())
        .with_suggestions(vec!["Check file path".to_string()])
        .with_help(true)
        .with_stderr(false);

        assert_eq!(error_info.description, Some("File not found".to_string()));
        assert_eq!(error_info.context, Some("Reading input file".to_string()));
        assert_eq!(error_info.suggestions, vec!["Check file path".to_string()]);
        assert!(error_info.show_help);
        assert!(!error_info.use_stderr);
    }

    #[test]
    fn test_general_error_handling() {
        let handler = ErrorHandler::new();
        let exit_code = handler.handle_general_error("Test error", ErrorCategory::UserInput);
        assert_eq!(exit_code, ExitCode::INVALID_ARGUMENTS);

        let exit_code = handler.handle_general_error("System error", ErrorCategory::System);
        assert_eq!(exit_code, ExitCode::IO_ERROR);
    }

    #[test]
    fn test_io_error_conversion() {
        let handler = ErrorHandler::new();
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error_info = handler.convert_io_error(&io_error);

        assert_eq!(error_info.category, ErrorCategory::System);
        assert_eq!(error_info.exit_code, ExitCode::IO_ERROR);
        assert!(error_info.message.contains("file not found"));
    }

    #[test]
    fn test_validation_error_conversion() {
        let handler = ErrorHandler::new();
        let validation_error = ValidationErrorInfo {
            error_type: "parse".to_string(),
            message: "unexpected token".to_string(),
            position: Some(10),
            context: Some("at position 10".to_string()),
        };

        let error_info = handler.convert_validation_error(&validation_error);
        assert_eq!(error_info.category, ErrorCategory::UserInput);
        assert_eq!(error_info.exit_code, ExitCode::VALIDATION_ERROR);
        assert!(error_info.message.contains("parse error"));
    }

    #[test]
    fn test_schema_error_maps_to_config_exit_code() {
        let handler = ErrorHandler::new();
        let error = CliError::Schema("unknown type 'bool'".to_string());
        let info = handler.convert_cli_error(&error);
        assert_eq!(info.exit_code, ExitCode::CONFIG_ERROR);
    }
}
