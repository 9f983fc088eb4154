//! JSON output formatting module
//!
//! Provides JSON output formatting with metadata for translation and
//! validation results, for `--json` mode.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Result type for JSON output operations
pub type JsonResult<T> = Result<T, JsonError>;

/// Errors that can occur during JSON output processing
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    #[error("JSON serialization failed: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("metadata collection failed: {0}")]
    MetadataError(String),

    #[error("invalid input data: {0}")]
    InvalidInput(String),
}

/// Translation metadata containing processing information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateMetadata {
    /// Timestamp when translation started (Unix timestamp)
    pub timestamp: u64,

    /// awk dialect used for generation
    pub dialect: String,

    /// Processing statistics
    pub stats: ProcessingStats,

    /// Input information
    pub input_info: InputInfo,

    /// Version information
    pub version: String,
}

/// Processing statistics for translation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingStats {
    /// Time taken for lexing + parsing (microseconds)
    pub parse_time_us: u64,

    /// Time taken for type resolution (microseconds)
    pub resolve_time_us: u64,

    /// Time taken for awk code generation (microseconds)
    pub generation_time_us: u64,

    /// Total processing time (microseconds)
    pub total_time_us: u64,

    /// Input size in bytes
    pub input_size_bytes: usize,

    /// Output size in bytes
    pub output_size_bytes: usize,
}

/// Input source information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Source type (file, stdin, text)
    pub source_type: String,

    /// Source identifier (filename, "stdin", "text")
    pub source_id: String,

    /// Input size in bytes
    pub size_bytes: usize,

    /// Number of lines in input
    pub line_count: usize,
}

/// JSON output format for translation results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Success status
    pub success: bool,

    /// Generated awk program (if successful)
    pub awk: Option<String>,

    /// Error information (if failed)
    pub error: Option<ErrorInfo>,

    /// Translation metadata
    pub metadata: TranslateMetadata,
}

/// Error information for failed translations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error type (syntax, type, io, schema, validation, configuration, system)
    pub error_type: String,

    /// Error message
    pub message: String,

    /// Position information (if available)
    pub position: Option<usize>,

    /// Suggestions for fixing the error
    pub suggestions: Vec<String>,
}

/// JSON output formatter
#[derive(Debug)]
pub struct JsonOutputFormatter {
    /// Whether to pretty-print JSON
    pub pretty_print: bool,

    /// Whether to include debug information
    pub include_debug: bool,
}

impl JsonOutputFormatter {
    /// Creates a new JSON output formatter
    pub fn new() -> Self {
        Self {
            pretty_print: false,
            include_debug: false,
        }
    }

    /// Creates a new JSON output formatter with pretty printing
    pub fn pretty() -> Self {
        Self {
            pretty_print: true,
            include_debug: false,
        }
    }

    /// Creates a new JSON output formatter with debug information
    pub fn with_debug() -> Self {
        Self {
            pretty_print: false,
            include_debug: true,
        }
    }

    /// Formats a successful translation result as JSON
    pub fn format_success(&self, awk: &str, metadata: TranslateMetadata) -> JsonResult<String> {
        let output = JsonOutput {
            success: true,
            awk: Some(awk.to_string()),
            error: None,
            metadata,
        };

        self.serialize_output(&output)
    }

    /// Formats a failed translation result as JSON
    pub fn format_error(
        &self,
        error_info: ErrorInfo,
        metadata: TranslateMetadata,
    ) -> JsonResult<String> {
        let output = JsonOutput {
            success: false,
            awk: None,
            error: Some(error_info),
            metadata,
        };

        self.serialize_output(&output)
    }

    /// Formats a successful validation result as JSON
    pub fn format_validation_success(
        &self,
        summary: &crate::cli::validator::ValidationSummary,
        metadata: &TranslateMetadata,
    ) -> String {
        let output = serde_json::json!({
            "success": true,
            "validation": {
                "valid": true,
                "summary": {
                    "projection_count": summary.projection_count,
                    "has_aggregation": summary.has_aggregation,
                    "columns": summary.columns,
                    "has_distinct": summary.has_distinct,
                    "has_limit": summary.has_limit
                }
            },
            "metadata": metadata
        });

        if self.pretty_print {
            serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string(&output).unwrap_or_else(|_| "{}".to_string())
        }
    }

    /// Formats a validation error as JSON
    pub fn format_validation_error(
        &self,
        error: &crate::cli::validator::ValidationErrorInfo,
        suggestions: &[String],
    ) -> String {
        let output = serde_json::json!({
            "success": false,
            "validation": {
                "valid": false,
                "error": {
                    "type": error.error_type,
                    "message": error.message,
                    "position": error.position,
                    "context": error.context
                },
                "suggestions": suggestions
            }
        });

        if self.pretty_print {
            serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string(&output).unwrap_or_else(|_| "{}".to_string())
        }
    }

    /// Formats a translation result as JSON
    pub fn format_translate_result(&self, awk: &str, metadata: &TranslateMetadata) -> String {
        let output = serde_json::json!({
            "success": true,
            "awk": awk,
            "metadata": metadata
        });

        if self.pretty_print {
            serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string(&output).unwrap_or_else(|_| "{}".to_string())
        }
    }

    /// Serializes the JSON output
    fn serialize_output(&self, output: &JsonOutput) -> JsonResult<String> {
        if self.pretty_print {
            Ok(serde_json::to_string_pretty(output)?)
        } else {
            Ok(serde_json::to_string(output)?)
        }
    }
}

impl Default for JsonOutputFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating TranslateMetadata
#[derive(Debug)]
pub struct MetadataBuilder {
    dialect: String,
    stats: ProcessingStats,
    input_info: InputInfo,
    version: String,
}

impl MetadataBuilder {
    /// Creates a new metadata builder
    pub fn new(dialect: &str) -> Self {
        Self {
            dialect: dialect.to_string(),
            stats: ProcessingStats::empty(),
            input_info: InputInfo {
                source_type: "unknown".to_string(),
                source_id: "unknown".to_string(),
                size_bytes: 0,
                line_count: 0,
            },
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Sets processing statistics
    pub fn with_stats(mut self, stats: ProcessingStats) -> Self {
        self.stats = stats;
        self
    }

    /// Sets input information
    pub fn with_input_info(mut self, input_info: InputInfo) -> Self {
        self.input_info = input_info;
        self
    }

    /// Sets version information
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Builds the metadata
    pub fn build(self) -> TranslateMetadata {
        TranslateMetadata {
            timestamp: unix_timestamp(),
            dialect: self.dialect,
            stats: self.stats,
            input_info: self.input_info,
            version: self.version,
        }
    }
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

impl ProcessingStats {
    /// Creates empty processing stats
    pub fn empty() -> Self {
        Self {
            parse_time_us: 0,
            resolve_time_us: 0,
            generation_time_us: 0,
            total_time_us: 0,
            input_size_bytes: 0,
            output_size_bytes: 0,
        }
    }

    /// Creates processing stats with timing information
    pub fn with_timing(parse_time_us: u64, resolve_time_us: u64, generation_time_us: u64) -> Self {
        Self {
            parse_time_us,
            resolve_time_us,
            generation_time_us,
            total_time_us: parse_time_us + resolve_time_us + generation_time_us,
            input_size_bytes: 0,
            output_size_bytes: 0,
        }
    }
}

impl InputInfo {
    /// Creates input info for a file source
    pub fn from_file(filename: &str, content: &str) -> Self {
        Self {
            source_type: "file".to_string(),
            source_id: filename.to_string(),
            size_bytes: content.len(),
            line_count: content.lines().count(),
        }
    }

    /// Creates input info for a stdin source
    pub fn from_stdin(content: &str) -> Self {
        Self {
            source_type: "stdin".to_string(),
            source_id: "stdin".to_string(),
            size_bytes: content.len(),
            line_count: content.lines().count(),
        }
    }

    /// Creates input info for a direct-text source
    pub fn from_text(content: &str) -> Self {
        Self {
            source_type: "text".to_string(),
            source_id: "command_line".to_string(),
            size_bytes: content.len(),
            line_count: content.lines().count(),
        }
    }
}

impl ErrorInfo {
    /// Creates error info from a CLI-level error
    pub fn from_cli_error(error: &crate::error::CliError) -> Self {
        use crate::error::{CliError, TranslateError};

        match error {
            CliError::Translate(TranslateError::Syntax(e)) => Self {
                error_type: "syntax".to_string(),
                message: e.to_string(),
                position: None,
                suggestions: vec![
                    "check for a missing comma between projections".to_string(),
                    "check that string literals are double-quoted".to_string(),
                ],
            },
            CliError::Translate(TranslateError::Type(e)) => Self {
                error_type: "type".to_string(),
                message: e.to_string(),
                position: None,
                suggestions: vec![
                    "check column names against the schema file".to_string(),
                    "aggregates cannot appear in WHERE or nest inside each other".to_string(),
                ],
            },
            CliError::Io(msg) => Self {
                error_type: "io".to_string(),
                message: msg.clone(),
                position: None,
                suggestions: vec!["check the file path and permissions".to_string()],
            },
            CliError::Schema(msg) => Self {
                error_type: "schema".to_string(),
                message: msg.clone(),
                position: None,
                suggestions: vec![
                    "schema files are a JSON array of {\"name\", \"type\"} objects".to_string(),
                    "valid types are int, real, str".to_string(),
                ],
            },
            CliError::Validation(msg) => Self {
                error_type: "validation".to_string(),
                message: msg.clone(),
                position: None,
                suggestions: vec!["check the query syntax".to_string()],
            },
            CliError::Configuration(msg) => Self {
                error_type: "configuration".to_string(),
                message: msg.clone(),
                position: None,
                suggestions: vec!["check the combination of command-line flags".to_string()],
            },
            CliError::System(msg) => Self {
                error_type: "system".to_string(),
                message: msg.clone(),
                position: None,
                suggestions: vec!["check signal handling or pipeline configuration".to_string()],
            },
        }
    }
}

impl TranslateMetadata {
    /// Creates metadata from a validation summary
    pub fn from_validation_summary(_summary: &crate::cli::validator::ValidationSummary) -> Self {
        Self {
            timestamp: unix_timestamp(),
            dialect: "validation".to_string(),
            stats: ProcessingStats::empty(),
            input_info: InputInfo {
                source_type: "validation".to_string(),
                source_id: "validation".to_string(),
                size_bytes: 0,
                line_count: 0,
            },
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Creates metadata for a successful translation
    pub fn translation_success(
        dialect: crate::codegen::dialect::Dialect,
        processing_time: std::time::Duration,
        input: &str,
        output: &str,
    ) -> Self {
        Self {
            timestamp: unix_timestamp(),
            dialect: dialect.as_str().to_string(),
            stats: ProcessingStats {
                parse_time_us: 0,
                resolve_time_us: 0,
                generation_time_us: 0,
                total_time_us: processing_time.as_micros() as u64,
                input_size_bytes: input.len(),
                output_size_bytes: output.len(),
            },
            input_info: InputInfo {
                source_type: "translation".to_string(),
                source_id: "translation".to_string(),
                size_bytes: input.len(),
                line_count: input.lines().count(),
            },
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
