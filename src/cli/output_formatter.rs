//! Output formatting module
//!
//! Provides presentation options for a generated awk program: pass-through
//! (the generator's own indentation), a compacted form with blank lines and
//! leading whitespace stripped, and a JSON-wrapping mode handled upstream by
//! [`crate::cli::json_output`].

use std::fmt;

/// Result type for output formatting operations
pub type FormatResult<T> = Result<T, FormatError>;

/// Errors that can occur during output formatting
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("invalid awk program: {0}")]
    InvalidProgram(String),

    #[error("formatting failed: {0}")]
    FormattingFailed(String),
}

/// Output format types
#[derive(Debug, Clone, PartialEq)]
pub enum OutputFormat {
    /// Default format - the generator's own indentation, unmodified
    Default,
    /// Basic format - same as Default, kept as a distinct selectable value
    Basic,
    /// Pretty format - same as Default; the generator already indents
    Pretty,
    /// Compact format - blank lines and leading indentation stripped
    Compact,
    /// JSON format - structured JSON output, handled by `json_output`
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Default => write!(f, "default"),
            OutputFormat::Basic => write!(f, "basic"),
            OutputFormat::Pretty => write!(f, "pretty"),
            OutputFormat::Compact => write!(f, "compact"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct FormatConfig {
    /// The output format to use
    pub format: OutputFormat,
    /// Whether to add a trailing newline
    pub add_newline: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Default,
            add_newline: true,
        }
    }
}

/// Formats a generated awk program for display or writing to a file.
#[derive(Debug)]
pub struct OutputFormatter {
    config: FormatConfig,
}

impl OutputFormatter {
    /// Creates a new OutputFormatter with default configuration
    pub fn new() -> Self {
        Self {
            config: FormatConfig::default(),
        }
    }

    /// Creates a new OutputFormatter with the specified format
    pub fn with_format(format: OutputFormat) -> Self {
        Self {
            config: FormatConfig {
                format,
                ..Default::default()
            },
        }
    }

    /// Creates a new OutputFormatter with custom configuration
    pub fn with_config(config: FormatConfig) -> Self {
        Self { config }
    }

    /// Formats an awk program according to the configured format
    pub fn format(&self, awk: &str) -> FormatResult<String> {
        if awk.trim().is_empty() {
            return Err(FormatError::InvalidProgram(
                "empty awk program".to_string(),
            ));
        }

        let formatted = match self.config.format {
            OutputFormat::Default | OutputFormat::Basic | OutputFormat::Pretty => {
                awk.to_string()
            }
            OutputFormat::Compact => self.format_compact(awk),
            // JSON formatting is handled by JsonOutputFormatter; pass through here.
            OutputFormat::Json => awk.to_string(),
        };

        Ok(self.apply_final_formatting(formatted))
    }

    /// Strips blank lines and leading indentation, preserving one statement
    /// per line so `;`-terminated awk statements stay unambiguous.
    fn format_compact(&self, awk: &str) -> String {
        awk.lines()
            .map(|line| line.trim_end())
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.trim_start())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Applies final formatting options like newlines
    fn apply_final_formatting(&self, mut formatted: String) -> String {
        if self.config.add_newline && !formatted.ends_with('\n') {
            formatted.push('\n');
        }

        formatted
    }

    /// Gets the current format configuration
    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Updates the format configuration
    pub fn set_config(&mut self, config: FormatConfig) {
        self.config = config;
    }

    /// Updates just the output format
    pub fn set_format(&mut self, format: OutputFormat) {
        self.config.format = format;
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new()
    }
}
