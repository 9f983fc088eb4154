//! Processing pipeline for unified CLI operations
//!
//! This module provides a unified processing pipeline that handles different
//! CLI modes (file, text, stdin) and processing types (validation,
//! translation).

use crate::cli::{
    debug_logger::DebugLogger,
    schema_loader,
    signal_handler::{utils, ProcessingError, SignalAwareProcessor, SignalHandler},
    validator::{QueryValidator, ValidateResult},
    ErrorHandler, ExitCode, JsonOutputFormatter, OutputFormat, OutputFormatter, StdinReader,
};
use crate::cli::json_output::TranslateMetadata;
use crate::error::CliError;
use crate::{Dialect, Schema, Translator};
use clap::{value_parser, Arg, ArgMatches, Command};
use std::io::{self, Write};

/// CLI arguments structure
#[derive(Debug, Clone)]
pub struct CliArgs {
    pub input_file: Option<String>,
    pub output_file: Option<String>,
    pub schema_file: Option<String>,
    pub dialect: Dialect,
    pub pretty_print: bool,
    pub input_text: Option<String>,
    pub validate_only: bool,
    pub verbose: bool,
    pub debug: bool,
    pub compact: bool,
    pub json_output: bool,
}

/// Parses CLI arguments.
pub fn parse_args() -> CliArgs {
    let matches = Command::new("sql2awk")
        .version("0.1.0")
        .author("sql2awk contributors")
        .about("Translates a restricted SQL SELECT statement into a self-contained awk program")
        .long_about(
            "sql2awk is a Rust-based translator that converts a restricted SQL SELECT\n\
             statement into a self-contained awk program, given a schema describing the\n\
             tab-separated input's columns.\n\n\
             Examples:\n  \
             sql2awk -t \"SELECT src, bytes WHERE bytes > 100\" -s schema.json\n  \
             sql2awk -i query.sql -s schema.json -o query.awk -d gawk\n  \
             echo \"SELECT src, sum(bytes) AS total\" | sql2awk -s schema.json",
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("Input query file path")
                .long_help("Read the SQL query from the specified file. Cannot be used with -t/--text.")
                .conflicts_with("text"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output awk file path (stdout if not specified)")
                .long_help("Write the generated awk program to the specified file. If not provided, output goes to stdout."),
        )
        .arg(
            Arg::new("schema")
                .short('s')
                .long("schema")
                .value_name("FILE")
                .help("Schema file path (JSON array of {\"name\", \"type\"} objects)")
                .long_help("Read the column schema from the specified JSON file. Required for\ntranslation; optional for --validate-only (syntax-only checking without it)."),
        )
        .arg(
            Arg::new("dialect")
                .short('d')
                .long("dialect")
                .value_name("DIALECT")
                .help("awk dialect [possible values: portable, gawk]")
                .long_help("Specify the target awk dialect for code generation.\n\
                           portable - POSIX awk, no gawk-only extensions\n  \
                           gawk - adds gawk-only math/time/regex-subgroup functions")
                .value_parser(value_parser!(Dialect))
                .default_value("portable"),
        )
        .arg(
            Arg::new("pretty")
                .short('p')
                .long("pretty")
                .help("Keep the generator's own indentation (default behavior)")
                .long_help("No-op kept for symmetry with --compact; the generator already emits indented output.")
                .conflicts_with("compact")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("text")
                .short('t')
                .long("text")
                .value_name("QUERY")
                .help("Direct SQL query input")
                .long_help("Provide the SQL query directly as a command line argument. Cannot be used with -i/--input.")
                .conflicts_with("input"),
        )
        .arg(
            Arg::new("validate-only")
                .long("validate-only")
                .help("Only validate the query without generating an awk program")
                .long_help("Perform syntax (and, with --schema, type) validation only. Returns exit code 0 for a valid query, non-zero otherwise.")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output with detailed processing information")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug mode with AST structure output")
                .long_help("Display detailed debug information including AST structure and generated awk text. Implies --verbose.")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("compact")
                .short('c')
                .long("compact")
                .help("Strip blank lines and indentation from the generated awk program")
                .conflicts_with("pretty")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .short('j')
                .long("json")
                .help("Output results in JSON format with metadata")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    parse_matches(&matches)
}

/// Creates CliArgs from ArgMatches.
fn parse_matches(matches: &ArgMatches) -> CliArgs {
    CliArgs {
        input_file: matches.get_one::<String>("input").cloned(),
        output_file: matches.get_one::<String>("output").cloned(),
        schema_file: matches.get_one::<String>("schema").cloned(),
        dialect: matches
            .get_one::<Dialect>("dialect")
            .copied()
            .unwrap_or_default(),
        pretty_print: matches.get_flag("pretty"),
        input_text: matches.get_one::<String>("text").cloned(),
        validate_only: matches.get_flag("validate-only"),
        verbose: matches.get_flag("verbose"),
        debug: matches.get_flag("debug"),
        compact: matches.get_flag("compact"),
        json_output: matches.get_flag("json"),
    }
}

/// CLI operation modes
#[derive(Debug, Clone, PartialEq)]
pub enum CliMode {
    /// File-based processing mode
    FileMode {
        input_file: String,
        output_file: Option<String>,
    },
    /// Direct text processing mode
    TextMode {
        input_text: String,
        output_file: Option<String>,
    },
    /// Stdin processing mode
    StdinMode {
        validate_only: bool,
        streaming: bool,
    },
}

/// CLI configuration derived from command-line arguments
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub mode: CliMode,
    pub dialect: Dialect,
    pub schema_file: Option<String>,
    pub output_format: OutputFormat,
    pub validation_only: bool,
    pub verbose: bool,
    pub debug: bool,
}

impl CliConfig {
    /// Create CLI configuration from command-line arguments
    pub fn from_args(args: &CliArgs) -> Self {
        let mode = Self::determine_mode(args);
        let output_format = Self::determine_output_format(args);

        Self {
            mode,
            dialect: args.dialect,
            schema_file: args.schema_file.clone(),
            output_format,
            validation_only: args.validate_only,
            verbose: args.verbose,
            debug: args.debug,
        }
    }

    /// Determine the CLI mode based on arguments
    fn determine_mode(args: &CliArgs) -> CliMode {
        if let Some(ref input_text) = args.input_text {
            CliMode::TextMode {
                input_text: input_text.clone(),
                output_file: args.output_file.clone(),
            }
        } else if let Some(ref input_file) = args.input_file {
            CliMode::FileMode {
                input_file: input_file.clone(),
                output_file: args.output_file.clone(),
            }
        } else {
            CliMode::StdinMode {
                validate_only: args.validate_only,
                streaming: false, // Future extension
            }
        }
    }

    /// Determine output format based on arguments
    fn determine_output_format(args: &CliArgs) -> OutputFormat {
        if args.json_output {
            OutputFormat::Json
        } else if args.compact {
            OutputFormat::Compact
        } else if args.pretty_print {
            OutputFormat::Pretty
        } else {
            OutputFormat::Default
        }
    }
}

/// Processing pipeline that handles all CLI operations
pub struct ProcessingPipeline {
    config: CliConfig,
    translator: Translator,
    schema: Option<Schema>,
    validator: Option<QueryValidator>,
    output_formatter: OutputFormatter,
    json_formatter: JsonOutputFormatter,
    error_handler: ErrorHandler,
    debug_logger: DebugLogger,
    signal_handler: Option<SignalHandler>,
    signal_processor: Option<SignalAwareProcessor>,
}

impl ProcessingPipeline {
    /// Create a new processing pipeline with the given configuration
    pub fn new(config: CliConfig) -> Result<Self, CliError> {
        let translator = Translator::new(config.dialect);

        let schema = match &config.schema_file {
            Some(path) => Some(schema_loader::load_schema_file(path)?),
            None => None,
        };

        let validator = if config.validation_only {
            Some(QueryValidator::new())
        } else {
            None
        };

        let output_formatter = OutputFormatter::with_format(config.output_format.clone());
        let json_formatter = JsonOutputFormatter::new();
        let error_handler = ErrorHandler::with_settings(config.verbose, false);
        let debug_logger = DebugLogger::with_settings(config.verbose, config.debug);

        // Initialize signal handling for Unix pipeline integration
        let (signal_handler, signal_processor) = if utils::is_unix_like()
            && matches!(config.mode, CliMode::StdinMode { .. })
        {
            let handler = SignalHandler::new()
                .map_err(|e| CliError::System(format!("failed to initialize signal handler: {e}")))?;
            let processor = SignalAwareProcessor::new().map_err(|e| {
                CliError::System(format!("failed to initialize signal processor: {e}"))
            })?;

            if let Err(e) = utils::ignore_sigpipe() {
                eprintln!("Warning: Failed to ignore SIGPIPE: {e}");
            }

            (Some(handler), Some(processor))
        } else {
            (None, None)
        };

        Ok(Self {
            config,
            translator,
            schema,
            validator,
            output_formatter,
            json_formatter,
            error_handler,
            debug_logger,
            signal_handler,
            signal_processor,
        })
    }

    /// Process input according to the configured mode
    pub fn process(&mut self) -> Result<String, CliError> {
        self.debug_logger.verbose("Starting processing pipeline");
        self.debug_logger.reset_step_timer();

        let input = self.read_input()?;
        self.debug_logger.timing("Input reading");

        let result = if self.config.validation_only {
            self.debug_logger.verbose("Validation mode enabled");
            self.validate_input(&input)
        } else {
            self.debug_logger.verbose("Translation mode enabled");
            self.translate_input(&input)
        };

        self.debug_logger.total_time();
        result
    }

    /// Read input based on the configured mode
    fn read_input(&self) -> Result<String, CliError> {
        match &self.config.mode {
            CliMode::StdinMode { .. } => {
                self.debug_logger.verbose("Reading from stdin...");
                self.debug_logger.debug("Stdin mode: waiting for input");

                if utils::is_in_pipeline() {
                    self.debug_logger.debug("Pipeline environment detected");
                }

                let reader = if utils::is_unix_like() {
                    self.debug_logger.debug("Using signal-aware stdin reader");
                    StdinReader::with_signal_handling()
                        .map_err(|e| CliError::System(format!("failed to create signal-aware stdin reader: {e}")))?
                } else {
                    StdinReader::new()
                };

                let result = if let Some(ref signal_processor) = self.signal_processor {
                    self.read_stdin_with_signals(&reader, signal_processor)?
                } else {
                    reader
                        .read_all()
                        .map_err(|e| CliError::Io(format!("failed to read from stdin: {e}")))?
                };

                self.debug_logger
                    .debug(&format!("Read {} bytes from stdin", result.len()));
                Ok(result)
            }
            CliMode::TextMode { input_text, .. } => {
                self.debug_logger.verbose("Processing direct text input...");
                self.debug_logger
                    .debug(&format!("Text input length: {} characters", input_text.len()));
                Ok(input_text.clone())
            }
            CliMode::FileMode { input_file, .. } => {
                self.debug_logger
                    .verbose(&format!("Reading from file: {input_file}"));

                let result = std::fs::read_to_string(input_file)
                    .map_err(|e| CliError::Io(format!("failed to read file '{input_file}': {e}")))?;

                self.debug_logger
                    .debug(&format!("Read {} bytes from file", result.len()));
                Ok(result)
            }
        }
    }

    /// Validate input without generating an awk program
    fn validate_input(&self, input: &str) -> Result<String, CliError> {
        let validator = self.validator.as_ref().ok_or_else(|| {
            CliError::Configuration("validator not configured for validation mode".to_string())
        })?;

        self.debug_logger.verbose("Validating query...");
        let result = validator
            .validate(input, self.schema.as_ref(), self.config.dialect)
            .map_err(|e| CliError::Validation(e.to_string()))?;

        match result {
            ValidateResult::Valid { summary } => {
                self.debug_logger
                    .debug(&format!("Validation successful: {summary:?}"));
                self.debug_logger.verbose("Query is valid");

                match self.config.output_format {
                    OutputFormat::Json => {
                        let metadata = TranslateMetadata::from_validation_summary(&summary);
                        Ok(self
                            .json_formatter
                            .format_validation_success(&summary, &metadata))
                    }
                    _ => Ok("valid query".to_string()),
                }
            }
            ValidateResult::Invalid { error, suggestions } => {
                self.debug_logger
                    .debug(&format!("Validation failed: {error:?}"));

                match self.config.output_format {
                    OutputFormat::Json => Ok(self
                        .json_formatter
                        .format_validation_error(&error, &suggestions)),
                    _ => {
                        let mut error_msg = format!("validation failed: {}", error.message);
                        if !suggestions.is_empty() {
                            error_msg.push_str("\nSuggestions:");
                            for suggestion in suggestions {
                                error_msg.push_str(&format!("\n  - {suggestion}"));
                            }
                        }
                        Err(CliError::Validation(error_msg))
                    }
                }
            }
        }
    }

    /// Translate input to an awk program
    fn translate_input(&mut self, input: &str) -> Result<String, CliError> {
        let schema = self.schema.as_ref().ok_or_else(|| {
            CliError::Configuration(
                "a schema file is required for translation (pass --schema or use --validate-only)"
                    .to_string(),
            )
        })?;

        self.debug_logger.verbose(&format!(
            "Translating query (dialect: {})...",
            self.config.dialect
        ));
        self.debug_logger
            .debug(&format!("Input query: {}", input.trim()));

        self.debug_logger.debug("Starting lexical analysis and parsing...");
        let query = self
            .translator
            .parse(input)
            .map_err(|e| CliError::Translate(crate::TranslateError::Syntax(e)))?;
        self.debug_logger.timing("Parsing");
        self.debug_logger.log_ast(&query);

        self.debug_logger.debug("Starting type resolution...");
        self.translator
            .resolve(&query, schema)
            .map_err(|e| CliError::Translate(crate::TranslateError::Type(e)))?;
        self.debug_logger.timing("Type resolution");

        self.debug_logger.debug("Starting awk generation...");
        let awk = self
            .translator
            .generate(&query, schema)
            .expect("a typechecked query never fails generation");
        self.debug_logger.timing("awk generation");

        self.debug_logger
            .log_awk_generation(&awk, self.config.dialect.as_str());
        self.debug_logger.verbose("Translation completed successfully");

        match self.config.output_format {
            OutputFormat::Json => {
                let metadata = TranslateMetadata::translation_success(
                    self.config.dialect,
                    self.debug_logger.elapsed(),
                    input,
                    &awk,
                );
                Ok(self.json_formatter.format_translate_result(&awk, &metadata))
            }
            _ => Ok(self.output_formatter.format(&awk)?),
        }
    }

    /// Write output to the appropriate destination
    pub fn write_output(&self, output: &str) -> Result<(), CliError> {
        match &self.config.mode {
            CliMode::FileMode {
                output_file: Some(file),
                ..
            }
            | CliMode::TextMode {
                output_file: Some(file),
                ..
            } => {
                if self.config.verbose {
                    eprintln!("Writing output to file: {file}");
                }
                std::fs::write(file, output)
                    .map_err(|e| CliError::Io(format!("failed to write to file '{file}': {e}")))
            }
            _ => {
                print!("{output}");
                io::stdout()
                    .flush()
                    .map_err(|e| CliError::Io(format!("failed to flush stdout: {e}")))
            }
        }
    }

    /// Handle errors using the configured error handler
    pub fn handle_error(&self, error: &CliError) -> i32 {
        if matches!(self.config.output_format, OutputFormat::Json) {
            let error_info = crate::cli::json_output::ErrorInfo::from_cli_error(error);
            let metadata = TranslateMetadata::translation_success(
                self.config.dialect,
                std::time::Duration::from_millis(0),
                "",
                "",
            );

            match self.json_formatter.format_error(error_info, metadata) {
                Ok(json) => println!("{json}"),
                Err(_) => return self.error_handler.handle_error(error),
            }

            match error {
                CliError::Translate(_) => ExitCode::VALIDATION_ERROR,
                CliError::Io(_) => ExitCode::IO_ERROR,
                CliError::Schema(_) => ExitCode::CONFIG_ERROR,
                CliError::Validation(_) => ExitCode::VALIDATION_ERROR,
                CliError::Configuration(_) => ExitCode::CONFIG_ERROR,
                CliError::System(_) => ExitCode::SYSTEM_ERROR,
            }
        } else {
            self.error_handler.handle_error(error)
        }
    }

    /// Read stdin with signal handling support
    fn read_stdin_with_signals(
        &self,
        reader: &StdinReader,
        signal_processor: &SignalAwareProcessor,
    ) -> Result<String, CliError> {
        self.debug_logger.debug("Reading stdin with signal handling");

        signal_processor
            .execute_with_signal_check(|should_continue| {
                if !should_continue() {
                    if let Some(ref handler) = self.signal_handler {
                        if handler.pipe_closed() {
                            return Err(ProcessingError::PipeClosed);
                        } else {
                            return Err(ProcessingError::Interrupted);
                        }
                    }
                }

                reader
                    .read_all()
                    .map_err(|e| ProcessingError::ProcessingError(format!("failed to read from stdin: {e}")))
            })
            .map_err(|e| match e {
                ProcessingError::Interrupted => {
                    CliError::System("reading interrupted by signal".to_string())
                }
                ProcessingError::PipeClosed => CliError::System("output pipe was closed".to_string()),
                ProcessingError::ProcessingError(msg) => CliError::Io(msg),
                ProcessingError::SignalError(sig_err) => {
                    CliError::System(format!("signal error: {sig_err}"))
                }
            })
    }

    /// Check if processing should continue (signal handling)
    pub fn should_continue(&self) -> bool {
        match &self.signal_handler {
            Some(handler) => !handler.should_shutdown(),
            None => true,
        }
    }

    /// Check if the output pipe was closed
    pub fn pipe_closed(&self) -> bool {
        match &self.signal_handler {
            Some(handler) => handler.pipe_closed(),
            None => false,
        }
    }

    /// Get configuration reference
    pub fn config(&self) -> &CliConfig {
        &self.config
    }
}
