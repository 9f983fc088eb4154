//! # sql2awk
//!
//! Translates a restricted SQL `SELECT` statement into a self-contained
//! awk program that evaluates it over tab-separated records.
//!
//! ## Usage Example
//!
//! ```rust
//! use sql2awk::{Translator, Dialect, Schema, Datatype};
//!
//! let mut schema = Schema::new();
//! schema.push("src", Datatype::Str).push("bytes", Datatype::Int);
//!
//! let translator = Translator::new(Dialect::Portable);
//! let program = translator.translate("SELECT src WHERE bytes > 100", &schema).unwrap();
//! println!("{}", program);
//! ```

pub mod cli;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod runtime;
pub mod schema;

pub use crate::codegen::{AwkGenerator, CodegenError, Dialect};
pub use crate::error::{CliError, LexError, ParseError, TranslateError, TypeCheckError};
pub use crate::lexer::{Lexer, Token};
pub use crate::parser::{Expr, Parser, Projection, Query, Where};
pub use crate::resolver::OutputColumn;
pub use crate::schema::{Column, Datatype, Schema};

/// Primary entry point: `(query text, schema, dialect) -> awk program text`.
///
/// Owns a fixed dialect; the schema and query text are supplied per call,
/// matching spec §6's pure-function interface.
pub struct Translator {
    dialect: Dialect,
    generator: AwkGenerator,
}

impl Translator {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            generator: AwkGenerator::new(dialect),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Runs the full pipeline: lex, parse, typecheck, generate.
    pub fn translate(&self, query_text: &str, schema: &Schema) -> Result<String, TranslateError> {
        let query = self.parse(query_text)?;
        self.resolve(&query, schema)?;
        Ok(self
            .generate(&query, schema)
            .expect("a typechecked query never fails generation"))
    }

    /// Lexes and parses `query_text` into a [`Query`], applying the
    /// implicit-`SELECT *` prefix rule for bare `WHERE`/`LIMIT` input.
    pub fn parse(&self, query_text: &str) -> Result<Query, ParseError> {
        let text = crate::parser::parse::apply_implicit_prefix(query_text);
        let lexer = Lexer::new(text);
        let mut parser = Parser::new(lexer)?;
        parser.parse()
    }

    /// Typechecks `query` against `schema`, returning its output schema.
    pub fn resolve(
        &self,
        query: &Query,
        schema: &Schema,
    ) -> Result<Vec<OutputColumn>, TypeCheckError> {
        crate::resolver::resolve(query, schema, self.dialect)
    }

    /// Generates awk program text for an already-typechecked `query`.
    pub fn generate(&self, query: &Query, schema: &Schema) -> Result<String, CodegenError> {
        self.generator.generate(query, schema)
    }
}
