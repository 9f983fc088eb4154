//! Function type-signature tables and the dialect gate.
//!
//! Keeps the "what does this function return, and is it legal in this
//! dialect" question in one place, the way the teacher keeps SQL-function
//! translation rules centralized in `codegen::dialect::translate_common_function`
//! rather than scattered across the AST.

use crate::codegen::dialect::Dialect;
use crate::error::TypeCheckError;
use crate::parser::ast::{Expr, Query};
use crate::schema::{Datatype, Schema};

/// Aggregate names, dialect-independent — every dialect accepts the same
/// six. Distinguishing an aggregate call from a scalar call with the same
/// name (`min`/`max`) is the parser's job, based on arity and `DISTINCT`.
pub const AGGREGATE_NAMES: &[&str] = &["count", "avg", "max", "min", "sum", "total"];

pub fn is_aggregate_name(name: &str) -> bool {
    AGGREGATE_NAMES.iter().any(|n| n.eq_ignore_ascii_case(name))
}

/// Resolves a scalar function's return type, or `None` if the name is
/// unknown in this dialect (the caller turns that into `UnknownFunction`).
pub fn scalar_return_type(name: &str, arg_types: &[Datatype], dialect: Dialect) -> Option<Datatype> {
    let lower = name.to_ascii_lowercase();

    if !dialect.allows(&lower) {
        return None;
    }

    match lower.as_str() {
        "lower" | "upper" | "trim" | "ltrim" | "rtrim" | "replace" | "substr" | "strftime"
        | "submatch" | "mask_ip" => Some(Datatype::Str),

        "length" | "int" | "ip_in_cidr" => Some(Datatype::Int),

        "atan2" | "cos" | "exp" | "log" | "rand" | "sin" | "sqrt" => Some(Datatype::Real),

        "abs" | "max" | "min" => Some(
            arg_types
                .iter()
                .copied()
                .reduce(Datatype::promote)
                .unwrap_or(Datatype::Int),
        ),

        _ => None,
    }
}

/// One column of a query's output schema.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputColumn {
    pub name: String,
    pub datatype: Datatype,
}

/// Runs the whole-query semantic pass: `WHERE` non-aggregate, no nested
/// aggregates, every column/function reference resolves, every output name
/// unique — and, on success, returns the resulting output schema (spec §6).
pub fn resolve(
    query: &Query,
    schema: &Schema,
    dialect: Dialect,
) -> Result<Vec<OutputColumn>, TypeCheckError> {
    if let Some(where_clause) = &query.where_clause {
        if where_clause.expr.is_aggregate() {
            return Err(TypeCheckError::AggregateInWhere {
                offset: where_clause.expr.offset(),
            });
        }
        where_clause.expr.datatype(schema, dialect)?;
    }

    for projection in &query.projections {
        check_nested_aggregate(&projection.expr, false)?;
    }

    let mut output = Vec::new();
    for projection in &query.projections {
        if let Expr::ColumnName { name, .. } = &projection.expr {
            if name == "*" {
                output.extend(schema.iter().map(|(name, column)| OutputColumn {
                    name: name.to_string(),
                    datatype: column.datatype,
                }));
                continue;
            }
        }
        let datatype = projection.expr.datatype(schema, dialect)?;
        output.push(OutputColumn {
            name: projection.display_name.clone(),
            datatype,
        });
    }

    let mut seen = std::collections::HashSet::new();
    for column in &output {
        if !seen.insert(column.name.as_str()) {
            return Err(TypeCheckError::DuplicateProjectionName {
                name: column.name.clone(),
            });
        }
    }

    Ok(output)
}

fn check_nested_aggregate(expr: &Expr, inside_aggregate: bool) -> Result<(), TypeCheckError> {
    match expr {
        Expr::AggregateFunction { arg, offset, .. } => {
            if inside_aggregate {
                return Err(TypeCheckError::NestedAggregate { offset: *offset });
            }
            if let Some(a) = arg {
                check_nested_aggregate(a, true)?;
            }
            Ok(())
        }
        Expr::Unary { operand, .. } => check_nested_aggregate(operand, inside_aggregate),
        Expr::Binary { left, right, .. } => {
            check_nested_aggregate(left, inside_aggregate)?;
            check_nested_aggregate(right, inside_aggregate)
        }
        Expr::Like { left, pattern, .. } => {
            check_nested_aggregate(left, inside_aggregate)?;
            check_nested_aggregate(pattern, inside_aggregate)
        }
        Expr::Function { args, .. } => {
            for a in args {
                check_nested_aggregate(a, inside_aggregate)?;
            }
            Ok(())
        }
        Expr::NumericLiteral { .. }
        | Expr::StringLiteral { .. }
        | Expr::RegexLiteral { .. }
        | Expr::ColumnName { .. } => Ok(()),
    }
}
