//! awk code generator.
//!
//! Walks a typechecked [`Query`] and emits a self-contained awk program:
//! a `BEGIN` block setting `FS`/`OFS` and the embedded runtime library, a
//! main block run once per record, and (for aggregate queries) an `END`
//! block that finalizes one output row per partition. See spec §4.3.

use crate::parser::ast::{Expr, Query, UnaryOp};
use crate::schema::Schema;

pub mod aggregates;
pub mod assemble;
pub mod dialect;

pub use dialect::Dialect;

use assemble::{assemble, AwkProgramParts};

/// Errors raised while generating awk text from an already-typechecked AST.
/// Distinct from [`crate::error::TypeCheckError`]: everything that could
/// reject a query on semantic grounds already ran in `resolver::resolve`,
/// so reaching this module with a bad node is a caller bug.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodegenError {
    #[error("aggregate expression reached scalar emission context (offset {offset})")]
    UnexpectedAggregate { offset: usize },
}

pub type CodegenResult<T> = Result<T, CodegenError>;

/// Generates awk programs for a fixed, already-chosen [`Dialect`].
pub struct AwkGenerator {
    dialect: Dialect,
}

impl AwkGenerator {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn generate(&self, query: &Query, schema: &Schema) -> CodegenResult<String> {
        let mut parts = AwkProgramParts::new();
        parts.begin.push("records = 0;".to_string());
        parts
            .runtime
            .push(crate::runtime::RUNTIME_LIB.to_string());
        if self.dialect == Dialect::Gawk {
            parts.runtime.push(crate::runtime::GAWK_EXTRAS.to_string());
        }

        if query.has_aggregate() {
            self.generate_aggregate_query(query, schema, &mut parts)?;
        } else {
            self.generate_scalar_query(query, schema, &mut parts)?;
        }

        Ok(assemble(parts))
    }

    /// SELECT with no aggregate projections: evaluate and print one awk
    /// record per input row (spec §4.3, "Non-aggregate path").
    fn generate_scalar_query(
        &self,
        query: &Query,
        schema: &Schema,
        parts: &mut AwkProgramParts,
    ) -> CodegenResult<()> {
        let columns = self.expand_projections(query, schema)?;
        let record = columns.join(" OFS ");

        let mut body = Vec::new();
        body.push(format!("record = {record};"));
        if query.distinct {
            body.push("if (!(record in distinct_seen)) {".to_string());
            body.push("    distinct_seen[record] = 1;".to_string());
            body.push("    print record;".to_string());
            if let Some(limit) = query.limit {
                body.push("    records++;".to_string());
                body.push(format!("    if (records >= {limit}) exit;"));
            }
            body.push("}".to_string());
        } else {
            body.push("print record;".to_string());
            if let Some(limit) = query.limit {
                body.push("records++;".to_string());
                body.push(format!("if (records >= {limit}) exit;"));
            }
        }

        if let Some(where_clause) = &query.where_clause {
            let cond = self.scalar(&where_clause.expr, schema)?;
            parts.main.push(format!("if ({cond}) {{"));
            for line in body {
                parts.main.push(format!("    {line}"));
            }
            parts.main.push("}".to_string());
        } else {
            parts.main.extend(body);
        }

        Ok(())
    }

    /// SELECT with at least one aggregate projection: per-row updates feed
    /// per-partition state, the `END` block prints one row per partition
    /// (spec §4.3, "Aggregate path").
    fn generate_aggregate_query(
        &self,
        query: &Query,
        schema: &Schema,
        parts: &mut AwkProgramParts,
    ) -> CodegenResult<()> {
        let non_agg = self.non_aggregate_scalars(query, schema)?;
        let part_expr = if non_agg.is_empty() {
            "\"\"".to_string()
        } else {
            non_agg.join(" \"\\t\" ")
        };

        let mut body = Vec::new();
        body.push(format!("part = {part_expr};"));
        body.push("if (!(part in partitions)) { partitions[part] = 1; partition_count++; }".to_string());

        for projection in &query.projections {
            if !projection.is_aggregate() {
                continue;
            }
            let mut aggs = Vec::new();
            aggregates::collect_aggregates(&projection.expr, &mut aggs);
            for agg in aggs {
                body.push(aggregates::update_statement(agg, schema, self.dialect, &scalar_fn));
            }

            let mut cols = Vec::new();
            aggregates::collect_plain_columns(&projection.expr, &mut cols);
            for col in cols {
                let arr = aggregates::column_cache_array(col);
                let value = self.scalar(
                    &Expr::ColumnName {
                        name: col.to_string(),
                        offset: 0,
                    },
                    schema,
                )?;
                body.push(format!("{arr}[part] = {value};"));
            }
        }

        if let Some(where_clause) = &query.where_clause {
            let cond = self.scalar(&where_clause.expr, schema)?;
            parts.main.push(format!("if ({cond}) {{"));
            for line in body {
                parts.main.push(format!("    {line}"));
            }
            parts.main.push("}".to_string());
        } else {
            parts.main.extend(body);
        }

        parts
            .end
            .push("if (partition_count == 0) { partitions[\"\"] = 1; }".to_string());
        parts.end.push("for (part in partitions) {".to_string());

        let non_agg_count = non_agg.len();
        if non_agg_count > 0 {
            parts
                .end
                .push("    split(part, pvals, \"\\t\");".to_string());
        }

        let mut next_non_agg_slot = 1;
        let mut output_fields = Vec::new();
        for projection in &query.projections {
            if let Expr::ColumnName { name, .. } = &projection.expr {
                if name == "*" {
                    for _ in schema.iter() {
                        output_fields.push(format!("pvals[{next_non_agg_slot}]"));
                        next_non_agg_slot += 1;
                    }
                    continue;
                }
            }
            if projection.is_aggregate() {
                output_fields.push(self.final_for_projection(&projection.expr, "part"));
            } else {
                output_fields.push(format!("pvals[{next_non_agg_slot}]"));
                next_non_agg_slot += 1;
            }
        }

        parts
            .end
            .push(format!("    print {};", output_fields.join(", ")));
        if let Some(limit) = query.limit {
            parts.end.push("    records++;".to_string());
            parts
                .end
                .push(format!("    if (records >= {limit}) break;"));
        }
        parts.end.push("}".to_string());

        Ok(())
    }

    /// Per-output-column scalar expressions, expanding bare `*` into one
    /// entry per schema column (spec §3, `*` invariant).
    fn expand_projections(&self, query: &Query, schema: &Schema) -> CodegenResult<Vec<String>> {
        let mut out = Vec::new();
        for projection in &query.projections {
            if let Expr::ColumnName { name, offset } = &projection.expr {
                if name == "*" {
                    for (col_name, _) in schema.iter() {
                        out.push(self.scalar(
                            &Expr::ColumnName {
                                name: col_name.to_string(),
                                offset: *offset,
                            },
                            schema,
                        )?);
                    }
                    continue;
                }
            }
            out.push(self.scalar(&projection.expr, schema)?);
        }
        Ok(out)
    }

    /// Same expansion as [`Self::expand_projections`], but restricted to
    /// the query's non-aggregate projections — these form the partition
    /// key in the aggregate path (spec §4.3).
    fn non_aggregate_scalars(&self, query: &Query, schema: &Schema) -> CodegenResult<Vec<String>> {
        let mut out = Vec::new();
        for projection in &query.projections {
            if projection.is_aggregate() {
                continue;
            }
            if let Expr::ColumnName { name, offset } = &projection.expr {
                if name == "*" {
                    for (col_name, _) in schema.iter() {
                        out.push(self.scalar(
                            &Expr::ColumnName {
                                name: col_name.to_string(),
                                offset: *offset,
                            },
                            schema,
                        )?);
                    }
                    continue;
                }
            }
            out.push(self.scalar(&projection.expr, schema)?);
        }
        Ok(out)
    }

    /// The `END`-block value of a projection that contains an aggregate:
    /// recurse through the expression, substituting each aggregate node's
    /// final value and each plain column's cached last-seen-per-partition
    /// value, since no current row exists once input is exhausted.
    fn final_for_projection(&self, expr: &Expr, part_var: &str) -> String {
        match expr {
            Expr::AggregateFunction { .. } => aggregates::final_expression(expr, part_var),
            Expr::NumericLiteral { text, .. } => text.clone(),
            Expr::StringLiteral { value, .. } => format!("\"{value}\""),
            Expr::RegexLiteral { pattern, .. } => format!("/{pattern}/"),
            Expr::ColumnName { name, .. } => {
                format!("{}[{part_var}]", aggregates::column_cache_array(name))
            }
            Expr::Unary { op, operand, .. } => {
                format!("({}{})", unary_symbol(*op), self.final_for_projection(operand, part_var))
            }
            Expr::Binary {
                left, op, right, ..
            } => {
                let l = self.final_for_projection(left, part_var);
                let r = self.final_for_projection(right, part_var);
                match op.awk_symbol() {
                    Some(sym) => format!("({l} {sym} {r})"),
                    None => format!("({l} {r})"),
                }
            }
            Expr::Like {
                left,
                pattern,
                negated,
                ..
            } => {
                let l = self.final_for_projection(left, part_var);
                let p = self.final_for_projection(pattern, part_var);
                let op = if *negated { "!~" } else { "~" };
                format!("({l} {op} like2regex({p}))")
            }
            Expr::Function { name, args, .. } => {
                let rendered: Vec<String> = args
                    .iter()
                    .map(|a| self.final_for_projection(a, part_var))
                    .collect();
                format!("{}({})", awk_function_name(name), rendered.join(", "))
            }
        }
    }

    /// Renders a non-aggregate expression as a per-row awk scalar.
    fn scalar(&self, expr: &Expr, schema: &Schema) -> CodegenResult<String> {
        scalar_expr(expr, schema, self.dialect)
    }
}

/// Free function mirror of [`AwkGenerator::scalar`], usable from
/// `aggregates.rs` without a circular borrow of `&AwkGenerator`.
pub(crate) fn scalar_expr(expr: &Expr, schema: &Schema, dialect: Dialect) -> CodegenResult<String> {
    match expr {
        Expr::NumericLiteral { text, .. } => Ok(text.clone()),
        Expr::StringLiteral { value, .. } => Ok(format!("\"{value}\"")),
        Expr::RegexLiteral { pattern, .. } => Ok(format!("/{pattern}/")),
        Expr::ColumnName { name, .. } => {
            if name == "*" {
                Ok("$0".to_string())
            } else {
                let index = schema
                    .get(name)
                    .expect("unresolved column reached codegen")
                    .index;
                Ok(format!("${}", index + 1))
            }
        }
        Expr::Unary { op, operand, offset } => {
            if operand.is_aggregate() {
                return Err(CodegenError::UnexpectedAggregate { offset: *offset });
            }
            let inner = scalar_expr(operand, schema, dialect)?;
            Ok(format!("({}{inner})", unary_symbol(*op)))
        }
        Expr::Binary {
            left,
            op,
            right,
            offset,
        } => {
            if left.is_aggregate() || right.is_aggregate() {
                return Err(CodegenError::UnexpectedAggregate { offset: *offset });
            }
            let l = scalar_expr(left, schema, dialect)?;
            let r = scalar_expr(right, schema, dialect)?;
            Ok(match op.awk_symbol() {
                Some(sym) => format!("({l} {sym} {r})"),
                None => format!("({l} {r})"),
            })
        }
        Expr::Like {
            left,
            pattern,
            negated,
            offset,
        } => {
            if left.is_aggregate() || pattern.is_aggregate() {
                return Err(CodegenError::UnexpectedAggregate { offset: *offset });
            }
            let l = scalar_expr(left, schema, dialect)?;
            let p = scalar_expr(pattern, schema, dialect)?;
            let op = if *negated { "!~" } else { "~" };
            Ok(format!("({l} {op} like2regex({p}))"))
        }
        Expr::Function { name, args, offset } => {
            let rendered: Result<Vec<String>, CodegenError> = args
                .iter()
                .map(|a| {
                    if a.is_aggregate() {
                        Err(CodegenError::UnexpectedAggregate { offset: *offset })
                    } else {
                        scalar_expr(a, schema, dialect)
                    }
                })
                .collect();
            Ok(format!("{}({})", awk_function_name(name), rendered?.join(", ")))
        }
        Expr::AggregateFunction { offset, .. } => {
            Err(CodegenError::UnexpectedAggregate { offset: *offset })
        }
    }
}

/// Adapts [`scalar_expr`]'s `Result` return to the plain-`String` signature
/// `aggregates::update_statement` expects for an aggregate's own argument
/// expression, which can never itself be an aggregate (nesting is rejected
/// by the resolver before generation ever runs).
fn scalar_fn(expr: &Expr, schema: &Schema, dialect: Dialect) -> String {
    scalar_expr(expr, schema, dialect).expect("aggregate argument must not itself be an aggregate")
}

const fn unary_symbol(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Plus => "+",
        UnaryOp::Minus => "-",
        UnaryOp::Not => "!",
    }
}

/// Maps a scalar function's SQL-facing name to the awk builtin or runtime
/// function it's emitted as. Most names pass through unchanged; `lower`
/// and `upper` are the exceptions (awk spells them `tolower`/`toupper`).
fn awk_function_name(name: &str) -> String {
    match name.to_ascii_lowercase().as_str() {
        "lower" => "tolower".to_string(),
        "upper" => "toupper".to_string(),
        other => other.to_string(),
    }
}
