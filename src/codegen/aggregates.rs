//! Aggregate update/final contract.
//!
//! Every `AggregateFunction` node owns a process-unique id (minted by the
//! parser) that names its awk state array. This module is the only place
//! that knows how each aggregate kind touches that array, mirroring how the
//! teacher keeps mutate's "thread extra per-column state through the query
//! accumulator" pattern in one file rather than scattering it across the
//! generator.

use crate::parser::ast::Expr;
use crate::schema::Schema;

use super::Dialect;

/// State array name for an aggregate node. `agg7` reads from `agg7[part]`
/// (or `agg7[part, "sum"]` for `avg`, which needs two counters).
pub fn state_array(id: u64) -> String {
    format!("agg{id}")
}

/// Membership-set array name backing a `DISTINCT` aggregate's dedup guard.
fn seen_array(id: u64) -> String {
    format!("seen{id}")
}

/// Per-row update statement(s) for a single aggregate node. `part` must name
/// an in-scope awk variable holding the current row's partition key.
///
/// `scalar` is the caller's scalar-expression emitter (avoids a circular
/// module dependency between this file and `codegen::mod`).
pub fn update_statement(
    expr: &Expr,
    schema: &Schema,
    dialect: Dialect,
    scalar: &impl Fn(&Expr, &Schema, Dialect) -> String,
) -> String {
    let Expr::AggregateFunction {
        name, distinct, arg, id, ..
    } = expr
    else {
        panic!("update_statement called on a non-aggregate node");
    };

    let arr = state_array(*id);
    let lower = name.to_ascii_lowercase();

    let base = match lower.as_str() {
        "count" => format!("{arr}[part]++;"),
        "sum" | "total" => {
            let e = scalar(arg.as_ref().unwrap(), schema, dialect);
            format!("{arr}[part] += ({e});")
        }
        "avg" => {
            let e = scalar(arg.as_ref().unwrap(), schema, dialect);
            format!("{arr}[part,\"sum\"] += ({e}); {arr}[part,\"count\"]++;")
        }
        "min" => {
            let e = scalar(arg.as_ref().unwrap(), schema, dialect);
            format!(
                "if ({arr}[part] == \"\" || ({e}) < {arr}[part]) {{ {arr}[part] = ({e}); }}"
            )
        }
        "max" => {
            let e = scalar(arg.as_ref().unwrap(), schema, dialect);
            format!(
                "if ({arr}[part] == \"\" || ({e}) > {arr}[part]) {{ {arr}[part] = ({e}); }}"
            )
        }
        other => panic!("unknown aggregate function '{other}'"),
    };

    if *distinct {
        let seen = seen_array(*id);
        let value = match arg {
            Some(a) => scalar(a, schema, dialect),
            None => "$0".to_string(),
        };
        format!(
            "if (!((part, ({value})) in {seen})) {{ {seen}[part, ({value})] = 1; {base} }}"
        )
    } else {
        base
    }
}

/// The finalized value of an aggregate node for one partition, read in the
/// `END` block where no current row exists.
pub fn final_expression(expr: &Expr, part_var: &str) -> String {
    let Expr::AggregateFunction { name, id, .. } = expr else {
        panic!("final_expression called on a non-aggregate node");
    };

    let arr = state_array(*id);
    match name.to_ascii_lowercase().as_str() {
        "count" | "sum" | "total" => format!("({arr}[{part_var}]+0)"),
        "avg" => format!(
            "({arr}[{part_var},\"count\"] == 0 ? 0 : {arr}[{part_var},\"sum\"] / {arr}[{part_var},\"count\"])"
        ),
        "min" | "max" => format!("{arr}[{part_var}]"),
        other => panic!("unknown aggregate function '{other}'"),
    }
}

/// Every `AggregateFunction` node reachable from `expr` without crossing
/// into another aggregate's own argument (nesting is rejected earlier, by
/// the resolver, so this never needs to recurse into an aggregate's `arg`).
pub fn collect_aggregates<'a>(expr: &'a Expr, out: &mut Vec<&'a Expr>) {
    match expr {
        Expr::AggregateFunction { .. } => out.push(expr),
        Expr::Unary { operand, .. } => collect_aggregates(operand, out),
        Expr::Binary { left, right, .. } => {
            collect_aggregates(left, out);
            collect_aggregates(right, out);
        }
        Expr::Like { left, pattern, .. } => {
            collect_aggregates(left, out);
            collect_aggregates(pattern, out);
        }
        Expr::Function { args, .. } => {
            for a in args {
                collect_aggregates(a, out);
            }
        }
        Expr::NumericLiteral { .. }
        | Expr::StringLiteral { .. }
        | Expr::RegexLiteral { .. }
        | Expr::ColumnName { .. } => {}
    }
}

/// Every bare column name reachable from `expr` without crossing into an
/// aggregate's argument. These are the "non-aggregate arguments" a scalar
/// function sitting alongside an aggregate keeps as scalars (spec §4.3);
/// since no current row exists in `END`, their last-seen-per-partition
/// value is cached during the main-block update instead.
pub fn collect_plain_columns<'a>(expr: &'a Expr, out: &mut Vec<&'a str>) {
    match expr {
        Expr::ColumnName { name, .. } if name != "*" => out.push(name),
        Expr::ColumnName { .. } => {}
        Expr::AggregateFunction { .. } => {}
        Expr::Unary { operand, .. } => collect_plain_columns(operand, out),
        Expr::Binary { left, right, .. } => {
            collect_plain_columns(left, out);
            collect_plain_columns(right, out);
        }
        Expr::Like { left, pattern, .. } => {
            collect_plain_columns(left, out);
            collect_plain_columns(pattern, out);
        }
        Expr::Function { args, .. } => {
            for a in args {
                collect_plain_columns(a, out);
            }
        }
        Expr::NumericLiteral { .. } | Expr::StringLiteral { .. } | Expr::RegexLiteral { .. } => {}
    }
}

/// awk array name caching a plain column's last-seen value per partition,
/// for use inside an aggregate-bearing projection.
pub fn column_cache_array(name: &str) -> String {
    format!("col_{name}")
}
