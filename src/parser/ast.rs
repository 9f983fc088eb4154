//! AST node model.
//!
//! A single `Expr` enum covers literals, column references, scalar
//! expressions, and aggregates; `Projection`, `Where`, and `Query` are the
//! top-level value objects the parser ultimately produces. Nodes are built
//! once by the parser and never mutated afterwards.

use crate::error::TypeCheckError;
use crate::resolver;
use crate::schema::{Datatype, Schema};

pub type Dialect = crate::codegen::dialect::Dialect;

/// Unary prefix operators. Right-binding; see spec grammar tier 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
}

/// Binary operators, already normalized to their awk-emitted form at parse
/// time (`=` folded into `Eq`, `AND`/`OR` folded into `And`/`Or`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Match,
    NotMatch,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    /// SQL `||`, string concatenation (awk juxtaposition).
    Concat,
    Pow,
}

impl BinaryOp {
    /// The awk source operator this variant emits. `Concat` has no symbol;
    /// the generator joins operands with a literal space instead.
    pub const fn awk_symbol(self) -> Option<&'static str> {
        match self {
            BinaryOp::Or => Some("||"),
            BinaryOp::And => Some("&&"),
            BinaryOp::Match => Some("~"),
            BinaryOp::NotMatch => Some("!~"),
            BinaryOp::Eq => Some("=="),
            BinaryOp::Ne => Some("!="),
            BinaryOp::Lt => Some("<"),
            BinaryOp::Le => Some("<="),
            BinaryOp::Gt => Some(">"),
            BinaryOp::Ge => Some(">="),
            BinaryOp::Add => Some("+"),
            BinaryOp::Sub => Some("-"),
            BinaryOp::Mul => Some("*"),
            BinaryOp::Div => Some("/"),
            BinaryOp::Mod => Some("%"),
            BinaryOp::Pow => Some("^"),
            BinaryOp::Concat => None,
        }
    }

    /// `true` for operators whose result type is always `int` (awk has no
    /// boolean type; comparisons, logical ops, and matches all return 0/1).
    pub const fn yields_int(self) -> bool {
        matches!(
            self,
            BinaryOp::Or
                | BinaryOp::And
                | BinaryOp::Match
                | BinaryOp::NotMatch
                | BinaryOp::Eq
                | BinaryOp::Ne
                | BinaryOp::Lt
                | BinaryOp::Le
                | BinaryOp::Gt
                | BinaryOp::Ge
        )
    }
}

/// Expression AST. Built in a single parser pass and immutable thereafter.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    NumericLiteral {
        text: String,
        offset: usize,
    },
    StringLiteral {
        value: String,
        offset: usize,
    },
    RegexLiteral {
        pattern: String,
        offset: usize,
    },
    /// `name == "*"` means the whole record; only legal as a bare
    /// projection or as the sole argument of `count`.
    ColumnName {
        name: String,
        offset: usize,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        offset: usize,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
        offset: usize,
    },
    /// `LIKE`/`NOT LIKE`, kept distinct from `Binary` so the generator can
    /// special-case the `like2regex` argument it must wrap the pattern in.
    Like {
        left: Box<Expr>,
        pattern: Box<Expr>,
        negated: bool,
        offset: usize,
    },
    Function {
        name: String,
        args: Vec<Expr>,
        offset: usize,
    },
    AggregateFunction {
        name: String,
        distinct: bool,
        /// `None` only for `count(*)`.
        arg: Option<Box<Expr>>,
        /// Process-unique id minted by the parser; names this aggregate's
        /// awk state array. Never derived from node identity.
        id: u64,
        offset: usize,
    },
}

impl Expr {
    pub const fn offset(&self) -> usize {
        match self {
            Expr::NumericLiteral { offset, .. }
            | Expr::StringLiteral { offset, .. }
            | Expr::RegexLiteral { offset, .. }
            | Expr::ColumnName { offset, .. }
            | Expr::Unary { offset, .. }
            | Expr::Binary { offset, .. }
            | Expr::Like { offset, .. }
            | Expr::Function { offset, .. }
            | Expr::AggregateFunction { offset, .. } => *offset,
        }
    }

    /// Whether this expression's value depends on more than one row.
    pub fn is_aggregate(&self) -> bool {
        match self {
            Expr::NumericLiteral { .. }
            | Expr::StringLiteral { .. }
            | Expr::RegexLiteral { .. }
            | Expr::ColumnName { .. } => false,
            Expr::Unary { operand, .. } => operand.is_aggregate(),
            Expr::Binary { left, right, .. } => left.is_aggregate() || right.is_aggregate(),
            Expr::Like { left, pattern, .. } => left.is_aggregate() || pattern.is_aggregate(),
            Expr::Function { args, .. } => args.iter().any(Expr::is_aggregate),
            Expr::AggregateFunction { .. } => true,
        }
    }

    /// Resolves this expression's result type against a schema and dialect.
    pub fn datatype(&self, schema: &Schema, dialect: Dialect) -> Result<Datatype, TypeCheckError> {
        match self {
            Expr::NumericLiteral { text, .. } => Ok(if text.contains('.') {
                Datatype::Real
            } else {
                Datatype::Int
            }),
            Expr::StringLiteral { .. } | Expr::RegexLiteral { .. } => Ok(Datatype::Str),
            Expr::ColumnName { name, offset } => {
                if name == "*" {
                    // Only valid where the generator expects $0; callers
                    // that reach this path via a scalar context reject it
                    // before calling datatype().
                    return Ok(Datatype::Str);
                }
                schema
                    .get(name)
                    .map(|c| c.datatype)
                    .ok_or_else(|| TypeCheckError::UnknownColumn {
                        column: name.clone(),
                        offset: *offset,
                    })
            }
            Expr::Unary { op, operand, .. } => {
                let inner = operand.datatype(schema, dialect)?;
                Ok(match op {
                    UnaryOp::Not => Datatype::Int,
                    UnaryOp::Plus | UnaryOp::Minus => inner,
                })
            }
            Expr::Binary {
                left, op, right, ..
            } => {
                let lt = left.datatype(schema, dialect)?;
                let rt = right.datatype(schema, dialect)?;
                Ok(match op {
                    _ if op.yields_int() => Datatype::Int,
                    BinaryOp::Div | BinaryOp::Mod => Datatype::Real,
                    BinaryOp::Concat => Datatype::Str,
                    BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Pow => {
                        Datatype::promote(lt, rt)
                    }
                    BinaryOp::Or | BinaryOp::And | BinaryOp::Match | BinaryOp::NotMatch => {
                        Datatype::Int
                    }
                    BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt
                    | BinaryOp::Ge => Datatype::Int,
                })
            }
            Expr::Like { .. } => Ok(Datatype::Int),
            Expr::Function { name, args, offset } => {
                let arg_types = args
                    .iter()
                    .map(|a| a.datatype(schema, dialect))
                    .collect::<Result<Vec<_>, _>>()?;
                resolver::scalar_return_type(name, &arg_types, dialect).ok_or_else(|| {
                    TypeCheckError::UnknownFunction {
                        name: name.clone(),
                        offset: *offset,
                    }
                })
            }
            Expr::AggregateFunction {
                name, arg, offset, ..
            } => {
                if name.eq_ignore_ascii_case("count") {
                    return Ok(Datatype::Int);
                }
                match arg {
                    Some(e) => e.datatype(schema, dialect),
                    None => Err(TypeCheckError::UnknownFunction {
                        name: name.clone(),
                        offset: *offset,
                    }),
                }
            }
        }
    }
}

/// One output column.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub expr: Expr,
    pub alias: Option<String>,
    /// Resolved per spec §3: alias if present, else the bare column name,
    /// else the function name, else `"expr"`.
    pub display_name: String,
}

impl Projection {
    pub fn is_aggregate(&self) -> bool {
        self.expr.is_aggregate()
    }
}

/// Row filter. Construction already guarantees a non-aggregate expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Where {
    pub expr: Expr,
}

/// A parsed, not-yet-typechecked query.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub distinct: bool,
    pub projections: Vec<Projection>,
    pub where_clause: Option<Where>,
    pub limit: Option<u64>,
}

impl Query {
    pub fn has_aggregate(&self) -> bool {
        self.projections.iter().any(Projection::is_aggregate)
    }
}
