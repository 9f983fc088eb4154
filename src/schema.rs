//! Schema types.
//!
//! An ordered mapping `column_name -> (index, datatype)`, read-only during
//! translation. See spec §3 ("Schema") and §6 ("External Interfaces").

use std::fmt;

/// The three leaves of the datatype lattice (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Datatype {
    Int,
    Real,
    Str,
}

impl Datatype {
    /// Arithmetic promotion: `real` if either operand is `real`, else `int`.
    pub fn promote(a: Datatype, b: Datatype) -> Datatype {
        if a == Datatype::Real || b == Datatype::Real {
            Datatype::Real
        } else {
            Datatype::Int
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datatype::Int => write!(f, "int"),
            Datatype::Real => write!(f, "real"),
            Datatype::Str => write!(f, "str"),
        }
    }
}

impl std::str::FromStr for Datatype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "int" | "integer" => Ok(Datatype::Int),
            "real" | "float" | "double" => Ok(Datatype::Real),
            "str" | "string" | "text" => Ok(Datatype::Str),
            other => Err(format!("unknown datatype '{other}'")),
        }
    }
}

/// A single schema column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub index: usize,
    pub datatype: Datatype,
}

/// Ordered `column_name -> (index, datatype)` mapping. Index order equals
/// insertion order, which is also the order `*` expands columns in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<(String, Column)>,
}

impl Schema {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Appends a column, assigning it the next 0-based index.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already present — schemas are built once from a
    /// trusted source and never mutated concurrently, so a duplicate column
    /// name indicates a caller bug, not a translation-time error.
    pub fn push(&mut self, name: impl Into<String>, datatype: Datatype) -> &mut Self {
        let name = name.into();
        assert!(
            self.get(&name).is_none(),
            "duplicate schema column '{name}'"
        );
        let index = self.columns.len();
        self.columns.push((name, Column { index, datatype }));
        self
    }

    pub fn get(&self, name: &str) -> Option<Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| *c)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns in original index order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Column)> {
        self.columns.iter().map(|(n, c)| (n.as_str(), *c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promotion_follows_real_dominance() {
        assert_eq!(Datatype::promote(Datatype::Int, Datatype::Int), Datatype::Int);
        assert_eq!(Datatype::promote(Datatype::Int, Datatype::Real), Datatype::Real);
        assert_eq!(Datatype::promote(Datatype::Real, Datatype::Real), Datatype::Real);
    }

    #[test]
    fn schema_preserves_insertion_order() {
        let mut schema = Schema::new();
        schema
            .push("src", Datatype::Str)
            .push("dst", Datatype::Str)
            .push("bytes", Datatype::Int)
            .push("dur", Datatype::Real);

        let names: Vec<_> = schema.iter().map(|(n, _)| n.to_string()).collect();
        assert_eq!(names, vec!["src", "dst", "bytes", "dur"]);
        assert_eq!(schema.get("bytes").unwrap().index, 2);
    }

    #[test]
    #[should_panic(expected = "duplicate schema column")]
    fn duplicate_column_panics() {
        let mut schema = Schema::new();
        schema.push("src", Datatype::Str);
        schema.push("src", Datatype::Int);
    }
}
