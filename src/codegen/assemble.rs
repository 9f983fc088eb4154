//! awk program assembly.
//!
//! Mirrors the teacher's `QueryParts` accumulator pattern: collect the
//! pieces of the program as plain strings/lines while walking the AST, then
//! join them once at the end instead of building the output string
//! incrementally inside the walk itself.

/// Accumulated pieces of a generated program, joined by [`assemble`] into
/// the final `BEGIN { } { } END { }` text.
#[derive(Debug, Default)]
pub struct AwkProgramParts {
    /// Statements inside `BEGIN { ... }`, before the runtime library text.
    pub begin: Vec<String>,
    /// Runtime library chunks (core + gawk extras), appended verbatim.
    pub runtime: Vec<String>,
    /// Statements inside the unlabeled main block, run once per input record.
    pub main: Vec<String>,
    /// Statements inside `END { ... }`.
    pub end: Vec<String>,
}

impl AwkProgramParts {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Joins accumulated parts into the final program text.
pub fn assemble(parts: AwkProgramParts) -> String {
    let mut out = String::new();

    out.push_str("BEGIN {\n");
    out.push_str("    FS = \"\\t\";\n");
    out.push_str("    OFS = \"\\t\";\n");
    for line in &parts.begin {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("}\n");

    for chunk in &parts.runtime {
        out.push_str(chunk.trim_matches('\n'));
        out.push('\n');
    }

    out.push('\n');
    out.push_str("{\n");
    for line in &parts.main {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("}\n");

    if !parts.end.is_empty() {
        out.push('\n');
        out.push_str("END {\n");
        for line in &parts.end {
            out.push_str("    ");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("}\n");
    }

    out
}
