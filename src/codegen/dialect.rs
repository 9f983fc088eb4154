//! awk dialects.
//!
//! Exactly two variants, not a trait object family: spec fixes the dialect
//! set closed at `{portable, gawk}`, so exhaustive matching beats virtual
//! dispatch over a set of variants that will never grow.

/// Scalar functions accepted only when `gawk` extensions are available.
pub const GAWK_ONLY_FUNCTIONS: &[&str] = &[
    "strftime", "submatch", "atan2", "cos", "exp", "log", "rand", "sin", "sqrt",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// POSIX awk: no gawk-only math/time/regex-subgroup extras.
    Portable,
    /// gawk: adds the functions in `GAWK_ONLY_FUNCTIONS`.
    Gawk,
}

impl Dialect {
    pub fn allows(self, function_name: &str) -> bool {
        match self {
            Dialect::Gawk => true,
            Dialect::Portable => !GAWK_ONLY_FUNCTIONS
                .iter()
                .any(|f| f.eq_ignore_ascii_case(function_name)),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Dialect::Portable => "portable",
            Dialect::Gawk => "gawk",
        }
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "portable" => Ok(Dialect::Portable),
            "gawk" => Ok(Dialect::Gawk),
            other => Err(format!("unknown dialect '{other}' (expected portable|gawk)")),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect::Portable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portable_rejects_gawk_only() {
        assert!(!Dialect::Portable.allows("strftime"));
        assert!(!Dialect::Portable.allows("atan2"));
    }

    #[test]
    fn gawk_accepts_everything_portable_accepts() {
        assert!(Dialect::Gawk.allows("strftime"));
        assert!(Dialect::Gawk.allows("abs"));
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("GAWK".parse::<Dialect>().unwrap(), Dialect::Gawk);
        assert_eq!("Portable".parse::<Dialect>().unwrap(), Dialect::Portable);
        assert!("mysql".parse::<Dialect>().is_err());
    }
}
