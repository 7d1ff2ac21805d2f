//! Binary arithmetic operations.

use std::fmt;

/// Arithmetic operation carried by a request.
///
/// Each operation has a keyword spelling (prefix form, `ADD 2 3`) and a
/// one-character symbol spelling (infix form, `2 + 3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `ADD` / `+`
    Add,

    /// `SUB` / `-`
    Subtract,

    /// `MUL` / `*`
    Multiply,

    /// `DIV` / `/`
    Divide,
}

impl Operation {
    /// All operations, in keyword order.
    pub const ALL: [Operation; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the upper-case prefix keyword.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Subtract => "SUB",
            Self::Multiply => "MUL",
            Self::Divide => "DIV",
        }
    }

    /// Returns the infix symbol.
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Parses a prefix keyword, ignoring ASCII case.
    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| word.eq_ignore_ascii_case(op.keyword()))
    }

    /// Parses an infix symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Applies the operation with IEEE-754 double semantics.
    ///
    /// No domain checks happen here; see [`crate::Request::evaluate`].
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => a / b,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_parsing_ignores_case() {
        assert_eq!(Operation::from_keyword("add"), Some(Operation::Add));
        assert_eq!(Operation::from_keyword("Sub"), Some(Operation::Subtract));
        assert_eq!(Operation::from_keyword("mUL"), Some(Operation::Multiply));
        assert_eq!(Operation::from_keyword("DIV"), Some(Operation::Divide));
        assert_eq!(Operation::from_keyword("MOD"), None);
        assert_eq!(Operation::from_keyword(""), None);
    }

    #[test]
    fn test_symbol_parsing() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_symbol(op.symbol()), Some(op));
            assert_eq!(Operation::from_keyword(op.keyword()), Some(op));
        }
        assert_eq!(Operation::from_symbol('+'), Some(Operation::Add));
        assert_eq!(Operation::from_symbol('/'), Some(Operation::Divide));
        assert_eq!(Operation::from_symbol('%'), None);
        assert_eq!(Operation::from_symbol('x'), None);
    }

    #[test]
    fn test_apply() {
        assert_eq!(Operation::Add.apply(2.0, 3.0), 5.0);
        assert_eq!(Operation::Subtract.apply(2.0, 3.0), -1.0);
        assert_eq!(Operation::Multiply.apply(2.5, 4.0), 10.0);
        assert_eq!(Operation::Divide.apply(10.0, 4.0), 2.5);
    }

    #[test]
    fn test_apply_divide_by_zero_is_ieee() {
        // Domain check belongs to Request::evaluate, apply is plain IEEE
        assert!(Operation::Divide.apply(1.0, 0.0).is_infinite());
    }

    #[test]
    fn test_display_uses_keyword() {
        assert_eq!(Operation::Multiply.to_string(), "MUL");
    }
}
