//! Syntax tree of a range formula and its canonical printer

use std::fmt;
use std::str::FromStr;

use super::operator::Operator;
use super::pattern::{Pattern, VersionOrPattern};
use crate::error::SyntaxError;

/// Shorthand operators that expand to a pair of bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecOperator {
    /// `~`: same minor
    Tilde,
    /// `^`: same leftmost non-zero component
    Caret,
}

impl SpecOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecOperator::Tilde => "~",
            SpecOperator::Caret => "^",
        }
    }
}

/// One atomic constraint of a range
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Clause {
    /// Bare version or pattern: `1.2.3`, `1.x`
    Patt(VersionOrPattern),
    /// `~1.2.3`, `^1.2`
    Spec(SpecOperator, VersionOrPattern),
    /// `>=1.2.3`
    Expr(Operator, VersionOrPattern),
}

/// Conjunction of clauses, or an inclusive hyphen range
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Range {
    Simple(Vec<Clause>),
    Hyphen(VersionOrPattern, VersionOrPattern),
}

/// Disjunction of ranges, the result of parsing a range expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Formula {
    ranges: Vec<Range>,
}

impl Formula {
    /// Build a formula from its `||`-separated ranges
    pub fn new(ranges: Vec<Range>) -> Self {
        Formula { ranges }
    }

    /// The formula of an empty expression, matching any release
    pub fn any() -> Self {
        Formula::new(vec![Range::Simple(vec![Clause::Patt(VersionOrPattern::Pattern(Pattern::Any))])])
    }

    pub fn parse(input: &str) -> Result<Self, SyntaxError> {
        super::parser::parse(input)
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Patt(operand) => write!(f, "{}", operand),
            Clause::Spec(spec, operand) => write!(f, "{}{}", spec.as_str(), operand),
            // A bare pattern would reparse as an x-range, so keep the `=`.
            Clause::Expr(Operator::Equal, operand @ VersionOrPattern::Pattern(_)) => write!(f, "={}", operand),
            Clause::Expr(op, operand) => write!(f, "{}{}", op, operand),
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Range::Simple(clauses) => {
                for (i, clause) in clauses.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", clause)?;
                }
                Ok(())
            }
            Range::Hyphen(from, to) => write!(f, "{} - {}", from, to),
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(" || ")?;
            }
            write!(f, "{}", range)?;
        }
        Ok(())
    }
}

impl FromStr for Formula {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Formula::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Formula {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Formula {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Formula::parse(&s).map_err(serde::de::Error::custom)
    }
}
