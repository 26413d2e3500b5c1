//! Range formulas: syntax tree, parser, normal form and matching

mod ast;
mod lexer;
mod normalize;
mod operator;
mod parser;
mod pattern;
mod satisfy;

pub use ast::{Clause, Formula, Range, SpecOperator};
pub use normalize::{normalize, Comparator, Normalized};
pub use operator::Operator;
pub use parser::parse;
pub use pattern::{Pattern, VersionOrPattern};
pub use satisfy::satisfies;
