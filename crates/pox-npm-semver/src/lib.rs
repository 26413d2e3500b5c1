//! npm-style semantic version ranges
//!
//! This crate parses range expressions such as `^1.2.3`, `~1.2`, `>=1.0.0 <2.0.0`,
//! `1.x` or `1.2.3 - 2.0.0`, rewrites them into a list of plain comparator
//! conjunctions and checks concrete versions against them, including npm's rule
//! that prereleases only match ranges naming a prerelease of the same release.

mod cache;
mod error;
pub mod formula;
mod semver;
mod version;

pub use cache::{FormulaCache, ParsedFormula};
pub use error::SyntaxError;
pub use formula::{
    Clause, Comparator, Formula, Normalized, Operator, Pattern, Range, SpecOperator, VersionOrPattern,
};
pub use semver::Semver;
pub use version::{Identifier, Version};

/// Parse `[v]MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`
pub fn parse_version(text: &str) -> Result<Version, SyntaxError> {
    Version::parse(text)
}

/// Parse a range formula; empty input matches any release
pub fn parse_formula(text: &str) -> Result<Formula, SyntaxError> {
    formula::parse(text)
}

pub fn print_version(version: &Version) -> String {
    version.to_string()
}

pub fn print_formula(formula: &Formula) -> String {
    formula.to_string()
}

/// Rewrite a formula into disjunctive normal form
pub fn normalize(formula: &Formula) -> Normalized {
    formula::normalize(formula)
}

/// Whether `version` satisfies `formula`
pub fn satisfies(formula: &Formula, version: &Version) -> bool {
    formula::satisfies(formula, version)
}
