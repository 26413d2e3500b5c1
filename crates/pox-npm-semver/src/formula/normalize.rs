//! Desugaring of a formula into disjunctive normal form
//!
//! Every range of a formula becomes one conjunction of plain comparators.
//! Caret, tilde, hyphen and x-range sugar are all expanded here, so the
//! satisfaction check only ever sees `(operator, version)` pairs.

use std::fmt;

use super::ast::{Clause, Formula, Range, SpecOperator};
use super::operator::Operator;
use super::pattern::{Pattern, VersionOrPattern};
use crate::version::Version;

/// A single `(operator, version)` bound
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comparator {
    operator: Operator,
    version: Version,
}

impl Comparator {
    /// Create a comparator; build metadata on `version` is dropped
    pub fn new(operator: Operator, version: Version) -> Self {
        Comparator {
            operator,
            version: version.strip_build(),
        }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Whether `candidate` lies on the accepted side of this bound
    pub fn accepts(&self, candidate: &Version) -> bool {
        self.operator.accepts(candidate.cmp(&self.version))
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}

/// A formula in disjunctive normal form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Normalized {
    conjunctions: Vec<Vec<Comparator>>,
}

impl Normalized {
    /// The `||`-joined conjunctions; an empty conjunction has no bounds
    pub fn conjunctions(&self) -> &[Vec<Comparator>] {
        &self.conjunctions
    }
}

impl fmt::Display for Normalized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, conjunction) in self.conjunctions.iter().enumerate() {
            if i > 0 {
                f.write_str(" || ")?;
            }
            if conjunction.is_empty() {
                f.write_str("*")?;
                continue;
            }
            for (j, comparator) in conjunction.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", comparator)?;
            }
        }
        Ok(())
    }
}

/// Expand every range of `formula` into a conjunction of comparators
pub fn normalize(formula: &Formula) -> Normalized {
    let conjunctions = formula.ranges().iter().map(expand_range).collect();
    let normalized = Normalized { conjunctions };
    log::trace!("Normalized {} into {}", formula, normalized);
    normalized
}

fn expand_range(range: &Range) -> Vec<Comparator> {
    match range {
        Range::Hyphen(from, to) => {
            let mut bounds = Vec::with_capacity(2);
            if !from.is_any() {
                bounds.push(Comparator::new(Operator::GreaterThanOrEqual, from.floor()));
            }
            match to {
                VersionOrPattern::Version(version) => {
                    bounds.push(Comparator::new(Operator::LessThanOrEqual, version.clone()));
                }
                VersionOrPattern::Pattern(pattern) => {
                    if let Some(next) = pattern.next_after() {
                        bounds.push(Comparator::new(Operator::LessThan, next));
                    }
                }
            }
            bounds
        }
        Range::Simple(clauses) => {
            let mut bounds = Vec::with_capacity(clauses.len() * 2);
            for clause in clauses {
                expand_clause(clause, &mut bounds);
            }
            bounds
        }
    }
}

fn expand_clause(clause: &Clause, out: &mut Vec<Comparator>) {
    use Operator::*;

    match clause {
        Clause::Expr(op, VersionOrPattern::Version(version)) => {
            out.push(Comparator::new(*op, version.clone()));
        }
        Clause::Expr(op, VersionOrPattern::Pattern(pattern)) => match (op, pattern) {
            // `>1.2` means past the whole pattern. `>*`, and any pattern with no
            // successor, can never match, same as `<*`.
            (GreaterThan, pattern) => match pattern.next_after() {
                Some(next) => out.push(Comparator::new(GreaterThanOrEqual, next)),
                None => out.push(Comparator::new(LessThan, Version::zero())),
            },
            (Equal | LessThan | LessThanOrEqual | GreaterThanOrEqual, pattern) => {
                out.push(Comparator::new(*op, pattern.floor()));
            }
        },
        Clause::Patt(VersionOrPattern::Version(version)) => {
            out.push(Comparator::new(Equal, version.clone()));
        }
        Clause::Patt(VersionOrPattern::Pattern(pattern)) => {
            push_bounds(out, pattern.floor(), pattern.next_after());
        }
        Clause::Spec(SpecOperator::Tilde, operand) => {
            let floor = operand.floor();
            let upper = floor.next_minor();
            push_bounds(out, floor, upper);
        }
        Clause::Spec(SpecOperator::Caret, VersionOrPattern::Version(version)) => {
            let floor = version.strip_build();
            let upper = match (floor.major(), floor.minor()) {
                (0, 0) => floor.next_patch(),
                (0, _) => floor.next_minor(),
                _ => floor.next_major(),
            };
            push_bounds(out, floor, upper);
        }
        Clause::Spec(SpecOperator::Caret, VersionOrPattern::Pattern(pattern)) => {
            let floor = pattern.floor();
            let upper = match pattern {
                Pattern::Any => None,
                Pattern::Major(_) => floor.next_major(),
                Pattern::Minor(0, _) => floor.next_minor(),
                Pattern::Minor(_, _) => floor.next_major(),
            };
            push_bounds(out, floor, upper);
        }
    }
}

/// `>=floor <upper`; without an upper bound everything from `floor` up is in range
fn push_bounds(out: &mut Vec<Comparator>, floor: Version, upper: Option<Version>) {
    out.push(Comparator::new(Operator::GreaterThanOrEqual, floor));
    if let Some(upper) = upper {
        out.push(Comparator::new(Operator::LessThan, upper));
    }
}
