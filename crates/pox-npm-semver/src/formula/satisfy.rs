//! Satisfaction check of a version against a formula

use super::ast::Formula;
use super::normalize::{normalize, Comparator, Normalized};
use crate::version::Version;

impl Normalized {
    /// Check `version` against the normalized formula
    ///
    /// A prerelease only matches a conjunction that names a prerelease of the
    /// same `major.minor.patch`; otherwise `1.2.3-alpha` would slip into ranges
    /// such as `<1.2.3` or `^1.0.0`.
    pub fn matches(&self, version: &Version) -> bool {
        let candidate = version.strip_build();
        self.conjunctions()
            .iter()
            .any(|conjunction| conjunction_matches(conjunction, &candidate))
    }
}

fn conjunction_matches(conjunction: &[Comparator], candidate: &Version) -> bool {
    if candidate.is_prerelease() {
        let admits_prerelease = conjunction.iter().any(|comparator| {
            comparator.version().is_prerelease() && comparator.version().triple() == candidate.triple()
        });
        if !admits_prerelease {
            return false;
        }
    }
    conjunction.iter().all(|comparator| comparator.accepts(candidate))
}

/// Whether `version` satisfies `formula`
pub fn satisfies(formula: &Formula, version: &Version) -> bool {
    normalize(formula).matches(version)
}
