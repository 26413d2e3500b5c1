//! Semver facade providing string-level version operations

use crate::cache::ParsedFormula;
use crate::error::SyntaxError;
use crate::version::Version;

/// Main facade for semantic versioning operations on raw strings
pub struct Semver;

impl Semver {
    /// Check if a version satisfies a formula; unparsable input never satisfies
    pub fn satisfies(version: &str, formula: &str) -> bool {
        let Ok(version) = Version::parse(version) else {
            return false;
        };
        match ParsedFormula::parse(formula) {
            Ok(parsed) => parsed.satisfies(&version),
            Err(_) => false,
        }
    }

    /// Return all versions that satisfy the formula, in their original order
    pub fn satisfied_by(versions: &[&str], formula: &str) -> Vec<String> {
        let Ok(parsed) = ParsedFormula::parse(formula) else {
            return Vec::new();
        };

        versions
            .iter()
            .filter(|v| Version::parse(v).map_or(false, |version| parsed.satisfies(&version)))
            .map(|v| v.to_string())
            .collect()
    }

    /// Parse a formula and return a reusable representation.
    pub fn parse_formula(formula: &str) -> Result<ParsedFormula, SyntaxError> {
        ParsedFormula::parse(formula)
    }

    /// Check a version against a pre-parsed formula.
    pub fn satisfies_parsed(version: &str, formula: &ParsedFormula) -> bool {
        Version::parse(version).map_or(false, |version| formula.satisfies(&version))
    }

    /// Sort versions in ascending order, dropping invalid ones
    pub fn sort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, true)
    }

    /// Sort versions in descending order, dropping invalid ones
    pub fn rsort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, false)
    }

    fn usort(versions: &[&str], ascending: bool) -> Vec<String> {
        let mut parsed: Vec<(Version, usize)> = versions
            .iter()
            .enumerate()
            .filter_map(|(i, v)| Some((Version::parse(v).ok()?, i)))
            .collect();

        // Stable sort: versions equal up to build metadata keep their input order.
        parsed.sort_by(|(a, _), (b, _)| if ascending { a.cmp(b) } else { b.cmp(a) });

        parsed.into_iter().map(|(_, i)| versions[i].to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_satisfies_positive() {
        // Hyphen ranges
        assert!(Semver::satisfies("1.2.3", "1.0.0 - 2.0.0"));
        assert!(Semver::satisfies("2.0.0", "1.2.3 - 2.0.0"));
        assert!(Semver::satisfies("1.2.3", "1.2.3+asdf - 2.4.3+asdf"));
        assert!(Semver::satisfies("2.3.9", "1.2 - 2.3"));

        // Caret with build metadata
        assert!(Semver::satisfies("1.2.3", "^1.2.3+build"));
        assert!(Semver::satisfies("1.3.0", "^1.2.3+build"));

        // Basic constraints
        assert!(Semver::satisfies("1.0.0", "1.0.0"));
        assert!(Semver::satisfies("1.2.3", "*"));
        assert!(Semver::satisfies("v1.2.3", "*"));
        assert!(Semver::satisfies("1.2.3", ""));

        // Greater than/less than
        assert!(Semver::satisfies("1.0.0", ">=1.0.0"));
        assert!(Semver::satisfies("1.0.1", ">1.0.0"));
        assert!(Semver::satisfies("2.0.0", "<=2.0.0"));
        assert!(Semver::satisfies("1.9999.9999", "<2.0.0"));
        assert!(Semver::satisfies("0.2.9", "<2.0.0"));

        // With spaces
        assert!(Semver::satisfies("1.0.0", ">= 1.0.0"));
        assert!(Semver::satisfies("1.1.0", ">=   1.0.0"));
        assert!(Semver::satisfies("1.9999.9999", "<    2.0.0"));

        // Version with v prefix
        assert!(Semver::satisfies("v0.1.97", ">=0.1.97"));
        assert!(Semver::satisfies("0.1.97", ">=v0.1.97"));

        // Or constraints
        assert!(Semver::satisfies("1.2.4", "0.1.20 || 1.2.4"));
        assert!(Semver::satisfies("0.2.4", ">=0.2.3 || <0.0.1"));

        // Wildcard
        assert!(Semver::satisfies("2.1.3", "2.x.x"));
        assert!(Semver::satisfies("1.2.3", "1.2.x"));
        assert!(Semver::satisfies("2.1.3", "1.2.x || 2.x"));
        assert!(Semver::satisfies("1.2.3", "x"));
        assert!(Semver::satisfies("2.1.3", "2.*.*"));
        assert!(Semver::satisfies("1.2.3", "1.2.* || 2.*"));

        // Tilde
        assert!(Semver::satisfies("2.4.5", "~2.4"));
        assert!(Semver::satisfies("1.2.9", "~1.2.3"));

        // Simple version checks
        assert!(Semver::satisfies("1.0.0", ">=1"));
        assert!(Semver::satisfies("1.3.0", ">1.2"));
        assert!(Semver::satisfies("1.1.1", "<1.2"));

        // Combined constraints
        assert!(Semver::satisfies("1.2.3", "~1.2.1 >=1.2.3"));
        assert!(Semver::satisfies("1.2.3", "~1.2.1 =1.2.3"));
        assert!(Semver::satisfies("1.2.3", "~1.2.1 1.2.3"));
        assert!(Semver::satisfies("1.2.3", ">=1.2.1 1.2.3"));
        assert!(Semver::satisfies("1.2.8", ">=1.2"));

        // Caret
        assert!(Semver::satisfies("1.8.1", "^1.2.3"));
        assert!(Semver::satisfies("0.1.2", "^0.1.2"));
        assert!(Semver::satisfies("0.1.2", "^0.1"));
        assert!(Semver::satisfies("1.4.2", "^1.2"));
        assert!(Semver::satisfies("1.4.2", "^1.2 ^1"));
        assert!(Semver::satisfies("0.0.1-beta", "^0.0.1-alpha"));
    }

    #[test]
    fn test_satisfies_negative() {
        // Hyphen ranges
        assert!(!Semver::satisfies("2.2.3", "1.0.0 - 2.0.0"));
        assert!(!Semver::satisfies("2.0.1", "1.2.3 - 2.0.0"));

        // Caret with build metadata
        assert!(!Semver::satisfies("2.0.0", "^1.2.3+build"));
        assert!(!Semver::satisfies("1.2.0", "^1.2.3+build"));

        // Exact version mismatch
        assert!(!Semver::satisfies("1.0.1", "1.0.0"));

        // Greater than/less than failures
        assert!(!Semver::satisfies("0.1.0", ">=1.0.0"));
        assert!(!Semver::satisfies("1.0.0", ">1.0.0"));
        assert!(!Semver::satisfies("2.2.9", "<=2.0.0"));
        assert!(!Semver::satisfies("2.0.0", "<2.0.0"));
        assert!(!Semver::satisfies("1.2.9", ">1.2"));

        // Wildcard
        assert!(!Semver::satisfies("1.1.3", "2.x.x"));
        assert!(!Semver::satisfies("1.3.3", "1.2.x"));
        assert!(!Semver::satisfies("3.1.3", "1.2.* || 2.*"));

        // Exact major/minor mismatch
        assert!(!Semver::satisfies("1.1.2", "2"));
        assert!(!Semver::satisfies("2.4.1", "2.3"));

        // Tilde
        assert!(!Semver::satisfies("2.5.0", "~2.4"));
        assert!(!Semver::satisfies("1.3.0", "~1.2.3"));

        // Prereleases
        assert!(!Semver::satisfies("1.2.3-beta", "<1.2.3"));
        assert!(!Semver::satisfies("2.0.0-alpha", "^1.2.3"));
        assert!(!Semver::satisfies("1.2.3-alpha", "1.2.3"));
        assert!(!Semver::satisfies("0.5.4-alpha", "~v0.5.4-beta"));

        // Caret
        assert!(!Semver::satisfies("1.2.2", "^1.2.3"));
        assert!(!Semver::satisfies("0.3.0", "^0.2.3"));
        assert!(!Semver::satisfies("1.1.9", "^1.2"));

        // Invalid input
        assert!(!Semver::satisfies("1.2", "*"));
        assert!(!Semver::satisfies("1.2.3", ">> 1.0.0"));
    }

    #[test]
    fn test_satisfied_by() {
        let versions = vec!["1.0.0", "1.2.0", "1.9999.9999", "2.0.0", "2.1.0", "0.9999.9999"];
        let result = Semver::satisfied_by(&versions, "1.x");
        assert_eq!(result, vec!["1.0.0", "1.2.0", "1.9999.9999"]);

        let versions2 = vec!["1.0.0", "1.1.0", "2.9999.9999", "3.0.0", "3.1.0", "4.0.0", "not-a-version"];
        let result2 = Semver::satisfied_by(&versions2, ">1.0.0 <3.0.0 || >=4.0.0");
        assert_eq!(result2, vec!["1.1.0", "2.9999.9999", "4.0.0"]);

        let versions3 = vec!["0.1.1", "0.1.9999", "0.2.0", "0.2.1", "0.3.0"];
        let result3 = Semver::satisfied_by(&versions3, "^0.2.0");
        assert_eq!(result3, vec!["0.2.0", "0.2.1"]);

        assert!(Semver::satisfied_by(&versions3, "1..2").is_empty());
    }

    #[test]
    fn test_sort() {
        let versions = vec!["1.0.0", "0.1.0", "0.1.0", "3.2.1", "2.4.0-alpha", "2.4.0", "bogus"];
        let sorted = Semver::sort(&versions);
        assert_eq!(sorted, vec!["0.1.0", "0.1.0", "1.0.0", "2.4.0-alpha", "2.4.0", "3.2.1"]);
    }

    #[test]
    fn test_rsort() {
        let versions = vec!["1.0.0", "0.1.0", "0.1.0", "3.2.1", "2.4.0-alpha", "2.4.0"];
        let rsorted = Semver::rsort(&versions);
        assert_eq!(rsorted, vec!["3.2.1", "2.4.0", "2.4.0-alpha", "1.0.0", "0.1.0", "0.1.0"]);
    }

    #[test]
    fn test_parsed_formula_reuse() {
        let parsed = Semver::parse_formula("^1.2").unwrap();
        assert!(Semver::satisfies_parsed("1.2.3", &parsed));
        assert!(Semver::satisfies_parsed("1.9.0", &parsed));
        assert!(!Semver::satisfies_parsed("2.0.0", &parsed));
        assert!(!Semver::satisfies_parsed("garbage", &parsed));
    }
}
