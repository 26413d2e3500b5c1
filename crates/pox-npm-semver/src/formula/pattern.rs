//! Partial versions (x-ranges) and the version-or-pattern operand

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::SyntaxError;
use crate::version::Version;

lazy_static! {
    // Up to three components, each numeric or a wildcard
    static ref PARTIAL_RE: Regex = Regex::new(
        r"^[vV]?(\d+|[xX*])(?:\.(\d+|[xX*]))?(?:\.(\d+|[xX*]))?$"
    ).unwrap();
}

/// A version with trailing components elided or wildcarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// `*`, `x`, `X`
    Any,
    /// `1`, `1.x`, `1.x.x`
    Major(u64),
    /// `1.2`, `1.2.x`
    Minor(u64, u64),
}

impl Pattern {
    /// Lowest version the pattern covers
    pub fn floor(&self) -> Version {
        match *self {
            Pattern::Any => Version::zero(),
            Pattern::Major(major) => Version::new(major, 0, 0),
            Pattern::Minor(major, minor) => Version::new(major, minor, 0),
        }
    }

    /// First release past the pattern, `None` for `*` or when nothing follows it
    pub fn next_after(&self) -> Option<Version> {
        match *self {
            Pattern::Any => None,
            Pattern::Major(_) => self.floor().next_major(),
            Pattern::Minor(..) => self.floor().next_minor(),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Any => f.write_str("*"),
            Pattern::Major(major) => write!(f, "{}.x.x", major),
            Pattern::Minor(major, minor) => write!(f, "{}.{}.x", major, minor),
        }
    }
}

/// Operand of a clause: a concrete version or a pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionOrPattern {
    Version(Version),
    Pattern(Pattern),
}

impl VersionOrPattern {
    /// Parse a single version or pattern word such as `1.2.3-rc.1`, `v1.x` or `*`
    pub fn parse(word: &str) -> Result<Self, SyntaxError> {
        let Some(caps) = PARTIAL_RE.captures(word) else {
            return Version::parse(word).map(VersionOrPattern::Version);
        };

        let mut components = Vec::with_capacity(3);
        for i in 1..=3 {
            let Some(m) = caps.get(i) else { break };
            let component = match m.as_str() {
                "x" | "X" | "*" => None,
                digits => Some(
                    digits
                        .parse::<u64>()
                        .map_err(|_| SyntaxError::version(word, format!("component \"{}\" is too large", digits)))?,
                ),
            };
            components.push(component);
        }

        // Once a component is wildcarded, everything after it must be too.
        if let Some(first_wild) = components.iter().position(Option::is_none) {
            if components[first_wild..].iter().any(Option::is_some) {
                return Err(SyntaxError::version(word, "numeric component after a wildcard"));
            }
        }

        let parsed = match components.as_slice() {
            [Some(major), Some(minor), Some(patch)] => {
                VersionOrPattern::Version(Version::new(*major, *minor, *patch))
            }
            [Some(major), Some(minor), ..] => VersionOrPattern::Pattern(Pattern::Minor(*major, *minor)),
            [Some(major), ..] => VersionOrPattern::Pattern(Pattern::Major(*major)),
            _ => VersionOrPattern::Pattern(Pattern::Any),
        };
        Ok(parsed)
    }

    /// Floor of a pattern, or the version itself without build metadata
    pub fn floor(&self) -> Version {
        match self {
            VersionOrPattern::Version(version) => version.strip_build(),
            VersionOrPattern::Pattern(pattern) => pattern.floor(),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, VersionOrPattern::Pattern(Pattern::Any))
    }
}

impl From<Version> for VersionOrPattern {
    fn from(version: Version) -> Self {
        VersionOrPattern::Version(version)
    }
}

impl From<Pattern> for VersionOrPattern {
    fn from(pattern: Pattern) -> Self {
        VersionOrPattern::Pattern(pattern)
    }
}

impl fmt::Display for VersionOrPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionOrPattern::Version(version) => write!(f, "{}", version),
            VersionOrPattern::Pattern(pattern) => write!(f, "{}", pattern),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(word: &str) -> VersionOrPattern {
        VersionOrPattern::parse(word).unwrap()
    }

    #[test]
    fn test_parse_patterns() {
        assert_eq!(parse("*"), VersionOrPattern::Pattern(Pattern::Any));
        assert_eq!(parse("x"), VersionOrPattern::Pattern(Pattern::Any));
        assert_eq!(parse("X.x.*"), VersionOrPattern::Pattern(Pattern::Any));
        assert_eq!(parse("1"), VersionOrPattern::Pattern(Pattern::Major(1)));
        assert_eq!(parse("v1.x"), VersionOrPattern::Pattern(Pattern::Major(1)));
        assert_eq!(parse("1.*.*"), VersionOrPattern::Pattern(Pattern::Major(1)));
        assert_eq!(parse("1.2"), VersionOrPattern::Pattern(Pattern::Minor(1, 2)));
        assert_eq!(parse("1.2.X"), VersionOrPattern::Pattern(Pattern::Minor(1, 2)));
    }

    #[test]
    fn test_parse_versions() {
        assert_eq!(parse("1.2.3"), VersionOrPattern::Version(Version::new(1, 2, 3)));
        let VersionOrPattern::Version(version) = parse("v1.2.3-beta.2+exp") else {
            panic!("expected a version");
        };
        assert_eq!(version.to_string(), "1.2.3-beta.2+exp");
    }

    #[test]
    fn test_parse_fails() {
        for word in ["1.x.3", "*.2", "1..2", "1.2.x-alpha", "1.2-beta", "1.2.3.4", "a", "x1"] {
            assert!(VersionOrPattern::parse(word).is_err(), "{}", word);
        }
    }

    #[test]
    fn test_floor_and_next() {
        assert_eq!(Pattern::Any.floor(), Version::zero());
        assert_eq!(Pattern::Any.next_after(), None);
        assert_eq!(Pattern::Major(1).floor(), Version::new(1, 0, 0));
        assert_eq!(Pattern::Major(1).next_after(), Some(Version::new(2, 0, 0)));
        assert_eq!(Pattern::Minor(1, 2).floor(), Version::new(1, 2, 0));
        assert_eq!(Pattern::Minor(1, 2).next_after(), Some(Version::new(1, 3, 0)));
        assert_eq!(Pattern::Minor(1, u64::MAX).next_after(), Some(Version::new(2, 0, 0)));
        assert_eq!(Pattern::Minor(u64::MAX, u64::MAX).next_after(), None);
        assert_eq!(Pattern::Major(u64::MAX).next_after(), None);

        let with_build = parse("1.2.3+meta").floor();
        assert!(with_build.build().is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(Pattern::Any.to_string(), "*");
        assert_eq!(Pattern::Major(3).to_string(), "3.x.x");
        assert_eq!(Pattern::Minor(3, 4).to_string(), "3.4.x");
    }
}
