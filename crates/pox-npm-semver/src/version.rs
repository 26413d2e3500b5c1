//! Semantic version model: parsing, ordering and derived versions

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::SyntaxError;

lazy_static! {
    // [v]MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]
    static ref VERSION_RE: Regex = Regex::new(
        r"^[vV]?(\d+)\.(\d+)\.(\d+)(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$"
    ).unwrap();
}

/// One dot-separated part of a prerelease or build list
///
/// Variant order matters: numeric identifiers always sort before alphanumeric ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Identifier {
    Numeric(u64),
    Alphanumeric(String),
}

impl Identifier {
    fn parse_prerelease(part: &str, input: &str) -> Result<Self, SyntaxError> {
        if part.bytes().all(|b| b.is_ascii_digit()) {
            part.parse::<u64>()
                .map(Identifier::Numeric)
                .map_err(|_| SyntaxError::version(input, format!("prerelease identifier \"{}\" is too large", part)))
        } else {
            Ok(Identifier::Alphanumeric(part.to_string()))
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{}", n),
            Identifier::Alphanumeric(s) => f.write_str(s),
        }
    }
}

impl From<u64> for Identifier {
    fn from(n: u64) -> Self {
        Identifier::Numeric(n)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Identifier::Alphanumeric(s.to_string())
    }
}

/// A semantic version: `major.minor.patch[-prerelease][+build]`
///
/// Build metadata is carried for display only. Equality, hashing and ordering
/// all ignore it, so `1.2.3+a == 1.2.3+b`.
#[derive(Debug, Clone)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    prerelease: Vec<Identifier>,
    build: Vec<Identifier>,
}

impl Version {
    /// Create a release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: Vec::new(),
            build: Vec::new(),
        }
    }

    /// Version 0.0.0
    pub fn zero() -> Self {
        Self::new(0, 0, 0)
    }

    /// Return this version with the given prerelease identifiers
    ///
    /// Fails for identifiers the parser would read back differently: empty or
    /// non `[0-9A-Za-z-]` text, and all-digit text that is not `Numeric`.
    pub fn with_prerelease(mut self, prerelease: Vec<Identifier>) -> Result<Self, SyntaxError> {
        for id in &prerelease {
            if let Identifier::Alphanumeric(text) = id {
                check_identifier_text(text)?;
                if text.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(SyntaxError::version(text, "all-digit prerelease identifier must be numeric"));
                }
            }
        }
        self.prerelease = prerelease;
        Ok(self)
    }

    /// Return this version with the given build identifiers
    ///
    /// Build identifiers are textual, so `Numeric` ones are rejected along
    /// with text the parser does not accept.
    pub fn with_build(mut self, build: Vec<Identifier>) -> Result<Self, SyntaxError> {
        for id in &build {
            match id {
                Identifier::Alphanumeric(text) => check_identifier_text(text)?,
                Identifier::Numeric(n) => {
                    return Err(SyntaxError::version(&n.to_string(), "build identifiers are textual"));
                }
            }
        }
        self.build = build;
        Ok(self)
    }

    /// Parse `[v]MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`
    pub fn parse(input: &str) -> Result<Self, SyntaxError> {
        let text = input.trim();
        let caps = VERSION_RE
            .captures(text)
            .ok_or_else(|| SyntaxError::version(input, "expected MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]"))?;

        let component = |i: usize| -> Result<u64, SyntaxError> {
            let digits = &caps[i];
            digits
                .parse::<u64>()
                .map_err(|_| SyntaxError::version(input, format!("component \"{}\" is too large", digits)))
        };

        let prerelease = match caps.get(4) {
            Some(m) => m
                .as_str()
                .split('.')
                .map(|part| Identifier::parse_prerelease(part, input))
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        // Build identifiers are opaque, even when they look numeric.
        let build = match caps.get(5) {
            Some(m) => m.as_str().split('.').map(Identifier::from).collect(),
            None => Vec::new(),
        };

        Ok(Version {
            major: component(1)?,
            minor: component(2)?,
            patch: component(3)?,
            prerelease,
            build,
        })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn prerelease(&self) -> &[Identifier] {
        &self.prerelease
    }

    pub fn build(&self) -> &[Identifier] {
        &self.build
    }

    /// `(major, minor, patch)` triple
    pub fn triple(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }

    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }

    pub fn strip_build(&self) -> Self {
        Version {
            build: Vec::new(),
            ..self.clone()
        }
    }

    pub fn strip_prerelease(&self) -> Self {
        Version {
            prerelease: Vec::new(),
            ..self.clone()
        }
    }

    /// Next patch release; prerelease and build are dropped
    ///
    /// A patch of `u64::MAX` carries into the minor component. Returns `None`
    /// when no release follows the current patch line.
    pub fn next_patch(&self) -> Option<Self> {
        match self.patch.checked_add(1) {
            Some(patch) => Some(Self::new(self.major, self.minor, patch)),
            None => self.next_minor(),
        }
    }

    /// Next minor release; patch, prerelease and build are reset
    ///
    /// Carries into the major component like [`Version::next_patch`].
    pub fn next_minor(&self) -> Option<Self> {
        match self.minor.checked_add(1) {
            Some(minor) => Some(Self::new(self.major, minor, 0)),
            None => self.next_major(),
        }
    }

    /// Next major release; minor, patch, prerelease and build are reset
    ///
    /// `None` for major `u64::MAX`, which has no successor.
    pub fn next_major(&self) -> Option<Self> {
        self.major.checked_add(1).map(|major| Self::new(major, 0, 0))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.triple().hash(state);
        self.prerelease.hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.triple()
            .cmp(&other.triple())
            .then_with(|| match (self.prerelease.is_empty(), other.prerelease.is_empty()) {
                (true, true) => Ordering::Equal,
                // A release sorts after all of its prereleases.
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                // Slice ordering: element-wise, then shorter prefix first.
                (false, false) => self.prerelease.cmp(&other.prerelease),
            })
    }
}

fn check_identifier_text(text: &str) -> Result<(), SyntaxError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
        return Err(SyntaxError::version(text, "identifiers are non-empty runs of [0-9A-Za-z-]"));
    }
    Ok(())
}

fn write_identifiers(f: &mut fmt::Formatter<'_>, ids: &[Identifier]) -> fmt::Result {
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            f.write_str(".")?;
        }
        write!(f, "{}", id)?;
    }
    Ok(())
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.prerelease.is_empty() {
            f.write_str("-")?;
            write_identifiers(f, &self.prerelease)?;
        }
        if !self.build.is_empty() {
            f.write_str("+")?;
            write_identifiers(f, &self.build)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl From<(u64, u64, u64)> for Version {
    fn from((major, minor, patch): (u64, u64, u64)) -> Self {
        Version::new(major, minor, patch)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Version {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Version {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Version::parse(&s).map_err(serde::de::Error::custom)
    }
}
