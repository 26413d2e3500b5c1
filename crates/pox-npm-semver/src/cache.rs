//! Pre-parsed formulas and a shared cache keyed by formula text

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::SyntaxError;
use crate::formula::{normalize, Formula, Normalized};
use crate::version::Version;

/// A formula together with its normal form, for repeated checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFormula {
    formula: Formula,
    normalized: Normalized,
}

impl ParsedFormula {
    pub fn new(formula: Formula) -> Self {
        let normalized = normalize(&formula);
        ParsedFormula { formula, normalized }
    }

    pub fn parse(input: &str) -> Result<Self, SyntaxError> {
        Formula::parse(input).map(Self::new)
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn normalized(&self) -> &Normalized {
        &self.normalized
    }

    /// Check a version without normalizing again
    pub fn satisfies(&self, version: &Version) -> bool {
        self.normalized.matches(version)
    }
}

impl FromStr for ParsedFormula {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParsedFormula::parse(s)
    }
}

/// Thread-safe cache of parsed formulas
///
/// Each distinct text is parsed and normalized at most once; concurrent
/// callers asking for the same text wait for the first one to finish.
/// Texts that fail to parse are not cached.
#[derive(Debug, Default)]
pub struct FormulaCache {
    entries: Mutex<HashMap<String, Arc<ParsedFormula>>>,
}

impl FormulaCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Arc<ParsedFormula>>> {
        // Entries are only ever inserted whole, so a poisoned map is still consistent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get the parsed form of `text`, parsing it on first use
    pub fn get(&self, text: &str) -> Result<Arc<ParsedFormula>, SyntaxError> {
        let mut entries = self.entries();
        if let Some(parsed) = entries.get(text) {
            return Ok(Arc::clone(parsed));
        }

        log::debug!("Formula cache miss for {:?}", text);
        let parsed = Arc::new(ParsedFormula::parse(text)?);
        entries.insert(text.to_string(), Arc::clone(&parsed));
        Ok(parsed)
    }

    /// Parse (or reuse) `text` and check `version` against it
    pub fn satisfies(&self, text: &str, version: &Version) -> Result<bool, SyntaxError> {
        Ok(self.get(text)?.satisfies(version))
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn clear(&self) {
        self.entries().clear();
    }
}
