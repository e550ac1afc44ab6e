use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::errors::{KinshipError, Result};
use crate::types::CombinedCode;

/// Term returned for a combined code that has no table entry.
pub const DEFAULT_FALLBACK_TERM: &str = "distant relative";

/// Term returned for a self query when the table has no `":"` entry.
pub const DEFAULT_SELF_TERM: &str = "self";

const BUILTIN_TABLE: &str = include_str!("../data/relationships.json");

/// Maps combined path codes to gender-specific kinship terms.
///
/// Keys have the form `"<steps>:<steps>"`, for example `"P:PP"`. Each entry
/// maps a gender category to the term for a first person of that gender.
/// The table is only ever read.
#[derive(Debug, Clone, PartialEq)]
pub struct TermTable {
    entries: HashMap<String, HashMap<String, String>>,
    fallback: String,
    self_term: String,
}

impl TermTable {
    /// Creates a table from raw entries with the default fallback and self
    /// terms.
    pub fn new(entries: HashMap<String, HashMap<String, String>>) -> Self {
        for key in entries.keys() {
            if CombinedCode::parse(key).is_none() {
                warn!(key = %key, "term table key is not a combined code and can never match");
            }
        }
        Self {
            entries,
            fallback: DEFAULT_FALLBACK_TERM.to_string(),
            self_term: DEFAULT_SELF_TERM.to_string(),
        }
    }

    /// The table shipped with the crate. Genders are `male`, `female` and
    /// `nonbinary`.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_TABLE)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let entries: HashMap<String, HashMap<String, String>> = serde_json::from_str(json)?;
        debug!(entries = entries.len(), "loaded term table");
        Ok(Self::new(entries))
    }

    /// Reads a JSON term table from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| KinshipError::File {
            message: format!("failed to read term table: {}", e),
            path: path.display().to_string(),
        })?;
        Self::from_json(&contents).map_err(|e| KinshipError::File {
            message: format!("failed to parse term table: {}", e),
            path: path.display().to_string(),
        })
    }

    /// Replaces the term used for codes missing from the table.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Replaces the term used for self queries when `":"` is not in the table.
    pub fn with_self_term(mut self, self_term: impl Into<String>) -> Self {
        self.self_term = self_term.into();
        self
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn self_term(&self) -> &str {
        &self.self_term
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    /// Gender-to-term entry for `code`, if present.
    pub fn entry(&self, code: &str) -> Option<&HashMap<String, String>> {
        self.entries.get(code)
    }

    /// All codes in the table, sorted by total step count and then
    /// lexicographically.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.entries.keys().map(|k| k.as_str()).collect();
        codes.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        codes
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the term for `code` as seen by a first person of `gender`.
    ///
    /// An absent code yields the fallback term, except for the self code
    /// `":"` which yields the self term. A present code whose entry has no
    /// term for `gender` is an error.
    pub fn term_for(&self, code: &CombinedCode, gender: &str) -> Result<String> {
        let key = code.key();
        match self.entries.get(&key) {
            Some(by_gender) => by_gender.get(gender).cloned().ok_or_else(|| {
                KinshipError::UnknownGender {
                    gender: gender.to_string(),
                    code: key,
                }
            }),
            None if code.total_steps() == 0 => Ok(self.self_term.clone()),
            None => {
                debug!(code = %key, "code not in term table, using fallback");
                Ok(self.fallback.clone())
            }
        }
    }
}
