use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Index of a person inside a `Family`.
///
/// Parent and spouse edges are stored as `PersonId`s, so the family owns every
/// person exactly once and edges never own what they point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersonId(pub usize);

impl PersonId {
    /// Position of the person in the family's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One hop in a path code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathStep {
    Parent,
    Spouse,
}

impl PathStep {
    /// Returns the single-letter encoding of this step.
    pub fn as_char(&self) -> char {
        match self {
            PathStep::Parent => 'P',
            PathStep::Spouse => 'S',
        }
    }

    /// Parses a single letter into a `PathStep`, returning `None` for anything
    /// other than `P` or `S`.
    pub fn from_char(c: char) -> Option<PathStep> {
        match c {
            'P' => Some(PathStep::Parent),
            'S' => Some(PathStep::Spouse),
            _ => None,
        }
    }
}

/// The steps taken from a query origin to reach one relative.
///
/// The empty code denotes the origin itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathCode {
    steps: Vec<PathStep>,
}

impl PathCode {
    /// The code of the origin.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a new code with `step` appended.
    pub fn extended(&self, step: PathStep) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend_from_slice(&self.steps);
        steps.push(step);
        Self { steps }
    }

    /// Parses a string over `{P, S}`. Returns `None` on any other character.
    pub fn parse(s: &str) -> Option<Self> {
        let steps = s
            .chars()
            .map(PathStep::from_char)
            .collect::<Option<Vec<_>>>()?;
        Some(Self { steps })
    }

    /// Steps from the origin outward.
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Number of steps in the path.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of spouse steps in the path.
    pub fn spouse_steps(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| **s == PathStep::Spouse)
            .count()
    }

    /// Whether the path already crossed a marriage.
    pub fn has_spouse_step(&self) -> bool {
        self.steps.contains(&PathStep::Spouse)
    }
}

impl fmt::Display for PathCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            write!(f, "{}", step.as_char())?;
        }
        Ok(())
    }
}

/// Two path codes meeting at a shared relative: the first person's path and
/// the second person's path. Rendered as `self:other`, the term table key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CombinedCode {
    pub self_path: PathCode,
    pub other_path: PathCode,
}

impl CombinedCode {
    pub fn new(self_path: PathCode, other_path: PathCode) -> Self {
        Self {
            self_path,
            other_path,
        }
    }

    /// Parses a `self:other` key. Returns `None` when the separator is missing
    /// or either side contains a character other than `P` or `S`.
    pub fn parse(s: &str) -> Option<Self> {
        let (left, right) = s.split_once(':')?;
        Some(Self::new(PathCode::parse(left)?, PathCode::parse(right)?))
    }

    /// Sum of the steps on both sides.
    pub fn total_steps(&self) -> usize {
        self.self_path.len() + self.other_path.len()
    }

    /// Spouse steps on both sides.
    pub fn spouse_steps(&self) -> usize {
        self.self_path.spouse_steps() + self.other_path.spouse_steps()
    }

    /// The string used to look this code up in a term table.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CombinedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.self_path, self.other_path)
    }
}

/// A family description as read from JSON.
///
/// Maps are ordered so that graph construction, and with it traversal order,
/// does not depend on hashing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilyData {
    /// Person name to gender category.
    pub individuals: BTreeMap<String, String>,
    /// Child name to the names of that child's parents.
    #[serde(default)]
    pub parents: BTreeMap<String, Vec<String>>,
    /// Married pairs. Each entry must hold exactly two names.
    #[serde(default)]
    pub couples: Vec<Vec<String>>,
}

/// Outcome of a relation query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation {
    /// The two people share a relative.
    Related {
        /// Kinship term describing the first person relative to the second.
        term: String,
        /// Combined code that was looked up.
        code: CombinedCode,
        /// Name of the shared relative the code was built through.
        via: String,
    },
    /// No relative is reachable from both people.
    Unrelated,
}

impl Relation {
    /// Returns the kinship term, or `None` for unrelated people.
    pub fn term(&self) -> Option<&str> {
        match self {
            Relation::Related { term, .. } => Some(term.as_str()),
            Relation::Unrelated => None,
        }
    }

    /// Returns the combined code, or `None` for unrelated people.
    pub fn code(&self) -> Option<&CombinedCode> {
        match self {
            Relation::Related { code, .. } => Some(code),
            Relation::Unrelated => None,
        }
    }

    pub fn is_related(&self) -> bool {
        matches!(self, Relation::Related { .. })
    }
}
