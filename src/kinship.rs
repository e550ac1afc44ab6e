use std::path::Path;
use std::time::Instant;

use tracing::debug;

use crate::errors::Result;
use crate::family::{Family, QUERY_FIELD};
use crate::graph::{ConnectionFinder, Connections};
use crate::terms::TermTable;
use crate::types::Relation;

/// Entry point tying a loaded family to the term table used to name its
/// relations.
pub struct Kinship {
    family: Family,
    terms: TermTable,
}

impl Kinship {
    pub fn new(family: Family, terms: TermTable) -> Self {
        Self { family, terms }
    }

    /// Loads a JSON family description from `family_path`.
    pub fn open(family_path: &Path, terms: TermTable) -> Result<Self> {
        let start = Instant::now();
        let family = Family::from_path(family_path)?;
        debug!(
            path = %family_path.display(),
            people = family.len(),
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "opened family"
        );
        Ok(Self::new(family, terms))
    }

    pub fn family(&self) -> &Family {
        &self.family
    }

    pub fn terms(&self) -> &TermTable {
        &self.terms
    }

    /// Kinship term describing `name1` relative to `name2`.
    pub fn relation(&self, name1: &str, name2: &str) -> Result<Relation> {
        self.family.relation(name1, name2, &self.terms)
    }

    /// Every relative reachable from `name`, labeled by path.
    pub fn connections(&self, name: &str) -> Result<Connections> {
        let id = self.family.lookup(name, QUERY_FIELD)?;
        Ok(ConnectionFinder::new(&self.family).connections(id))
    }
}
