use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::errors::{KinshipError, Result};
use crate::person::Person;
use crate::resolution::RelationResolver;
use crate::terms::TermTable;
use crate::types::{FamilyData, PersonId, Relation};

/// Field label used in errors for names passed to a query.
pub const QUERY_FIELD: &str = "query";

/// Owns every person of a modeled family and the edges between them.
///
/// Built once from a `FamilyData` description and not mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Family {
    people: Vec<Person>,
    by_name: HashMap<String, PersonId>,
}

impl Family {
    /// Builds the graph from a family description.
    ///
    /// People are created first so that parent and couple entries can refer
    /// to any individual regardless of where it appears in the input. Any
    /// name that is not a key of `individuals` is an error.
    pub fn from_data(data: &FamilyData) -> Result<Self> {
        let mut family = Self::default();

        // Phase 1: nodes.
        for (name, gender) in &data.individuals {
            let id = PersonId(family.people.len());
            family.people.push(Person::new(id, name.clone(), gender.clone()));
            family.by_name.insert(name.clone(), id);
        }

        // Phase 2: edges.
        for (child, parents) in &data.parents {
            let child_id = family.lookup(child, "parents")?;
            for parent in parents {
                let parent_id = family.lookup(parent, "parents")?;
                family.people[child_id.index()].add_parent(parent_id);
            }
        }

        for (index, couple) in data.couples.iter().enumerate() {
            let [first, second] = couple.as_slice() else {
                return Err(KinshipError::MalformedCouple {
                    index,
                    len: couple.len(),
                });
            };
            let a = family.lookup(first, "couples")?;
            let b = family.lookup(second, "couples")?;
            family.marry(a, b);
        }

        debug!(
            people = family.people.len(),
            couples = data.couples.len(),
            "built family graph"
        );
        Ok(family)
    }

    /// Parses a JSON family description and builds the graph.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: FamilyData = serde_json::from_str(json)?;
        Self::from_data(&data)
    }

    /// Reads a JSON family description from disk and builds the graph.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| KinshipError::File {
            message: format!("failed to read family file: {}", e),
            path: path.display().to_string(),
        })?;
        let data: FamilyData = serde_json::from_str(&contents).map_err(|e| KinshipError::File {
            message: format!("failed to parse family file: {}", e),
            path: path.display().to_string(),
        })?;
        Self::from_data(&data)
    }

    /// Resolves both names and returns the term describing `name1` relative
    /// to `name2`, or `Relation::Unrelated`.
    pub fn relation(&self, name1: &str, name2: &str, terms: &TermTable) -> Result<Relation> {
        let first = self.lookup(name1, QUERY_FIELD)?;
        let second = self.lookup(name2, QUERY_FIELD)?;
        RelationResolver::new(self, terms).resolve(first, second)
    }

    /// Resolves a name, reporting `field` as the origin of the reference when
    /// the name is unknown.
    pub fn lookup(&self, name: &str, field: &str) -> Result<PersonId> {
        self.find(name).ok_or_else(|| KinshipError::UnknownPerson {
            name: name.to_string(),
            field: field.to_string(),
        })
    }

    /// Id of the person called `name`, if any.
    pub fn find(&self, name: &str) -> Option<PersonId> {
        self.by_name.get(name).copied()
    }

    /// Returns the person for `id`.
    ///
    /// Ids are only handed out by this family, so an id from a different
    /// family may panic.
    pub fn get(&self, id: PersonId) -> &Person {
        &self.people[id.index()]
    }

    /// People in construction order.
    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.people.iter()
    }

    /// Number of people in the family.
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Whether the family has no people.
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Sets the spousal edge on both ends.
    fn marry(&mut self, a: PersonId, b: PersonId) {
        for (me, other) in [(a, b), (b, a)] {
            if let Some(previous) = self.people[me.index()].spouse() {
                if previous != other {
                    warn!(
                        person = %self.people[me.index()].name,
                        previous = %self.people[previous.index()].name,
                        new = %self.people[other.index()].name,
                        "spouse replaced by a later couple entry"
                    );
                }
            }
            self.people[me.index()].set_spouse(other);
        }
    }
}
