use crate::types::PersonId;

/// A single node in the family graph.
///
/// Edges point at other people by `PersonId`; the owning `Family` resolves
/// them. Cardinality of `parents` is not checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub gender: String,
    parents: Vec<PersonId>,
    spouse: Option<PersonId>,
}

impl Person {
    pub fn new(id: PersonId, name: impl Into<String>, gender: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            gender: gender.into(),
            parents: Vec::new(),
            spouse: None,
        }
    }

    /// Records a parental edge to `parent`.
    pub fn add_parent(&mut self, parent: PersonId) {
        self.parents.push(parent);
    }

    /// Records a spousal edge to `spouse`, replacing any earlier one.
    ///
    /// Only this end is updated; the caller sets the other end.
    pub fn set_spouse(&mut self, spouse: PersonId) {
        self.spouse = Some(spouse);
    }

    /// Parents in the order they were added.
    pub fn parents(&self) -> &[PersonId] {
        &self.parents
    }

    pub fn spouse(&self) -> Option<PersonId> {
        self.spouse
    }
}
