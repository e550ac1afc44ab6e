use tracing::debug;

use crate::errors::Result;
use crate::family::Family;
use crate::graph::{ConnectionFinder, Connections};
use crate::terms::TermTable;
use crate::types::{CombinedCode, PersonId, Relation};

/// A relative reachable from both people of a query, with the ordering data
/// used to pick among several of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub person: PersonId,
    pub code: CombinedCode,
    /// Discovery rank in the first person's traversal.
    pub self_rank: usize,
    /// Discovery rank in the second person's traversal.
    pub other_rank: usize,
}

impl Candidate {
    /// Ordering key; smaller is preferred.
    ///
    /// 1. fewest steps in total,
    /// 2. fewest spouse steps,
    /// 3. earliest discovery from the first person,
    /// 4. earliest discovery from the second person.
    ///
    /// Ranks are unique within one traversal, so no two candidates compare
    /// equal.
    pub fn sort_key(&self) -> (usize, usize, usize, usize) {
        (
            self.code.total_steps(),
            self.code.spouse_steps(),
            self.self_rank,
            self.other_rank,
        )
    }
}

/// Resolves the kinship term linking two people of a family.
///
/// The term table is handed in at construction; the resolver never changes
/// it or the family.
pub struct RelationResolver<'a> {
    family: &'a Family,
    terms: &'a TermTable,
}

impl<'a> RelationResolver<'a> {
    pub fn new(family: &'a Family, terms: &'a TermTable) -> Self {
        Self { family, terms }
    }

    /// Returns the term describing `first` relative to `second`.
    ///
    /// `Relation::Unrelated` when no relative is reachable from both. A code
    /// with no table entry resolves to the table's fallback term.
    pub fn resolve(&self, first: PersonId, second: PersonId) -> Result<Relation> {
        let finder = ConnectionFinder::new(self.family);
        let self_conn = finder.connections(first);
        let other_conn = finder.connections(second);

        let Some(best) = Self::closest_shared(&self_conn, &other_conn) else {
            debug!(
                first = %self.family.get(first).name,
                second = %self.family.get(second).name,
                "no shared relative"
            );
            return Ok(Relation::Unrelated);
        };

        let gender = &self.family.get(first).gender;
        let term = self.terms.term_for(&best.code, gender)?;
        let via = self.family.get(best.person).name.clone();

        debug!(
            first = %self.family.get(first).name,
            second = %self.family.get(second).name,
            code = %best.code,
            via = %via,
            term = %term,
            "resolved relation"
        );

        Ok(Relation::Related {
            term,
            code: best.code,
            via,
        })
    }

    /// All relatives present in both connection maps, in the first map's
    /// discovery order.
    pub fn shared(self_conn: &Connections, other_conn: &Connections) -> Vec<Candidate> {
        self_conn
            .iter()
            .enumerate()
            .filter_map(|(self_rank, (person, self_path))| {
                let other_path = other_conn.get(person)?;
                let other_rank = other_conn.rank(person)?;
                Some(Candidate {
                    person,
                    code: CombinedCode::new(self_path.clone(), other_path.clone()),
                    self_rank,
                    other_rank,
                })
            })
            .collect()
    }

    /// The shared relative with the smallest `Candidate::sort_key`, if any.
    pub fn closest_shared(self_conn: &Connections, other_conn: &Connections) -> Option<Candidate> {
        Self::shared(self_conn, other_conn)
            .into_iter()
            .min_by_key(Candidate::sort_key)
    }
}
