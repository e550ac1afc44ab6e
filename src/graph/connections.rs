use std::collections::{HashMap, VecDeque};

use crate::family::Family;
use crate::types::{PathCode, PathStep, PersonId};

/// Every relative reachable from one origin, each labeled with the path code
/// of the route on which it was first discovered.
///
/// Entries keep discovery order; `rank` exposes a relative's position in it.
#[derive(Debug, Clone, Default)]
pub struct Connections {
    origin: Option<PersonId>,
    order: Vec<(PersonId, PathCode)>,
    index: HashMap<PersonId, usize>,
}

impl Connections {
    fn insert(&mut self, id: PersonId, path: PathCode) {
        self.index.insert(id, self.order.len());
        self.order.push((id, path));
    }

    /// The person the traversal started from.
    pub fn origin(&self) -> Option<PersonId> {
        self.origin
    }

    /// Path code for `id`, if reachable.
    pub fn get(&self, id: PersonId) -> Option<&PathCode> {
        self.index.get(&id).map(|&i| &self.order[i].1)
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.index.contains_key(&id)
    }

    /// Discovery position of `id` (the origin is 0).
    pub fn rank(&self, id: PersonId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Relatives in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (PersonId, &PathCode)> {
        self.order.iter().map(|(id, path)| (*id, path))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Labels the relatives of a person by breadth-first traversal over parent
/// and spouse edges.
pub struct ConnectionFinder<'a> {
    family: &'a Family,
}

impl<'a> ConnectionFinder<'a> {
    /// Creates a new `ConnectionFinder` over the given family.
    pub fn new(family: &'a Family) -> Self {
        Self { family }
    }

    /// Performs a breadth-first traversal starting from `origin`.
    ///
    /// Parents are followed from every node. A spouse is followed only from a
    /// node whose path has no spouse step yet, so each path holds at most one.
    /// A node keeps the path it was first discovered on, which is a shortest
    /// one under that constraint; equal-length routes are decided by the order
    /// parents were added and by queue order.
    pub fn connections(&self, origin: PersonId) -> Connections {
        let mut result = Connections {
            origin: Some(origin),
            ..Connections::default()
        };
        result.insert(origin, PathCode::empty());

        let mut queue: VecDeque<PersonId> = VecDeque::new();
        queue.push_back(origin);

        while let Some(current) = queue.pop_front() {
            let person = self.family.get(current);
            let current_path = match result.get(current) {
                Some(path) => path.clone(),
                None => continue,
            };

            for &parent in person.parents() {
                if result.contains(parent) {
                    continue;
                }
                result.insert(parent, current_path.extended(PathStep::Parent));
                queue.push_back(parent);
            }

            if current_path.has_spouse_step() {
                continue;
            }
            if let Some(spouse) = person.spouse() {
                if !result.contains(spouse) {
                    result.insert(spouse, current_path.extended(PathStep::Spouse));
                    queue.push_back(spouse);
                }
            }
        }

        result
    }
}
