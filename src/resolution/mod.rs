/// Relation resolution module.
///
/// Finds the least-distant relative shared by two people and turns the pair
/// of paths leading to it into a kinship term.
mod resolver;

pub use resolver::{Candidate, RelationResolver};
