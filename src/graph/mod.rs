/// Breadth-first path labeling over the family graph.
pub mod connections;

pub use connections::{ConnectionFinder, Connections};
