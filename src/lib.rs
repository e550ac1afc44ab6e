pub mod config;
pub mod errors;
pub mod family;
pub mod format;
pub mod graph;
pub mod kinship;
pub mod person;
pub mod resolution;
pub mod terms;
pub mod types;
