use kinship::errors::KinshipError;
use kinship::format::format_relation;
use kinship::kinship::Kinship;
use kinship::terms::TermTable;
use kinship::types::Relation;
use serde_json::json;
use std::path::PathBuf;
use tempfile::TempDir;

/// Writes a family file into a fresh temp dir and returns its path.
fn write_family() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("family.json");
    let data = json!({
        "individuals": {
            "Homer": "male",
            "Marge": "female",
            "Bart": "male",
            "Lisa": "female",
            "Maggie": "female",
            "Abe": "male",
            "Mona": "female",
            "Clancy": "male",
            "Jackie": "female",
            "Patty": "female",
            "Selma": "female",
            "Ling": "female",
            "Ned": "male"
        },
        "parents": {
            "Homer": ["Abe", "Mona"],
            "Marge": ["Clancy", "Jackie"],
            "Patty": ["Clancy", "Jackie"],
            "Selma": ["Clancy", "Jackie"],
            "Bart": ["Homer", "Marge"],
            "Lisa": ["Homer", "Marge"],
            "Maggie": ["Homer", "Marge"],
            "Ling": ["Selma"]
        },
        "couples": [["Homer", "Marge"], ["Abe", "Mona"], ["Clancy", "Jackie"]]
    });
    std::fs::write(&path, data.to_string()).expect("failed to write family file");
    (dir, path)
}

fn open() -> (TempDir, Kinship) {
    let (dir, path) = write_family();
    let kinship = Kinship::open(&path, TermTable::builtin().unwrap()).expect("failed to open");
    (dir, kinship)
}

fn sentence(kinship: &Kinship, a: &str, b: &str) -> String {
    let rel = kinship.relation(a, b).expect("query failed");
    format_relation(a, b, &rel)
}

#[test]
fn test_open_loads_family() {
    let (_dir, kinship) = open();
    assert_eq!(kinship.family().len(), 13);
    assert!(kinship.terms().contains("P:P"));
}

#[test]
fn test_end_to_end_sentences() {
    let (_dir, kinship) = open();
    assert_eq!(sentence(&kinship, "Bart", "Lisa"), "Bart is Lisa's brother");
    assert_eq!(sentence(&kinship, "Lisa", "Abe"), "Lisa is Abe's granddaughter");
    assert_eq!(sentence(&kinship, "Patty", "Bart"), "Patty is Bart's aunt");
    assert_eq!(sentence(&kinship, "Ling", "Maggie"), "Ling is Maggie's first cousin");
    assert_eq!(sentence(&kinship, "Marge", "Homer"), "Marge is Homer's wife");
    assert_eq!(sentence(&kinship, "Mona", "Marge"), "Mona is Marge's mother-in-law");
    assert_eq!(sentence(&kinship, "Homer", "Selma"), "Homer is Selma's brother-in-law");
}

#[test]
fn test_unrelated_neighbor() {
    let (_dir, kinship) = open();
    assert_eq!(kinship.relation("Ned", "Homer").unwrap(), Relation::Unrelated);
    assert_eq!(sentence(&kinship, "Ned", "Homer"), "Ned is not related to Homer");
}

#[test]
fn test_co_grandparents_are_unrelated() {
    // Traversal only climbs to parents and spouses, never down to children.
    let (_dir, kinship) = open();
    assert_eq!(kinship.relation("Abe", "Clancy").unwrap(), Relation::Unrelated);
}

#[test]
fn test_connections_from_facade() {
    let (_dir, kinship) = open();
    let conns = kinship.connections("Bart").unwrap();
    let abe = kinship.family().find("Abe").unwrap();
    assert_eq!(conns.get(abe).map(|p| p.to_string()).as_deref(), Some("PP"));
    assert!(kinship.connections("Nobody").is_err());
}

#[test]
fn test_unknown_name_is_fatal() {
    let (_dir, kinship) = open();
    let err = kinship.relation("Bart", "Milhouse").unwrap_err();
    assert!(matches!(err, KinshipError::UnknownPerson { .. }));
}

#[test]
fn test_open_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = Kinship::open(&dir.path().join("nope.json"), TermTable::builtin().unwrap());
    assert!(matches!(result, Err(KinshipError::File { .. })));
}
