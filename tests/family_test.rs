use kinship::errors::KinshipError;
use kinship::family::Family;
use kinship::types::FamilyData;
use serde_json::json;
use std::collections::BTreeMap;
use tempfile::TempDir;

fn sample() -> serde_json::Value {
    json!({
        "individuals": { "Alice": "female", "Carl": "male", "Bob": "male" },
        "parents": { "Bob": ["Alice", "Carl"] },
        "couples": [["Alice", "Carl"]]
    })
}

#[test]
fn test_builds_one_person_per_individual() {
    let family = Family::from_json(&sample().to_string()).unwrap();
    assert_eq!(family.len(), 3);
    assert!(!family.is_empty());
    let bob = family.get(family.find("Bob").unwrap());
    assert_eq!(bob.name, "Bob");
    assert_eq!(bob.gender, "male");
}

#[test]
fn test_parents_keep_input_order() {
    let family = Family::from_json(&sample().to_string()).unwrap();
    let bob = family.get(family.find("Bob").unwrap());
    let names: Vec<&str> = bob
        .parents()
        .iter()
        .map(|id| family.get(*id).name.as_str())
        .collect();
    assert_eq!(names, vec!["Alice", "Carl"]);
}

#[test]
fn test_spouse_edges_are_mutual() {
    let family = Family::from_json(&sample().to_string()).unwrap();
    let alice = family.find("Alice").unwrap();
    let carl = family.find("Carl").unwrap();
    assert_eq!(family.get(alice).spouse(), Some(carl));
    assert_eq!(family.get(carl).spouse(), Some(alice));
    assert_eq!(family.get(family.find("Bob").unwrap()).spouse(), None);
}

#[test]
fn test_parent_may_be_listed_after_child() {
    // BTreeMap order puts "Aaron" before "Zoe"; the parent is created in the
    // first phase regardless.
    let mut data = FamilyData::default();
    data.individuals.insert("Aaron".into(), "male".into());
    data.individuals.insert("Zoe".into(), "female".into());
    data.parents.insert("Aaron".into(), vec!["Zoe".into()]);
    let family = Family::from_data(&data).unwrap();
    let aaron = family.get(family.find("Aaron").unwrap());
    assert_eq!(aaron.parents(), &[family.find("Zoe").unwrap()]);
}

#[test]
fn test_missing_parents_and_couples_default_to_empty() {
    let family = Family::from_json(r#"{"individuals": {"Solo": "female"}}"#).unwrap();
    assert_eq!(family.len(), 1);
}

#[test]
fn test_unknown_parent_is_error() {
    let data = json!({
        "individuals": { "Bob": "male" },
        "parents": { "Bob": ["Ghost"] }
    });
    match Family::from_json(&data.to_string()) {
        Err(KinshipError::UnknownPerson { name, field }) => {
            assert_eq!(name, "Ghost");
            assert_eq!(field, "parents");
        }
        other => panic!("expected UnknownPerson, got {other:?}"),
    }
}

#[test]
fn test_unknown_child_is_error() {
    let data = json!({
        "individuals": { "Alice": "female" },
        "parents": { "Ghost": ["Alice"] }
    });
    let err = Family::from_json(&data.to_string()).unwrap_err();
    assert!(matches!(err, KinshipError::UnknownPerson { ref name, .. } if name == "Ghost"));
}

#[test]
fn test_unknown_spouse_is_error() {
    let data = json!({
        "individuals": { "Alice": "female" },
        "couples": [["Alice", "Ghost"]]
    });
    match Family::from_json(&data.to_string()) {
        Err(KinshipError::UnknownPerson { name, field }) => {
            assert_eq!(name, "Ghost");
            assert_eq!(field, "couples");
        }
        other => panic!("expected UnknownPerson, got {other:?}"),
    }
}

#[test]
fn test_couple_with_wrong_arity_is_error() {
    let data = json!({
        "individuals": { "A": "male", "B": "female", "C": "male" },
        "couples": [["A", "B"], ["A", "B", "C"]]
    });
    match Family::from_json(&data.to_string()) {
        Err(KinshipError::MalformedCouple { index, len }) => {
            assert_eq!(index, 1);
            assert_eq!(len, 3);
        }
        other => panic!("expected MalformedCouple, got {other:?}"),
    }
}

#[test]
fn test_later_couple_replaces_spouse() {
    let data = json!({
        "individuals": { "A": "male", "B": "female", "C": "female" },
        "couples": [["A", "B"], ["A", "C"]]
    });
    let family = Family::from_json(&data.to_string()).unwrap();
    let a = family.find("A").unwrap();
    let b = family.find("B").unwrap();
    let c = family.find("C").unwrap();
    assert_eq!(family.get(a).spouse(), Some(c));
    assert_eq!(family.get(c).spouse(), Some(a));
    // No bigamy prevention: B still points at A.
    assert_eq!(family.get(b).spouse(), Some(a));
}

#[test]
fn test_lookup_reports_field() {
    let family = Family::from_json(&sample().to_string()).unwrap();
    assert!(family.lookup("Alice", "query").is_ok());
    let err = family.lookup("Nobody", "query").unwrap_err();
    assert_eq!(err.to_string(), "unknown person 'Nobody' referenced in query");
}

#[test]
fn test_from_path_reads_json_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("family.json");
    std::fs::write(&path, sample().to_string()).unwrap();
    let family = Family::from_path(&path).unwrap();
    assert_eq!(family.len(), 3);
}

#[test]
fn test_from_path_missing_file_is_file_error() {
    let dir = TempDir::new().unwrap();
    let err = Family::from_path(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, KinshipError::File { .. }), "got {err:?}");
}

#[test]
fn test_invalid_json_is_error() {
    let err = Family::from_json("{ not json").unwrap_err();
    assert!(matches!(err, KinshipError::Json(_)), "got {err:?}");
}

#[test]
fn test_people_iterate_in_name_order() {
    let family = Family::from_json(&sample().to_string()).unwrap();
    let names: Vec<&str> = family.people().map(|p| p.name.as_str()).collect();
    let sorted: BTreeMap<&str, ()> = names.iter().map(|n| (*n, ())).collect();
    assert_eq!(names, sorted.keys().copied().collect::<Vec<_>>());
}
