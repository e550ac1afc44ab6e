use serde_json::json;

use crate::errors::Result;
use crate::family::Family;
use crate::graph::Connections;
use crate::terms::TermTable;
use crate::types::Relation;

/// Formats a relation as a sentence.
///
/// `"{name1} is {name2}'s {term}"`, or `"{name1} is not related to {name2}"`.
pub fn format_relation(name1: &str, name2: &str, relation: &Relation) -> String {
    match relation {
        Relation::Related { term, .. } => format!("{} is {}'s {}", name1, name2, term),
        Relation::Unrelated => format!("{} is not related to {}", name1, name2),
    }
}

/// Formats a relation as a pretty-printed JSON object.
pub fn format_relation_as_json(name1: &str, name2: &str, relation: &Relation) -> Result<String> {
    let value = match relation {
        Relation::Related { term, code, via } => json!({
            "from": name1,
            "to": name2,
            "related": true,
            "term": term,
            "code": code.key(),
            "via": via,
        }),
        Relation::Unrelated => json!({
            "from": name1,
            "to": name2,
            "related": false,
            "term": null,
            "code": null,
            "via": null,
        }),
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Lists every relative reachable from `name`, one per line, in discovery
/// order. The origin is shown with `(self)` in place of an empty path.
pub fn format_connections(name: &str, family: &Family, connections: &Connections) -> String {
    let mut out = format!("Connections of {} ({}):\n", name, connections.len());
    for (id, path) in connections.iter() {
        let code = if path.is_empty() {
            "(self)".to_string()
        } else {
            path.to_string()
        };
        out.push_str(&format!("  {:<8} {}\n", code, family.get(id).name));
    }
    out
}

/// Lists the codes of a term table with their terms, sorted by length.
pub fn format_terms(terms: &TermTable) -> String {
    let mut out = format!("Term table ({} codes):\n", terms.len());
    for code in terms.codes() {
        let Some(entry) = terms.entry(code) else {
            continue;
        };
        let mut by_gender: Vec<(&String, &String)> = entry.iter().collect();
        by_gender.sort();
        let rendered: Vec<String> = by_gender
            .iter()
            .map(|(gender, term)| format!("{}={}", gender, term))
            .collect();
        out.push_str(&format!("  {:<10} {}\n", code, rendered.join(", ")));
    }
    out.push_str(&format!("  (other)    {}\n", terms.fallback()));
    out
}
