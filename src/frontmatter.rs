//! Frontmatter (YAML) alias extraction

use serde_yaml::Value;

/// Frontmatter keys that carry aliases, checked in order
const ALIAS_KEYS: &[&str] = &["aliases", "alias"];

/// Read the alias list out of a frontmatter mapping
///
/// Accepts either a sequence (`aliases: [a, b]`) or a comma-separated
/// string (`alias: a, b`). Scalars inside a sequence are stringified;
/// nested mappings are ignored. Returns an empty list if neither key exists.
pub fn parse_aliases(frontmatter: &Value) -> Vec<String> {
    let Value::Mapping(map) = frontmatter else {
        return Vec::new();
    };

    for key in ALIAS_KEYS {
        let Some(value) = map.get(&Value::String(key.to_string())) else {
            continue;
        };

        return match value {
            Value::String(s) => s
                .split(',')
                .map(|part| part.trim().to_string())
                .filter(|part| !part.is_empty())
                .collect(),
            Value::Sequence(seq) => seq.iter().filter_map(scalar_to_string).collect(),
            Value::Null => Vec::new(),
            other => scalar_to_string(other).into_iter().collect(),
        };
    }

    Vec::new()
}

/// Convert a scalar YAML value to its string form
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
