//! Environment variable naming: `UPPER_SNAKE__NESTED` names to camelCase trees and back.

use catalog_domain::constants::{ENV_NESTING_SEPARATOR, SECTION_SEPARATOR};
use serde_json::{Map, Value};

/// Converts one `UPPER_SNAKE` segment to camelCase.
///
/// The segment is lower-cased, then every `_` directly followed by a letter or digit
/// is dropped and that character upper-cased (`POSTGRES_OPTIONS` -> `postgresOptions`).
#[must_use]
pub fn env_segment_to_camel(segment: &str) -> String {
    let lower = segment.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut chars = lower.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '_'
            && let Some(&next) = chars.peek()
            && (next.is_ascii_lowercase() || next.is_ascii_digit())
        {
            out.push(next.to_ascii_uppercase());
            chars.next();
            continue;
        }
        out.push(ch);
    }

    out
}

/// Converts a camelCase key to `UPPER_SNAKE` (`apiPrefix` -> `API_PREFIX`, `APIKey` -> `API_KEY`).
#[must_use]
pub fn camel_to_env_name(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);

    for (i, &ch) in chars.iter().enumerate() {
        if i > 0 && ch.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.push(ch.to_ascii_uppercase());
    }

    out
}

/// Builds the environment variable that overrides a section path
/// (`appOptions:apiPrefix` -> `APP_OPTIONS__API_PREFIX`).
#[must_use]
pub fn section_to_env_name(path: &str) -> String {
    path.split(SECTION_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(camel_to_env_name)
        .collect::<Vec<_>>()
        .join(ENV_NESTING_SEPARATOR)
}

/// Turns a flat variable set into a nested tree with raw string leaves.
///
/// Names yielding an empty segment (`__X`, `X__`) are skipped. When one name nests
/// below another's value (`A`, `A__B`) the nested form wins whatever the input order.
pub fn env_to_tree<'a, I>(vars: I) -> Value
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut root = Map::new();

    for (name, value) in vars {
        let segments: Vec<String> =
            name.split(ENV_NESTING_SEPARATOR).map(env_segment_to_camel).collect();
        if segments.iter().any(String::is_empty) {
            continue;
        }
        insert_path(&mut root, &segments, value);
    }

    Value::Object(root)
}

fn insert_path(root: &mut Map<String, Value>, segments: &[String], value: &str) {
    let Some((leaf, parents)) = segments.split_last() else {
        return;
    };

    let mut current = root;
    for segment in parents {
        let slot = current.entry(segment.clone()).or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(next) = slot else {
            return;
        };
        current = next;
    }

    if !current.get(leaf).is_some_and(Value::is_object) {
        current.insert(leaf.clone(), Value::String(value.to_owned()));
    }
}
