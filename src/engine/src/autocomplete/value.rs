//! Autocomplete value encoding
//!
//! A value is `"<label> (<id>)"` cleaned of markup, quoted when it contains
//! a comma or a double quote so it survives comma-separated tag input.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));
static ENTITIES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("valid entity pattern")
});
static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\s+").expect("valid whitespace pattern"));
static TRAILING_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.+\s\(([^)]+)\)\s*$").expect("valid id pattern"));

fn decode_entities(text: &str) -> String {
    ENTITIES
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Quote a tag that contains a comma or a double quote
pub fn encode_tag(tag: &str) -> String {
    if tag.contains(',') || tag.contains('"') {
        format!("\"{}\"", tag.replace('"', "\"\""))
    } else {
        tag.to_string()
    }
}

/// Reverse of [`encode_tag`]
pub fn decode_tag(tag: &str) -> String {
    let tag = tag.trim();
    match tag.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
        Some(inner) => inner.replace("\"\"", "\""),
        None => tag.to_string(),
    }
}

/// Build the autocomplete value for a term
pub fn format_value(label: &str, term_id: &str) -> String {
    let key = format!("{} ({})", label, term_id);
    let key = TAGS.replace_all(&key, "");
    // Decoded entities may spell out markup of their own
    let key = decode_entities(&key);
    let key = TAGS.replace_all(&key, "");
    let key = key.trim().replace('\n', "");
    let key = WHITESPACE_RUNS.replace_all(&key, " ");
    encode_tag(&key)
}

/// Parse the term id back out of an autocomplete value
pub fn extract_term_id(value: &str) -> Option<String> {
    let decoded = decode_tag(value);
    TRAILING_ID
        .captures(&decoded)
        .map(|caps| caps[1].trim().to_string())
        .filter(|id| !id.is_empty())
}
