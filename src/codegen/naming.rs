use std::collections::HashSet;
use once_cell::sync::Lazy;

const FALLBACK_IDENT: &str = "X";

/// Words that stay fully upper-case in exported Go identifiers.
static INITIALISMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "ACL", "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID",
        "IP", "JSON", "QPS", "RAM", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP", "TLS", "TTL", "UDP",
        "UI", "UID", "UUID", "URI", "URL", "UTF8", "VM", "XML", "XSRF", "XSS",
    ]
    .into_iter()
    .collect()
});

/// Exported Go identifier for a GraphQL name: `accountId` → `AccountID`,
/// `ACTIVE_STATE` → `ActiveState`.
///
/// A name with no letters or digits (`_`, `__`) becomes `X`. Distinct names
/// can still meet (`id` and `ID`); callers check for that.
pub fn go_name(name: &str) -> String {
    let ident: String = split_words(name).iter().map(|w| capitalize(w)).collect();
    if ident.is_empty() {
        tracing::warn!(name, fallback = FALLBACK_IDENT, "name has no identifier characters");
        return FALLBACK_IDENT.to_string();
    }
    ident
}

/// `text` as `//` comment lines, each prefixed with `indent`.
pub fn doc_comment(indent: &str, text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for line in text.lines().map(str::trim_end) {
        if line.is_empty() {
            out.push_str(&format!("{indent}//\n"));
        } else {
            out.push_str(&format!("{indent}// {line}\n"));
        }
    }
    out
}

// Word breaks: separators, lower→Upper, digit→Upper, and the last capital of
// an acronym run when a lower-case letter follows (`HTTPServer`).
fn split_words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let upper = word.to_uppercase();
    if INITIALISMS.contains(upper.as_str()) {
        return upper;
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
