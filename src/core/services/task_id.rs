//! Task identifier extraction
//!
//! Identifiers tie a checklist line to commit messages. Patterns are tried
//! most specific first and the first hit wins:
//!
//! | Pattern               | Example                        |
//! |-----------------------|--------------------------------|
//! | `T-<word>-<n>`        | `T-SF-02`, `T-SF2-01`, `T-12-3`|
//! | `T-<letters><n>`      | `T-SF03`                       |
//! | `H-<n>`, `SF-<n>`     | `H-08`, `SF-01`                |
//! | `TASK-<n>`            | `TASK-123`                     |
//! | `#<letters>-<n>`      | `#OPS-7`                       |
//!
//! Matching ignores case; the identifier is returned uppercased. The `#`
//! pattern has no leading word boundary, so `see #OPS-7` and `ref#OPS-7`
//! both match.

use std::sync::LazyLock;

use regex::Regex;

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(T-\w+-\d+)\b",
        r"(?i)\b(T-[A-Z]+\d+)\b",
        r"(?i)\b(H-\d+)\b",
        r"(?i)\b(SF-\d+)\b",
        r"(?i)\b(TASK-\d+)\b",
        r"(?i)(#[A-Z]+-\d+)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static regex is valid"))
    .collect()
});

/// Extract the first task identifier in `text`
#[must_use]
pub fn extract_task_id(text: &str) -> Option<String> {
    PATTERNS
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_uppercase())
}
