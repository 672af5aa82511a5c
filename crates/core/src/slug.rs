//! URL slug derivation for project public addresses.

use std::sync::OnceLock;

use regex::Regex;

fn separator_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("static regex"))
}

/// Derive a URL slug from a project title: lowercase, alphanumeric runs
/// joined by single dashes, no leading or trailing dash.
///
/// Titles with no usable characters map to `"page"` so the slug column is
/// never empty.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let slug = separator_run()
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string();
    if slug.is_empty() {
        "page".to_string()
    } else {
        slug
    }
}
