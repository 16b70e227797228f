//! Title-casing and wiki page naming.

/// Prefix shared by every generated page name.
pub const PAGE_PREFIX: &str = "Perl-";

/// Uppercase the first letter of each word, leaving the rest untouched.
///
/// Letters, digits and `_` continue a word, so `entity_list` becomes
/// `Entity_list` rather than `Entity_List`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_sep = true;
    for c in text.chars() {
        if prev_sep {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_sep = is_separator(c);
    }
    out
}

fn is_separator(c: char) -> bool {
    if c.is_ascii() {
        return !(c.is_ascii_alphanumeric() || c == '_');
    }
    if c.is_alphanumeric() {
        return false;
    }
    c.is_whitespace()
}

/// Title-case a scope name, with fixed spellings for the scopes that plain
/// title-casing mangles.
pub fn scope_title(scope: &str) -> String {
    match scope.to_lowercase().as_str() {
        "entity_list" => "EntityList".to_string(),
        "hate_entry" => "HateEntry".to_string(),
        "npc" => "NPC".to_string(),
        _ => title_case(scope),
    }
}

/// Page listing every function of a scope.
pub fn scope_page(scope: &str) -> String {
    format!("{}{}.md", PAGE_PREFIX, title_case(scope))
}

/// Link target of a function as written in scope pages.
pub fn function_link(scope: &str, function: &str) -> String {
    format!("{}{}-{}", PAGE_PREFIX, scope, title_case(function))
}

/// File name of a function detail page.
///
/// Uses the function name as extracted, so it differs from
/// [`function_link`] for lowercase names.
pub fn function_page(scope: &str, function: &str) -> String {
    format!("{}{}-{}.md", PAGE_PREFIX, title_case(scope), function)
}

pub fn event_link(event: &str) -> String {
    format!("{}{}", PAGE_PREFIX, event)
}

pub fn event_page(event: &str) -> String {
    format!("{}{}.md", PAGE_PREFIX, title_case(event))
}

pub fn events_index_page() -> String {
    format!("{}Events.md", PAGE_PREFIX)
}
