//! Naming convention helpers for accessor names.

/// Capitalize the first letter of a string.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lowercase the first letter of a string.
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Property name behind an accessor: `getMaxTime` -> `maxTime`.
///
/// The prefix only counts when an uppercase letter follows it, so `island`
/// is not an `is` accessor.
pub fn strip_accessor_prefix<'a>(name: &'a str, prefixes: &[&str]) -> Option<String> {
    prefixes.iter().find_map(|prefix| {
        let rest: &'a str = name.strip_prefix(prefix)?;
        rest.chars()
            .next()
            .filter(|c| c.is_uppercase())
            .map(|_| decapitalize(rest))
    })
}
