//! Case- and accent-insensitive text matching for in-memory lists.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::Profile;

/// Folds `input` to a search key: NFKD decomposition, combining marks
/// dropped, lowercase, whitespace runs collapsed to a single space.
pub fn search_key(input: &str) -> String {
    let mut out = String::new();
    let mut prev_space = true;
    for ch in input.trim().nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
            continue;
        }
        out.extend(ch.to_lowercase());
        prev_space = false;
    }
    if out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Returns `true` when the folded `term` occurs in the profile's full name or
/// email. An empty term matches everything.
pub fn profile_matches(profile: &Profile, term: &str) -> bool {
    let needle = search_key(term);
    if needle.is_empty() {
        return true;
    }
    [profile.full_name.as_deref(), profile.email.as_deref()]
        .into_iter()
        .flatten()
        .any(|field| search_key(field).contains(&needle))
}
