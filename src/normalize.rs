//! Unicode normalization helpers.
//!
//! All matching happens on the canonically *decomposed* form (NFD) so that a
//! designator written with precomposed accents and one written as base letter
//! plus combining mark meet the same pattern. Everything handed back to callers
//! is recomposed (NFC).
//!
//! ```text
//! "Société"  ──to_match_form──▶  "Socie\u{301}te\u{301}"  ──strip_marks──▶  "Societe"
//!     ▲                                   │
//!     └──────────to_display_form──────────┘
//! ```

use unicode_normalization::UnicodeNormalization;

/// Canonical decomposition (NFD), the form every pattern is compiled and run against.
pub fn to_match_form(s: &str) -> String {
    s.nfd().collect()
}

/// Canonical composition (NFC), the form every string in a `ParseResult` uses.
pub fn to_display_form(s: &str) -> String {
    s.nfc().collect()
}

/// Remove all combining marks (`\p{M}`).
///
/// Applied to already-decomposed text this yields the accent-free spelling.
pub fn strip_marks(s: &str) -> String {
    regex!(r"\p{M}+").replace_all(s, "").into_owned()
}

/// Collapse stray "letter, spaces, period" initials into a single dotted form.
///
/// `"P .J . S .C"` becomes `"P. J. S. C"`. Any trailing whitespace introduced
/// by the rewrite is trimmed.
pub fn collapse_initials(s: &str) -> String {
    let re = regex!(r"(\p{L})\p{Z}+\.\p{Z}*");
    if !re.is_match(s) {
        return s.to_string();
    }
    re.replace_all(s, "$1. ").trim_end().to_string()
}

/// Remove every parenthesis in `parens` together with the whitespace around it.
///
/// Used to prepare input for the continuous-script tier, where parenthesised
/// designators are common and spacing carries no meaning.
pub fn strip_parens(s: &str, parens: &[char]) -> String {
    if !s.chars().any(|c| parens.contains(&c)) {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut pending_space = String::new();
    let mut after_paren = false;
    for c in s.chars() {
        if parens.contains(&c) {
            pending_space.clear();
            after_paren = true;
        } else if is_space(c) {
            if !after_paren {
                pending_space.push(c);
            }
        } else {
            out.push_str(&pending_space);
            pending_space.clear();
            after_paren = false;
            out.push(c);
        }
    }
    out.push_str(&pending_space);
    out
}

/// Characters treated as `\p{Z}`-style whitespace when trimming and escaping.
pub fn is_space(c: char) -> bool {
    c.is_whitespace()
}

/// Trim whitespace from both ends (Unicode aware).
pub fn trim_space(s: &str) -> &str {
    s.trim_matches(is_space)
}

/// Fold a designator into a lookup key: no accents, no case, no punctuation.
///
/// `"L.L.C."`, `"LLC"` and `"l l c"` fold to the same key; `+` folds to `&`
/// so `"AG + Co"` and `"AG & Co."` meet too.
pub fn fold_key(s: &str) -> String {
    strip_marks(&to_match_form(s))
        .chars()
        .flat_map(char::to_lowercase)
        .filter_map(|c| match c {
            '&' | '+' => Some('&'),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .collect()
}
