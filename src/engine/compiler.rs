//! Pattern compiler.
//!
//! Turns dataset entries into escaped regex alternatives for one tier, and
//! wraps an alternation with the tier's positional context.
//!
//! ## Escaping
//!
//! Each spelling is decomposed (NFD) and rewritten so loosely punctuated
//! variants still match:
//!
//! ```text
//! "."        -> \.*,?\p{Z}*            "L.L.C." ~ "LLC", "L. L. C.", "L.L.C"
//! " "        -> ,?WORD+                "GmbH & Co KG" ~ "GmbH & Co, KG"
//! " & "      -> \p{Z}*[&+]\p{Z}*       "AG & Co" ~ "AG+Co"
//! other      -> regex::escape          "(" stays a literal paren
//! ```
//!
//! If stripping combining marks changes the escaped spelling, the stripped copy
//! is added as well, so `Société` and `Societe` both match without a second
//! normalization pass at parse time.
//!
//! ## Tier wrapping
//!
//! ```text
//! End, EndFallback:     ^ short  BOUNDARY  des $
//! EndCont:              ^ short            des $   (parens stripped)
//! Begin, BeginFallback: ^ des  BOUNDARY  short $
//! ```
//!
//! `short` is lazy, so for trailing tiers the designator starts as early as
//! possible. Groups are named `short`, `sep` and `des`.

use super::blacklist::Blacklist;
use crate::MatchTier;
use crate::api::{Options, SeparatorClasses};
use crate::dataset::Dataset;
use crate::normalize::{is_space, strip_marks, strip_parens, to_match_form};
use std::collections::HashSet;

/// Regex source for one tier, before compilation.
#[derive(Debug, Clone)]
pub(crate) struct TierPattern {
    pub tier: MatchTier,
    /// Escaped alternatives, deduplicated, in dataset order.
    pub alternatives: Vec<String>,
    /// True if every alternative contains a caseless non-ASCII character, so
    /// the tier can never match pure-ASCII input.
    pub requires_non_ascii: bool,
}

impl TierPattern {
    /// The whole tier as a single wrapped alternation.
    pub fn source(&self, separators: &SeparatorClasses) -> String {
        wrap(self.tier, &self.alternatives.join("|"), separators)
    }

    /// One wrapped pattern per alternative, in alternative order.
    pub fn sources(&self, separators: &SeparatorClasses) -> Vec<String> {
        self.alternatives.iter().map(|alt| wrap(self.tier, alt, separators)).collect()
    }
}

/// Collect and escape every spelling that qualifies for `tier`.
///
/// Returns `None` when nothing qualifies; such a tier must not be compiled
/// against an empty alternation.
pub(crate) fn compile_tier(
    dataset: &Dataset,
    tier: MatchTier,
    options: &Options,
    blacklist: &Blacklist,
) -> Option<TierPattern> {
    let mut alternatives = Vec::new();
    let mut seen = HashSet::new();
    let mut requires_non_ascii = true;
    let parens = options.separators.all_parens();

    for entry in dataset.iter() {
        if tier.is_begin() && !entry.lead {
            continue;
        }
        if tier == MatchTier::EndCont && !options.is_continuous(entry.language.as_deref()) {
            continue;
        }

        for (idx, spelling) in entry.spellings().enumerate() {
            // ASCII abbreviations inside continuous-script text still need a
            // word boundary; leave them to the End tier.
            if tier == MatchTier::EndCont && idx > 0 && spelling.is_ascii() {
                continue;
            }
            if !blacklist.admits(tier, spelling) {
                continue;
            }

            // The continuous haystack has its parens stripped, so its
            // alternatives must too: `(株)` is matched as `株`.
            let spelling = if tier == MatchTier::EndCont {
                strip_parens(spelling, &parens)
            } else {
                spelling.to_string()
            };
            let decomposed = to_match_form(spelling.trim_matches(is_space));
            if decomposed.is_empty() {
                continue;
            }
            let escaped = escape_designator(&decomposed, &options.separators);
            let stripped = strip_marks(&escaped);
            requires_non_ascii &= has_caseless_non_ascii(&strip_marks(&decomposed));

            if seen.insert(escaped.clone()) {
                alternatives.push(escaped);
            }
            if seen.insert(stripped.clone()) {
                alternatives.push(stripped);
            }
        }
    }

    if alternatives.is_empty() {
        tracing::debug!(tier = %tier, "no qualifying designators, tier absent");
        return None;
    }

    tracing::debug!(tier = %tier, alternatives = alternatives.len(), "collected tier alternatives");
    Some(TierPattern { tier, alternatives, requires_non_ascii })
}

/// Escape a decomposed designator for inclusion in an alternation.
pub(crate) fn escape_designator(designator: &str, separators: &SeparatorClasses) -> String {
    let designator = regex!(r"\p{Z}*&\p{Z}*").replace_all(designator.trim_matches(is_space), "&");

    let mut out = String::with_capacity(designator.len() * 3);
    let mut chars = designator.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '.' => out.push_str(r"\.*,?\p{Z}*"),
            '&' => out.push_str(r"\p{Z}*[&+]\p{Z}*"),
            c if is_space(c) => {
                while chars.next_if(|&n| is_space(n)).is_some() {}
                out.push_str(",?");
                out.push_str(&separators.word);
                out.push('+');
            }
            c => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
            }
        }
    }
    out
}

/// Wrap an alternation with the positional context of `tier`.
pub(crate) fn wrap(tier: MatchTier, alternation: &str, separators: &SeparatorClasses) -> String {
    let boundary = &separators.boundary;
    let open = separators.open_class();
    let close = separators.close_class();

    match tier {
        MatchTier::End | MatchTier::EndFallback => format!(
            r"(?i)^\p{{Z}}*(?P<short>.*?)\p{{Z}}*(?P<sep>{boundary})\p{{Z}}*(?P<des>{open}?(?:{alternation}){close}?)\p{{Z}}*$"
        ),
        MatchTier::EndCont => format!(r"(?i)^\p{{Z}}*(?P<short>.*?)\p{{Z}}*(?P<des>(?:{alternation}))\p{{Z}}*$"),
        MatchTier::Begin | MatchTier::BeginFallback => format!(
            r"(?i)^\p{{Z}}*(?P<des>{open}?(?:{alternation}){close}?)(?P<sep>{boundary})\p{{Z}}*(?P<short>.*?)\p{{Z}}*$"
        ),
    }
}

/// True if `s` holds a non-ASCII character with no case mapping, i.e. one a
/// caseless match can only satisfy with itself.
fn has_caseless_non_ascii(s: &str) -> bool {
    s.chars().any(|c| !c.is_ascii() && c.to_lowercase().eq([c]) && c.to_uppercase().eq([c]))
}
