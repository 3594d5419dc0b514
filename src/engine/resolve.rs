//! Match resolution.
//!
//! A tier match is a set of raw captures over the decomposed input. Resolution
//! turns it into the user-facing `ParseResult`:
//!
//! - trims the short name and the designator and recomposes both (NFC);
//! - re-attaches an opening parenthesis that the tier consumed as separator;
//! - looks up the standard form of the matched designator.
//!
//! ```text
//! "Foo (LLC)"  ──End──▶  short="Foo" sep="(" des="LLC)"  ──▶  short="Foo" des="(LLC)"
//! ```

use crate::api::{ParseResult, SeparatorClasses};
use crate::dataset::Dataset;
use crate::normalize::{fold_key, to_display_form, trim_space};
use crate::{MatchTier, TierMatch};
use std::collections::HashMap;

/// Folded spelling -> standard form of the entry it belongs to.
#[derive(Debug, Default)]
pub(crate) struct StandardIndex {
    by_key: HashMap<String, String>,
}

impl StandardIndex {
    /// Index every spelling of every entry. Entries are visited in key order
    /// and the first entry to claim a folded key keeps it.
    pub(crate) fn build(dataset: &Dataset) -> Self {
        let mut by_key = HashMap::new();
        for entry in dataset.iter() {
            for spelling in entry.spellings().chain(entry.standard_abbreviation.as_deref()) {
                let key = fold_key(spelling);
                if key.is_empty() {
                    continue;
                }
                by_key.entry(key).or_insert_with(|| entry.standard_form().to_string());
            }
        }
        StandardIndex { by_key }
    }

    pub(crate) fn lookup(&self, designator: &str) -> Option<&str> {
        self.by_key.get(&fold_key(designator)).map(String::as_str)
    }
}

/// Build the result for a successful match of `tier` on the input whose
/// recomposed form is `input`.
pub(crate) fn resolve_match(
    input: &str,
    tier: MatchTier,
    found: &TierMatch<'_>,
    separators: &SeparatorClasses,
    standard: &StandardIndex,
) -> ParseResult {
    let mut designator = trim_space(found.designator).to_string();

    // An opening paren taken as the separator belongs to the designator when
    // the designator carries the matching close paren.
    if !tier.is_begin() {
        if let Some(sep) = found.separator.filter(|s| separators.is_open_paren(s)) {
            let has_open = designator.chars().any(|c| separators.open_parens.contains(&c));
            let has_close = designator.chars().any(|c| separators.close_parens.contains(&c));
            if has_close && !has_open {
                designator.insert_str(0, sep);
            }
        }
    }

    let designator = to_display_form(&designator);
    let standard_designator = standard.lookup(&designator).map(str::to_string);

    ParseResult {
        input: input.to_string(),
        matched: true,
        short_name: to_display_form(trim_space(found.short)),
        designator: Some(designator),
        position: tier.position(),
        tier: Some(tier),
        standard_designator,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;
    use crate::dataset::DesignatorEntry;

    fn index() -> StandardIndex {
        let ds = Dataset::from_entries([
            DesignatorEntry::new("Limited Liability Company")
                .with_standard_abbreviation("LLC")
                .with_abbreviations(["LLC", "L.L.C."]),
            DesignatorEntry::new("Gesellschaft mit beschr\u{e4}nkter Haftung").with_abbreviations(["GmbH"]),
        ])
        .unwrap();
        StandardIndex::build(&ds)
    }

    #[test]
    fn standard_lookup_folds_spelling() {
        let idx = index();
        assert_eq!(idx.lookup("L. L. C."), Some("LLC"));
        assert_eq!(idx.lookup("llc"), Some("LLC"));
        assert_eq!(idx.lookup("Limited Liability Company"), Some("LLC"));
        assert_eq!(idx.lookup("GMBH"), Some("Gesellschaft mit beschr\u{e4}nkter Haftung"));
        assert_eq!(idx.lookup("Gesellschaft mit beschrankter Haftung"), Some("Gesellschaft mit beschr\u{e4}nkter Haftung"));
        assert_eq!(idx.lookup("Inc."), None);
    }

    #[test]
    fn reattaches_open_paren_separator() {
        let found = TierMatch { short: "Foo ", separator: Some("("), designator: "LLC)" };
        let res = resolve_match("Foo (LLC)", MatchTier::End, &found, &SeparatorClasses::default(), &index());

        assert!(res.matched);
        assert_eq!(res.short_name, "Foo");
        assert_eq!(res.designator.as_deref(), Some("(LLC)"));
        assert_eq!(res.position, Position::End);
        assert_eq!(res.standard_designator.as_deref(), Some("LLC"));
    }

    #[test]
    fn open_paren_without_close_stays_a_separator() {
        let found = TierMatch { short: "Foo", separator: Some("("), designator: "LLC" };
        let res = resolve_match("Foo (LLC", MatchTier::End, &found, &SeparatorClasses::default(), &index());
        assert_eq!(res.designator.as_deref(), Some("LLC"));
    }

    #[test]
    fn fallback_tiers_report_primary_positions() {
        let found = TierMatch { short: "Jansen", separator: Some(" "), designator: "Vennootschap" };
        let res = resolve_match(
            "Vennootschap Jansen",
            MatchTier::BeginFallback,
            &found,
            &SeparatorClasses::default(),
            &index(),
        );
        assert_eq!(res.position, Position::Begin);
        assert_eq!(res.tier, Some(MatchTier::BeginFallback));
        assert_eq!(res.standard_designator, None);
    }

    #[test]
    fn recomposes_decomposed_captures() {
        let found = TierMatch { short: "Mu\u{308}ller", separator: Some(" "), designator: "GmbH" };
        let res = resolve_match("M\u{fc}ller GmbH", MatchTier::End, &found, &SeparatorClasses::default(), &index());
        assert_eq!(res.short_name, "M\u{fc}ller");
    }
}
