//! Ambiguous-overlap resolution.
//!
//! The regex engine picks the first alternative that lets the whole pattern
//! match, not the longest one. Where one designator is a proper textual subset
//! of another (`Co.` vs `& Co.`, `Vennootschap` vs `Vennootschap Onder Firma`)
//! the shorter spelling can win and truncate the short name, most visibly in
//! the `Begin` tier where nothing anchors the designator's end.
//!
//! The blacklist names those shorter spellings. They are removed from the
//! primary `End`/`Begin` tiers and compiled into `EndFallback`/`BeginFallback`
//! instead, which only run when the primary tier found nothing.

use crate::MatchTier;
use crate::normalize::to_display_form;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub(crate) struct Blacklist {
    /// Blacklisted spellings, recomposed.
    entries: HashSet<String>,
}

impl Blacklist {
    pub(crate) fn new<'a, I>(spellings: I) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        Blacklist { entries: spellings.into_iter().map(|s| to_display_form(s.trim())).collect() }
    }

    /// True if `spelling` (in any normalization form) is blacklisted.
    pub(crate) fn contains(&self, spelling: &str) -> bool {
        self.entries.contains(spelling) || self.entries.contains(&to_display_form(spelling.trim()))
    }

    /// Whether `spelling` belongs in `tier`.
    ///
    /// ```text
    /// End / Begin                   -> only if NOT blacklisted
    /// EndFallback / BeginFallback   -> only if blacklisted
    /// EndCont                       -> always (no overlap routing)
    /// ```
    pub(crate) fn admits(&self, tier: MatchTier, spelling: &str) -> bool {
        match tier {
            MatchTier::End | MatchTier::Begin => !self.contains(spelling),
            MatchTier::EndFallback | MatchTier::BeginFallback => self.contains(spelling),
            MatchTier::EndCont => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blacklist() -> Blacklist {
        Blacklist::new(&["Co.".to_string(), "Soci\u{e9}t\u{e9}".to_string()])
    }

    #[test]
    fn routes_blacklisted_spellings_to_fallback_tiers() {
        let bl = blacklist();
        assert!(!bl.admits(MatchTier::End, "Co."));
        assert!(bl.admits(MatchTier::EndFallback, "Co."));
        assert!(!bl.admits(MatchTier::Begin, "Co."));
        assert!(bl.admits(MatchTier::BeginFallback, "Co."));
        assert!(bl.admits(MatchTier::EndCont, "Co."));

        assert!(bl.admits(MatchTier::End, "& Co."));
        assert!(!bl.admits(MatchTier::EndFallback, "& Co."));
    }

    #[test]
    fn membership_ignores_normalization_form() {
        let bl = blacklist();
        assert!(bl.contains("Socie\u{301}te\u{301}"));
        assert!(bl.contains("Soci\u{e9}t\u{e9}"));
        assert!(!bl.contains("Societe"));
    }
}
