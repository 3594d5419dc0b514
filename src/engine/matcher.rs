//! Tier matchers.
//!
//! A `TierMatcher` runs one compiled tier against prepared input and returns
//! the raw `short` / `sep` / `des` captures. Two interchangeable backends sit
//! behind the trait:
//!
//! - `RegexTierMatcher`: the whole tier as one alternation regex. Within a
//!   start position the *first* alternative that completes the match wins,
//!   which is why the blacklist exists.
//! - `SetTierMatcher`: a `RegexSet` over one wrapped pattern per alternative,
//!   used as a prefilter; the individual regexes of the hits are then run for
//!   captures and the longest designator wins (lowest alternative index on
//!   ties).
//!
//! Both honour the same tier contract, so the parser does not care which one
//! it holds.

use super::compiler::TierPattern;
use crate::api::{Backend, SeparatorClasses};
use crate::error::CompileError;
use crate::{MatchTier, TierMatch};
use regex::{Captures, Regex, RegexBuilder, RegexSet, RegexSetBuilder};
use std::cmp::Reverse;
use std::fmt::Debug;

/// Compiled-program size limit per regex; large datasets produce large alternations.
const SIZE_LIMIT: usize = 64 * (1 << 20);

/// Matching capability for a single tier.
pub(crate) trait TierMatcher: Debug + Send + Sync {
    fn tier(&self) -> MatchTier;

    /// Match the whole of `haystack`, returning the tier captures on success.
    fn find<'h>(&self, haystack: &'h str) -> Option<TierMatch<'h>>;
}

/// Compile `pattern` with the requested backend.
pub(crate) fn build(
    pattern: &TierPattern,
    separators: &SeparatorClasses,
    backend: Backend,
) -> Result<Box<dyn TierMatcher>, CompileError> {
    Ok(match backend {
        Backend::Regex => Box::new(RegexTierMatcher::compile(pattern, separators)?),
        Backend::Set => Box::new(SetTierMatcher::compile(pattern, separators)?),
    })
}

fn to_tier_match<'h>(caps: &Captures<'h>) -> Option<TierMatch<'h>> {
    Some(TierMatch {
        short: caps.name("short")?.as_str(),
        separator: caps.name("sep").map(|m| m.as_str()),
        designator: caps.name("des")?.as_str(),
    })
}

#[derive(Debug)]
pub(crate) struct RegexTierMatcher {
    tier: MatchTier,
    regex: Regex,
}

impl RegexTierMatcher {
    pub(crate) fn compile(pattern: &TierPattern, separators: &SeparatorClasses) -> Result<Self, CompileError> {
        let regex = RegexBuilder::new(&pattern.source(separators))
            .size_limit(SIZE_LIMIT)
            .build()
            .map_err(|e| CompileError::new(pattern.tier, e))?;
        Ok(RegexTierMatcher { tier: pattern.tier, regex })
    }
}

impl TierMatcher for RegexTierMatcher {
    fn tier(&self) -> MatchTier {
        self.tier
    }

    fn find<'h>(&self, haystack: &'h str) -> Option<TierMatch<'h>> {
        self.regex.captures(haystack).as_ref().and_then(to_tier_match)
    }
}

#[derive(Debug)]
pub(crate) struct SetTierMatcher {
    tier: MatchTier,
    set: RegexSet,
    /// One regex per set member, same order.
    regexes: Vec<Regex>,
}

impl SetTierMatcher {
    pub(crate) fn compile(pattern: &TierPattern, separators: &SeparatorClasses) -> Result<Self, CompileError> {
        let sources = pattern.sources(separators);
        let set = RegexSetBuilder::new(&sources)
            .size_limit(SIZE_LIMIT)
            .build()
            .map_err(|e| CompileError::new(pattern.tier, e))?;
        let regexes = sources
            .iter()
            .map(|src| RegexBuilder::new(src).size_limit(SIZE_LIMIT).build())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CompileError::new(pattern.tier, e))?;
        Ok(SetTierMatcher { tier: pattern.tier, set, regexes })
    }
}

impl TierMatcher for SetTierMatcher {
    fn tier(&self) -> MatchTier {
        self.tier
    }

    fn find<'h>(&self, haystack: &'h str) -> Option<TierMatch<'h>> {
        self.set
            .matches(haystack)
            .iter()
            .filter_map(|idx| {
                let caps = self.regexes[idx].captures(haystack)?;
                to_tier_match(&caps).map(|m| (idx, m))
            })
            .max_by_key(|(idx, m)| (m.designator.len(), Reverse(*idx)))
            .map(|(_, m)| m)
    }
}
