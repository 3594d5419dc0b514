//! Tier compilation.
//!
//! This module holds the *static* side of the engine: everything derived from
//! the dataset and `Options` once, at parser construction.
//!
//! Parsing is split into two phases:
//!
//! 1. **Compile** (this module): route spellings through the blacklist, escape
//!    them into per-tier alternations (`compiler.rs`) and build one
//!    `TierMatcher` per tier that has any alternatives.
//! 2. **Run** (see `parser.rs`): prepare the input, then try the present tiers
//!    in order.
//!
//! ## Invariants
//!
//! - `CompiledTierSet::matchers` is indexed by `MatchTier::index()`; a `None`
//!   slot means the tier is absent and `TierMask` does not contain its bit.
//! - Nothing in here is mutated after `build` returns.

use super::blacklist::Blacklist;
use super::compiler::compile_tier;
use super::matcher::{self, TierMatcher};
use crate::MatchTier;
use crate::api::Options;
use crate::dataset::Dataset;
use crate::error::CompileError;

bitflags::bitflags! {
    /// Which tiers were compiled.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TierMask: u8 {
        const END            = 1 << 0;
        const END_FALLBACK   = 1 << 1;
        const END_CONT       = 1 << 2;
        const BEGIN          = 1 << 3;
        const BEGIN_FALLBACK = 1 << 4;
    }
}

impl TierMask {
    /// The bit for a single tier.
    pub fn of(tier: MatchTier) -> TierMask {
        match tier {
            MatchTier::End => TierMask::END,
            MatchTier::EndFallback => TierMask::END_FALLBACK,
            MatchTier::EndCont => TierMask::END_CONT,
            MatchTier::Begin => TierMask::BEGIN,
            MatchTier::BeginFallback => TierMask::BEGIN_FALLBACK,
        }
    }

    pub fn has(self, tier: MatchTier) -> bool {
        self.contains(TierMask::of(tier))
    }
}

/// One compiled tier.
#[derive(Debug)]
pub(crate) struct CompiledTier {
    pub matcher: Box<dyn TierMatcher>,
    /// Number of escaped alternatives in the tier.
    pub alternatives: usize,
    /// The tier cannot match input made only of ASCII.
    pub requires_non_ascii: bool,
}

/// The compiled, immutable set of tier matchers.
#[derive(Debug)]
pub(crate) struct CompiledTierSet {
    tiers: [Option<CompiledTier>; 5],
    mask: TierMask,
}

impl CompiledTierSet {
    /// Compile every tier for `dataset` under `options`.
    pub(crate) fn build(dataset: &Dataset, options: &Options) -> Result<Self, CompileError> {
        let blacklist = Blacklist::new(&options.blacklist);
        let mut tiers: [Option<CompiledTier>; 5] = Default::default();
        let mut mask = TierMask::empty();

        for tier in MatchTier::ALL {
            let Some(pattern) = compile_tier(dataset, tier, options, &blacklist) else {
                continue;
            };
            let matcher = matcher::build(&pattern, &options.separators, options.backend)?;
            tracing::debug!(
                tier = %matcher.tier(),
                alternatives = pattern.alternatives.len(),
                backend = ?options.backend,
                "compiled tier"
            );
            tiers[tier.index()] = Some(CompiledTier {
                matcher,
                alternatives: pattern.alternatives.len(),
                requires_non_ascii: pattern.requires_non_ascii,
            });
            mask |= TierMask::of(tier);
        }

        Ok(CompiledTierSet { tiers, mask })
    }

    pub(crate) fn get(&self, tier: MatchTier) -> Option<&CompiledTier> {
        self.tiers[tier.index()].as_ref()
    }

    pub(crate) fn mask(&self) -> TierMask {
        self.mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DesignatorEntry;

    #[test]
    fn absent_tiers_are_not_compiled() {
        let ds = Dataset::from_entries([DesignatorEntry::new("GmbH")]).unwrap();
        let set = CompiledTierSet::build(&ds, &Options::default()).unwrap();

        assert_eq!(set.mask(), TierMask::END);
        assert!(set.get(MatchTier::End).is_some());
        assert!(set.get(MatchTier::EndFallback).is_none());
        assert!(set.get(MatchTier::EndCont).is_none());
        assert!(set.get(MatchTier::Begin).is_none());
        assert!(set.get(MatchTier::BeginFallback).is_none());
    }

    #[test]
    fn every_tier_present_for_a_rich_dataset() {
        let ds = Dataset::from_entries([
            DesignatorEntry::new("Vennootschap Onder Firma").leading(),
            DesignatorEntry::new("Vennootschap").leading(),
            DesignatorEntry::new("株式会社").with_language("ja"),
        ])
        .unwrap();
        let set = CompiledTierSet::build(&ds, &Options::default()).unwrap();

        assert_eq!(set.mask(), TierMask::all());
        for tier in MatchTier::ALL {
            assert!(set.mask().has(tier));
            assert_eq!(set.get(tier).map(|t| t.matcher.tier()), Some(tier));
        }
        assert!(set.get(MatchTier::EndCont).unwrap().requires_non_ascii);
        assert!(!set.get(MatchTier::End).unwrap().requires_non_ascii);
    }

    #[test]
    fn empty_dataset_compiles_to_nothing() {
        let set = CompiledTierSet::build(&Dataset::new(), &Options::default()).unwrap();
        assert!(set.mask().is_empty());
    }

    #[test]
    fn bad_separator_class_surfaces_as_compile_error() {
        let ds = Dataset::from_entries([DesignatorEntry::new("GmbH")]).unwrap();
        let mut opts = Options::default();
        opts.separators.boundary = "[unclosed".to_string();
        let err = CompiledTierSet::build(&ds, &opts).unwrap_err();
        assert_eq!(err.tier, MatchTier::End);
    }
}
