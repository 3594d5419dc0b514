//! Tiered designator parser.
//!
//! This module is the operational core of the engine. A `Parser` owns the
//! compiled tiers and, for each input:
//!
//! - prepares the input (`prepare.rs`);
//! - leaves an input that is nothing but a designator unmatched, since there
//!   is no short name to split off;
//! - tries the tiers in fixed order, skipping absent tiers and tiers the input
//!   cannot match;
//! - stops at the first tier that matches with a non-empty short name;
//! - resolves the captures into a `ParseResult` (`resolve.rs`).
//!
//! ## Tier order
//!
//! ```text
//! (1) End            trailing, separator required
//! (2) EndFallback    trailing, blacklisted spellings only
//! (3) EndCont        trailing, continuous scripts, no separator, parens stripped
//! (4) Begin          leading, separator required
//! (5) BeginFallback  leading, blacklisted spellings only
//! ```
//!
//! There is no backtracking across tiers: once a tier reports a match, later
//! tiers are not consulted.
//!
//! ## Concurrency
//!
//! `Parser` is immutable after construction and `Send + Sync`; share it behind
//! an `Arc` (or a plain reference with scoped threads) and call `parse`
//! concurrently without locking.

use super::compiled_tiers::{CompiledTier, CompiledTierSet, TierMask};
use super::metrics::{AttemptOutcome, TierAttempt};
use super::prepare::{InputTraits, PreparedInput};
use super::resolve::{StandardIndex, resolve_match};
use crate::api::{Options, ParseReport, ParseResult};
use crate::dataset::Dataset;
use crate::error::Error;
use crate::normalize::trim_space;
use crate::MatchTier;
use std::time::{Duration, Instant};

/// Splits company names into a short name and a legal-form designator.
///
/// Build once with [`Parser::new`] or [`Parser::with_options`], then call
/// [`Parser::parse`] as often as needed, from as many threads as needed.
///
/// ```text
/// "Profound Networks LLC"  ──parse──▶  short_name="Profound Networks"
///                                      designator="LLC", position=end
/// ```
#[derive(Debug)]
pub struct Parser {
    tiers: CompiledTierSet,
    standard: StandardIndex,
    options: Options,
}

/// Collects `TierAttempt`s when verbose parsing asked for them.
struct Recorder<'a> {
    attempts: Option<&'a mut Vec<TierAttempt>>,
}

impl Recorder<'_> {
    fn start(&self) -> Option<Instant> {
        self.attempts.as_ref().map(|_| Instant::now())
    }

    fn record(&mut self, tier: MatchTier, outcome: AttemptOutcome, started: Option<Instant>, alternatives: usize) {
        if let Some(attempts) = self.attempts.as_deref_mut() {
            let duration = started.map(|s| s.elapsed()).unwrap_or(Duration::ZERO);
            attempts.push(TierAttempt { tier, outcome, duration, alternatives });
        }
    }
}

impl Parser {
    /// Build a parser for `dataset` with default [`Options`].
    pub fn new(dataset: &Dataset) -> Result<Self, Error> {
        Self::with_options(dataset, Options::default())
    }

    /// Build a parser for `dataset` with explicit `options`.
    ///
    /// This is the only place an error can surface: an invalid dataset entry
    /// (`Error::Dataset`) or a pattern the regex engine rejects
    /// (`Error::Compile`). No partially built parser is ever returned.
    pub fn with_options(dataset: &Dataset, options: Options) -> Result<Self, Error> {
        dataset.validate()?;
        let tiers = CompiledTierSet::build(dataset, &options)?;
        let standard = StandardIndex::build(dataset);

        tracing::debug!(entries = dataset.len(), tiers = ?tiers.mask(), backend = ?options.backend, "parser ready");

        Ok(Parser { tiers, standard, options })
    }

    /// The tiers that were compiled (absent tiers are skipped at parse time).
    pub fn tiers(&self) -> TierMask {
        self.tiers.mask()
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Parse `input`, returning the split name.
    ///
    /// Total: every input, including empty strings, yields a result; inputs
    /// without a designator in a supported position come back unmatched with
    /// `short_name == input`.
    pub fn parse(&self, input: &str) -> ParseResult {
        let prepared = PreparedInput::scan(input, &self.options.separators);
        self.run(&prepared, Recorder { attempts: None })
    }

    /// Parse `input` and return a per-tier trace alongside the result.
    pub fn parse_verbose(&self, input: &str) -> ParseReport {
        let started = Instant::now();
        let prepared = PreparedInput::scan(input, &self.options.separators);
        let mut attempts = Vec::with_capacity(MatchTier::ALL.len());
        let result = self.run(&prepared, Recorder { attempts: Some(&mut attempts) });
        ParseReport { result, attempts, elapsed: started.elapsed() }
    }

    fn run(&self, prepared: &PreparedInput, mut recorder: Recorder<'_>) -> ParseResult {
        let mut traits = prepared.traits;
        if self.standard.lookup(&prepared.matching).is_some() {
            tracing::trace!(input = %prepared.display, "input is a bare designator");
            traits |= InputTraits::DESIGNATOR;
        }

        for tier in MatchTier::ALL {
            let Some(compiled) = self.tiers.get(tier) else {
                recorder.record(tier, AttemptOutcome::Absent, None, 0);
                continue;
            };

            if Self::cannot_match(tier, compiled, traits) {
                tracing::trace!(tier = %tier, "tier skipped");
                recorder.record(tier, AttemptOutcome::Skipped, None, compiled.alternatives);
                continue;
            }

            let haystack = if tier == MatchTier::EndCont { &prepared.continuous } else { &prepared.matching };
            let started = recorder.start();
            let found = compiled.matcher.find(haystack).filter(|m| !trim_space(m.short).is_empty());

            match found {
                Some(found) => {
                    tracing::trace!(tier = %compiled.matcher.tier(), designator = found.designator, "tier matched");
                    recorder.record(tier, AttemptOutcome::Matched, started, compiled.alternatives);
                    return resolve_match(&prepared.display, tier, &found, &self.options.separators, &self.standard);
                }
                None => {
                    tracing::trace!(tier = %tier, "tier did not match");
                    recorder.record(tier, AttemptOutcome::NoMatch, started, compiled.alternatives);
                }
            }
        }

        ParseResult::unmatched(prepared.display.clone())
    }

    /// Cheap pre-checks that rule a tier out without running it.
    fn cannot_match(tier: MatchTier, compiled: &CompiledTier, traits: InputTraits) -> bool {
        if traits.intersects(InputTraits::BLANK | InputTraits::DESIGNATOR) {
            return true;
        }
        tier == MatchTier::EndCont && compiled.requires_non_ascii && !traits.contains(InputTraits::NON_ASCII)
    }
}
