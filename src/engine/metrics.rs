//! Per-tier parse trace.
//!
//! `Parser::parse` keeps the hot path free of bookkeeping; `Parser::parse_verbose`
//! records one `TierAttempt` per tier it considered, which is what the CLI's
//! `--verbose` report prints.

use crate::MatchTier;
use std::fmt;
use std::time::Duration;

/// What happened to a tier during one parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// No dataset spelling qualified for the tier, so it was never compiled.
    Absent,
    /// The input could not match (e.g. continuous-script tier on ASCII input).
    Skipped,
    /// The tier ran and did not match.
    NoMatch,
    /// The tier ran and matched; later tiers were not tried.
    Matched,
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AttemptOutcome::Absent => "absent",
            AttemptOutcome::Skipped => "skipped",
            AttemptOutcome::NoMatch => "no match",
            AttemptOutcome::Matched => "matched",
        })
    }
}

/// Timing and outcome for a single tier.
#[derive(Debug, Clone)]
pub struct TierAttempt {
    pub tier: MatchTier,
    pub outcome: AttemptOutcome,
    /// Time spent in the matcher (zero unless the tier ran).
    pub duration: Duration,
    /// Escaped alternatives compiled into the tier (zero when absent).
    pub alternatives: usize,
}
