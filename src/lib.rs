#[macro_use]
mod macros;
mod api;
mod dataset;
mod engine;
mod error;
mod normalize;

#[cfg(test)]
mod tests;

pub use api::{Backend, Options, ParseReport, ParseResult, Position, SeparatorClasses};
pub use dataset::{Dataset, DatasetError, DesignatorEntry};
pub use engine::{AttemptOutcome, Parser, TierAttempt, TierMask};
pub use error::{CompileError, Error};

use serde::Serialize;
use std::fmt;

// --- Internal types ---------------------------------------------------------

/// One of the five matching strategies, listed in the order they are tried.
///
/// The fallback and continuous-script tiers exist only to work around
/// ambiguity and segmentation limits; callers see their matches reported as
/// [`Position::End`] or [`Position::Begin`] (see [`MatchTier::position`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Trailing designator, separator required before it.
    End,
    /// Trailing designator drawn only from the blacklist.
    EndFallback,
    /// Trailing designator in a continuous script, no separator required.
    EndCont,
    /// Leading designator, separator required after it.
    Begin,
    /// Leading designator drawn only from the blacklist.
    BeginFallback,
}

impl MatchTier {
    /// All tiers in try-order.
    pub const ALL: [MatchTier; 5] =
        [MatchTier::End, MatchTier::EndFallback, MatchTier::EndCont, MatchTier::Begin, MatchTier::BeginFallback];

    /// The position reported to callers for a match from this tier.
    pub fn position(self) -> Position {
        match self {
            MatchTier::End | MatchTier::EndFallback | MatchTier::EndCont => Position::End,
            MatchTier::Begin | MatchTier::BeginFallback => Position::Begin,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, MatchTier::EndFallback | MatchTier::BeginFallback)
    }

    pub fn is_begin(self) -> bool {
        matches!(self, MatchTier::Begin | MatchTier::BeginFallback)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            MatchTier::End => "end",
            MatchTier::EndFallback => "end_fallback",
            MatchTier::EndCont => "end_cont",
            MatchTier::Begin => "begin",
            MatchTier::BeginFallback => "begin_fallback",
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw captures of a successful tier match, borrowed from the prepared
/// (decomposed) input the tier ran against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TierMatch<'h> {
    /// Remaining text, untrimmed.
    pub short: &'h str,
    /// The single separator character, for tiers that require one.
    pub separator: Option<&'h str>,
    /// Matched designator text, including any parentheses in its span.
    pub designator: &'h str,
}
