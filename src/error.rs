use crate::MatchTier;
use crate::dataset::DatasetError;

/// A compiled tier pattern was rejected by the regex engine.
///
/// With a well-formed dataset this indicates an escaping bug rather than bad
/// input.
#[derive(Debug, thiserror::Error)]
#[error("failed to compile {tier} pattern: {source}")]
pub struct CompileError {
    pub tier: MatchTier,
    #[source]
    pub source: Box<regex::Error>,
}

impl CompileError {
    pub(crate) fn new(tier: MatchTier, source: regex::Error) -> Self {
        CompileError { tier, source: Box::new(source) }
    }
}

/// Errors surfaced by [`Parser`](crate::Parser) construction.
///
/// Parsing itself never fails once a parser exists.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Compile(#[from] CompileError),
}
