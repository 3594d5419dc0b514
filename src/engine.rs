//! Pattern compilation and tiered matching engine.
//!
//! Parsing a company name is a two-phase affair:
//!
//! ```text
//! Dataset ──┐
//! Options ──┤  CompiledTierSet::build          (compiled_tiers.rs)
//!           │    - blacklist routing            (blacklist.rs)
//!           │    - escape + alternation join    (compiler.rs)
//!           │    - one TierMatcher per tier     (matcher.rs)
//!           └──────────────┬───────────────
//!                          │
//! input ── PreparedInput ──┼─ NFD, initials collapse, paren-free form
//!          (prepare.rs)    │
//!                          v
//!                Parser::parse (parser.rs)
//!                  End → EndFallback → EndCont → Begin → BeginFallback
//!                  first tier that matches wins
//!                          │
//!                          v
//!                resolve_match (resolve.rs)
//!                  - NFC, trimming, paren corner case
//!                  - standard designator lookup
//!                          │
//!                          v
//!                     ParseResult
//! ```
//!
//! Compilation happens once, in `Parser::new`/`Parser::with_options`; it is the
//! only place an error can surface. A built `Parser` is immutable and can be
//! shared across threads.
//!
//! ## Responsibilities by module
//!
//! - `blacklist.rs`: decides which spellings go to the primary tiers and which
//!   are deferred to the fallback tiers.
//! - `compiler.rs`: per-tier inclusion rules, designator escaping, and the
//!   tier-specific regex wrapping.
//! - `compiled_tiers.rs`: the compiled, immutable set of tier matchers plus a
//!   `TierMask` of the tiers that exist.
//! - `matcher.rs`: the `TierMatcher` seam and its two backends.
//! - `prepare.rs`: per-input preparation and cheap input classification.
//! - `resolve.rs`: turns raw captures into a user-facing `ParseResult`.
//! - `metrics.rs`: per-tier trace for verbose parsing.
//!
//! ## Debugging
//!
//! Compilation logs tier sizes at `debug` level and every parse logs the tiers
//! it tries at `trace` level via `tracing`.

#[path = "engine/blacklist.rs"]
mod blacklist;
#[path = "engine/compiled_tiers.rs"]
mod compiled_tiers;
#[path = "engine/compiler.rs"]
mod compiler;
#[path = "engine/matcher.rs"]
mod matcher;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/parser.rs"]
mod parser;
#[path = "engine/prepare.rs"]
mod prepare;
#[path = "engine/resolve.rs"]
mod resolve;

pub use compiled_tiers::TierMask;
pub use metrics::{AttemptOutcome, TierAttempt};
pub use parser::Parser;
