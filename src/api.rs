use crate::MatchTier;
use crate::engine::TierAttempt;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

/// Languages written without mandatory inter-word spacing.
pub const DEFAULT_CONTINUOUS_LANGUAGES: &[&str] = &["zh", "ja", "ko"];

/// Designators that are a proper subset of a longer designator and must only
/// be tried after the longer form has failed.
pub const DEFAULT_BLACKLIST: &[&str] = &[
    "Vennootschap", // vs. `Vennootschap Onder Firma`
    "Co.",          // vs. `& Co.`
    "Co. L.L.C.",   // vs. `& Co. L.L.C.`
    "L.L.C.",       // vs. `Co. L.L.C.`
    "L.C.",         // vs. `L.L.C.`
];

/// Which matcher implementation backs each tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// One alternation regex per tier.
    #[default]
    Regex,
    /// A `RegexSet` over one pattern per designator spelling; the longest
    /// matching designator wins within a tier.
    Set,
}

/// Regex character classes used when escaping designators and wrapping tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatorClasses {
    /// Class repeated in place of whitespace inside a designator.
    pub word: String,
    /// Class of the single character required between name and designator.
    ///
    /// The default is any separator or punctuation except a closing paren,
    /// so `Foo (Bar)Ltd.` does not split after `)`.
    pub boundary: String,
    /// Characters accepted as an opening parenthesis around a designator.
    pub open_parens: Vec<char>,
    /// Characters accepted as a closing parenthesis around a designator.
    pub close_parens: Vec<char>,
}

impl Default for SeparatorClasses {
    fn default() -> Self {
        let close_parens = vec![')', '\u{ff09}'];
        SeparatorClasses {
            word: r"[\p{Z},()\-]".to_string(),
            boundary: format!(r"[\p{{Z}}\p{{P}}--{}]", char_class(&close_parens)),
            open_parens: vec!['(', '\u{ff08}'],
            close_parens,
        }
    }
}

impl SeparatorClasses {
    /// Regex class matching any opening parenthesis.
    pub(crate) fn open_class(&self) -> String {
        char_class(&self.open_parens)
    }

    /// Regex class matching any closing parenthesis.
    pub(crate) fn close_class(&self) -> String {
        char_class(&self.close_parens)
    }

    /// Every parenthesis character, opening and closing.
    pub(crate) fn all_parens(&self) -> Vec<char> {
        self.open_parens.iter().chain(self.close_parens.iter()).copied().collect()
    }

    pub(crate) fn is_open_paren(&self, s: &str) -> bool {
        let mut chars = s.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if self.open_parens.contains(&c))
    }
}

fn char_class(chars: &[char]) -> String {
    let mut class = String::from("[");
    for c in chars {
        let mut buf = [0u8; 4];
        class.push_str(&regex::escape(c.encode_utf8(&mut buf)));
    }
    class.push(']');
    class
}

/// Tunables for pattern compilation and matching.
///
/// Defaults reproduce the stock behavior: continuous scripts `zh`/`ja`/`ko`,
/// the stock blacklist, the default separator classes, and the regex backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Language tags (primary subtag, lowercase) matched by the continuous-script tier.
    pub continuous_languages: BTreeSet<String>,
    /// Designator spellings deferred to the fallback tiers.
    pub blacklist: BTreeSet<String>,
    pub separators: SeparatorClasses,
    pub backend: Backend,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            continuous_languages: DEFAULT_CONTINUOUS_LANGUAGES.iter().map(|s| s.to_string()).collect(),
            blacklist: DEFAULT_BLACKLIST.iter().map(|s| s.to_string()).collect(),
            separators: SeparatorClasses::default(),
            backend: Backend::default(),
        }
    }
}

impl Options {
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_blacklist<I, S>(mut self, blacklist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blacklist = blacklist.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_continuous_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.continuous_languages = languages.into_iter().map(|l| l.into().to_lowercase()).collect();
        self
    }

    pub fn with_separators(mut self, separators: SeparatorClasses) -> Self {
        self.separators = separators;
        self
    }

    /// True if `lang` (e.g. `"zh"`, `"zh-Hant"`, `"ja_JP"`) names a continuous script.
    pub(crate) fn is_continuous(&self, lang: Option<&str>) -> bool {
        let Some(lang) = lang else {
            return false;
        };
        let primary = lang.split(['-', '_']).next().unwrap_or(lang).to_lowercase();
        self.continuous_languages.contains(&primary)
    }
}

/// Where a designator was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    None,
    Begin,
    End,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Position::None => "none",
            Position::Begin => "begin",
            Position::End => "end",
        })
    }
}

/// Outcome of [`Parser::parse`](crate::Parser::parse).
///
/// All strings are in canonical composed form (NFC). When `matched` is false,
/// `short_name == input` and `position == Position::None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// The input, recomposed.
    pub input: String,
    /// True if a designator was found.
    pub matched: bool,
    /// The input with the designator and its separator removed, trimmed.
    pub short_name: String,
    /// The designator as written in the input.
    pub designator: Option<String>,
    /// Where the designator was found.
    pub position: Position,
    /// The tier that produced the match.
    pub tier: Option<MatchTier>,
    /// Standard abbreviation (or canonical form) of the matched dataset entry.
    pub standard_designator: Option<String>,
}

impl ParseResult {
    /// An unmatched result for `input` (already recomposed).
    pub(crate) fn unmatched(input: String) -> Self {
        ParseResult {
            short_name: input.clone(),
            input,
            matched: false,
            designator: None,
            position: Position::None,
            tier: None,
            standard_designator: None,
        }
    }
}

/// Result from [`Parser::parse_verbose`](crate::Parser::parse_verbose).
///
/// Meant for debugging: carries a per-tier trace and timings alongside the
/// ordinary result.
#[derive(Debug, Clone)]
pub struct ParseReport {
    pub result: ParseResult,
    /// One entry per tier, in try-order, up to and including the matching tier.
    pub attempts: Vec<TierAttempt>,
    /// Total elapsed time including input preparation.
    pub elapsed: Duration,
}
