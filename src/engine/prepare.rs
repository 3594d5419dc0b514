//! Input preparation and classification.
//!
//! Before any tier runs, the input is turned into the forms the tiers expect:
//!
//! ```text
//! input ──NFC──────────────────────────────▶ display     (ParseResult::input)
//!   └──NFD──collapse_initials──────────────▶ matching    (End, EndFallback, Begin, BeginFallback)
//!                    └──strip_parens───────▶ continuous  (EndCont)
//! ```
//!
//! The scan also records a few cheap `InputTraits` the parser uses to skip
//! tiers that cannot possibly match. False positives are fine; a trait only
//! ever *skips* work, it never causes a match.

use crate::api::SeparatorClasses;
use crate::normalize::{collapse_initials, strip_parens, to_display_form, to_match_form};

bitflags::bitflags! {
    /// Coarse input characteristics.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct InputTraits: u8 {
        const NON_ASCII = 1 << 0;
        const PARENS    = 1 << 1;
        const BLANK     = 1 << 2;
        /// The whole input is one designator spelling. Set by the parser,
        /// which owns the spelling index.
        const DESIGNATOR = 1 << 3;
    }
}

/// The input in every form the tiers need.
#[derive(Debug, Clone)]
pub(crate) struct PreparedInput {
    /// Recomposed input.
    pub display: String,
    /// Decomposed, initials collapsed.
    pub matching: String,
    /// `matching` with parentheses and the whitespace around them removed.
    pub continuous: String,
    pub traits: InputTraits,
}

impl PreparedInput {
    pub(crate) fn scan(input: &str, separators: &SeparatorClasses) -> Self {
        let display = to_display_form(input);
        let matching = collapse_initials(&to_match_form(input));
        let parens = separators.all_parens();

        let mut traits = InputTraits::empty();
        if !matching.is_ascii() {
            traits |= InputTraits::NON_ASCII;
        }
        if matching.chars().any(|c| parens.contains(&c)) {
            traits |= InputTraits::PARENS;
        }
        if matching.trim().is_empty() {
            traits |= InputTraits::BLANK;
        }

        let continuous =
            if traits.contains(InputTraits::PARENS) { strip_parens(&matching, &parens) } else { matching.clone() };

        PreparedInput { display, matching, continuous, traits }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepares_every_form() {
        let seps = SeparatorClasses::default();
        let p = PreparedInput::scan("Soci\u{e9}t\u{e9} (P .J . S .C)", &seps);

        assert_eq!(p.display, "Soci\u{e9}t\u{e9} (P .J . S .C)");
        assert_eq!(p.matching, "Socie\u{301}te\u{301} (P. J. S. C)");
        assert_eq!(p.continuous, "Socie\u{301}te\u{301}P. J. S. C");
        assert!(p.traits.contains(InputTraits::NON_ASCII | InputTraits::PARENS));
        assert!(!p.traits.contains(InputTraits::BLANK));
    }

    #[test]
    fn ascii_input_without_parens() {
        let p = PreparedInput::scan("Profound Networks LLC", &SeparatorClasses::default());
        assert!(p.traits.is_empty());
        assert_eq!(p.continuous, p.matching);
    }

    #[test]
    fn blank_input() {
        let p = PreparedInput::scan("   ", &SeparatorClasses::default());
        assert!(p.traits.contains(InputTraits::BLANK));
    }
}
