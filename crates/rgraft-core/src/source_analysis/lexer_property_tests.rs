// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the lexer.
//!
//! These verify lexer invariants over generated inputs:
//!
//! 1. **Lexer never panics** — arbitrary string input either lexes or
//!    returns a `MalformedInput` error
//! 2. **Segmentation is lossless** — concatenating the lexemes reproduces
//!    the input byte for byte
//! 3. **Lexer is deterministic** — the same input always produces the same
//!    lexemes
//! 4. **Valid fragments lex cleanly** — known-valid R fragments never error

use proptest::prelude::*;

use super::lexer::lex;

/// Known-valid fragments that must lex without errors.
const VALID_FRAGMENTS: &[&str] = &[
    "x",
    "x <- 1",
    "f(a, b)",
    "a %in% b",
    "m[1, 2]",
    "l[[\"key\"]]",
    "if(a) b else c",
    "function(x) x + 1",
    "# comment",
    "\"string with ] and #\"",
    "`strange name`",
    "a |> f()",
    "x$y@z",
    "1:10",
    "a ~ b",
    "repeat break",
    "x <<- 2",
    "y -> x",
];

fn valid_fragment() -> impl Strategy<Value = String> {
    prop::sample::select(VALID_FRAGMENTS).prop_map(str::to_string)
}

proptest! {
    /// Property 1: the lexer never panics on arbitrary input.
    #[test]
    fn lexer_never_panics(input in "\\PC{0,200}") {
        let _result = lex(&input);
    }

    /// Property 2: successful segmentation is lossless.
    #[test]
    fn segmentation_is_lossless(input in "\\PC{0,200}") {
        if let Ok(lexemes) = lex(&input) {
            let joined: String = lexemes.iter().map(|l| l.as_str()).collect();
            prop_assert_eq!(joined, input);
        }
    }

    /// Property 3: lexing is deterministic.
    #[test]
    fn lexing_is_deterministic(input in "\\PC{0,200}") {
        let first = lex(&input);
        let second = lex(&input);
        prop_assert_eq!(first, second);
    }

    /// Property 4: known-valid fragments lex without errors.
    #[test]
    fn valid_fragments_lex_cleanly(fragment in valid_fragment()) {
        let lexemes = lex(&fragment);
        prop_assert!(lexemes.is_ok(), "fragment {:?} failed: {:?}", fragment, lexemes);
    }

    /// Property 4b: joining valid fragments with newlines still lexes.
    #[test]
    fn joined_fragments_lex_cleanly(
        fragments in prop::collection::vec(valid_fragment(), 1..6)
    ) {
        let source = fragments.join("\n");
        prop_assert!(lex(&source).is_ok());
    }
}
