// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Longest-match segmentation of R source into lexemes.
//!
//! The lexer walks the source one character at a time, growing a buffer for
//! as long as [`lexeme::is_valid`] accepts the extended buffer. When an
//! extension would make the buffer invalid, the buffer is emitted as a lexeme
//! and a new buffer starts at the current character.
//!
//! # Bracket stack
//!
//! Subscript brackets need context the buffer alone cannot provide: in
//! `k[[l[6]]]` the first `]` after `6` closes a single `[`, so the following
//! `]` must *not* be merged into a `]]` lexeme. The lexer keeps a stack of
//! booleans recording, for each unmatched open bracket, whether it was a
//! single `[` (`true`) or a double `[[` (`false`), and refuses to extend `]`
//! into `]]` while the innermost open bracket expects a single close.
//!
//! A close bracket with an empty stack, or a terminal buffer that is not a
//! valid lexeme, is [`ParseError::MalformedInput`].

use ecow::EcoString;

use super::error::ParseError;
use super::lexeme;

/// Segments `source` into an ordered sequence of lexemes.
///
/// The concatenation of the returned lexemes is byte-identical to `source`.
///
/// # Errors
///
/// Returns [`ParseError::MalformedInput`] when a buffer cannot form a valid
/// lexeme or a subscript close bracket has no matching open.
///
/// # Examples
///
/// ```
/// use rgraft_core::source_analysis::lex;
///
/// let lexemes = lex("x <- 1\n").unwrap();
/// assert_eq!(lexemes, ["x", " ", "<-", " ", "1", "\n"]);
/// ```
pub fn lex(source: &str) -> Result<Vec<EcoString>, ParseError> {
    let mut lexemes = Vec::new();
    let mut stack: Vec<bool> = Vec::new();
    let mut start = 0usize;

    for (pos, ch) in source.char_indices() {
        if pos == start {
            continue;
        }
        let candidate = &source[start..pos + ch.len_utf8()];
        let blocked_double_close = candidate == "]]" && stack.last() == Some(&true);
        if lexeme::is_valid(candidate) && !blocked_double_close {
            continue;
        }
        emit(&mut lexemes, &mut stack, &source[start..pos], start)?;
        start = pos;
    }
    if start < source.len() {
        emit(&mut lexemes, &mut stack, &source[start..], start)?;
    }
    Ok(lexemes)
}

/// Emits one finished buffer, keeping the bracket stack in step.
fn emit(
    lexemes: &mut Vec<EcoString>,
    stack: &mut Vec<bool>,
    buffer: &str,
    at: usize,
) -> Result<(), ParseError> {
    if !lexeme::is_valid(buffer) {
        return Err(ParseError::malformed_input(
            format!("`{buffer}` is not a valid lexeme"),
            at,
        ));
    }
    match buffer {
        "[" => stack.push(true),
        "[[" => stack.push(false),
        "]" | "]]" => {
            if stack.pop().is_none() {
                return Err(ParseError::malformed_input(
                    format!("`{buffer}` has no matching open bracket"),
                    at,
                ));
            }
        }
        _ => {}
    }
    lexemes.push(EcoString::from(buffer));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_ok(source: &str) -> Vec<EcoString> {
        lex(source).unwrap()
    }

    #[test]
    fn empty_source() {
        assert!(lex_ok("").is_empty());
    }

    #[test]
    fn simple_assignment() {
        assert_eq!(lex_ok("x <- 1 + 2\n"), [
            "x", " ", "<-", " ", "1", " ", "+", " ", "2", "\n"
        ]);
    }

    #[test]
    fn longest_match_prefers_compound_operators() {
        assert_eq!(lex_ok("a<-b"), ["a", "<-", "b"]);
        assert_eq!(lex_ok("a<<-b"), ["a", "<<-", "b"]);
        assert_eq!(lex_ok("a<=b"), ["a", "<=", "b"]);
        assert_eq!(lex_ok("a< -b"), ["a", "<", " ", "-", "b"]);
    }

    #[test]
    fn lossless_concatenation() {
        let source = "f <- function(x, y = 2) {\n  x + y # sum\n}\nf(1)\n";
        let joined: String = lex_ok(source).iter().map(EcoString::as_str).collect();
        assert_eq!(joined, source);
    }

    #[test]
    fn comments_stop_at_newline() {
        assert_eq!(lex_ok("# note\nx"), ["# note", "\n", "x"]);
    }

    #[test]
    fn string_literals_absorb_anything() {
        assert_eq!(lex_ok("\"a + b # not a comment\""), ["\"a + b # not a comment\""]);
        assert_eq!(lex_ok("'it\\'s'"), ["'it\\'s'"]);
        assert_eq!(lex_ok("`odd name`(1)"), ["`odd name`", "(", "1", ")"]);
    }

    #[test]
    fn crlf_is_one_lexeme() {
        assert_eq!(lex_ok("a\r\nb"), ["a", "\r\n", "b"]);
        assert_eq!(lex_ok("a\n\nb"), ["a", "\n", "\n", "b"]);
    }

    #[test]
    fn user_defined_operator() {
        assert_eq!(lex_ok("a %between% b"), ["a", " ", "%between%", " ", "b"]);
        assert_eq!(lex_ok("a%%b"), ["a", "%%", "b"]);
    }

    #[test]
    fn bracket_stack_separates_single_closes() {
        // The inner `]` closes `[6`, so it must not merge with the next `]`.
        assert_eq!(lex_ok("k[[l[[m[6]]]]]"), [
            "k", "[[", "l", "[[", "m", "[", "6", "]", "]]", "]]"
        ]);
    }

    #[test]
    fn double_close_when_stack_expects_double() {
        assert_eq!(lex_ok("x[[1]]"), ["x", "[[", "1", "]]"]);
        assert_eq!(lex_ok("x[1]"), ["x", "[", "1", "]"]);
        assert_eq!(lex_ok("x[[y[1]]]"), ["x", "[[", "y", "[", "1", "]", "]]"]);
    }

    #[test]
    fn unmatched_close_bracket_is_malformed() {
        let err = lex("x]]").unwrap_err();
        assert!(matches!(err, ParseError::MalformedInput { .. }));
    }

    #[test]
    fn spaces_and_single_tabs_segment() {
        assert_eq!(lex_ok("a   b"), ["a", "   ", "b"]);
        assert_eq!(lex_ok("a\t\tb"), ["a", "\t", "\t", "b"]);
    }
}
