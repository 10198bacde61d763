// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The three-stage front end: lexing, tokenization, and tree shaping.
//!
//! # Pipeline
//!
//! ```text
//! source → lex → [lexeme] → tokenize → [Token] → shape → [statement tree]
//! ```
//!
//! [`lex`] segments the source with longest-match rules and a bracket-depth
//! stack. [`tokenize`](tokenizer::tokenize) classifies each lexeme with
//! look-behind/look-ahead context. [`shape`](shaper::shape) applies the
//! ordered structural passes that leave one tree per statement.
//!
//! [`parse_statements`] runs all three stages:
//!
//! ```
//! use rgraft_core::source_analysis::parse_statements;
//!
//! let statements = parse_statements("x <- 1\ny <- 2\n").unwrap();
//! assert_eq!(statements.len(), 2);
//! assert_eq!(statements[0].text(), "x <- 1\n");
//! ```
//!
//! # Losslessness
//!
//! Every stage preserves the invariant that concatenating all lexemes in
//! position order reproduces the source byte for byte. The shaper moves
//! tokens into children lists but never rewrites text.
//!
//! # Errors
//!
//! The front end assumes syntactically valid R. Invalid input surfaces as
//! [`ParseError`]; no partial tree is produced.

mod error;
pub mod lexeme;
mod lexer;
pub mod shaper;
mod token;
pub mod tokenizer;

#[cfg(test)]
mod lexer_property_tests;

pub use error::ParseError;
pub use lexer::lex;
pub use token::{Token, TokenKind};

/// Parses R source into one tree per top-level statement.
///
/// # Errors
///
/// Returns [`ParseError`] when the source cannot be segmented or shaped.
pub fn parse_statements(source: &str) -> Result<Vec<Token>, ParseError> {
    let lexemes = lexer::lex(source)?;
    let tokens = tokenizer::tokenize(&lexemes)?;
    shaper::shape(tokens)
}

/// Heuristically decides whether `source` is a complete unit of input.
///
/// Intended for interactive callers deciding between evaluating a buffer and
/// showing a continuation prompt. Input is incomplete while a bracket is
/// unclosed, a string or backtick name is unterminated, a user-defined
/// operator is still open, or the last element expects a right operand.
/// Input the lexer rejects outright counts as complete so the caller can
/// surface the parse error instead of waiting forever.
///
/// # Examples
///
/// ```
/// use rgraft_core::source_analysis::is_input_complete;
///
/// assert!(is_input_complete("x <- 1"));
/// assert!(!is_input_complete("f(1,"));
/// assert!(!is_input_complete("x <-"));
/// assert!(!is_input_complete("\"open string"));
/// ```
#[must_use]
pub fn is_input_complete(source: &str) -> bool {
    let Ok(lexemes) = lexer::lex(source) else {
        return true;
    };
    let mut depth = 0usize;
    let mut last_element: Option<&str> = None;
    for lx in &lexemes {
        if lexeme::is_open_bracket(lx) {
            depth += 1;
        } else if lexeme::is_close_bracket(lx) {
            depth = depth.saturating_sub(1);
        }
        if lexeme::is_element(lx) {
            last_element = Some(lx.as_str());
        }
    }
    if depth > 0 {
        return false;
    }
    if let Some(last) = lexemes.last() {
        if lexeme::is_unclosed_string_literal(last) || lexeme::is_user_defined_operator_partial(last)
        {
            return false;
        }
    }
    match last_element {
        Some(last) => {
            let expects_operand = last == ","
                || lexeme::is_user_defined_operator_complete(last)
                || (lexeme::is_reserved_operator(last) && last != "~");
            !expects_operand
        }
        None => true,
    }
}
