// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Tree shaping: from a flat token list to one tree per statement.
//!
//! The shaper applies a fixed sequence of structural passes, each consuming
//! the output of the previous one:
//!
//! 1. [`presentation`] — whitespace/comment/newline runs become a child of
//!    the next functional token;
//! 2. [`brackets`] — every open bracket adopts its contents and close;
//! 3. [`separators`] — every `,` adopts the argument that follows it;
//! 4. [`calls`] — every function name adopts its call bracket;
//! 5. [`precedence`] — operators adopt their operands, one precedence group
//!    at a time;
//! 6. [`keywords`] — `if`/`for`/`while`/`function`/`repeat`/`else` adopt
//!    their condition and body;
//! 7. [`terminators`] — statement terminators attach to the statement they
//!    end, and newlines between brace-block statements are promoted to
//!    terminators.
//!
//! Passes move tokens by ownership transfer; nothing in the tree is copied
//! or rewritten, so the in-order concatenation of lexemes stays
//! byte-identical to the source.

mod brackets;
mod calls;
mod keywords;
mod precedence;
mod presentation;
mod separators;
mod terminators;

use super::error::ParseError;
use super::token::Token;

/// Shapes a flat token list into a list of statement trees.
///
/// # Errors
///
/// Returns [`ParseError::UnexpectedTokenShape`] when a pass precondition is
/// violated, and [`ParseError::MalformedInput`] for a left-unary operator
/// other than `~`.
pub fn shape(tokens: Vec<Token>) -> Result<Vec<Token>, ParseError> {
    let tokens = presentation::attach(tokens);
    let mut tokens = brackets::nest(tokens)?;
    separators::group(&mut tokens);
    calls::bind(&mut tokens)?;
    precedence::apply(&mut tokens)?;
    keywords::bind(&mut tokens)?;
    terminators::attach_end_statements(&mut tokens);
    terminators::promote_brace_newlines(&mut tokens);
    Ok(tokens)
}
