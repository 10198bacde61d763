// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Keyword-statement binding.
//!
//! `if`, `for`, `while`, and `function` adopt a condition and a body;
//! `repeat` and `else` adopt only a body. A body that is itself one of these
//! keywords is bound first and then adopted whole, which is what makes
//! chains like `if(a) b else if(c) d else while(e) f` collapse under the
//! first `if`. An `else` directly following an `if` body is adopted together
//! with its own bound body.
//!
//! Statement terminators are still free siblings when this pass runs, so an
//! `else` on the next top-level line is fenced off by the intervening
//! [`TokenKind::EndStatement`] and is not adopted.

use crate::source_analysis::error::ParseError;
use crate::source_analysis::token::{Token, TokenKind};

const TWO_PART: &[&str] = &["if", "for", "while", "function"];
const ONE_PART: &[&str] = &["repeat", "else"];

/// Returns `true` for keywords that bind a statement of their own.
pub(super) fn is_bindable(token: &Token) -> bool {
    token.kind() == TokenKind::KeyWord
        && (TWO_PART.contains(&token.lexeme().as_str())
            || ONE_PART.contains(&token.lexeme().as_str()))
}

/// Binds every statement keyword in the list, recursing into children.
pub(super) fn bind(tokens: &mut Vec<Token>) -> Result<(), ParseError> {
    let mut i = 0;
    while i < tokens.len() {
        if is_bindable(&tokens[i]) && tokens[i].functional_children().next().is_none() {
            bind_at(tokens, i)?;
        }
        i += 1;
    }
    for token in tokens.iter_mut() {
        bind(token.children_mut())?;
    }
    Ok(())
}

/// Binds the keyword at `index`, consuming the following siblings that
/// belong to its statement.
pub(super) fn bind_at(tokens: &mut Vec<Token>, index: usize) -> Result<(), ParseError> {
    let keyword = tokens[index].lexeme().clone();
    if TWO_PART.contains(&keyword.as_str()) {
        adopt_next(tokens, index, "condition")?;
    }
    if tokens
        .get(index + 1)
        .is_some_and(|t| is_bindable(t) && t.functional_children().next().is_none())
    {
        bind_at(tokens, index + 1)?;
    }
    adopt_next(tokens, index, "body")?;
    if keyword == "if"
        && tokens
            .get(index + 1)
            .is_some_and(|t| t.kind() == TokenKind::KeyWord && t.lexeme() == "else")
    {
        bind_at(tokens, index + 1)?;
        adopt_next(tokens, index, "else branch")?;
    }
    Ok(())
}

fn adopt_next(tokens: &mut Vec<Token>, index: usize, part: &str) -> Result<(), ParseError> {
    if index + 1 >= tokens.len() {
        return Err(ParseError::unexpected_shape(
            format!("`{}` has no {part}", tokens[index].lexeme()),
            tokens[index].script_pos(),
        ));
    }
    let adopted = tokens.remove(index + 1);
    tokens[index].push_child(adopted);
    Ok(())
}
