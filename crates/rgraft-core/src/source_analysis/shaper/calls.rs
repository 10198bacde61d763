// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Function-call binding: a function name adopts its call bracket.
//!
//! The tokenizer only classifies a name as [`TokenKind::FunctionName`] when
//! `(` follows on the same line, so after bracket nesting the call bracket is
//! always the immediate next sibling. Anything else is an
//! [`UnexpectedTokenShape`](crate::source_analysis::ParseError) precondition
//! failure.

use crate::source_analysis::error::ParseError;
use crate::source_analysis::token::{Token, TokenKind};

/// Binds every function name to its call bracket, recursing into children.
pub(super) fn bind(tokens: &mut Vec<Token>) -> Result<(), ParseError> {
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].kind() == TokenKind::FunctionName
            && !tokens[i]
                .children()
                .iter()
                .any(|c| c.kind() == TokenKind::Bracket)
        {
            let call_follows = tokens
                .get(i + 1)
                .is_some_and(|t| t.kind() == TokenKind::Bracket && t.lexeme() == "(");
            if !call_follows {
                return Err(ParseError::unexpected_shape(
                    format!("function name `{}` has no call bracket", tokens[i].lexeme()),
                    tokens[i].script_pos(),
                ));
            }
            let bracket = tokens.remove(i + 1);
            tokens[i].push_child(bracket);
        }
        i += 1;
    }
    for token in tokens.iter_mut() {
        bind(token.children_mut())?;
    }
    Ok(())
}
