// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Bracket nesting: every open bracket adopts everything up to and including
//! its matching close.
//!
//! After this pass a `(`, `{`, `[`, or `[[` token owns its contents, with
//! the close bracket as its last child. Nesting inside the collected range
//! is handled by recursing on the collected children.

use crate::source_analysis::error::ParseError;
use crate::source_analysis::lexeme;
use crate::source_analysis::token::Token;

/// Nests bracketed ranges into their openers.
pub(super) fn nest(tokens: Vec<Token>) -> Result<Vec<Token>, ParseError> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter();

    while let Some(mut token) = iter.next() {
        if lexeme::is_open_bracket(token.lexeme()) {
            let mut inner = Vec::new();
            let mut depth = 1usize;
            loop {
                let Some(next) = iter.next() else {
                    return Err(ParseError::unexpected_shape(
                        format!("`{}` is never closed", token.lexeme()),
                        token.script_pos(),
                    ));
                };
                if lexeme::is_open_bracket(next.lexeme()) {
                    depth += 1;
                } else if lexeme::is_close_bracket(next.lexeme()) {
                    depth -= 1;
                    if depth == 0 {
                        for child in nest(inner)? {
                            token.push_child(child);
                        }
                        token.push_child(next);
                        break;
                    }
                }
                inner.push(next);
            }
        }
        out.push(token);
    }
    Ok(out)
}
