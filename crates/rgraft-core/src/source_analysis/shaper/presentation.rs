// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Presentation attachment: the first shaping pass.
//!
//! Runs of whitespace, comments, and non-terminating newlines are merged into
//! a single [`TokenKind::Presentation`] token carrying their combined text
//! and the position of the first of them. That token becomes the first child
//! of the next functional token, so presentation never stands free between
//! siblings. A run with no following functional token (trailing whitespace
//! at the end of the script) is wrapped as the sole child of a synthetic
//! [`TokenKind::Empty`] token appended to the list.

use crate::source_analysis::token::{Token, TokenKind};

/// Merges presentation runs and attaches each to the following functional
/// token.
pub(super) fn attach(tokens: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut run: Option<Token> = None;

    for token in tokens {
        if token.is_presentation() {
            match run.as_mut() {
                None => {
                    run = Some(Token::new(
                        TokenKind::Presentation,
                        token.lexeme().clone(),
                        token.script_pos(),
                    ));
                }
                Some(p) => {
                    let mut merged = p.lexeme().clone();
                    merged.push_str(token.lexeme());
                    p.set_lexeme(merged);
                }
            }
        } else {
            let mut token = token;
            if let Some(p) = run.take() {
                token.insert_child(0, p);
            }
            out.push(token);
        }
    }

    if let Some(p) = run {
        let mut empty = Token::new(TokenKind::Empty, "", p.script_pos());
        empty.push_child(p);
        out.push(empty);
    }
    out
}
