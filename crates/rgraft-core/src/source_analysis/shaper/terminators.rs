// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! End-of-statement attachment and brace-block newline promotion.
//!
//! The attachment pass makes every free [`TokenKind::EndStatement`] the last
//! child of the statement it terminates, leaving one tree per top-level
//! statement. The pass is idempotent: once attached, no terminator remains
//! free.
//!
//! The promotion pass handles statements inside `{ … }` blocks, whose
//! newlines the tokenizer left as presentation (bracket depth was non-zero).
//! For each inner statement after the first, the newline-bearing presentation
//! at its very start is detached, promoted to [`TokenKind::EndStatement`],
//! and attached to the preceding inner statement. The close `}` terminates
//! the last inner statement the same way. The newline immediately following
//! `{` is cosmetic and stays presentation.

use crate::source_analysis::token::{Token, TokenKind};

/// Attaches every free terminator to the preceding statement.
pub(super) fn attach_end_statements(tokens: &mut Vec<Token>) {
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].kind() == TokenKind::EndStatement && i > 0 {
            let end = tokens.remove(i);
            tokens[i - 1].push_child(end);
        } else {
            i += 1;
        }
    }
}

/// Promotes statement-separating newlines inside every brace block.
pub(super) fn promote_brace_newlines(tokens: &mut Vec<Token>) {
    for token in tokens.iter_mut() {
        if token.kind() == TokenKind::Bracket && token.lexeme() == "{" {
            promote_in_block(token);
        }
        promote_brace_newlines(token.children_mut());
    }
}

fn promote_in_block(brace: &mut Token) {
    let children = brace.children_mut();
    let Some(first_statement) = children.iter().position(|c| !c.is_presentation()) else {
        return;
    };
    let mut i = first_statement + 1;
    while i < children.len() {
        if children[i].is_presentation() || children[i].kind() == TokenKind::EndStatement {
            i += 1;
            continue;
        }
        let has_newline = children[i]
            .subtree_leading_presentation()
            .is_some_and(|p| p.lexeme().bytes().any(|b| matches!(b, b'\r' | b'\n')));
        if has_newline {
            if let Some(mut pres) = children[i].take_subtree_leading_presentation() {
                pres.set_kind(TokenKind::EndStatement);
                children[i - 1].push_child(pres);
            }
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::parse_statements;

    #[test]
    fn attachment_is_idempotent() {
        let mut statements = parse_statements("a\nb\n").unwrap();
        let before: Vec<String> = statements.iter().map(Token::tree_string).collect();
        attach_end_statements(&mut statements);
        let after: Vec<String> = statements.iter().map(Token::tree_string).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn terminator_is_child_of_its_statement() {
        let statements = parse_statements("a\nb\n").unwrap();
        assert_eq!(statements.len(), 2);
        for stmt in &statements {
            let last = stmt.children().last().unwrap();
            assert_eq!(last.kind(), TokenKind::EndStatement);
        }
    }

    #[test]
    fn brace_newlines_become_inner_terminators() {
        let statements = parse_statements("{\n b\n c\n}\n").unwrap();
        assert_eq!(statements.len(), 1);
        let brace = &statements[0];
        assert_eq!(brace.lexeme(), "{");

        let b = &brace.children()[0];
        assert_eq!(b.lexeme(), "b");
        // `b` keeps its own leading newline (the cosmetic one after `{`)
        // and gains `c`'s newline as terminator.
        assert_eq!(b.children()[0].kind(), TokenKind::Presentation);
        let b_end = b.children().last().unwrap();
        assert_eq!(b_end.kind(), TokenKind::EndStatement);
        assert_eq!(b_end.lexeme(), "\n ");

        let c = &brace.children()[1];
        assert_eq!(c.lexeme(), "c");
        let c_end = c.children().last().unwrap();
        assert_eq!(c_end.kind(), TokenKind::EndStatement);
        assert_eq!(c_end.lexeme(), "\n");
    }

    #[test]
    fn promotion_preserves_text() {
        let source = "{\n b\n c\n}\n";
        let statements = parse_statements(source).unwrap();
        let text: String = statements.iter().map(Token::text).collect();
        assert_eq!(text, source);
    }
}
