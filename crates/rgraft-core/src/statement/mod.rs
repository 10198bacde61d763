// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The statement view: one R statement, its text, and its positions.
//!
//! A [`Statement`] wraps the root token of one statement tree. It exposes
//! the statement's extent in the script, two text renderings, and the
//! structural edit primitives (see [`edits`](self)).
//!
//! - [`Statement::text`] is lossless: it reproduces the statement's slice of
//!   the original source byte for byte.
//! - [`Statement::text_no_formatting`] strips presentation, normalises every
//!   terminator to `;`, and keeps exactly one space around the keywords that
//!   need one (`else`, `in`, `repeat`).
//!
//! After an edit changes the statement's length, the owner propagates the
//! returned delta to every later statement with
//! [`Statement::adjust_start_pos`].

mod edits;
mod error;

pub use error::EditError;

use crate::source_analysis::{Token, TokenKind};

/// The assignment operators recognised by [`Statement::is_assignment`].
const ASSIGNMENT_OPERATORS: &[&str] = &["->", "->>", "<-", "<<-", "="];

/// A single R statement backed by its token tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    root: Token,
}

impl Statement {
    /// Wraps a shaped statement root.
    #[must_use]
    pub fn new(root: Token) -> Self {
        Self { root }
    }

    /// Read access to the root token.
    #[must_use]
    pub fn root(&self) -> &Token {
        &self.root
    }

    /// The byte offset where this statement's text starts.
    #[must_use]
    pub fn start_pos(&self) -> usize {
        self.root.start_pos()
    }

    /// One past the byte offset of this statement's last character.
    #[must_use]
    pub fn end_pos(&self) -> usize {
        self.root.end_pos()
    }

    /// Returns `true` when the statement is rooted at an assignment
    /// operator.
    #[must_use]
    pub fn is_assignment(&self) -> bool {
        self.root.kind() == TokenKind::OperatorBinary
            && ASSIGNMENT_OPERATORS.contains(&self.root.lexeme().as_str())
    }

    /// Reconstructs the statement's exact source text.
    #[must_use]
    pub fn text(&self) -> String {
        self.root.text()
    }

    /// Renders the statement with formatting stripped: no presentation, `;`
    /// for terminators, single spaces around `else`, `in`, and `repeat`,
    /// and no trailing `;`.
    #[must_use]
    pub fn text_no_formatting(&self) -> String {
        let mut parts = Vec::new();
        self.root.collect_parts_with_kind(&mut parts);
        parts.sort_unstable_by_key(|&(pos, _, _)| pos);

        let mut out = String::new();
        for (_, kind, lexeme) in parts {
            match kind {
                _ if kind.is_presentation() => {}
                TokenKind::Empty => {}
                TokenKind::EndStatement => out.push(';'),
                TokenKind::KeyWord if matches!(lexeme, "else" | "in" | "repeat") => {
                    out.push(' ');
                    out.push_str(lexeme);
                    out.push(' ');
                }
                _ => out.push_str(lexeme),
            }
        }
        let trimmed = out.trim();
        trimmed.strip_suffix(';').unwrap_or(trimmed).to_string()
    }

    /// Adds `delta` to the position of every token at or beyond `min_pos`.
    pub fn adjust_start_pos(&mut self, delta: isize, min_pos: usize) {
        self.root.shift(delta, min_pos);
    }

    /// Returns `true` when the statement mentions a call to `name`.
    #[must_use]
    pub fn contains_function(&self, name: &str) -> bool {
        let mut found = false;
        self.root.visit(&mut |t| {
            if t.kind() == TokenKind::FunctionName && t.lexeme() == name {
                found = true;
            }
        });
        found
    }

    /// Returns `true` when the statement uses the operator `name`.
    #[must_use]
    pub fn contains_operator(&self, name: &str) -> bool {
        let mut found = false;
        self.root.visit(&mut |t| {
            if is_operator_kind(t.kind()) && t.lexeme() == name {
                found = true;
            }
        });
        found
    }
}

pub(crate) fn is_operator_kind(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::OperatorBinary
            | TokenKind::OperatorBracket
            | TokenKind::OperatorUnaryLeft
            | TokenKind::OperatorUnaryRight
    )
}

impl Token {
    /// Collects `(script_pos, kind, lexeme)` for every token in the subtree.
    pub(crate) fn collect_parts_with_kind<'a>(
        &'a self,
        out: &mut Vec<(usize, TokenKind, &'a str)>,
    ) {
        out.push((self.script_pos(), self.kind(), self.lexeme().as_str()));
        for child in self.children() {
            child.collect_parts_with_kind(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::parse_statements;

    fn statement(source: &str) -> Statement {
        let mut roots = parse_statements(source).unwrap();
        assert_eq!(roots.len(), 1);
        Statement::new(roots.remove(0))
    }

    #[test]
    fn positions_and_text() {
        let stmt = statement("x <- 1 + 2\n");
        assert_eq!(stmt.start_pos(), 0);
        assert_eq!(stmt.end_pos(), 11);
        assert_eq!(stmt.text(), "x <- 1 + 2\n");
    }

    #[test]
    fn no_formatting_strips_whitespace_and_terminator() {
        let stmt = statement("x <- 1 + 2\n");
        assert_eq!(stmt.text_no_formatting(), "x<-1+2");
    }

    #[test]
    fn no_formatting_keeps_spaces_around_word_keywords() {
        let stmt = statement("for(i in 1:3) print(i)\n");
        assert_eq!(stmt.text_no_formatting(), "for(i in 1:3)print(i)");

        let stmt = statement("repeat {\n b\n c\n}\n");
        assert_eq!(stmt.text_no_formatting(), "repeat {b;c;}");
    }

    #[test]
    fn no_formatting_drops_comments() {
        let stmt = statement("# c1\na = b # c2\n");
        assert_eq!(stmt.text_no_formatting(), "a=b");
    }

    #[test]
    fn assignment_detection() {
        assert!(statement("x <- 1\n").is_assignment());
        assert!(statement("x = 1\n").is_assignment());
        assert!(statement("1 -> x\n").is_assignment());
        assert!(statement("x <<- 1\n").is_assignment());
        assert!(!statement("x == 1\n").is_assignment());
        assert!(!statement("f(x)\n").is_assignment());
    }

    #[test]
    fn adjust_start_pos_shifts_the_whole_tree() {
        let mut stmt = statement("x <- 1\n");
        stmt.adjust_start_pos(10, 0);
        assert_eq!(stmt.start_pos(), 10);
        assert_eq!(stmt.end_pos(), 17);
        assert_eq!(stmt.text(), "x <- 1\n");
    }

    #[test]
    fn containment_queries() {
        let stmt = statement("y <- f(g(x)) + 1\n");
        assert!(stmt.contains_function("f"));
        assert!(stmt.contains_function("g"));
        assert!(!stmt.contains_function("x"));
        assert!(stmt.contains_operator("+"));
        assert!(stmt.contains_operator("<-"));
        assert!(!stmt.contains_operator("*"));
    }
}
