// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Comma grouping: each separator absorbs the argument that follows it.
//!
//! Within a bracket's children, a `,` adopts every sibling up to the next
//! `,` or up to (but excluding) the final sibling, which is the close
//! bracket. An argument left empty (`f(a,,b)`) simply yields a childless
//! separator.

use crate::source_analysis::token::{Token, TokenKind};

/// Groups arguments under their separators, recursing into every token.
pub(super) fn group(tokens: &mut Vec<Token>) {
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].kind() == TokenKind::Separator {
            let mut end = i + 1;
            while end + 1 < tokens.len() && tokens[end].kind() != TokenKind::Separator {
                end += 1;
            }
            let absorbed: Vec<Token> = tokens.drain(i + 1..end).collect();
            for child in absorbed {
                tokens[i].push_child(child);
            }
        }
        i += 1;
    }
    for token in tokens.iter_mut() {
        group(token.children_mut());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::shaper::{brackets, presentation};
    use crate::source_analysis::{lex, tokenizer::tokenize};

    fn grouped(source: &str) -> Vec<Token> {
        let flat = presentation::attach(tokenize(&lex(source).unwrap()).unwrap());
        let mut nested = brackets::nest(flat).unwrap();
        group(&mut nested);
        nested
    }

    #[test]
    fn separators_absorb_their_argument() {
        let tokens = grouped("f(a, b, c)");
        let paren = &tokens[1];
        let kinds: Vec<_> = paren.children().iter().map(|c| c.lexeme().as_str()).collect();
        assert_eq!(kinds, ["a", ",", ",", ")"]);
        assert_eq!(paren.children()[1].functional_children().next().unwrap().lexeme(), "b");
        assert_eq!(paren.children()[2].functional_children().next().unwrap().lexeme(), "c");
    }

    #[test]
    fn empty_argument_leaves_childless_separator() {
        let tokens = grouped("f(a,,b)");
        let paren = &tokens[1];
        assert_eq!(paren.children()[0].lexeme(), "a");
        assert!(paren.children()[1].children().is_empty());
        assert_eq!(paren.children()[2].functional_children().next().unwrap().lexeme(), "b");
    }

    #[test]
    fn close_bracket_is_never_absorbed() {
        let tokens = grouped("f(a, b)");
        let paren = &tokens[1];
        assert_eq!(paren.children().last().unwrap().lexeme(), ")");
    }

    #[test]
    fn grouping_recurses_into_nested_calls() {
        let tokens = grouped("f(a, g(x, y))");
        let paren = &tokens[1];
        let sep = &paren.children()[1];
        let inner_paren = &sep.children()[1];
        assert_eq!(inner_paren.lexeme(), "(");
        assert_eq!(inner_paren.children()[0].lexeme(), "x");
        assert_eq!(inner_paren.children()[1].lexeme(), ",");
    }
}
