// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Operator precedence: one structuring sweep per precedence group.
//!
//! The table is ordered highest precedence first. Each group sweeps the
//! sibling list once, restructuring every matching operator that has not
//! already been structured, then recurses the same group into every token's
//! children. The "already structured" test is the absence of functional
//! children — except for subscript operators, which keep their bracket
//! contents from the nesting pass and count as structured once a child
//! *precedes* them in the source.
//!
//! Most groups sweep left to right. Exponentiation and the assignment groups
//! sweep right to left, which is how right associativity falls out.
//!
//! A binary operator immediately followed by a still-unstructured prefix
//! operator of equal or lower precedence is not matched; the pair stays flat.
//! This mirrors R's own precedence rules (`a^-b` needs parentheses there
//! too), and reconstruction remains lossless either way.

use crate::source_analysis::error::ParseError;
use crate::source_analysis::lexeme;
use crate::source_analysis::token::{Token, TokenKind};

use super::keywords;

#[derive(Clone, Copy)]
enum Assoc {
    LeftToRight,
    RightToLeft,
}

#[derive(Clone, Copy)]
enum Arity {
    Any,
    UnaryOnly,
    BinaryOnly,
}

struct Group {
    ops: &'static [&'static str],
    user_defined: bool,
    assoc: Assoc,
    arity: Arity,
}

const fn group(ops: &'static [&'static str], assoc: Assoc, arity: Arity) -> Group {
    Group {
        ops,
        user_defined: false,
        assoc,
        arity,
    }
}

/// The precedence table, highest precedence first.
const GROUPS: &[Group] = &[
    group(&["::", ":::"], Assoc::LeftToRight, Arity::Any),
    group(&["$", "@"], Assoc::LeftToRight, Arity::Any),
    group(&["[", "[["], Assoc::LeftToRight, Arity::Any),
    group(&["^"], Assoc::RightToLeft, Arity::Any),
    group(&["+", "-"], Assoc::LeftToRight, Arity::UnaryOnly),
    group(&[":"], Assoc::LeftToRight, Arity::Any),
    Group {
        ops: &[],
        user_defined: true,
        assoc: Assoc::LeftToRight,
        arity: Arity::Any,
    },
    group(&["|>"], Assoc::LeftToRight, Arity::Any),
    group(&["*", "/"], Assoc::LeftToRight, Arity::Any),
    group(&["+", "-"], Assoc::LeftToRight, Arity::BinaryOnly),
    group(
        &["<", ">", "<>", "<=", ">=", "==", "!="],
        Assoc::LeftToRight,
        Arity::Any,
    ),
    group(&["!", "!!", "!!!"], Assoc::LeftToRight, Arity::Any),
    group(&["&", "&&"], Assoc::LeftToRight, Arity::Any),
    group(&["|", "||"], Assoc::LeftToRight, Arity::Any),
    group(&["~"], Assoc::LeftToRight, Arity::Any),
    group(&["->", "->>"], Assoc::RightToLeft, Arity::Any),
    group(&["<-", "<<-", ":="], Assoc::RightToLeft, Arity::Any),
    group(&["="], Assoc::RightToLeft, Arity::Any),
    group(&["?", "??"], Assoc::LeftToRight, Arity::Any),
];

/// Applies every precedence group in table order.
pub(super) fn apply(tokens: &mut Vec<Token>) -> Result<(), ParseError> {
    for group in GROUPS {
        apply_group(tokens, group)?;
    }
    Ok(())
}

fn apply_group(tokens: &mut Vec<Token>, group: &Group) -> Result<(), ParseError> {
    match group.assoc {
        Assoc::LeftToRight => {
            let mut i = 0;
            while i < tokens.len() {
                if matches_group(&tokens[i], group) && !is_structured(&tokens[i]) {
                    if let Some(_consumed_prev) = restructure_at(tokens, i, group)? {
                        continue;
                    }
                }
                i += 1;
            }
        }
        Assoc::RightToLeft => {
            let mut i = tokens.len();
            while i > 0 {
                let index = i - 1;
                if matches_group(&tokens[index], group) && !is_structured(&tokens[index]) {
                    if let Some(consumed_prev) = restructure_at(tokens, index, group)? {
                        i = if consumed_prev { index.saturating_sub(1) } else { index };
                        continue;
                    }
                }
                i -= 1;
            }
        }
    }
    for token in tokens.iter_mut() {
        apply_group(token.children_mut(), group)?;
    }
    Ok(())
}

fn matches_group(token: &Token, group: &Group) -> bool {
    if !matches!(
        token.kind(),
        TokenKind::OperatorBinary
            | TokenKind::OperatorBracket
            | TokenKind::OperatorUnaryLeft
            | TokenKind::OperatorUnaryRight
    ) {
        return false;
    }
    let lex = token.lexeme().as_str();
    let listed = if group.user_defined {
        lexeme::is_user_defined_operator_complete(lex)
    } else {
        group.ops.contains(&lex)
    };
    if !listed {
        return false;
    }
    match group.arity {
        Arity::Any => true,
        Arity::UnaryOnly => token.kind() == TokenKind::OperatorUnaryRight,
        Arity::BinaryOnly => token.kind() == TokenKind::OperatorBinary,
    }
}

fn is_structured(token: &Token) -> bool {
    if token.kind() == TokenKind::OperatorBracket {
        token
            .children()
            .iter()
            .any(|c| !c.is_presentation() && c.start_pos() < token.script_pos())
    } else {
        token.functional_children().next().is_some()
    }
}

fn is_unstructured_prefix(token: &Token) -> bool {
    matches!(
        token.kind(),
        TokenKind::OperatorUnaryRight | TokenKind::OperatorUnaryLeft
    ) && !is_structured(token)
}

/// Restructures the operator at `index`. Returns `None` when the operator is
/// deliberately skipped, otherwise `Some(consumed_prev)`.
fn restructure_at(
    tokens: &mut Vec<Token>,
    index: usize,
    group: &Group,
) -> Result<Option<bool>, ParseError> {
    let pos = tokens[index].script_pos();
    match tokens[index].kind() {
        TokenKind::OperatorBracket => {
            if index == 0 {
                return Err(ParseError::unexpected_shape(
                    "subscript operator has no left operand",
                    pos,
                ));
            }
            let operand = tokens.remove(index - 1);
            let bracket = &mut tokens[index - 1];
            let insert_at = bracket
                .children()
                .iter()
                .take_while(|c| c.is_presentation())
                .count();
            bracket.insert_child(insert_at, operand);
            Ok(Some(true))
        }
        TokenKind::OperatorBinary => {
            if index == 0 || index + 1 == tokens.len() {
                return Err(ParseError::unexpected_shape(
                    format!("binary `{}` is missing an operand", tokens[index].lexeme()),
                    pos,
                ));
            }
            if is_unstructured_prefix(&tokens[index + 1]) {
                return Ok(None);
            }
            if tokens[index + 1].kind() == TokenKind::KeyWord
                && keywords::is_bindable(&tokens[index + 1])
                && tokens[index + 1].functional_children().next().is_none()
            {
                keywords::bind_at(tokens, index + 1)?;
            }
            let rhs = tokens.remove(index + 1);
            let lhs = tokens.remove(index - 1);
            let op = &mut tokens[index - 1];
            op.push_child(lhs);
            op.push_child(rhs);
            Ok(Some(true))
        }
        TokenKind::OperatorUnaryRight => {
            // Consecutive prefix operators of the same group bind
            // innermost-first: `- -x` is `-(-x)`.
            let mut last = index;
            while last + 1 < tokens.len()
                && tokens[last + 1].kind() == TokenKind::OperatorUnaryRight
                && matches_group(&tokens[last + 1], group)
                && !is_structured(&tokens[last + 1])
            {
                last += 1;
            }
            if last + 1 == tokens.len() {
                return Err(ParseError::unexpected_shape(
                    format!("prefix `{}` is missing its operand", tokens[index].lexeme()),
                    pos,
                ));
            }
            if is_unstructured_prefix(&tokens[last + 1]) {
                return Ok(None);
            }
            for m in (index..=last).rev() {
                let operand = tokens.remove(m + 1);
                tokens[m].push_child(operand);
            }
            Ok(Some(false))
        }
        TokenKind::OperatorUnaryLeft => {
            if tokens[index].lexeme() != "~" {
                return Err(ParseError::malformed_input(
                    format!("`{}` cannot take its operand on the left", tokens[index].lexeme()),
                    pos,
                ));
            }
            if index == 0 {
                return Err(ParseError::unexpected_shape(
                    "left-unary `~` has no operand",
                    pos,
                ));
            }
            let operand = tokens.remove(index - 1);
            tokens[index - 1].push_child(operand);
            Ok(Some(true))
        }
        _ => Ok(None),
    }
}
