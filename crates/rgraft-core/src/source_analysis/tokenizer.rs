// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Conversion of the flat lexeme sequence into typed tokens.
//!
//! The tokenizer makes a single left-to-right pass, classifying each lexeme
//! through a first-match-wins cascade. The interesting decisions need
//! context:
//!
//! - a syntactic name is a [`TokenKind::FunctionName`] only when the next
//!   element is `(` on the same line;
//! - a newline terminates the statement only outside brackets, once the
//!   statement contains an element, and when the previous element is not an
//!   operator awaiting its right operand;
//! - `+ - ! ~ ? ?? !! !!!` are prefix operators when nothing usable stands
//!   to their left, and infix otherwise;
//! - `~` with a left operand but nothing usable to its right on the same
//!   line takes its operand on the left.
//!
//! Positions are byte offsets; each token advances the running position by
//! its lexeme's byte length, so the token stream partitions the source
//! exactly.

use ecow::EcoString;

use super::error::ParseError;
use super::lexeme;
use super::token::{Token, TokenKind};

/// Classifies `lexemes` into a flat sequence of typed tokens.
///
/// # Errors
///
/// Returns [`ParseError::MalformedInput`] for a lexeme that matches no rule
/// of the cascade.
pub fn tokenize(lexemes: &[EcoString]) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::with_capacity(lexemes.len());
    let mut pos = 0usize;
    let mut line = 0usize;
    let mut depth = 0usize;
    let mut has_element = false;
    // Last functional lexeme and the line it appeared on.
    let mut prev: Option<(EcoString, usize)> = None;

    for (i, s) in lexemes.iter().enumerate() {
        let kind = classify(s, i, lexemes, line, depth, has_element, prev.as_ref())
            .ok_or_else(|| {
                ParseError::malformed_input(format!("cannot classify lexeme `{s}`"), pos)
            })?;
        tokens.push(Token::new(kind, s.clone(), pos));

        if kind == TokenKind::EndStatement {
            has_element = false;
            prev = None;
        } else if !kind.is_presentation() {
            has_element = true;
            prev = Some((s.clone(), line));
        }
        if lexeme::is_open_bracket(s) {
            depth += 1;
        } else if lexeme::is_close_bracket(s) {
            depth = depth.saturating_sub(1);
        }
        if lexeme::is_newline(s) {
            line += 1;
        }
        pos += s.len();
    }
    Ok(tokens)
}

/// The classification cascade; first match wins.
fn classify(
    s: &str,
    i: usize,
    lexemes: &[EcoString],
    line: usize,
    depth: usize,
    has_element: bool,
    prev: Option<&(EcoString, usize)>,
) -> Option<TokenKind> {
    if lexeme::is_keyword(s) {
        return Some(TokenKind::KeyWord);
    }
    if lexeme::is_syntactic_name(s) {
        return Some(if call_bracket_follows(i, lexemes) {
            TokenKind::FunctionName
        } else {
            TokenKind::SyntacticName
        });
    }
    if lexeme::is_comment(s) {
        return Some(TokenKind::Comment);
    }
    if lexeme::is_string_literal(s) {
        return Some(TokenKind::ConstantString);
    }
    if lexeme::is_newline(s) {
        let continues = prev.is_some_and(|(p, _)| {
            lexeme::is_user_defined_operator_complete(p)
                || (lexeme::is_reserved_operator(p) && p != "~")
        });
        return Some(if has_element && depth == 0 && !continues {
            TokenKind::EndStatement
        } else {
            TokenKind::NewLine
        });
    }
    if s == ";" {
        return Some(TokenKind::EndStatement);
    }
    if s == "," {
        return Some(TokenKind::Separator);
    }
    if lexeme::is_spaces(s) {
        return Some(TokenKind::Space);
    }
    if lexeme::is_bracket(s) {
        return Some(TokenKind::Bracket);
    }
    if lexeme::is_bracket_operator(s) {
        return Some(TokenKind::OperatorBracket);
    }
    if lexeme::is_unary_capable(s) {
        let prefix_context = match prev {
            None => true,
            Some((p, prev_line)) => {
                !lexeme::is_valid_binary_left_operand(p) || *prev_line != line
            }
        };
        if prefix_context {
            return Some(TokenKind::OperatorUnaryRight);
        }
    }
    if s == "~" && !right_operand_follows(i, lexemes) {
        return Some(TokenKind::OperatorUnaryLeft);
    }
    if lexeme::is_reserved_operator(s) || lexeme::is_user_defined_operator_complete(s) {
        return Some(TokenKind::OperatorBinary);
    }
    None
}

/// Looks past same-line spaces for a `(` that makes the name a call.
fn call_bracket_follows(i: usize, lexemes: &[EcoString]) -> bool {
    let mut j = i + 1;
    while j < lexemes.len() && lexeme::is_spaces(&lexemes[j]) {
        j += 1;
    }
    lexemes.get(j).is_some_and(|next| next == "(")
}

/// Looks past same-line spaces for an element that could begin the right
/// operand of `~`.
fn right_operand_follows(i: usize, lexemes: &[EcoString]) -> bool {
    let mut j = i + 1;
    while j < lexemes.len() && lexeme::is_spaces(&lexemes[j]) {
        j += 1;
    }
    match lexemes.get(j) {
        None => false,
        Some(next) if lexeme::is_comment(next) || lexeme::is_newline(next) => false,
        Some(next) => lexeme::is_valid_binary_right_operand(next),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::lex;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(&lex(source).unwrap())
            .unwrap()
            .into_iter()
            .map(|t| t.kind())
            .collect()
    }

    fn kind_of(source: &str, lexeme_text: &str) -> TokenKind {
        let tokens = tokenize(&lex(source).unwrap()).unwrap();
        tokens
            .iter()
            .find(|t| t.lexeme() == lexeme_text)
            .unwrap_or_else(|| panic!("no token `{lexeme_text}` in `{source}`"))
            .kind()
    }

    #[test]
    fn positions_partition_the_source() {
        let source = "x <- f(1, 2) # call\n";
        let tokens = tokenize(&lex(source).unwrap()).unwrap();
        let mut pos = 0;
        for t in &tokens {
            assert_eq!(t.script_pos(), pos);
            pos += t.lexeme().len();
        }
        assert_eq!(pos, source.len());
    }

    #[test]
    fn function_name_requires_call_bracket_on_same_line() {
        assert_eq!(kind_of("f(x)", "f"), TokenKind::FunctionName);
        assert_eq!(kind_of("f (x)", "f"), TokenKind::FunctionName);
        assert_eq!(kind_of("f\n(x)", "f"), TokenKind::SyntacticName);
        assert_eq!(kind_of("f + 1", "f"), TokenKind::SyntacticName);
    }

    #[test]
    fn keywords_win_over_names() {
        assert_eq!(kind_of("while(a) b", "while"), TokenKind::KeyWord);
        assert_eq!(kind_of("whileish(a)", "whileish"), TokenKind::FunctionName);
    }

    #[test]
    fn minus_is_prefix_without_left_operand() {
        assert_eq!(kind_of("-a", "-"), TokenKind::OperatorUnaryRight);
        assert_eq!(kind_of("a - b", "-"), TokenKind::OperatorBinary);
        assert_eq!(kind_of("(-a)", "-"), TokenKind::OperatorUnaryRight);
        assert_eq!(kind_of("f(a, -b)", "-"), TokenKind::OperatorUnaryRight);
    }

    #[test]
    fn minus_after_newline_is_prefix() {
        let tokens = tokenize(&lex("a\n-b").unwrap()).unwrap();
        assert_eq!(tokens[1].kind(), TokenKind::EndStatement);
        assert_eq!(tokens[2].kind(), TokenKind::OperatorUnaryRight);
    }

    #[test]
    fn newline_terminates_only_at_depth_zero() {
        assert_eq!(kinds("f(a,\nb)"), [
            TokenKind::FunctionName,
            TokenKind::Bracket,
            TokenKind::SyntacticName,
            TokenKind::Separator,
            TokenKind::NewLine,
            TokenKind::SyntacticName,
            TokenKind::Bracket,
        ]);
    }

    #[test]
    fn newline_after_open_operator_continues_statement() {
        let tokens = tokenize(&lex("x <-\n1\n").unwrap()).unwrap();
        let newline_kinds: Vec<_> = tokens
            .iter()
            .filter(|t| t.lexeme() == "\n")
            .map(|t| t.kind())
            .collect();
        assert_eq!(newline_kinds, [TokenKind::NewLine, TokenKind::EndStatement]);
    }

    #[test]
    fn newline_before_any_element_is_presentation() {
        assert_eq!(kinds("\n\nx\n"), [
            TokenKind::NewLine,
            TokenKind::NewLine,
            TokenKind::SyntacticName,
            TokenKind::EndStatement,
        ]);
    }

    #[test]
    fn newlines_inside_braces_do_not_terminate() {
        let tokens = tokenize(&lex("{\nb\n}\n").unwrap()).unwrap();
        let newline_kinds: Vec<_> = tokens
            .iter()
            .filter(|t| t.lexeme() == "\n")
            .map(|t| t.kind())
            .collect();
        assert_eq!(newline_kinds, [
            TokenKind::NewLine,
            TokenKind::NewLine,
            TokenKind::EndStatement,
        ]);
    }

    #[test]
    fn tilde_forms() {
        assert_eq!(kind_of("y ~ x", "~"), TokenKind::OperatorBinary);
        assert_eq!(kind_of("~x", "~"), TokenKind::OperatorUnaryRight);
        assert_eq!(kind_of("f(y ~)", "~"), TokenKind::OperatorUnaryLeft);
    }

    #[test]
    fn strings_comments_separators() {
        assert_eq!(kind_of("x <- \"hi\"", "\"hi\""), TokenKind::ConstantString);
        assert_eq!(kind_of("x # note", "# note"), TokenKind::Comment);
        assert_eq!(kind_of("f(a, b)", ","), TokenKind::Separator);
        assert_eq!(kind_of("a; b", ";"), TokenKind::EndStatement);
    }

    #[test]
    fn subscripts_are_bracket_operators() {
        assert_eq!(kind_of("x[1]", "["), TokenKind::OperatorBracket);
        assert_eq!(kind_of("x[[1]]", "[["), TokenKind::OperatorBracket);
        assert_eq!(kind_of("x[[1]]", "]]"), TokenKind::OperatorBracket);
    }

    #[test]
    fn user_defined_operator_is_binary() {
        assert_eq!(kind_of("a %o% b", "%o%"), TokenKind::OperatorBinary);
        assert_eq!(kind_of("a %between% b", "%between%"), TokenKind::OperatorBinary);
    }

    #[test]
    fn backtick_names_are_names() {
        assert_eq!(kind_of("`my var` <- 1", "`my var`"), TokenKind::SyntacticName);
    }
}
