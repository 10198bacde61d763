// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexeme classification for R source code.
//!
//! A lexeme is a maximal substring that names a single R element. This module
//! provides the stateless predicates the lexer and tokenizer use to decide
//! where one lexeme ends and what the next one may become. Everything here
//! operates on plain `&str`; no state is carried between calls.
//!
//! The most important predicate is [`is_valid`], which returns `true` when a
//! string is either a complete lexeme or a legitimate prefix of one. The lexer
//! keeps extending its buffer exactly as long as [`is_valid`] holds, which is
//! what makes segmentation longest-match.

/// The closed set of R keywords.
pub const KEYWORDS: &[&str] = &[
    "if", "else", "repeat", "while", "function", "for", "in", "next", "break",
];

/// The closed set of reserved operators, including the assignment family and
/// the reserved `%…%` special operators.
pub const RESERVED_OPERATORS: &[&str] = &[
    "::", ":::", "$", "@", "^", ":", "%%", "%/%", "%*%", "%o%", "%x%", "%in%", "/", "*", "+", "-",
    "<", ">", "<=", ">=", "==", "!=", "!", "&", "&&", "|", "||", "|>", "~", "->", "->>", "<-",
    "<<-", "=", "?", "??", "!!", "!!!", ":=",
];

/// Operators that may act as right-unary (prefix) operators.
pub const UNARY_CAPABLE: &[&str] = &["+", "-", "!", "~", "?", "??", "!!", "!!!"];

/// Returns `true` for the R keywords (`if`, `else`, `repeat`, …).
#[must_use]
pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

/// Returns `true` for a complete reserved operator.
#[must_use]
pub fn is_reserved_operator(s: &str) -> bool {
    RESERVED_OPERATORS.contains(&s)
}

/// Returns `true` when `s` is a prefix of at least one reserved operator.
///
/// `<<` on its own is valid through this predicate: it will combine with a
/// following `-` to form `<<-`.
#[must_use]
pub fn is_reserved_operator_prefix(s: &str) -> bool {
    RESERVED_OPERATORS.iter().any(|op| op.starts_with(s))
}

/// Returns `true` for operators that may appear in prefix position.
#[must_use]
pub fn is_unary_capable(s: &str) -> bool {
    UNARY_CAPABLE.contains(&s)
}

/// Returns `true` for round and curly brackets.
#[must_use]
pub fn is_bracket(s: &str) -> bool {
    matches!(s, "(" | ")" | "{" | "}")
}

/// Returns `true` for the subscript bracket operators.
#[must_use]
pub fn is_bracket_operator(s: &str) -> bool {
    matches!(s, "[" | "]" | "[[" | "]]")
}

/// Returns `true` for lexemes that open a bracket of any kind.
#[must_use]
pub fn is_open_bracket(s: &str) -> bool {
    matches!(s, "(" | "{" | "[" | "[[")
}

/// Returns `true` for lexemes that close a bracket of any kind.
#[must_use]
pub fn is_close_bracket(s: &str) -> bool {
    matches!(s, ")" | "}" | "]" | "]]")
}

/// Returns `true` for a comment lexeme (`#` to end of line).
#[must_use]
pub fn is_comment(s: &str) -> bool {
    s.starts_with('#')
}

/// Returns `true` when `s` opens as a string literal (`"`, `'`, or a
/// backtick-quoted name).
#[must_use]
pub fn is_string_literal(s: &str) -> bool {
    matches!(s.as_bytes().first(), Some(b'"' | b'\'' | b'`'))
}

/// Returns `true` for the three newline lexemes.
#[must_use]
pub fn is_newline(s: &str) -> bool {
    matches!(s, "\r" | "\n" | "\r\n")
}

/// Returns `true` for a run of spaces, or a single tab.
#[must_use]
pub fn is_spaces(s: &str) -> bool {
    (!s.is_empty() && s.bytes().all(|b| b == b' ')) || s == "\t"
}

/// Returns `true` for a functional lexeme: anything that is not whitespace,
/// a comment, or a newline.
#[must_use]
pub fn is_element(s: &str) -> bool {
    !(is_spaces(s) || is_comment(s) || is_newline(s))
}

/// Returns `true` when `s` matches the syntactic-name pattern or opens with a
/// backtick.
///
/// The pattern is deliberately loose: numeric literals such as `1.5` or
/// `0x1F` segment the same way names do, and the tokenizer treats both as
/// [`SyntacticName`](super::TokenKind::SyntacticName) tokens.
#[must_use]
pub fn is_syntactic_name(s: &str) -> bool {
    if s.starts_with('`') {
        return true;
    }
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '.' || c == '_')
}

/// Returns `true` for a still-open user-defined operator (`%` with no closing
/// `%` yet).
#[must_use]
pub fn is_user_defined_operator_partial(s: &str) -> bool {
    s.starts_with('%') && !s[1..].contains('%')
}

/// Returns `true` for a complete user-defined operator `%…%`.
#[must_use]
pub fn is_user_defined_operator_complete(s: &str) -> bool {
    s.len() >= 2
        && s.starts_with('%')
        && s.ends_with('%')
        && !s[1..s.len() - 1].contains('%')
}

/// Returns `true` when a lexeme may stand to the left of a binary operator:
/// a name, a string constant, or a closing bracket.
#[must_use]
pub fn is_valid_binary_left_operand(s: &str) -> bool {
    is_element(s)
        && (is_syntactic_name(s) || is_string_literal(s) || matches!(s, ")" | "}" | "]" | "]]"))
}

/// Returns `true` when a lexeme may begin the right operand of a binary
/// operator: a name, a string constant, an opening bracket, a keyword, or a
/// prefix operator.
#[must_use]
pub fn is_valid_binary_right_operand(s: &str) -> bool {
    is_element(s)
        && (is_syntactic_name(s)
            || is_string_literal(s)
            || is_keyword(s)
            || is_unary_capable(s)
            || matches!(s, "(" | "{" | "[" | "[["))
}

/// Returns `true` when a string literal is still open, or closed with no
/// trailing characters.
///
/// The closing quote may be escaped by a backslash, in which case it does not
/// close the literal.
fn string_literal_is_open_or_just_closed(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(quote) = chars.next() else {
        return false;
    };
    let mut escaped = false;
    let mut closed = false;
    for c in chars {
        if closed {
            return false;
        }
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == quote {
            closed = true;
        }
    }
    true
}

/// Returns `true` when a string literal has been closed by an unescaped
/// closing quote.
#[must_use]
pub fn is_closed_string_literal(s: &str) -> bool {
    is_string_literal(s) && !is_unclosed_string_literal(s)
}

/// Returns `true` when a string literal is still waiting for its closing
/// quote.
#[must_use]
pub fn is_unclosed_string_literal(s: &str) -> bool {
    if !is_string_literal(s) {
        return false;
    }
    let quote = s.chars().next().unwrap_or('"');
    let mut chars = s.chars();
    chars.next();
    let mut escaped = false;
    for c in chars {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == quote {
            return false;
        }
    }
    true
}

/// Returns `true` when `s` is a complete lexeme or a legitimate prefix of
/// one.
///
/// This is the predicate that drives longest-match segmentation. Subtleties:
///
/// - A string literal stays valid while open; once closed, any further
///   character invalidates it.
/// - A comment is valid until the end of its line; the newline is not part
///   of the comment.
/// - A lexeme containing `\r` or `\n` is only valid as `\r`, `\n`, or
///   `\r\n` (strings excepted, which are checked first).
/// - A user-defined operator `%…%` is valid while open; once the trailing
///   `%` closes it, any further character invalidates it.
#[must_use]
pub fn is_valid(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    if is_string_literal(s) {
        return string_literal_is_open_or_just_closed(s);
    }
    if is_comment(s) {
        return !s.bytes().any(|b| matches!(b, b'\r' | b'\n'));
    }
    if s.bytes().any(|b| matches!(b, b'\r' | b'\n')) {
        return is_newline(s);
    }
    if is_spaces(s) || is_syntactic_name(s) {
        return true;
    }
    if let Some(interior) = s.strip_prefix('%') {
        return match interior.find('%') {
            None => true,
            Some(i) => i == interior.len() - 1,
        };
    }
    if is_reserved_operator_prefix(s) {
        return true;
    }
    matches!(s, "(" | ")" | "{" | "}" | "[" | "[[" | "]" | "]]" | ";" | ",")
}
