// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parse errors, with miette integration for diagnostics.
//!
//! The parser surfaces exactly two error categories: input the lexer cannot
//! segment ([`ParseError::MalformedInput`]) and token arrangements a shaper
//! pass is not prepared to restructure
//! ([`ParseError::UnexpectedTokenShape`]). The parser never recovers,
//! retries, or logs; a failed parse leaves no partial tree behind.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// An error produced while parsing R source.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseError {
    /// The lexer produced an invalid terminal lexeme or found an unmatched
    /// close bracket.
    #[error("malformed input: {reason}")]
    #[diagnostic(code(rgraft::malformed_input))]
    MalformedInput {
        /// What the lexer could not accept.
        reason: String,
        /// Where in the source the offending lexeme starts.
        #[label("here")]
        span: SourceSpan,
    },

    /// A shaper pass met a structure its precondition forbids, such as a
    /// function name with no following call bracket.
    #[error("unexpected token shape: {reason}")]
    #[diagnostic(code(rgraft::unexpected_token_shape))]
    UnexpectedTokenShape {
        /// Which precondition was violated.
        reason: String,
        /// The script position of the token being restructured.
        #[label("while shaping this token")]
        span: SourceSpan,
    },
}

impl ParseError {
    /// Creates a [`ParseError::MalformedInput`] at a byte offset.
    #[must_use]
    pub fn malformed_input(reason: impl Into<String>, offset: usize) -> Self {
        Self::MalformedInput {
            reason: reason.into(),
            span: (offset, 1).into(),
        }
    }

    /// Creates a [`ParseError::UnexpectedTokenShape`] at a byte offset.
    #[must_use]
    pub fn unexpected_shape(reason: impl Into<String>, offset: usize) -> Self {
        Self::UnexpectedTokenShape {
            reason: reason.into(),
            span: (offset, 1).into(),
        }
    }

    /// Returns the byte offset the error points at.
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            Self::MalformedInput { span, .. } | Self::UnexpectedTokenShape { span, .. } => {
                span.offset()
            }
        }
    }
}
