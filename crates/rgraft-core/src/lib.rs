// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lossless parsing and structural editing of R scripts.
//!
//! This crate parses R source into a tree of typed tokens that preserves
//! every byte of the original — whitespace, comments, and line breaks
//! included — and supports structural edits that keep the tree consistent
//! and the reconstructed source well-formed.
//!
//! - [`source_analysis`] — the front end: lexeme classification,
//!   longest-match lexing, tokenization, and the tree-shaping passes.
//! - [`statement`] — the per-statement view: positions, lossless and
//!   formatting-stripped text, and the five edit primitives.
//! - [`script`] — the script-level façade: an ordered statement map with
//!   edit forwarding and position propagation.
//!
//! # Example
//!
//! ```
//! use rgraft_core::Script;
//!
//! let mut script = Script::parse("x <- fn(a=1) # setup\ny <- x\n").unwrap();
//! assert_eq!(script.text(), "x <- fn(a=1) # setup\ny <- x\n");
//!
//! let delta = script.add_function_parameter("fn", Some("b"), "2", 1, false).unwrap();
//! assert_eq!(delta, 5);
//! assert_eq!(script.text(), "x <- fn(a=1, b=2) # setup\ny <- x\n");
//! ```
//!
//! The core is purely computational: no I/O, no logging, no shared state.
//! Invalid R is rejected with a [`ParseError`]; it is never repaired.

pub mod script;
pub mod source_analysis;
pub mod statement;

pub use script::Script;
pub use source_analysis::{is_input_complete, ParseError, Token, TokenKind};
pub use statement::{EditError, Statement};

/// Re-export of commonly used types.
pub mod prelude {
    pub use crate::script::Script;
    pub use crate::source_analysis::{ParseError, Token, TokenKind};
    pub use crate::statement::{EditError, Statement};
}
