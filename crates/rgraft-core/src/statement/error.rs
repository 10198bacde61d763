// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Errors surfaced by the structural edit primitives.

use miette::Diagnostic;
use thiserror::Error;

/// An error from a structural edit.
///
/// Update-style edits report a missing target as a zero delta rather than an
/// error; add and remove edits surface [`EditError::TargetNotFound`]. Either
/// way a failed edit leaves the statement tree untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum EditError {
    /// The requested function or operator does not occur in the statement.
    #[error("edit target not found: {0}")]
    #[diagnostic(code(rgraft::edit_target_not_found))]
    TargetNotFound(String),

    /// The edit's precondition does not hold, for example an operand update
    /// with a non-zero index on a unary operator, or a splice that re-parses
    /// into more than one statement.
    #[error("edit precondition violated: {0}")]
    #[diagnostic(code(rgraft::edit_precondition_violated))]
    PreconditionViolated(String),
}
