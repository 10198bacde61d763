// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Structural edits: parse-and-splice with position bookkeeping.
//!
//! Every edit returns the signed byte delta it applied, which the owner
//! propagates to later statements. Two strategies are used, never mixed
//! within one edit:
//!
//! - **In-place rewrite** — change one leaf token's lexeme (or detach a
//!   subtree), then shift every later position by the delta. Used by
//!   [`Statement::update_function_argument`] and
//!   [`Statement::remove_function_parameter`].
//! - **Splice and re-parse** — rewrite the statement's source text, parse
//!   it as a fresh single statement, shift the new tree to the statement's
//!   start offset, and install it as the new root. Used by the operator
//!   edits and [`Statement::add_function_parameter`].
//!
//! The new root is always built before the old one is replaced, so a failed
//! edit leaves the statement unchanged.

use ecow::EcoString;

use crate::source_analysis::{lexeme, parse_statements, Token, TokenKind};

use super::error::EditError;
use super::{is_operator_kind, Statement};

impl Statement {
    /// Rewrites the value of one argument of a call to `fn_name`.
    ///
    /// `param_index` counts arguments from zero; a `name = value` argument's
    /// value is the right-hand side of its `=`. `occurrence` selects among
    /// multiple calls to the same function, in script order. With `quoted`
    /// the new value is wrapped in double quotes.
    ///
    /// Returns the signed length delta, or zero (leaving the tree unchanged)
    /// when the function or argument cannot be found.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::PreconditionViolated`] when the argument value
    /// is not a single token.
    pub fn update_function_argument(
        &mut self,
        fn_name: &str,
        param_index: usize,
        new_value: &str,
        quoted: bool,
        occurrence: usize,
    ) -> Result<isize, EditError> {
        let Some(fn_pos) = self.function_pos(fn_name, occurrence) else {
            return Ok(0);
        };
        let Some(func) = find_token(self.root(), fn_pos, TokenKind::FunctionName) else {
            return Ok(0);
        };
        let Some(paren) = call_bracket(func) else {
            return Ok(0);
        };
        let Some(slot) = param_slot(paren, param_index) else {
            return Ok(0);
        };
        let value = param_value(slot);
        if value.functional_children().next().is_some() {
            return Err(EditError::PreconditionViolated(format!(
                "argument {param_index} of `{fn_name}` is not a single value token"
            )));
        }
        let target_pos = value.script_pos();
        let target_kind = value.kind();
        let new_lexeme: EcoString = if quoted {
            format!("\"{new_value}\"").into()
        } else {
            new_value.into()
        };
        let delta = new_lexeme.len() as isize - value.lexeme().len() as isize;

        let Some(target) = self.root_mut().token_at_mut(target_pos, target_kind) else {
            return Ok(0);
        };
        target.set_lexeme(new_lexeme);
        self.adjust_start_pos(delta, target_pos + 1);
        Ok(delta)
    }

    /// Replaces one operand of the operator `op_name` with `new_script`.
    ///
    /// Operand 0 is the left (or sole) operand of the first occurrence;
    /// operand *k ≥ 1* is the right-hand operand of the *k*-th occurrence,
    /// clamping to the last occurrence. The statement is re-parsed with the
    /// new operand spliced in, preserving the operand's leading whitespace.
    ///
    /// Returns the signed length delta, or zero when the operator does not
    /// occur.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::PreconditionViolated`] for a non-zero operand
    /// index on a unary operator, or when the splice does not re-parse into
    /// a single statement.
    pub fn update_operator_operand(
        &mut self,
        op_name: &str,
        operand_index: usize,
        new_script: &str,
    ) -> Result<isize, EditError> {
        let ops = self.operator_occurrences(op_name);
        if ops.is_empty() {
            return Ok(0);
        }
        let operand = self.locate_operand(&ops, op_name, operand_index)?;

        let stmt_text = self.text();
        let base = self.start_pos();
        let lead = operand
            .subtree_leading_presentation()
            .map_or(0, |p| p.lexeme().len());
        let lo = operand.start_pos() + lead - base;
        let hi = operand.end_pos() - base;

        let mut new_text = String::with_capacity(stmt_text.len() + new_script.len());
        new_text.push_str(&stmt_text[..lo]);
        new_text.push_str(new_script);
        new_text.push_str(&stmt_text[hi..]);

        let delta = new_text.len() as isize - stmt_text.len() as isize;
        *self.root_mut() = reparse_single(&new_text, base)?;
        Ok(delta)
    }

    /// Inserts a parameter into a call to `fn_name` at `insert_index`.
    ///
    /// The splice string is `name=value` (or just `value` without a name),
    /// comma-joined to its neighbours: inserting after existing parameters
    /// produces `", name=value"`, inserting before them `"name=value, "`.
    /// The statement is re-parsed with the splice applied.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::TargetNotFound`] when the function does not
    /// occur, and [`EditError::PreconditionViolated`] when the splice does
    /// not re-parse into a single statement.
    pub fn add_function_parameter(
        &mut self,
        fn_name: &str,
        param_name: Option<&str>,
        param_value: &str,
        insert_index: usize,
        quoted: bool,
    ) -> Result<isize, EditError> {
        let Some(fn_pos) = self.function_pos(fn_name, 0) else {
            return Err(EditError::TargetNotFound(fn_name.to_string()));
        };
        let Some(func) = find_token(self.root(), fn_pos, TokenKind::FunctionName) else {
            return Err(EditError::TargetNotFound(fn_name.to_string()));
        };
        let Some(paren) = call_bracket(func) else {
            return Err(EditError::PreconditionViolated(format!(
                "`{fn_name}` has no call bracket"
            )));
        };
        let functional: Vec<&Token> = paren.functional_children().collect();
        let Some(close) = functional.last() else {
            return Err(EditError::PreconditionViolated(format!(
                "call bracket of `{fn_name}` has no close"
            )));
        };
        let count = if functional.len() <= 1 {
            0
        } else {
            1 + functional
                .iter()
                .filter(|c| c.kind() == TokenKind::Separator)
                .count()
        };

        let value = if quoted {
            format!("\"{param_value}\"")
        } else {
            param_value.to_string()
        };
        let entry = match param_name {
            Some(name) => format!("{name}={value}"),
            None => value,
        };
        let (anchor, splice) = if insert_index >= count {
            let splice = if count == 0 {
                entry
            } else {
                format!(", {entry}")
            };
            (close.script_pos(), splice)
        } else {
            (param_anchor(paren, insert_index), format!("{entry}, "))
        };

        let stmt_text = self.text();
        let base = self.start_pos();
        let at = anchor - base;
        let mut new_text = String::with_capacity(stmt_text.len() + splice.len());
        new_text.push_str(&stmt_text[..at]);
        new_text.push_str(&splice);
        new_text.push_str(&stmt_text[at..]);

        let delta = splice.len() as isize;
        *self.root_mut() = reparse_single(&new_text, base)?;
        Ok(delta)
    }

    /// Removes the named parameter `param_name = …` from a call to
    /// `fn_name`, by in-tree mutation.
    ///
    /// Removing the first parameter also removes the comma that separated it
    /// and the leading whitespace of the parameter that becomes first,
    /// whether that parameter is named or positional.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::TargetNotFound`] when the function or the named
    /// parameter does not occur.
    pub fn remove_function_parameter(
        &mut self,
        fn_name: &str,
        param_name: &str,
    ) -> Result<isize, EditError> {
        let Some(fn_pos) = self.function_pos(fn_name, 0) else {
            return Err(EditError::TargetNotFound(fn_name.to_string()));
        };

        let (delta, region_start) = {
            let Some(func) = self.root_mut().token_at_mut(fn_pos, TokenKind::FunctionName)
            else {
                return Err(EditError::TargetNotFound(fn_name.to_string()));
            };
            let Some(paren) = func
                .children_mut()
                .iter_mut()
                .find(|c| c.kind() == TokenKind::Bracket && c.lexeme() == "(")
            else {
                return Err(EditError::PreconditionViolated(format!(
                    "`{fn_name}` has no call bracket"
                )));
            };
            let children = paren.children_mut();

            let mut located: Option<(usize, bool)> = None;
            for (i, child) in children.iter().enumerate() {
                if child.is_presentation() {
                    continue;
                }
                if lexeme::is_close_bracket(child.lexeme()) {
                    break;
                }
                if child.kind() == TokenKind::Separator {
                    if child
                        .functional_children()
                        .next()
                        .is_some_and(|arg| is_named_argument(arg, param_name))
                    {
                        located = Some((i, false));
                        break;
                    }
                } else if is_named_argument(child, param_name) {
                    located = Some((i, true));
                    break;
                }
            }
            let Some((index, is_first)) = located else {
                return Err(EditError::TargetNotFound(format!(
                    "{fn_name}({param_name}=…)"
                )));
            };

            if is_first {
                let following_sep = children
                    .iter()
                    .position(|c| c.kind() == TokenKind::Separator);
                match following_sep {
                    None => {
                        let removed = children.remove(index);
                        let start = removed.start_pos();
                        (-((removed.end_pos() - start) as isize), start)
                    }
                    Some(sep_index) => {
                        let sep_end = children[sep_index].end_pos();
                        let mut sep = children.remove(sep_index);
                        let removed = children.remove(index);
                        let start = removed.start_pos();
                        let mut hoisted = std::mem::take(sep.children_mut());
                        let new_first_start =
                            hoisted.iter_mut().find(|c| !c.is_presentation()).map(|new_first| {
                                let _ = new_first.take_subtree_leading_presentation();
                                new_first.start_pos()
                            });
                        let region_end = match new_first_start {
                            Some(end) => {
                                for (offset, token) in hoisted.into_iter().enumerate() {
                                    children.insert(index + offset, token);
                                }
                                end
                            }
                            None => sep_end,
                        };
                        (-((region_end - start) as isize), start)
                    }
                }
            } else {
                let removed = children.remove(index);
                let start = removed.start_pos();
                (-((removed.end_pos() - start) as isize), start)
            }
        };

        self.adjust_start_pos(delta, region_start);
        Ok(delta)
    }

    /// Adds an operand around the operator `op_name`.
    ///
    /// Index 0 prepends `"new op "` before the first operand; an index past
    /// the last operand appends `" op new"` after it; an index in between
    /// inserts `"new op "` before the right-hand operand of that occurrence.
    /// The statement is re-parsed with the splice applied. A trailing
    /// presentation-only statement produced by the re-parse (a fragment with
    /// trailing whitespace) is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::TargetNotFound`] when the operator does not
    /// occur, and [`EditError::PreconditionViolated`] when the splice does
    /// not re-parse into a single statement.
    pub fn add_operator_operand(
        &mut self,
        op_name: &str,
        operand_index: usize,
        new_script: &str,
    ) -> Result<isize, EditError> {
        let ops = self.operator_occurrences(op_name);
        if ops.is_empty() {
            return Err(EditError::TargetNotFound(op_name.to_string()));
        }
        let count = ops.len();
        let stmt_text = self.text();
        let base = self.start_pos();

        let (at, splice) = if operand_index > count {
            let (pos, kind) = ops[count - 1];
            let op = find_token(self.root(), pos, kind).ok_or_else(|| {
                EditError::TargetNotFound(op_name.to_string())
            })?;
            let rhs = right_operand(op).ok_or_else(|| {
                EditError::PreconditionViolated(format!("`{op_name}` has no structured operand"))
            })?;
            (rhs.end_pos() - base, format!(" {op_name} {new_script}"))
        } else {
            let operand = self.locate_operand(&ops, op_name, operand_index)?;
            let lead = operand
                .subtree_leading_presentation()
                .map_or(0, |p| p.lexeme().len());
            (
                operand.start_pos() + lead - base,
                format!("{new_script} {op_name} "),
            )
        };

        let mut new_text = String::with_capacity(stmt_text.len() + splice.len());
        new_text.push_str(&stmt_text[..at]);
        new_text.push_str(&splice);
        new_text.push_str(&stmt_text[at..]);

        let (root, discarded) = reparse_allow_trailing_empty(&new_text, base)?;
        let delta = new_text.len() as isize - stmt_text.len() as isize - discarded as isize;
        *self.root_mut() = root;
        Ok(delta)
    }

    fn root_mut(&mut self) -> &mut Token {
        &mut self.root
    }

    /// Script position of the `occurrence`-th call to `name`.
    fn function_pos(&self, name: &str, occurrence: usize) -> Option<usize> {
        let mut positions = Vec::new();
        self.root().visit(&mut |t| {
            if t.kind() == TokenKind::FunctionName && t.lexeme() == name {
                positions.push(t.script_pos());
            }
        });
        positions.sort_unstable();
        positions.get(occurrence).copied()
    }

    /// Every occurrence of the operator `name`, in script order.
    fn operator_occurrences(&self, name: &str) -> Vec<(usize, TokenKind)> {
        let mut ops = Vec::new();
        self.root().visit(&mut |t| {
            if is_operator_kind(t.kind()) && t.lexeme() == name {
                ops.push((t.script_pos(), t.kind()));
            }
        });
        ops.sort_unstable();
        ops
    }

    /// Resolves an operand index against the collected occurrences.
    fn locate_operand(
        &self,
        ops: &[(usize, TokenKind)],
        op_name: &str,
        operand_index: usize,
    ) -> Result<&Token, EditError> {
        let (pos, kind) = if operand_index == 0 {
            ops[0]
        } else {
            *ops.get(operand_index - 1).unwrap_or(&ops[ops.len() - 1])
        };
        let op = find_token(self.root(), pos, kind)
            .ok_or_else(|| EditError::TargetNotFound(op_name.to_string()))?;
        let operand = if operand_index == 0 {
            op.functional_children().min_by_key(|c| c.start_pos())
        } else {
            if !matches!(kind, TokenKind::OperatorBinary | TokenKind::OperatorBracket) {
                return Err(EditError::PreconditionViolated(format!(
                    "operand {operand_index} requested on unary `{op_name}`"
                )));
            }
            right_operand(op)
        };
        operand.ok_or_else(|| {
            EditError::PreconditionViolated(format!("`{op_name}` has no structured operand"))
        })
    }
}

/// The call bracket adopted by a function name.
fn call_bracket(func: &Token) -> Option<&Token> {
    func.functional_children()
        .find(|c| c.kind() == TokenKind::Bracket && c.lexeme() == "(")
}

/// The argument token occupying parameter slot `index` under a call
/// bracket, or `None` for a missing or empty slot.
fn param_slot(paren: &Token, index: usize) -> Option<&Token> {
    if index == 0 {
        let first = paren.functional_children().next()?;
        if first.kind() == TokenKind::Separator || lexeme::is_close_bracket(first.lexeme()) {
            return None;
        }
        Some(first)
    } else {
        let sep = paren
            .functional_children()
            .filter(|c| c.kind() == TokenKind::Separator)
            .nth(index - 1)?;
        sep.functional_children().next()
    }
}

/// The value side of an argument: the right-hand child of `name = value`,
/// or the argument itself when positional.
fn param_value(slot: &Token) -> &Token {
    if slot.kind() == TokenKind::OperatorBinary && slot.lexeme() == "=" {
        slot.functional_children()
            .max_by_key(|c| c.start_pos())
            .unwrap_or(slot)
    } else {
        slot
    }
}

/// The byte offset where a new parameter spliced at `index` should land.
fn param_anchor(paren: &Token, index: usize) -> usize {
    let fallback = paren.script_pos() + paren.lexeme().len();
    if index == 0 {
        match paren.functional_children().next() {
            Some(first) if first.kind() == TokenKind::Separator => first.script_pos(),
            Some(first) => {
                let lead = first
                    .subtree_leading_presentation()
                    .map_or(0, |p| p.lexeme().len());
                first.start_pos() + lead
            }
            None => fallback,
        }
    } else {
        let sep = paren
            .functional_children()
            .filter(|c| c.kind() == TokenKind::Separator)
            .nth(index - 1);
        match sep {
            Some(sep) => match sep.functional_children().next() {
                Some(arg) => {
                    let lead = arg
                        .subtree_leading_presentation()
                        .map_or(0, |p| p.lexeme().len());
                    arg.start_pos() + lead
                }
                None => sep.script_pos() + sep.lexeme().len(),
            },
            None => fallback,
        }
    }
}

/// Returns `true` for a `name = value` argument with the given name.
fn is_named_argument(arg: &Token, name: &str) -> bool {
    if arg.kind() != TokenKind::OperatorBinary || arg.lexeme() != "=" {
        return false;
    }
    arg.functional_children()
        .min_by_key(|c| c.start_pos())
        .is_some_and(|lhs| lhs.kind() == TokenKind::SyntacticName && lhs.lexeme() == name)
}

/// The right-hand operand of a structured operator, terminator excluded.
/// For a subscript operator the close bracket is excluded as well.
fn right_operand(op: &Token) -> Option<&Token> {
    op.functional_children()
        .filter(|c| c.kind() != TokenKind::EndStatement)
        .filter(|c| {
            op.kind() != TokenKind::OperatorBracket || !lexeme::is_close_bracket(c.lexeme())
        })
        .max_by_key(|c| c.start_pos())
}

/// Finds the token at `pos` with the given kind.
fn find_token(root: &Token, pos: usize, kind: TokenKind) -> Option<&Token> {
    if root.script_pos() == pos && root.kind() == kind {
        return Some(root);
    }
    root.children().iter().find_map(|c| find_token(c, pos, kind))
}

/// Re-parses a spliced statement and shifts it to `base`.
fn reparse_single(text: &str, base: usize) -> Result<Token, EditError> {
    let mut roots = parse_statements(text).map_err(|e| {
        EditError::PreconditionViolated(format!("splice does not re-parse: {e}"))
    })?;
    if roots.len() != 1 {
        return Err(EditError::PreconditionViolated(format!(
            "splice re-parses into {} statements",
            roots.len()
        )));
    }
    let mut root = roots.remove(0);
    root.shift(base as isize, 0);
    Ok(root)
}

/// Like [`reparse_single`], but discards a trailing presentation-only
/// statement and reports how many bytes it covered.
fn reparse_allow_trailing_empty(text: &str, base: usize) -> Result<(Token, usize), EditError> {
    let mut roots = parse_statements(text).map_err(|e| {
        EditError::PreconditionViolated(format!("splice does not re-parse: {e}"))
    })?;
    let mut discarded = 0usize;
    if roots.len() == 2 {
        let trailer = &roots[1];
        if trailer.kind() == TokenKind::Empty
            && trailer.children().iter().all(Token::is_presentation)
        {
            discarded = trailer.end_pos() - trailer.start_pos();
            roots.pop();
        }
    }
    if roots.len() != 1 {
        return Err(EditError::PreconditionViolated(format!(
            "splice re-parses into {} statements",
            roots.len()
        )));
    }
    let mut root = roots.remove(0);
    root.shift(base as isize, 0);
    Ok((root, discarded))
}
