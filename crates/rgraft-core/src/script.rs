// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The script façade: an ordered map of statements.
//!
//! A [`Script`] owns every statement of a parsed source, keyed by start
//! offset. It reconstructs the whole source (with or without formatting) and
//! forwards the edit primitives to the first statement containing the
//! target. After a forwarded edit it shifts every later statement by the
//! returned delta and rekeys the map, so keys always equal each statement's
//! current start position.

use std::collections::BTreeMap;

use crate::source_analysis::{parse_statements, ParseError};
use crate::statement::{EditError, Statement};

/// A parsed script: statements ordered by start offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    statements: BTreeMap<usize, Statement>,
}

impl Script {
    /// Parses R source into a script.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the source cannot be parsed.
    ///
    /// # Examples
    ///
    /// ```
    /// use rgraft_core::Script;
    ///
    /// let script = Script::parse("x <- 1\ny <- x + 1\n").unwrap();
    /// assert_eq!(script.len(), 2);
    /// assert_eq!(script.text(), "x <- 1\ny <- x + 1\n");
    /// ```
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let statements = parse_statements(source)?
            .into_iter()
            .map(|root| {
                let statement = Statement::new(root);
                (statement.start_pos(), statement)
            })
            .collect();
        Ok(Self { statements })
    }

    /// The number of statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Returns `true` when the script has no statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Iterates statements in start-offset order.
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.statements.values()
    }

    /// The statement starting at exactly `start_pos`.
    #[must_use]
    pub fn statement_at(&self, start_pos: usize) -> Option<&Statement> {
        self.statements.get(&start_pos)
    }

    /// Reconstructs the script byte for byte.
    #[must_use]
    pub fn text(&self) -> String {
        self.statements.values().map(Statement::text).collect()
    }

    /// Reconstructs the script with formatting stripped: statements joined
    /// by `;`, no comments or redundant whitespace, no trailing `;`.
    #[must_use]
    pub fn text_no_formatting(&self) -> String {
        let mut out = String::new();
        for statement in self.statements.values() {
            let text = statement.text_no_formatting();
            if text.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push(';');
            }
            out.push_str(&text);
        }
        out
    }

    /// Forwards [`Statement::update_function_argument`] to the first
    /// statement calling `fn_name`, then repositions later statements.
    ///
    /// Returns zero when no statement calls the function.
    ///
    /// # Errors
    ///
    /// Propagates the statement-level [`EditError`].
    pub fn update_function_argument(
        &mut self,
        fn_name: &str,
        param_index: usize,
        new_value: &str,
        quoted: bool,
        occurrence: usize,
    ) -> Result<isize, EditError> {
        let Some(key) = self.find_key(|s| s.contains_function(fn_name)) else {
            return Ok(0);
        };
        self.edit_at(key, |s| {
            s.update_function_argument(fn_name, param_index, new_value, quoted, occurrence)
        })
    }

    /// Forwards [`Statement::update_operator_operand`] to the first
    /// statement using `op_name`, then repositions later statements.
    ///
    /// Returns zero when no statement uses the operator.
    ///
    /// # Errors
    ///
    /// Propagates the statement-level [`EditError`].
    pub fn update_operator_operand(
        &mut self,
        op_name: &str,
        operand_index: usize,
        new_script: &str,
    ) -> Result<isize, EditError> {
        let Some(key) = self.find_key(|s| s.contains_operator(op_name)) else {
            return Ok(0);
        };
        self.edit_at(key, |s| {
            s.update_operator_operand(op_name, operand_index, new_script)
        })
    }

    /// Forwards [`Statement::add_function_parameter`] to the first statement
    /// calling `fn_name`, then repositions later statements.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::TargetNotFound`] when no statement calls the
    /// function, and propagates statement-level errors.
    pub fn add_function_parameter(
        &mut self,
        fn_name: &str,
        param_name: Option<&str>,
        param_value: &str,
        insert_index: usize,
        quoted: bool,
    ) -> Result<isize, EditError> {
        let Some(key) = self.find_key(|s| s.contains_function(fn_name)) else {
            return Err(EditError::TargetNotFound(fn_name.to_string()));
        };
        self.edit_at(key, |s| {
            s.add_function_parameter(fn_name, param_name, param_value, insert_index, quoted)
        })
    }

    /// Forwards [`Statement::remove_function_parameter`] to the first
    /// statement calling `fn_name`, then repositions later statements.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::TargetNotFound`] when no statement calls the
    /// function, and propagates statement-level errors.
    pub fn remove_function_parameter(
        &mut self,
        fn_name: &str,
        param_name: &str,
    ) -> Result<isize, EditError> {
        let Some(key) = self.find_key(|s| s.contains_function(fn_name)) else {
            return Err(EditError::TargetNotFound(fn_name.to_string()));
        };
        self.edit_at(key, |s| s.remove_function_parameter(fn_name, param_name))
    }

    /// Forwards [`Statement::add_operator_operand`] to the first statement
    /// using `op_name`, then repositions later statements.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::TargetNotFound`] when no statement uses the
    /// operator, and propagates statement-level errors.
    pub fn add_operator_operand(
        &mut self,
        op_name: &str,
        operand_index: usize,
        new_script: &str,
    ) -> Result<isize, EditError> {
        let Some(key) = self.find_key(|s| s.contains_operator(op_name)) else {
            return Err(EditError::TargetNotFound(op_name.to_string()));
        };
        self.edit_at(key, |s| {
            s.add_operator_operand(op_name, operand_index, new_script)
        })
    }

    fn find_key(&self, mut pred: impl FnMut(&Statement) -> bool) -> Option<usize> {
        self.statements
            .iter()
            .find(|(_, s)| pred(s))
            .map(|(k, _)| *k)
    }

    /// Runs an edit on the statement at `key`, then shifts later statements
    /// by the delta and rekeys the map.
    fn edit_at(
        &mut self,
        key: usize,
        edit: impl FnOnce(&mut Statement) -> Result<isize, EditError>,
    ) -> Result<isize, EditError> {
        let Some(statement) = self.statements.get_mut(&key) else {
            return Ok(0);
        };
        let delta = edit(statement)?;
        if delta != 0 {
            let old = std::mem::take(&mut self.statements);
            self.statements = old
                .into_iter()
                .map(|(start, mut statement)| {
                    if start > key {
                        statement.adjust_start_pos(delta, 0);
                    }
                    (statement.start_pos(), statement)
                })
                .collect();
        }
        Ok(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(source: &str) -> Script {
        Script::parse(source).unwrap()
    }

    #[test]
    fn round_trips_multi_statement_sources() {
        for source in [
            "x <- 1\ny <- 2\nf(x, y)\n",
            "a; b; c\n",
            "# header\nvalue <- compute()\nvalue\n",
            "",
        ] {
            assert_eq!(script(source).text(), source);
        }
    }

    #[test]
    fn keys_equal_statement_starts() {
        let script = script("a <- 1\nbb <- 2\nccc <- 3\n");
        for (expected, statement) in script.statements.iter() {
            assert_eq!(*expected, statement.start_pos());
        }
        let starts: Vec<usize> = script.statements().map(Statement::start_pos).collect();
        assert_eq!(starts, [0, 7, 15]);
    }

    #[test]
    fn no_formatting_joins_with_semicolons() {
        let with_code = script("x <- 1\ny <- 2\n");
        assert_eq!(with_code.text_no_formatting(), "x<-1;y<-2");

        let comment_only = script("# comment only\n");
        assert_eq!(comment_only.text_no_formatting(), "");
    }

    #[test]
    fn edit_shifts_later_statements_and_rekeys() {
        let mut script = script("fn(a=1)\nlater <- 2\n");
        let delta = script
            .add_function_parameter("fn", Some("c"), "3", 1, false)
            .unwrap();
        assert_eq!(delta, 5);
        assert_eq!(script.text(), "fn(a=1, c=3)\nlater <- 2\n");

        let starts: Vec<usize> = script.statements().map(Statement::start_pos).collect();
        assert_eq!(starts, [0, 13]);
        assert!(script.statement_at(13).is_some());
    }

    #[test]
    fn edit_routes_to_the_statement_containing_the_target() {
        let mut script = script("x <- 1\nfn(a=1, b=2)\ny <- 2\n");
        let delta = script.remove_function_parameter("fn", "b").unwrap();
        assert_eq!(delta, -5);
        assert_eq!(script.text(), "x <- 1\nfn(a=1)\ny <- 2\n");
        let starts: Vec<usize> = script.statements().map(Statement::start_pos).collect();
        assert_eq!(starts, [0, 7, 15]);
    }

    #[test]
    fn operator_update_through_the_script() {
        let mut script = script("a + b\n");
        let delta = script.update_operator_operand("+", 1, "c*2").unwrap();
        assert_eq!(delta, 2);
        assert_eq!(script.text(), "a + c*2\n");
    }

    #[test]
    fn update_on_missing_target_is_zero_delta() {
        let mut script = script("a + b\n");
        assert_eq!(script.update_operator_operand("*", 0, "c").unwrap(), 0);
        assert_eq!(
            script.update_function_argument("f", 0, "x", false, 0).unwrap(),
            0
        );
        assert_eq!(script.text(), "a + b\n");
    }

    #[test]
    fn add_on_missing_target_errors() {
        let mut script = script("a + b\n");
        assert!(matches!(
            script.add_operator_operand("*", 0, "c"),
            Err(EditError::TargetNotFound(_))
        ));
        assert!(matches!(
            script.add_function_parameter("f", None, "1", 0, false),
            Err(EditError::TargetNotFound(_))
        ));
        assert_eq!(script.text(), "a + b\n");
    }

    #[test]
    fn statement_starts_partition_the_source() {
        let source = "u <- 1\nv <- u + 1\nw <- v * 2\n";
        let script = script(source);
        let mut expected = 0;
        for statement in script.statements() {
            assert_eq!(statement.start_pos(), expected);
            expected = statement.end_pos();
        }
        assert_eq!(expected, source.len());
    }

    #[test]
    fn successive_edits_compose() {
        let mut script = script("fn(a=1)\nfn2(x)\n");
        script.add_function_parameter("fn", Some("b"), "2", 1, false).unwrap();
        script.add_function_parameter("fn", Some("c"), "3", 2, false).unwrap();
        script.remove_function_parameter("fn", "a").unwrap();
        assert_eq!(script.text(), "fn(b=2, c=3)\nfn2(x)\n");
        let starts: Vec<usize> = script.statements().map(Statement::start_pos).collect();
        assert_eq!(starts, [0, 13]);
    }
}
