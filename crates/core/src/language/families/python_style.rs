//! # Python family
//!
//! - **Line comments**: `#`
//! - **Docstrings**: `'''…'''` / `"""…"""`, counted as comments unless a
//!   bracket is open (`foo('''x''')` is code)
//! - **Strings**: `"…"` / `'…'`

use alloc::vec;

use super::{blank, bracket_close, bracket_open, code_run, line_comment, string_literal};
use crate::context::FlagName;
use crate::kind::LineKind;
use crate::language::rule::{Pattern, Rule, RuleTable};

#[must_use]
pub fn rule_table() -> RuleTable {
    RuleTable::new(
        "python",
        vec![
            blank(),
            bracket_open(&[]),
            bracket_close(),
            Rule::new(LineKind::Comment, Pattern::TripleQuote)
                .with_condition(FlagName::BracketDepth, LineKind::Code),
            line_comment("#"),
            string_literal(),
            code_run(&[]),
        ],
    )
}
