//! # C-like family (C, C++, C#, Java, JavaScript, TypeScript, Go)
//!
//! Code runs and bracket spans stop before `//` and `/*`, so a trailing
//! comment is matched by its own rule.

use alloc::vec;

use super::{
    blank, block_comment, bracket_close, bracket_open, code_run, line_comment, string_literal,
};
use crate::language::rule::RuleTable;

const COMMENT_STARTS: [&str; 2] = ["//", "/*"];

#[must_use]
pub fn rule_table() -> RuleTable {
    RuleTable::new(
        "c_like",
        vec![
            blank(),
            bracket_open(&COMMENT_STARTS),
            bracket_close(),
            block_comment("/*", "*/"),
            line_comment("//"),
            string_literal(),
            code_run(&COMMENT_STARTS),
        ],
    )
}
