//! # Lua family
//!
//! Comments and strings come before the bracket rules: otherwise `[[` would
//! be taken for two brackets and neither `--[[ … ]]` nor `[[ … ]]` could match.

use alloc::vec;

use super::{
    blank, block_comment, bracket_close, bracket_open, code_run, line_comment, string_literal,
};
use crate::kind::LineKind;
use crate::language::rule::{Pattern, Rule, RuleTable};

const COMMENT_START: [&str; 1] = ["--"];

#[must_use]
pub fn rule_table() -> RuleTable {
    RuleTable::new(
        "lua",
        vec![
            blank(),
            block_comment("--[[", "]]"),
            line_comment("--"),
            string_literal(),
            Rule::new(
                LineKind::Code,
                Pattern::Block {
                    open: "[[".into(),
                    close: "]]".into(),
                    escapes: true,
                },
            ),
            bracket_open(&COMMENT_START),
            bracket_close(),
            code_run(&COMMENT_START),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_comment_before_line_comment() {
        let table = rule_table();
        let (rule, len) = table.first_match("--[[ a\nb ]]\n").unwrap();
        assert!(matches!(rule.pattern, Pattern::Block { .. }));
        assert_eq!(rule.kind, LineKind::Comment);
        assert_eq!(len, 11);
    }

    #[test]
    fn test_long_string_is_code() {
        let table = rule_table();
        let (rule, len) = table.first_match("[[x\ny]]\n").unwrap();
        assert_eq!(rule.kind, LineKind::Code);
        assert_eq!(len, 7);
    }

    #[test]
    fn test_single_bracket_still_tracked() {
        let table = rule_table();
        let (rule, _) = table.first_match("[1]").unwrap();
        assert!(matches!(rule.pattern, Pattern::BracketOpen { .. }));
    }
}
