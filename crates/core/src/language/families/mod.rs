//! 組み込みファミリーのルールテーブル
//!
//! Each module exposes `rule_table()`; rules are listed in match priority.

pub mod c_style;
pub mod lua_style;
pub mod python_style;
pub mod text_style;

use alloc::string::String;
use alloc::vec::Vec;

use super::rule::{Pattern, Rule};
use crate::context::FlagName;
use crate::kind::LineKind;

fn markers(list: &[&str]) -> Vec<String> {
    list.iter().map(|m| String::from(*m)).collect()
}

fn blank() -> Rule {
    Rule::new(LineKind::Blank, Pattern::Blank)
}

fn bracket_open(stop_markers: &[&str]) -> Rule {
    Rule::new(
        LineKind::Code,
        Pattern::BracketOpen {
            stop_markers: markers(stop_markers),
        },
    )
    .with_stack_effect(FlagName::BracketDepth, 1)
}

fn bracket_close() -> Rule {
    Rule::new(LineKind::Code, Pattern::BracketClose).with_stack_effect(FlagName::BracketDepth, -1)
}

fn block_comment(open: &str, close: &str) -> Rule {
    Rule::new(
        LineKind::Comment,
        Pattern::Block {
            open: open.into(),
            close: close.into(),
            escapes: false,
        },
    )
}

fn line_comment(marker: &str) -> Rule {
    Rule::new(
        LineKind::Comment,
        Pattern::LineComment {
            marker: marker.into(),
        },
    )
}

fn string_literal() -> Rule {
    Rule::new(LineKind::Code, Pattern::Quoted)
}

fn code_run(stop_markers: &[&str]) -> Rule {
    Rule::new(
        LineKind::Code,
        Pattern::CodeRun {
            stop_markers: markers(stop_markers),
        },
    )
}
