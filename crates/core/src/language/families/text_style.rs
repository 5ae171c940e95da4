//! # Plain text family
//!
//! One rule: every physical line is charged to `Total`.

use alloc::vec;

use crate::kind::LineKind;
use crate::language::rule::{Pattern, Rule, RuleTable};

#[must_use]
pub fn rule_table() -> RuleTable {
    RuleTable::new("text", vec![Rule::new(LineKind::Total, Pattern::Line)])
}
