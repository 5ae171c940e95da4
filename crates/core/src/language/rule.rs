//! トークンルールとルールテーブル
//!
//! A [`RuleTable`] is an ordered list of [`Rule`]s. The order is the priority:
//! [`RuleTable::first_match`] returns the first rule whose pattern matches at
//! the current position, so precedence lives in the table and nowhere else.

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use super::scanner;
use crate::context::{FlagName, MatchContext};
use crate::kind::LineKind;

/// Match options shared by all patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFlags {
    /// Whether the body of a pattern may cross a newline.
    #[serde(default = "default_spans_lines")]
    pub spans_lines: bool,
}

const fn default_spans_lines() -> bool {
    true
}

impl MatchFlags {
    pub const SPANS_LINES: Self = Self { spans_lines: true };
    pub const SINGLE_LINE: Self = Self { spans_lines: false };
}

impl Default for MatchFlags {
    fn default() -> Self {
        Self::SPANS_LINES
    }
}

/// 位置固定パターン
///
/// All variants except `CodeRun` and `Line` skip a leading whitespace run
/// before their delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Pattern {
    /// Whitespace through a newline.
    Blank,
    /// `(`, `[` or `{` up to the next quote, bracket or stop marker.
    BracketOpen {
        #[serde(default)]
        stop_markers: Vec<String>,
    },
    /// `)`, `]` or `}`.
    BracketClose,
    /// `'''…'''` / `"""…"""`.
    TripleQuote,
    /// `open … close`.
    Block {
        open: String,
        close: String,
        #[serde(default)]
        escapes: bool,
    },
    /// Marker to end of line.
    LineComment { marker: String },
    /// `"…"` / `'…'` with backslash escapes.
    Quoted,
    /// Plain code up to the next quote, bracket, newline or stop marker.
    CodeRun {
        #[serde(default)]
        stop_markers: Vec<String>,
    },
    /// One whole physical line.
    Line,
}

impl Pattern {
    /// Tries to match at the start of `text`, returning the matched length.
    #[must_use]
    pub fn match_at(&self, text: &str, flags: MatchFlags) -> Option<usize> {
        match self {
            Self::Blank => scanner::blank(text),
            Self::BracketOpen { stop_markers } => scanner::bracket_open(text, stop_markers, flags),
            Self::BracketClose => scanner::bracket_close(text),
            Self::TripleQuote => scanner::triple_quote(text, flags),
            Self::Block {
                open,
                close,
                escapes,
            } => scanner::delimited(text, open, close, *escapes, flags),
            Self::LineComment { marker } => scanner::line_comment(text, marker),
            Self::Quoted => scanner::quoted(text, flags),
            Self::CodeRun { stop_markers } => scanner::code_run(text, stop_markers),
            Self::Line => scanner::line(text),
        }
    }
}

/// Retargets a match to `kind` while `flag` is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub flag: FlagName,
    pub kind: LineKind,
}

/// Adjusts an integer flag whenever the rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEffect {
    pub flag: FlagName,
    pub delta: i32,
}

/// トークンルール
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub kind: LineKind,
    pub pattern: Pattern,
    pub flags: MatchFlags,
    pub condition: Option<Condition>,
    pub stack_effect: Option<StackEffect>,
}

impl Rule {
    #[must_use]
    pub fn new(kind: LineKind, pattern: Pattern) -> Self {
        Self {
            kind,
            pattern,
            flags: MatchFlags::default(),
            condition: None,
            stack_effect: None,
        }
    }

    #[must_use]
    pub const fn with_flags(mut self, flags: MatchFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub const fn with_condition(mut self, flag: FlagName, kind: LineKind) -> Self {
        self.condition = Some(Condition { flag, kind });
        self
    }

    #[must_use]
    pub const fn with_stack_effect(mut self, flag: FlagName, delta: i32) -> Self {
        self.stack_effect = Some(StackEffect { flag, delta });
        self
    }

    /// Matched length at the start of `text`. Empty matches count as no match,
    /// so every applied rule consumes at least one character.
    #[inline]
    #[must_use]
    pub fn try_match(&self, text: &str) -> Option<usize> {
        self.pattern
            .match_at(text, self.flags)
            .filter(|&len| len > 0)
    }

    /// The kind a match is charged to under the current flags.
    #[must_use]
    pub fn effective_kind(&self, ctx: &MatchContext) -> LineKind {
        match self.condition {
            Some(Condition { flag, kind }) if ctx.is_active(flag) => kind,
            _ => self.kind,
        }
    }
}

/// 言語ファミリーごとの順序付きルール列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    name: String,
    rules: Vec<Rule>,
}

impl RuleTable {
    #[must_use]
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules in priority order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule, in priority order, matching at the start of `text`.
    #[must_use]
    pub fn first_match(&self, text: &str) -> Option<(&Rule, usize)> {
        self.rules
            .iter()
            .find_map(|rule| rule.try_match(text).map(|len| (rule, len)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_first_match_respects_order() {
        let table = RuleTable::new(
            "test",
            vec![
                Rule::new(LineKind::Comment, Pattern::LineComment { marker: "--".into() }),
                Rule::new(
                    LineKind::Comment,
                    Pattern::Block {
                        open: "--[[".into(),
                        close: "]]".into(),
                        escapes: false,
                    },
                ),
            ],
        );
        let (rule, len) = table.first_match("--[[ a ]]\n").unwrap();
        assert!(matches!(rule.pattern, Pattern::LineComment { .. }));
        assert_eq!(len, 9);
    }

    #[test]
    fn test_empty_match_is_no_match() {
        let rule = Rule::new(
            LineKind::Code,
            Pattern::CodeRun {
                stop_markers: vec![],
            },
        );
        assert_eq!(rule.try_match("(x)\n"), None);
        assert_eq!(rule.try_match("x(y)\n"), Some(1));
    }

    #[test]
    fn test_condition_overrides_kind_only_when_active() {
        let rule = Rule::new(LineKind::Comment, Pattern::TripleQuote)
            .with_condition(FlagName::BracketDepth, LineKind::Code);
        let mut ctx = MatchContext::new();
        assert_eq!(rule.effective_kind(&ctx), LineKind::Comment);
        ctx.adjust(FlagName::BracketDepth, 1);
        assert_eq!(rule.effective_kind(&ctx), LineKind::Code);
        ctx.adjust(FlagName::BracketDepth, -1);
        assert_eq!(rule.effective_kind(&ctx), LineKind::Comment);
    }

    #[test]
    fn test_single_line_flag() {
        let rule = Rule::new(LineKind::Code, Pattern::Quoted).with_flags(MatchFlags::SINGLE_LINE);
        assert_eq!(rule.try_match("'a\nb'"), None);
        assert_eq!(rule.try_match("'ab'"), Some(4));
    }

    #[test]
    fn test_match_flags_default_spans_lines() {
        assert_eq!(MatchFlags::default(), MatchFlags::SPANS_LINES);
        let rule = Rule::new(LineKind::Comment, Pattern::TripleQuote);
        assert_eq!(rule.try_match("'''a\n\nb'''"), Some(10));
    }
}
