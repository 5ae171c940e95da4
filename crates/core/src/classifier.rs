//! 行分類エンジン
//!
//! [`classify`] carves a file's text into spans with the first matching rule
//! of a [`RuleTable`] and charges each span's lines to a [`LineKind`].
//!
//! ```rust
//! use code_count_core::{Family, classify};
//!
//! let table = Family::Python.rule_table();
//! let result = classify("# hello\nx = 1  # note\n\n", &table);
//! assert_eq!(result.counts.comment, 1);
//! assert_eq!(result.counts.code, 1);
//! assert_eq!(result.counts.blank, 1);
//! assert_eq!(result.counts.total, 3);
//! assert!(result.is_complete());
//! ```

use alloc::borrow::Cow;
use alloc::string::String;

use serde::Serialize;

use crate::context::{FlagName, MatchContext};
use crate::kind::LineKind;
use crate::language::rule::{Rule, RuleTable};
use crate::language::scanner;
use crate::stats::CountTable;

const EXCERPT_CHARS: usize = 40;

/// Text the rule loop could not consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Remainder {
    /// Byte offset into the padded text.
    pub offset: usize,
    /// 1-based line number of `offset`.
    pub line: usize,
    /// Start of the unconsumed text, at most one line.
    pub excerpt: String,
}

/// Result of one classification pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub counts: CountTable,
    /// Newline-terminated lines in the padded input.
    pub lines: usize,
    /// Lines charged by rules (Blank + Comment + Code + rule-produced Total).
    pub accounted: usize,
    pub remainder: Option<Remainder>,
}

impl Classification {
    /// Whether the whole text was consumed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.remainder.is_none()
    }

    /// Whether every line was charged exactly once.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.accounted == self.lines
    }
}

/// 末尾改行の補完
fn pad(text: &str) -> Cow<'_, str> {
    if text.ends_with('\n') {
        Cow::Borrowed(text)
    } else {
        let mut padded = String::with_capacity(text.len() + 1);
        padded.push_str(text);
        padded.push('\n');
        Cow::Owned(padded)
    }
}

#[inline]
fn count_newlines(text: &str) -> usize {
    bytecount::count(text.as_bytes(), b'\n')
}

/// Classifies every line of `text` with `table`.
///
/// Classification stops at the first position no rule matches; the counts
/// gathered so far are kept and the rest is reported in
/// [`Classification::remainder`].
#[must_use]
pub fn classify(text: &str, table: &RuleTable) -> Classification {
    let padded = pad(text);
    let text = padded.as_ref();
    let mut ctx = MatchContext::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        let Some((rule, len)) = table.first_match(rest) else {
            break;
        };
        pos += apply_match(rule, rest, len, &mut ctx);
    }

    let lines = count_newlines(text);
    let remainder = (pos < text.len()).then(|| remainder_at(text, pos));

    let mut counts = ctx.into_counts();
    let accounted = counts.classified() + counts.total;
    if counts.total == 0 {
        counts.total = lines;
    }

    Classification {
        counts,
        lines,
        accounted,
        remainder,
    }
}

/// Charges one match to the context and returns the number of bytes consumed.
fn apply_match(rule: &Rule, rest: &str, len: usize, ctx: &mut MatchContext) -> usize {
    let kind = rule.effective_kind(ctx);
    let span = &rest[..len];
    let mut lines = count_newlines(span);
    let mut consumed = len;

    if kind == LineKind::Comment {
        let blank = scanner::interior_blank_lines(span);
        ctx.credit(LineKind::Blank, blank);
        lines -= blank;
    }

    if let Some(ending) = scanner::line_ending(&rest[len..]) {
        consumed += ending;
        lines += count_newlines(&rest[len..len + ending]);

        // A code fragment earlier on this line makes the whole line code.
        if ctx.is_active(FlagName::CodeLineUnfinished) {
            ctx.credit(LineKind::Code, 1);
            ctx.clear(FlagName::CodeLineUnfinished);
            lines -= 1;
        }
    } else if kind == LineKind::Code {
        ctx.raise(FlagName::CodeLineUnfinished);
    }

    ctx.credit(kind, lines);

    if let Some(effect) = rule.stack_effect {
        ctx.adjust(effect.flag, effect.delta);
    }

    consumed
}

fn remainder_at(text: &str, offset: usize) -> Remainder {
    let rest = &text[offset..];
    let first_line = rest.split('\n').next().unwrap_or_default();
    Remainder {
        offset,
        line: count_newlines(&text[..offset]) + 1,
        excerpt: first_line.chars().take(EXCERPT_CHARS).collect(),
    }
}
