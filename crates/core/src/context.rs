//! マッチ処理中のファイル単位の状態
//!
//! [`MatchContext`] is threaded through one classification pass. It owns the
//! running [`CountTable`] and the auxiliary flags rules may consult
//! (`condition`) or adjust (`stack_effect`).

use core::fmt;
use core::str::FromStr;

use alloc::string::ToString;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::kind::LineKind;
use crate::stats::CountTable;

/// Auxiliary flags carried between matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagName {
    /// Nonzero while inside an unterminated `()`, `[]` or `{}`.
    BracketDepth,
    /// A code fragment was matched but its line ending has not been consumed yet.
    CodeLineUnfinished,
}

impl FlagName {
    const COUNT: usize = 2;

    const fn index(self) -> usize {
        match self {
            Self::BracketDepth => 0,
            Self::CodeLineUnfinished => 1,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BracketDepth => "bracket_depth",
            Self::CodeLineUnfinished => "code_line_unfinished",
        }
    }
}

impl fmt::Display for FlagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlagName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "bracket_depth" | "brackets" => Ok(Self::BracketDepth),
            "code_line_unfinished" => Ok(Self::CodeLineUnfinished),
            other => Err(CoreError::UnknownFlag(other.to_string())),
        }
    }
}

/// フラグの三状態
///
/// `Active(0)` is never stored: a counter that returns to zero becomes
/// `Cleared`, so only `Active` reads as set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FlagState {
    #[default]
    Unset,
    Active(i32),
    Cleared,
}

impl FlagState {
    #[inline]
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active(_))
    }

    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        match self {
            Self::Active(n) => n,
            Self::Unset | Self::Cleared => 0,
        }
    }

    #[must_use]
    const fn adjusted(self, delta: i32) -> Self {
        match self.value().saturating_add(delta) {
            0 => Self::Cleared,
            n => Self::Active(n),
        }
    }
}

/// Per-file mutable state for one classification pass.
#[derive(Debug, Default, Clone)]
pub struct MatchContext {
    counts: CountTable,
    flags: [FlagState; FlagName::COUNT],
}

impl MatchContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub const fn flag(&self, name: FlagName) -> FlagState {
        self.flags[name.index()]
    }

    #[inline]
    #[must_use]
    pub const fn is_active(&self, name: FlagName) -> bool {
        self.flag(name).is_active()
    }

    /// Adds `delta` to a flag counter; reaching zero clears it.
    pub fn adjust(&mut self, name: FlagName, delta: i32) {
        let slot = &mut self.flags[name.index()];
        *slot = slot.adjusted(delta);
    }

    pub fn raise(&mut self, name: FlagName) {
        self.adjust(name, 1);
    }

    pub fn clear(&mut self, name: FlagName) {
        self.flags[name.index()] = FlagState::Cleared;
    }

    #[inline]
    pub fn credit(&mut self, kind: LineKind, lines: usize) {
        self.counts.add_lines(kind, lines);
    }

    #[must_use]
    pub fn into_counts(self) -> CountTable {
        self.counts
    }
}
