use core::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::kind::LineKind;

/// Per-file (or aggregated) line counts, one counter per [`LineKind`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountTable {
    pub blank: usize,
    pub comment: usize,
    pub code: usize,
    pub total: usize,
}

impl CountTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            blank: 0,
            comment: 0,
            code: 0,
            total: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn get(&self, kind: LineKind) -> usize {
        match kind {
            LineKind::Blank => self.blank,
            LineKind::Comment => self.comment,
            LineKind::Code => self.code,
            LineKind::Total => self.total,
        }
    }

    #[inline]
    pub fn add_lines(&mut self, kind: LineKind, lines: usize) {
        *self.slot_mut(kind) += lines;
    }

    #[inline]
    pub fn set(&mut self, kind: LineKind, lines: usize) {
        *self.slot_mut(kind) = lines;
    }

    /// Blank + Comment + Code.
    #[inline]
    #[must_use]
    pub const fn classified(&self) -> usize {
        self.blank + self.comment + self.code
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.classified() == 0 && self.total == 0
    }

    /// Iterates `(kind, count)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (LineKind, usize)> + '_ {
        LineKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    fn slot_mut(&mut self, kind: LineKind) -> &mut usize {
        match kind {
            LineKind::Blank => &mut self.blank,
            LineKind::Comment => &mut self.comment,
            LineKind::Code => &mut self.code,
            LineKind::Total => &mut self.total,
        }
    }
}

impl AddAssign<&Self> for CountTable {
    fn add_assign(&mut self, rhs: &Self) {
        self.blank += rhs.blank;
        self.comment += rhs.comment;
        self.code += rhs.code;
        self.total += rhs.total;
    }
}

impl AddAssign for CountTable {
    fn add_assign(&mut self, rhs: Self) {
        *self += &rhs;
    }
}

impl Add for CountTable {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}
