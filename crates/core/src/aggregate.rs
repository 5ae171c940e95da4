//! 集計テーブル
//!
//! The [`Aggregator`] owns one [`Tally`] per language tag plus the synthetic
//! [`TAG_ALL`] and [`TAG_TEST`] rows.

use alloc::string::{String, ToString};

use hashbrown::HashMap;
use serde::Serialize;

use crate::error::{CoreError, Result};
use crate::kind::LineKind;
use crate::stats::CountTable;

pub const TAG_ALL: &str = "All";
pub const TAG_TEST: &str = "Test";

/// One aggregate row.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub files: usize,
    pub counts: CountTable,
}

impl Tally {
    fn add(&mut self, counts: &CountTable) {
        self.files += 1;
        self.counts += counts;
    }
}

#[derive(Debug, Default, Clone)]
pub struct Aggregator {
    languages: HashMap<String, Tally>,
    all: Tally,
    test: Tally,
}

impl Aggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one file's counts into its language row, `All` and, for test
    /// files, `Test`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OverCounted`] when more lines were classified than
    /// the file has. Nothing is recorded in that case.
    pub fn record(&mut self, counts: &CountTable, language: &str, is_test: bool) -> Result<()> {
        let classified = counts.classified();
        if classified > counts.total {
            return Err(CoreError::OverCounted {
                language: language.to_string(),
                classified,
                total: counts.total,
            });
        }

        self.languages
            .entry_ref(language)
            .or_default()
            .add(counts);
        self.all.add(counts);
        if is_test {
            self.test.add(counts);
        }
        Ok(())
    }

    /// Count for `tag` and `kind`; 0 for unknown tags.
    #[must_use]
    pub fn get(&self, tag: &str, kind: LineKind) -> usize {
        self.table(tag).map_or(0, |tally| tally.counts.get(kind))
    }

    /// Row for a language tag, `All` or `Test`.
    #[must_use]
    pub fn table(&self, tag: &str) -> Option<&Tally> {
        match tag {
            TAG_ALL => Some(&self.all),
            TAG_TEST => Some(&self.test),
            _ => self.languages.get(tag),
        }
    }

    /// Per-language rows in unspecified order.
    pub fn languages(&self) -> impl Iterator<Item = (&str, &Tally)> {
        self.languages.iter().map(|(tag, tally)| (tag.as_str(), tally))
    }

    #[must_use]
    pub const fn all(&self) -> &Tally {
        &self.all
    }

    #[must_use]
    pub const fn test(&self) -> &Tally {
        &self.test
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all.files == 0
    }
}
