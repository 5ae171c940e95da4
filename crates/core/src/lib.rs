#![no_std]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]

extern crate alloc;

pub mod aggregate;
pub mod classifier;
pub mod context;
pub mod error;
pub mod kind;
pub mod language;
pub mod stats;

pub use aggregate::{Aggregator, TAG_ALL, TAG_TEST, Tally};
pub use classifier::{Classification, Remainder, classify};
pub use context::{FlagName, FlagState, MatchContext};
pub use error::CoreError;
pub use kind::LineKind;
pub use language::{DEFAULT_LANGUAGES, Family, LanguageDef, MatchFlags, Pattern, Rule, RuleTable};
pub use stats::CountTable;
