//! 行の分類種別

use core::fmt;
use core::str::FromStr;

use alloc::string::ToString;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// 行の分類
///
/// `Total` is only charged directly by families that do not distinguish the
/// other three kinds (plain text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LineKind {
    Blank,
    Comment,
    Code,
    Total,
}

impl LineKind {
    pub const ALL: [Self; 4] = [Self::Blank, Self::Comment, Self::Code, Self::Total];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blank => "Blank",
            Self::Comment => "Comment",
            Self::Code => "Code",
            Self::Total => "Total",
        }
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            // "space" is the name the line kind had in older settings files
            "blank" | "space" => Ok(Self::Blank),
            "comment" => Ok(Self::Comment),
            "code" => Ok(Self::Code),
            "total" => Ok(Self::Total),
            _ => Err(CoreError::UnknownLineKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("comment".parse::<LineKind>(), Ok(LineKind::Comment));
        assert_eq!(" CODE ".parse::<LineKind>(), Ok(LineKind::Code));
        assert_eq!("Space".parse::<LineKind>(), Ok(LineKind::Blank));
    }

    #[test]
    fn test_parse_unknown_kind() {
        assert_eq!(
            "docstring".parse::<LineKind>(),
            Err(CoreError::UnknownLineKind("docstring".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for kind in LineKind::ALL {
            assert_eq!(kind.to_string().parse::<LineKind>(), Ok(kind));
        }
    }
}
