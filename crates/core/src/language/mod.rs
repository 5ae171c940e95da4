pub mod families;
pub mod rule;
pub mod scanner;

use core::fmt;
use core::str::FromStr;

use alloc::string::ToString;

pub use rule::{Condition, MatchFlags, Pattern, Rule, RuleTable, StackEffect};

use crate::error::CoreError;

/// 組み込みの言語ファミリー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Python,
    CLike,
    Lua,
    Text,
}

impl Family {
    pub const ALL: [Self; 4] = [Self::Python, Self::CLike, Self::Lua, Self::Text];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::CLike => "c_like",
            Self::Lua => "lua",
            Self::Text => "text",
        }
    }

    /// Builds the ordered rule table for this family.
    #[must_use]
    pub fn rule_table(self) -> RuleTable {
        match self {
            Self::Python => families::python_style::rule_table(),
            Self::CLike => families::c_style::rule_table(),
            Self::Lua => families::lua_style::rule_table(),
            Self::Text => families::text_style::rule_table(),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Family {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "python" => Ok(Self::Python),
            "c_like" | "c" => Ok(Self::CLike),
            "lua" => Ok(Self::Lua),
            "text" => Ok(Self::Text),
            _ => Err(CoreError::UnknownFamily(s.to_string())),
        }
    }
}

/// 言語タグ・拡張子・ファミリーの対応
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageDef {
    pub tag: &'static str,
    /// Suffixes including the leading dot, lowercase.
    pub suffixes: &'static [&'static str],
    pub family: Family,
}

/// Whether `file_name` ends with `suffix` (ASCII case-insensitive) and has a
/// stem in front of it.
#[must_use]
pub fn has_suffix(file_name: &str, suffix: &str) -> bool {
    file_name.len() > suffix.len()
        && file_name
            .get(file_name.len() - suffix.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
}

/// Built-in routes, checked in order.
pub const DEFAULT_LANGUAGES: &[LanguageDef] = &[
    LanguageDef {
        tag: "Python",
        suffixes: &[".py", ".pyw", ".pyi"],
        family: Family::Python,
    },
    LanguageDef {
        tag: "Java",
        suffixes: &[".java"],
        family: Family::CLike,
    },
    LanguageDef {
        tag: "Lua",
        suffixes: &[".lua"],
        family: Family::Lua,
    },
    LanguageDef {
        tag: "Markdown",
        suffixes: &[".md", ".markdown"],
        family: Family::Text,
    },
    LanguageDef {
        tag: "C#",
        suffixes: &[".cs"],
        family: Family::CLike,
    },
    LanguageDef {
        tag: "C",
        suffixes: &[".c", ".h"],
        family: Family::CLike,
    },
    LanguageDef {
        tag: "C++",
        suffixes: &[".cpp", ".cc", ".cxx", ".hpp", ".hh", ".hxx"],
        family: Family::CLike,
    },
    LanguageDef {
        tag: "JavaScript",
        suffixes: &[".js", ".mjs", ".cjs", ".jsx"],
        family: Family::CLike,
    },
    LanguageDef {
        tag: "TypeScript",
        suffixes: &[".ts", ".mts", ".cts", ".tsx"],
        family: Family::CLike,
    },
    LanguageDef {
        tag: "Go",
        suffixes: &[".go"],
        family: Family::CLike,
    },
    LanguageDef {
        tag: "Text",
        suffixes: &[".txt", ".text"],
        family: Family::Text,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_parse() {
        assert_eq!("python".parse::<Family>(), Ok(Family::Python));
        assert_eq!("C".parse::<Family>(), Ok(Family::CLike));
        assert_eq!("c_like".parse::<Family>(), Ok(Family::CLike));
        assert!("cobol".parse::<Family>().is_err());
        for family in Family::ALL {
            assert_eq!(family.as_str().parse::<Family>(), Ok(family));
        }
    }

    #[test]
    fn test_has_suffix() {
        assert!(has_suffix("main.py", ".py"));
        assert!(has_suffix("Main.JAVA", ".java"));
        assert!(!has_suffix("lib.rs", ".py"));
        // A bare suffix is a dotfile, not a source file.
        assert!(!has_suffix(".py", ".py"));
        assert!(!has_suffix("é", ".py"));
    }

    #[test]
    fn test_every_family_has_rules() {
        for family in Family::ALL {
            assert!(!family.rule_table().is_empty(), "{family}");
        }
    }
}
