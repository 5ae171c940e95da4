//! 設定ファイル (YAML / JSON)
//!
//! ```yaml
//! ignored_folders: [.git, build]
//! test_pattern: "(?:^|/)spec/"
//! languages:
//!   - tag: Shell
//!     suffixes: [.sh]
//!     family: hash
//! families:
//!   hash:
//!     - kind: blank
//!       pattern: { type: blank }
//!     - kind: comment
//!       pattern: { type: line_comment, marker: "#" }
//!     - kind: code
//!       pattern: { type: quoted }
//!     - kind: code
//!       pattern: { type: code_run }
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use code_count_core::context::FlagName;
use code_count_core::language::{MatchFlags, Pattern, Rule, RuleTable, StackEffect};
use code_count_core::LineKind;
use serde::{Deserialize, Serialize};

use crate::config::FilterConfig;
use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Replaces the default ignored folder names.
    pub ignored_folders: Option<Vec<String>>,
    /// Replaces the default ignored file patterns.
    pub ignored_files: Option<Vec<String>>,
    pub test_pattern: Option<String>,
    /// Checked before the built-in languages.
    pub languages: Vec<LanguageSpec>,
    /// Rule families by name; may shadow a built-in family.
    pub families: BTreeMap<String, Vec<RuleSpec>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageSpec {
    pub tag: String,
    pub suffixes: Vec<String>,
    pub family: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSpec {
    pub kind: String,
    pub pattern: Pattern,
    #[serde(default)]
    pub flags: MatchFlags,
    #[serde(default)]
    pub condition: Option<ConditionSpec>,
    #[serde(default)]
    pub stack: Option<StackEffect>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConditionSpec {
    pub flag: FlagName,
    pub kind: String,
}

impl Settings {
    /// Reads a settings file; `.json` files are parsed as JSON, anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Settings`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let settings_error = |message: String| EngineError::Settings {
            path: path.to_path_buf(),
            message,
        };
        let text = std::fs::read_to_string(path).map_err(|e| settings_error(e.to_string()))?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let settings = if is_json {
            serde_json::from_str(&text).map_err(|e| settings_error(e.to_string()))?
        } else {
            serde_yaml::from_str(&text).map_err(|e| settings_error(e.to_string()))?
        };
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Overrides the path filters the file sets.
    pub fn apply_to(&self, filter: &mut FilterConfig) {
        if let Some(folders) = &self.ignored_folders {
            filter.ignored_folders.clone_from(folders);
        }
        if let Some(files) = &self.ignored_files {
            filter.ignored_files.clone_from(files);
        }
        if let Some(pattern) = &self.test_pattern {
            filter.test_pattern.clone_from(pattern);
        }
    }

    /// Builds the rule table of a family defined in this file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownLineKind`] if a rule names a kind outside
    /// Blank/Comment/Code/Total.
    pub fn rule_table(&self, family: &str) -> Option<Result<RuleTable>> {
        self.families
            .get(family)
            .map(|specs| build_table(family, specs))
    }
}

fn parse_kind(family: &str, kind: &str) -> Result<LineKind> {
    LineKind::from_str(kind).map_err(|_| EngineError::UnknownLineKind {
        family: family.to_string(),
        kind: kind.to_string(),
    })
}

fn build_table(family: &str, specs: &[RuleSpec]) -> Result<RuleTable> {
    let rules = specs
        .iter()
        .map(|spec| {
            let mut rule =
                Rule::new(parse_kind(family, &spec.kind)?, spec.pattern.clone()).with_flags(spec.flags);
            if let Some(condition) = &spec.condition {
                rule = rule.with_condition(condition.flag, parse_kind(family, &condition.kind)?);
            }
            if let Some(StackEffect { flag, delta }) = spec.stack {
                rule = rule.with_stack_effect(flag, delta);
            }
            Ok(rule)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(RuleTable::new(family, rules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const YAML: &str = r##"
ignored_folders: [build]
test_pattern: "(?:^|/)spec/"
languages:
  - tag: Shell
    suffixes: [.sh]
    family: hash
families:
  hash:
    - kind: blank
      pattern: { type: blank }
    - kind: comment
      pattern: { type: line_comment, marker: "#" }
    - kind: code
      pattern: { type: code_run }
      stack: { flag: bracket_depth, delta: 0 }
"##;

    fn write_temp(suffix: &str, body: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_yaml() {
        let file = write_temp(".yaml", YAML);
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.ignored_folders, Some(vec!["build".to_string()]));
        assert_eq!(settings.languages[0].tag, "Shell");

        let table = settings.rule_table("hash").unwrap().unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.rules()[1].kind, LineKind::Comment);
        assert_eq!(
            table.rules()[1].pattern,
            Pattern::LineComment {
                marker: "#".to_string()
            }
        );
        assert!(settings.rule_table("missing").is_none());
    }

    #[test]
    fn test_load_json() {
        let json = r#"{"languages": [{"tag": "Conf", "suffixes": [".conf"], "family": "text"}]}"#;
        let file = write_temp(".json", json);
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.languages[0].family, "text");
        assert!(settings.families.is_empty());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let file = write_temp(".yaml", "ignored_dirs: [x]\n");
        let err = Settings::load(file.path()).unwrap_err();
        assert!(matches!(err, EngineError::Settings { .. }));
    }

    #[test]
    fn test_unknown_kind_is_fatal() {
        let yaml = "families:\n  odd:\n    - kind: docstring\n      pattern: { type: line }\n";
        let file = write_temp(".yml", yaml);
        let settings = Settings::load(file.path()).unwrap();
        let err = settings.rule_table("odd").unwrap().unwrap_err();
        match err {
            EngineError::UnknownLineKind { family, kind } => {
                assert_eq!(family, "odd");
                assert_eq!(kind, "docstring");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_apply_to_filter() {
        let file = write_temp(".yaml", YAML);
        let settings = Settings::load(file.path()).unwrap();
        let mut filter = FilterConfig::default();
        settings.apply_to(&mut filter);
        assert_eq!(filter.ignored_folders, vec!["build".to_string()]);
        assert_eq!(filter.test_pattern, "(?:^|/)spec/");
        // Not set in the file: defaults stay.
        assert_eq!(filter.ignored_files, FilterConfig::default().ignored_files);
    }
}
