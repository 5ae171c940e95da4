//! パスから言語・ルールテーブルへの振り分け

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use code_count_core::language::has_suffix;
use code_count_core::{DEFAULT_LANGUAGES, Family, RuleTable};
use hashbrown::{HashMap, HashSet};
use regex::Regex;

use crate::config::FilterConfig;
use crate::error::{EngineError, Result};
use crate::settings::Settings;

/// Path as a `/`-separated string.
#[must_use]
pub fn normalized(path: &Path) -> String {
    let text = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        text.into_owned()
    } else {
        text.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// A routed file's language.
#[derive(Debug, Clone)]
pub struct Route {
    pub tag: String,
    pub table: Arc<RuleTable>,
}

#[derive(Debug, Clone)]
struct RouteEntry {
    route: Route,
    /// Lowercase, with the leading dot.
    suffixes: Vec<String>,
}

impl RouteEntry {
    fn matches(&self, file_name: &str) -> bool {
        self.suffixes
            .iter()
            .any(|suffix| has_suffix(file_name, suffix))
    }
}

/// 拡張子ベースの言語ルーター
#[derive(Debug, Clone)]
pub struct LanguageRouter {
    entries: Vec<RouteEntry>,
    /// Lowercase extension (no dot) → index into `entries`.
    ext_map: HashMap<String, usize>,
}

impl LanguageRouter {
    /// Settings languages first, then the built-in routes.
    ///
    /// # Errors
    ///
    /// Fails on a family that is neither defined in `settings` nor built in,
    /// on a rule with an unknown line kind, and on a `map_ext` target that is
    /// not a known language tag.
    pub fn new(settings: &Settings, map_ext: &HashMap<String, String>) -> Result<Self> {
        let mut tables: HashMap<String, Arc<RuleTable>> = HashMap::new();
        let mut table_for = |family: &str| -> Result<Arc<RuleTable>> {
            if let Some(table) = tables.get(family) {
                return Ok(Arc::clone(table));
            }
            let table = match settings.rule_table(family) {
                Some(table) => table?,
                None => Family::from_str(family)
                    .map_err(|_| EngineError::UnknownFamily(family.to_string()))?
                    .rule_table(),
            };
            let table = Arc::new(table);
            tables.insert(family.to_string(), Arc::clone(&table));
            Ok(table)
        };

        let mut entries = Vec::with_capacity(settings.languages.len() + DEFAULT_LANGUAGES.len());
        for spec in &settings.languages {
            entries.push(RouteEntry {
                route: Route {
                    tag: spec.tag.clone(),
                    table: table_for(&spec.family)?,
                },
                suffixes: spec.suffixes.iter().map(|s| normalize_suffix(s)).collect(),
            });
        }
        for def in DEFAULT_LANGUAGES {
            entries.push(RouteEntry {
                route: Route {
                    tag: def.tag.to_string(),
                    table: table_for(def.family.as_str())?,
                },
                suffixes: def.suffixes.iter().map(|s| (*s).to_string()).collect(),
            });
        }

        let mut ext_map = HashMap::with_capacity(map_ext.len());
        for (ext, tag) in map_ext {
            let index = entries
                .iter()
                .position(|entry| entry.route.tag.eq_ignore_ascii_case(tag))
                .ok_or_else(|| EngineError::UnknownLanguage(tag.clone()))?;
            ext_map.insert(ext.trim_start_matches('.').to_ascii_lowercase(), index);
        }

        Ok(Self { entries, ext_map })
    }

    /// Routes by file name; `None` for unsupported files.
    #[must_use]
    pub fn route(&self, path: &Path) -> Option<&Route> {
        let file_name = path.file_name()?.to_string_lossy().to_lowercase();

        if !self.ext_map.is_empty()
            && let Some(ext) = Path::new(&file_name).extension().and_then(|e| e.to_str())
            && let Some(&index) = self.ext_map.get(ext)
        {
            return Some(&self.entries[index].route);
        }

        self.entries
            .iter()
            .find(|entry| entry.matches(&file_name))
            .map(|entry| &entry.route)
    }
}

fn normalize_suffix(suffix: &str) -> String {
    let lower = suffix.trim().to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}

/// 無視パスとテスト判定
#[derive(Debug, Clone)]
pub struct PathFilter {
    ignored_folders: HashSet<String>,
    ignored_files: Vec<Regex>,
    test_pattern: Regex,
}

impl PathFilter {
    /// # Errors
    ///
    /// Returns [`EngineError::Regex`] for an invalid file or test pattern.
    pub fn new(config: &FilterConfig) -> Result<Self> {
        Ok(Self {
            ignored_folders: config.ignored_folders.iter().cloned().collect(),
            ignored_files: config
                .ignored_files
                .iter()
                .map(|p| Regex::new(p))
                .collect::<std::result::Result<_, _>>()?,
            test_pattern: Regex::new(&config.test_pattern)?,
        })
    }

    /// Whether a directory with this name is pruned.
    #[must_use]
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignored_folders.contains(name)
    }

    #[must_use]
    pub fn is_ignored_file(&self, path: &Path) -> bool {
        if self.ignored_files.is_empty() {
            return false;
        }
        let text = normalized(path);
        self.ignored_files.iter().any(|re| re.is_match(&text))
    }

    /// Whether a path, relative to its scan root, is in the test partition.
    #[must_use]
    pub fn is_test(&self, relative: &Path) -> bool {
        self.test_pattern.is_match(&normalized(relative))
    }
}
