use crate::settings::Settings;
use derive_builder::Builder;
use hashbrown::HashMap;
use std::path::PathBuf;

/// Folders never descended into.
pub const DEFAULT_IGNORED_FOLDERS: &[&str] = &[
    ".git", ".gitee", ".idea", ".vscode", ".svn", "bin", "out", "target", "trace",
];

/// Skipped file patterns, matched against the `/`-separated path.
pub const DEFAULT_IGNORED_FILES: &[&str] = &[r"(?:^|/)\.DS_Store$"];

/// Paths (relative to their scan root) that count toward the `Test` row.
pub const DEFAULT_TEST_PATTERN: &str = r"(?:^|/)tests?/";

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct WalkOptions {
    #[builder(default)]
    pub roots: Vec<PathBuf>,
    /// Classification threads; 0 means one per CPU.
    #[builder(default = "1")]
    pub threads: usize,
    #[builder(default)]
    pub hidden: bool,
    #[builder(default = "true")]
    pub git_ignore: bool,
    #[builder(default)]
    pub max_depth: Option<usize>,
    #[builder(default)]
    pub follow_links: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            roots: vec![],
            threads: 1,
            hidden: false,
            git_ignore: true,
            max_depth: None,
            follow_links: false,
        }
    }
}

impl WalkOptions {
    /// Effective worker count.
    #[must_use]
    pub fn resolved_threads(&self) -> usize {
        match self.threads {
            0 => num_cpus::get(),
            n => n,
        }
    }
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct FilterConfig {
    #[builder(default = "owned(DEFAULT_IGNORED_FOLDERS)")]
    pub ignored_folders: Vec<String>,
    #[builder(default = "owned(DEFAULT_IGNORED_FILES)")]
    pub ignored_files: Vec<String>,
    #[builder(default = "DEFAULT_TEST_PATTERN.to_string()")]
    pub test_pattern: String,
    /// Extension (without dot) → language tag.
    #[builder(default)]
    pub map_ext: HashMap<String, String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            ignored_folders: owned(DEFAULT_IGNORED_FOLDERS),
            ignored_files: owned(DEFAULT_IGNORED_FILES),
            test_pattern: DEFAULT_TEST_PATTERN.to_string(),
            map_ext: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Builder)]
#[builder(setter(into))]
pub struct Config {
    #[builder(default)]
    pub walk: WalkOptions,
    #[builder(default)]
    pub filter: FilterConfig,
    /// Extra languages and rule families.
    #[builder(default)]
    pub settings: Settings,
    /// Stop at the first unreadable or partially classified file.
    #[builder(default)]
    pub strict: bool,
}
