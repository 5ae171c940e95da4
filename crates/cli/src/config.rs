// crates/cli/src/config.rs
use crate::args::Args;
use crate::error::{AppError, Result};
pub use code_count_engine::config::{
    Config, ConfigBuilder, FilterConfig, FilterConfigBuilder, WalkOptions, WalkOptionsBuilder,
};
use code_count_engine::error::EngineError;
use code_count_engine::settings::Settings;
use std::path::PathBuf;

impl TryFrom<&Args> for Config {
    type Error = AppError;

    fn try_from(args: &Args) -> Result<Self> {
        let settings = match &args.filter.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        let walk = walk_options_from_args(args)?;
        let filter = filter_config_from_args(args, &settings)?;

        ConfigBuilder::default()
            .walk(walk)
            .filter(filter)
            .settings(settings)
            .strict(args.behavior.strict)
            .build()
            .map_err(|e| builder_error(&e))
    }
}

fn builder_error(e: &impl std::fmt::Display) -> AppError {
    EngineError::Config(e.to_string()).into()
}

fn walk_options_from_args(args: &Args) -> Result<WalkOptions> {
    let scan = &args.scan;
    let roots = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths.clone()
    };

    WalkOptionsBuilder::default()
        .roots(roots)
        .threads(scan.jobs)
        .hidden(scan.hidden)
        .git_ignore(!scan.no_gitignore)
        .max_depth(scan.max_depth)
        .follow_links(scan.follow)
        .build()
        .map_err(|e| builder_error(&e))
}

/// Defaults, then the settings file, then command-line additions.
fn filter_config_from_args(args: &Args, settings: &Settings) -> Result<FilterConfig> {
    let opts = &args.filter;
    let mut filter = FilterConfig::default();
    settings.apply_to(&mut filter);

    filter.ignored_folders.extend(opts.ignore_dir.iter().cloned());
    filter.ignored_files.extend(opts.ignore_file.iter().cloned());

    let map_ext: hashbrown::HashMap<String, String> = opts.map_ext.iter().cloned().collect();

    let mut builder = FilterConfigBuilder::default();
    builder
        .ignored_folders(filter.ignored_folders)
        .ignored_files(filter.ignored_files)
        .test_pattern(opts.test_pattern.clone().unwrap_or(filter.test_pattern))
        .map_ext(map_ext);
    builder.build().map_err(|e| builder_error(&e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["code_count"]).unwrap();
        let config = Config::try_from(&args).unwrap();
        assert_eq!(config.walk.roots, vec![PathBuf::from(".")]);
        assert!(config.walk.git_ignore);
        assert_eq!(config.filter.ignored_folders, FilterConfig::default().ignored_folders);
        assert!(!config.strict);
    }

    #[test]
    fn test_flags_extend_defaults() {
        let args = Args::try_parse_from([
            "code_count",
            "--ignore-dir",
            "vendor",
            "--test-pattern",
            "spec/",
            "--map-ext",
            "inc=C",
            "--no-gitignore",
            "--strict",
        ])
        .unwrap();
        let config = Config::try_from(&args).unwrap();
        assert!(config.filter.ignored_folders.contains(&"vendor".to_string()));
        assert!(config.filter.ignored_folders.contains(&".git".to_string()));
        assert_eq!(config.filter.test_pattern, "spec/");
        assert_eq!(config.filter.map_ext.get("inc").map(String::as_str), Some("C"));
        assert!(!config.walk.git_ignore);
        assert!(config.strict);
    }

    #[test]
    fn test_settings_file_replaces_defaults() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "ignored_folders: [build]").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args =
            Args::try_parse_from(["code_count", "--config", &path, "--ignore-dir", "dist"]).unwrap();
        let config = Config::try_from(&args).unwrap();
        assert_eq!(config.filter.ignored_folders, vec!["build", "dist"]);
    }

    #[test]
    fn test_missing_settings_file_fails() {
        let args = Args::try_parse_from(["code_count", "--config", "/no/such/file.yaml"]).unwrap();
        assert!(matches!(
            Config::try_from(&args),
            Err(AppError::Engine(EngineError::Settings { .. }))
        ));
    }
}
