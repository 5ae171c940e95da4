// crates/cli/src/args.rs
use crate::options::OutputFormat;
use crate::parsers;
use clap::{Args as ClapArgs, Parser, ValueHint};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "code_count",
    version,
    about = "言語ごとの空行/コメント行/コード行の集計ツール"
)]
pub struct Args {
    #[command(flatten)]
    pub output: OutputOptions,

    #[command(flatten)]
    pub scan: ScanOptions,

    #[command(flatten)]
    pub filter: FilterOptions,

    #[command(flatten)]
    pub behavior: BehaviorOptions,

    /// 対象パス (省略時はカレントディレクトリ)
    #[arg(value_hint = ValueHint::AnyPath, help_heading = "走査/入力")]
    pub paths: Vec<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct OutputOptions {
    /// 出力フォーマット
    #[arg(long, value_enum, default_value = "table", help_heading = "出力")]
    pub format: OutputFormat,

    /// 出力先ファイル
    #[arg(long, value_hint = ValueHint::FilePath, help_heading = "出力")]
    pub output: Option<PathBuf>,

    /// ファイルごとの行も出力
    #[arg(long, help_heading = "出力")]
    pub files: bool,
}

#[derive(ClapArgs, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct ScanOptions {
    /// 隠しファイルも対象にする
    #[arg(long, help_heading = "走査/入力")]
    pub hidden: bool,

    /// .gitignore を無視する
    #[arg(long, help_heading = "走査/入力")]
    pub no_gitignore: bool,

    /// シンボリックリンクを辿る
    #[arg(long, help_heading = "走査/入力")]
    pub follow: bool,

    #[arg(long = "max-depth", help_heading = "走査/入力")]
    pub max_depth: Option<usize>,

    /// 分類スレッド数 (0 = CPU数)
    #[arg(short = 'j', long, default_value_t = 1, value_parser = parsers::parse_jobs, help_heading = "走査/入力")]
    pub jobs: usize,
}

#[derive(ClapArgs, Debug)]
pub struct FilterOptions {
    /// 設定ファイル (YAML / JSON)
    #[arg(long, value_hint = ValueHint::FilePath, help_heading = "フィルタ")]
    pub config: Option<PathBuf>,

    /// 追加で除外するディレクトリ名
    #[arg(long = "ignore-dir", value_delimiter = ',', help_heading = "フィルタ")]
    pub ignore_dir: Vec<String>,

    /// 追加で除外するファイルパターン (正規表現)
    #[arg(long = "ignore-file", help_heading = "フィルタ")]
    pub ignore_file: Vec<String>,

    /// テスト扱いするパスの正規表現 (走査ルートからの相対パス)
    #[arg(long = "test-pattern", help_heading = "フィルタ")]
    pub test_pattern: Option<String>,

    /// 拡張子の言語割り当て (例: inc=C)
    #[arg(long = "map-ext", value_parser = parsers::parse_key_val, help_heading = "フィルタ")]
    pub map_ext: Vec<(String, String)>,
}

#[derive(ClapArgs, Debug)]
pub struct BehaviorOptions {
    /// 読めないファイルや分類しきれないファイルでエラー終了
    #[arg(long, help_heading = "動作")]
    pub strict: bool,

    /// ログを詳しくする (-v: info, -vv: debug)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, conflicts_with = "quiet", help_heading = "動作")]
    pub verbose: u8,

    /// エラーのみ表示
    #[arg(short = 'q', long, help_heading = "動作")]
    pub quiet: bool,

    /// 警告以上をファイルにも書き出す
    #[arg(long = "log-file", value_hint = ValueHint::FilePath, help_heading = "動作")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults() {
        let args = Args::try_parse_from(["code_count"]).unwrap();
        assert!(args.paths.is_empty());
        assert_eq!(args.output.format, OutputFormat::Table);
        assert_eq!(args.scan.jobs, 1);
        assert_eq!(args.behavior.verbose, 0);
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "code_count",
            "src",
            "--format",
            "json",
            "--map-ext",
            "inc=C",
            "--ignore-dir",
            "vendor,dist",
            "-vv",
            "-j",
            "0",
        ])
        .unwrap();
        assert_eq!(args.paths, vec![PathBuf::from("src")]);
        assert_eq!(args.output.format, OutputFormat::Json);
        assert_eq!(args.filter.map_ext, vec![("inc".to_string(), "C".to_string())]);
        assert_eq!(args.filter.ignore_dir, vec!["vendor", "dist"]);
        assert_eq!(args.behavior.verbose, 2);
        assert_eq!(args.scan.jobs, 0);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Args::try_parse_from(["code_count", "-v", "-q"]).is_err());
    }
}
