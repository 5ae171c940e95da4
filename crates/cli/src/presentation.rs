// crates/cli/src/presentation.rs
use crate::error::Result;
use crate::options::OutputFormat;
use code_count_core::{Aggregator, CountTable, TAG_ALL, TAG_TEST, Tally};
use code_count_engine::stats::FileReport;
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;

const RULE_WIDTH: usize = 66;

/// One summary row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Row<'a> {
    pub tag: &'a str,
    pub files: usize,
    #[serde(flatten)]
    pub counts: CountTable,
}

impl<'a> Row<'a> {
    const fn new(tag: &'a str, tally: &Tally) -> Self {
        Self {
            tag,
            files: tally.files,
            counts: tally.counts,
        }
    }
}

/// Everything that gets rendered.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub version: &'static str,
    /// Largest language first.
    pub languages: Vec<Row<'a>>,
    pub test: Row<'a>,
    pub all: Row<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<&'a [FileReport]>,
}

impl<'a> Report<'a> {
    #[must_use]
    pub fn new(totals: &'a Aggregator, files: Option<&'a [FileReport]>) -> Self {
        let mut languages: Vec<Row<'a>> = totals
            .languages()
            .map(|(tag, tally)| Row::new(tag, tally))
            .collect();
        languages.sort_by(|a, b| {
            b.counts
                .total
                .cmp(&a.counts.total)
                .then_with(|| a.tag.cmp(b.tag))
        });

        Self {
            version: crate::VERSION,
            languages,
            test: Row::new(TAG_TEST, totals.test()),
            all: Row::new(TAG_ALL, totals.all()),
            files,
        }
    }

    /// Language rows followed by `Test` and `All`.
    pub fn rows(&self) -> impl Iterator<Item = &Row<'a>> {
        self.languages
            .iter()
            .chain([&self.test, &self.all])
    }
}

/// Renders the report in the requested format.
///
/// # Errors
///
/// Propagates serializer failures.
pub fn render(report: &Report<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => render_table(report),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(report)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Yaml => Ok(serde_yaml::to_string(report)?),
        OutputFormat::Csv => render_csv(report),
        OutputFormat::Md => render_markdown(report),
    }
}

/// Writes rendered text to `output`, or stdout when none is given.
///
/// # Errors
///
/// Returns an IO error if the destination cannot be written.
pub fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, text)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn render_table(report: &Report<'_>) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "code_count v{}", report.version)?;
    writeln!(out)?;

    if let Some(files) = report.files {
        writeln!(
            out,
            "{:>9}{:>10}{:>10}{:>10}      FILE",
            "BLANK", "COMMENT", "CODE", "TOTAL"
        )?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        for file in files {
            let c = &file.counts;
            write!(
                out,
                "{:>9}{:>10}{:>10}{:>10}      {}",
                c.blank,
                c.comment,
                c.code,
                c.total,
                file.path.display()
            )?;
            if let Some(remainder) = &file.remainder {
                write!(out, " (partial from line {})", remainder.line)?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;
    }

    writeln!(
        out,
        "{:<16}{:>10}{:>10}{:>10}{:>10}{:>10}",
        "LANGUAGE", "FILES", "BLANK", "COMMENT", "CODE", "TOTAL"
    )?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    for row in &report.languages {
        table_row(&mut out, row)?;
    }
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    table_row(&mut out, &report.test)?;
    table_row(&mut out, &report.all)?;
    Ok(out)
}

fn table_row(out: &mut String, row: &Row<'_>) -> std::fmt::Result {
    let c = &row.counts;
    writeln!(
        out,
        "{:<16}{:>10}{:>10}{:>10}{:>10}{:>10}",
        row.tag, row.files, c.blank, c.comment, c.code, c.total
    )
}

fn render_csv(report: &Report<'_>) -> Result<String> {
    let mut out = String::from("language,files,blank,comment,code,total\n");
    for row in report.rows() {
        let c = &row.counts;
        writeln!(
            out,
            "{},{},{},{},{},{}",
            csv_field(row.tag),
            row.files,
            c.blank,
            c.comment,
            c.code,
            c.total
        )?;
    }

    if let Some(files) = report.files {
        out.push_str("\npath,language,test,blank,comment,code,total\n");
        for file in files {
            let c = &file.counts;
            writeln!(
                out,
                "{},{},{},{},{},{},{}",
                csv_field(&file.path.display().to_string()),
                csv_field(&file.language),
                file.is_test,
                c.blank,
                c.comment,
                c.code,
                c.total
            )?;
        }
    }
    Ok(out)
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn render_markdown(report: &Report<'_>) -> Result<String> {
    let mut out = String::from("### Line Counts\n\n");
    out.push_str("| Language | Files | Blank | Comment | Code | Total |\n");
    out.push_str("|:---|---:|---:|---:|---:|---:|\n");
    for row in report.rows() {
        let c = &row.counts;
        writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} |",
            md_cell(row.tag),
            row.files,
            c.blank,
            c.comment,
            c.code,
            c.total
        )?;
    }

    if let Some(files) = report.files {
        out.push_str("\n### Files\n\n");
        out.push_str("| File | Language | Blank | Comment | Code | Total |\n");
        out.push_str("|:---|:---|---:|---:|---:|---:|\n");
        for file in files {
            let c = &file.counts;
            writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} |",
                md_cell(&file.path.display().to_string()),
                md_cell(&file.language),
                c.blank,
                c.comment,
                c.code,
                c.total
            )?;
        }
    }
    Ok(out)
}

fn md_cell(value: &str) -> String {
    value.replace('|', "\\|")
}
