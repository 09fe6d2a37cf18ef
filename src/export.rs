use std::fs;
use std::path::{Path, PathBuf};

use chrono::prelude::*;
use clap::ValueEnum;
use csv::WriterBuilder;
use log::info;
use serde::Serialize;

use crate::report::render_text;
use crate::wordcloud::WordCloud;
use crate::{AnalysisError, Report};

/// Format of the exported tables.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Txt,
    Csv,
    Tsv,
    Json,
}

///Neutralizes spreadsheet formulas: a cell starting with `=`, `+`, `-`, `@`, tab or CR
///gets a leading `'`. Cells already starting with `'` are left alone.
/// # Example
/// ```
/// use comment_analysis::csv_safe_cell;
/// assert_eq!(csv_safe_cell("=SUM(A1)".to_string()), "'=SUM(A1)");
/// assert_eq!(csv_safe_cell("hola".to_string()), "hola");
/// ```
pub fn csv_safe_cell(cell: String) -> String {
    match cell.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => format!("'{cell}"),
        _ => cell,
    }
}

/// Builds the export file stem `<name>_<YYYYMMDD_HHMMSS>`: the input file stem for a
/// single input, `combined` for several.
pub fn export_stem(files: &[PathBuf], now: DateTime<Local>) -> String {
    let name = match files {
        [single] => single
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "comments".to_string()),
        _ => "combined".to_string(),
    };
    format!("{name}_{}", now.format("%Y%m%d_%H%M%S"))
}

/// Writes the report in `format` plus the SVG charts into `out_dir`: the word cloud,
/// the ratio chart and, only when a keyword was hit, the keyword chart.
/// Returns the written paths.
pub fn export_report(
    report: &Report,
    format: ExportFormat,
    out_dir: &Path,
    cloud: &WordCloud,
) -> Result<Vec<PathBuf>, AnalysisError> {
    fs::create_dir_all(out_dir)?;
    let stem = export_stem(&report.files, Local::now());
    let mut written = Vec::new();

    match format {
        ExportFormat::Txt => {
            let path = out_dir.join(format!("{stem}_report.txt"));
            fs::write(&path, render_text(report))?;
            written.push(path);
        }
        ExportFormat::Csv | ExportFormat::Tsv => {
            let (delimiter, ext) = if format == ExportFormat::Csv {
                (b',', "csv")
            } else {
                (b'\t', "tsv")
            };
            let table = |name: &str| out_dir.join(format!("{stem}_{name}.{ext}"));

            let path = table("top_liked");
            write_delimited(
                &path,
                delimiter,
                ["text", "diggCount"],
                report.top_liked.iter().map(|t| {
                    [
                        t.text.clone(),
                        t.digg_count.map(|d| d.to_string()).unwrap_or_default(),
                    ]
                }),
            )?;
            written.push(path);

            let path = table("offensive_words");
            write_delimited(
                &path,
                delimiter,
                ["keyword", "count"],
                report
                    .offensive_words
                    .iter()
                    .map(|k| [k.keyword.clone(), k.count.to_string()]),
            )?;
            written.push(path);

            let path = table("offensive_ratio");
            write_delimited(
                &path,
                delimiter,
                ["label", "count"],
                report
                    .offensive_ratio
                    .iter()
                    .map(|r| [r.label.clone(), r.count.to_string()]),
            )?;
            written.push(path);

            let path = table("wordfreq");
            write_delimited(
                &path,
                delimiter,
                ["word", "count", "weight"],
                report.word_frequencies.iter().map(|w| {
                    [
                        w.word.clone(),
                        w.count.to_string(),
                        format!("{:.4}", w.weight),
                    ]
                }),
            )?;
            written.push(path);
        }
        ExportFormat::Json => {
            let table = |name: &str| out_dir.join(format!("{stem}_{name}.json"));
            let path = table("top_liked");
            write_json(&path, &report.top_liked)?;
            written.push(path);
            let path = table("offensive_words");
            write_json(&path, &report.offensive_words)?;
            written.push(path);
            let path = table("offensive_ratio");
            write_json(&path, &report.offensive_ratio)?;
            written.push(path);
            let path = table("wordfreq");
            write_json(&path, &report.word_frequencies)?;
            written.push(path);
        }
    }

    let path = out_dir.join(format!("{stem}_wordcloud.svg"));
    fs::write(&path, cloud.to_svg()?)?;
    written.push(path);

    if let Some(svg) = report.keyword_chart()? {
        let path = out_dir.join(format!("{stem}_offensive_words_chart.svg"));
        fs::write(&path, svg)?;
        written.push(path);
    }
    if let Some(svg) = report.ratio_chart()? {
        let path = out_dir.join(format!("{stem}_offensive_ratio_chart.svg"));
        fs::write(&path, svg)?;
        written.push(path);
    }

    for p in &written {
        info!("Wrote {}", p.display());
    }
    Ok(written)
}

fn write_delimited<const N: usize, I>(
    path: &Path,
    delimiter: u8,
    header: [&str; N],
    rows: I,
) -> Result<(), AnalysisError>
where
    I: IntoIterator<Item = [String; N]>,
{
    let mut wtr = WriterBuilder::new().delimiter(delimiter).from_path(path)?;
    wtr.write_record(header)?;
    for row in rows {
        wtr.write_record(row.map(csv_safe_cell))?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), AnalysisError> {
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}
