//! Loading and validation of CSV comment exports.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use csv::ReaderBuilder;
use log::{info, warn};
use walkdir::WalkDir;

use crate::AnalysisError;

pub const TEXT_COLUMN: &str = "text";
pub const DIGG_COLUMN: &str = "diggCount";

/// Cell values read as missing, the same set pandas' `read_csv` uses by default.
pub const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns true if a raw cell stands for a missing value.
pub fn is_na(cell: &str) -> bool {
    NA_VALUES.contains(&cell)
}

/// Byte encoding of the input files.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Encoding {
    /// ISO-8859-1, every byte maps to one char
    Latin1,
    Utf8,
}

/// A comment as read from the input, before cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawComment {
    pub text: Option<String>,
    pub digg_count: Option<u64>,
}

/// Expands the given paths into CSV files. Files keep the given order, directories
/// are walked and contribute their `.csv` files sorted by path.
pub fn collect_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PathBuf>, AnalysisError> {
    let mut files = Vec::new();
    for p in paths {
        let p = p.as_ref();
        if p.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(p)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .filter(|f| {
                    f.extension()
                        .map(|x| x.eq_ignore_ascii_case("csv"))
                        .unwrap_or(false)
                })
                .collect();
            found.sort();
            files.append(&mut found);
        } else if p.is_file() {
            files.push(p.to_path_buf());
        } else {
            return Err(AnalysisError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", p.display()),
            )));
        }
    }
    if files.is_empty() {
        return Err(AnalysisError::NoInput);
    }
    Ok(files)
}

/// Reads all files and concatenates their rows in order.
///
/// The column set of the merged dataset is the union of every header, so a file
/// lacking `diggCount` is fine as long as another file has it; its rows then carry
/// no like count. Only when the union lacks `text` or `diggCount` does this fail
/// with [`AnalysisError::MissingColumns`].
pub fn load_files(files: &[PathBuf], encoding: Encoding) -> Result<Vec<RawComment>, AnalysisError> {
    if files.is_empty() {
        return Err(AnalysisError::NoInput);
    }

    let mut tables = Vec::with_capacity(files.len());
    for path in files {
        let table = read_table(path, encoding)?;
        info!("Loaded {} rows from {}", table.rows.len(), path.display());
        tables.push(table);
    }

    let missing: Vec<String> = [TEXT_COLUMN, DIGG_COLUMN]
        .iter()
        .filter(|col| !tables.iter().any(|t| t.columns.contains_key(**col)))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(AnalysisError::MissingColumns(missing));
    }

    let mut comments = Vec::new();
    for table in tables {
        let text_idx = table.columns.get(TEXT_COLUMN).copied();
        let digg_idx = table.columns.get(DIGG_COLUMN).copied();
        for row in table.rows {
            let text = text_idx.and_then(|i| row.cells.get(i).cloned().flatten());
            let digg_count = match digg_idx.and_then(|i| row.cells.get(i).cloned().flatten()) {
                Some(raw) => parse_digg_count(&raw).ok_or_else(|| {
                    AnalysisError::InvalidDiggCount {
                        path: table.path.clone(),
                        line: row.line,
                        value: raw.clone(),
                    }
                })?,
                None => None,
            };
            comments.push(RawComment { text, digg_count });
        }
    }

    let without_count = comments.iter().filter(|c| c.digg_count.is_none()).count();
    if without_count > 0 {
        warn!("{without_count} rows have no diggCount and rank last");
    }
    Ok(comments)
}

/// Decodes file bytes according to `encoding`.
pub fn decode(bytes: &[u8], encoding: Encoding, path: &Path) -> Result<String, AnalysisError> {
    match encoding {
        Encoding::Latin1 => Ok(encoding_rs::mem::decode_latin1(bytes).into_owned()),
        Encoding::Utf8 => {
            let (text, had_errors) = encoding_rs::UTF_8.decode_without_bom_handling(bytes);
            if had_errors {
                return Err(AnalysisError::Encoding {
                    path: path.to_path_buf(),
                    message: "file is not valid UTF-8 (try --encoding latin1)".to_string(),
                });
            }
            Ok(text.into_owned())
        }
    }
}

/// Parses a like count. Empty and NA cells are missing (`Some(None)`), non-negative
/// integers and integral floats like `12.0` are values, anything else is invalid (`None`).
fn parse_digg_count(raw: &str) -> Option<Option<u64>> {
    let raw = raw.trim();
    if is_na(raw) {
        return Some(None);
    }
    if let Ok(n) = raw.parse::<u64>() {
        return Some(Some(n));
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
            Some(Some(f as u64))
        }
        _ => None,
    }
}

struct Row {
    line: u64,
    cells: Vec<Option<String>>,
}

struct Table {
    path: PathBuf,
    columns: HashMap<String, usize>,
    rows: Vec<Row>,
}

fn read_table(path: &Path, encoding: Encoding) -> Result<Table, AnalysisError> {
    let bytes = fs::read(path)?;
    let content = decode(&bytes, encoding, path)?;
    let csv_err = |source: csv::Error| AnalysisError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());
    let headers = reader.headers().map_err(csv_err)?.clone();

    let mut columns = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // first occurrence wins for duplicated header names
        columns.entry(name.to_string()).or_insert(idx);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if record.len() > headers.len() {
            return Err(AnalysisError::Csv {
                path: path.to_path_buf(),
                source: csv::Error::from(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!(
                        "line {line}: expected {} fields, saw {}",
                        headers.len(),
                        record.len()
                    ),
                )),
            });
        }
        let cells = (0..headers.len())
            .map(|i| record.get(i).filter(|v| !is_na(v)).map(String::from))
            .collect();
        rows.push(Row { line, cells });
    }

    Ok(Table {
        path: path.to_path_buf(),
        columns,
        rows,
    })
}
