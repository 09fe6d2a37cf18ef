#![forbid(unsafe_code)]
//! # Comment Analysis CLI
//!
//! Command-line interface for the `comment_analysis` crate. Loads one or more CSV
//! exports of comments (columns `text` and `diggCount`), prints a summary report and
//! writes the tables plus an SVG word cloud to the output directory.
//!
//! ## Example
//! ```bash
//! cargo run --release -- exports/ --top 20 --export-format csv --out results
//! ```
//!
//! See `--help` for all available options.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use comment_analysis::{
    AnalysisOptions, Encoding, ExportFormat, MAX_WORDS_DEFAULT, TOP_DEFAULT, TOP_MAX, TOP_MIN,
    analyze, export_report, render_text,
};
use log::error;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// CSV files or directories with CSV files (at least one)
    #[arg(required = true, num_args = 1..)]
    paths: Vec<PathBuf>,

    /// Number of most liked comments to show (5 to 100)
    #[arg(long, default_value_t = TOP_DEFAULT as u16,
          value_parser = clap::value_parser!(u16).range(TOP_MIN as i64..=TOP_MAX as i64))]
    top: u16,

    /// Optional path to additional stopword file (.txt, one word per line)
    #[arg(long)]
    stopwords: Option<PathBuf>,

    /// Encoding of the input files
    #[arg(long, value_enum, default_value = "latin1")]
    encoding: Encoding,

    /// Output format for export (txt, csv, tsv, json)
    #[arg(long, value_enum, default_value = "txt")]
    export_format: ExportFormat,

    /// Directory to write exports into
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Maximum number of words in the word cloud
    #[arg(long, default_value_t = MAX_WORDS_DEFAULT)]
    max_words: usize,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let options = AnalysisOptions {
        paths: cli.paths,
        top: usize::from(cli.top),
        stopwords: cli.stopwords,
        encoding: cli.encoding,
        max_words: cli.max_words,
    };

    let report = match analyze(&options) {
        Ok(report) => report,
        Err(e) => {
            error!("Error: {}", e);
            process::exit(1);
        }
    };

    println!("{}", render_text(&report));

    if let Err(e) = export_report(&report, cli.export_format, &cli.out, &report.word_cloud()) {
        error!("Export failed: {}", e);
        process::exit(1);
    }
}
