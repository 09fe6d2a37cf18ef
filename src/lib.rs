#![forbid(unsafe_code)]
//! # comment_analysis
//!
//! Cleans CSV exports of social media comments (columns `text` and `diggCount`),
//! flags offensive comments with a fixed keyword list and summarizes them:
//!
//! - the most liked comments,
//! - word frequencies for a word cloud (rendered to SVG),
//! - how often each offensive keyword occurs,
//! - the ratio of offensive to non-offensive comments.
//!
//! ## Example
//! ```no_run
//! use comment_analysis::{AnalysisOptions, analyze, render_text};
//!
//! let options = AnalysisOptions {
//!     paths: vec!["comments.csv".into()],
//!     ..AnalysisOptions::default()
//! };
//! let report = analyze(&options).expect("analysis failed");
//! println!("{}", render_text(&report));
//! ```

use std::path::PathBuf;

use log::{debug, info};
use serde::Serialize;

pub mod aggregate;
pub mod charts;
pub mod clean;
mod error;
pub mod export;
pub mod ingest;
pub mod offensive;
pub mod report;
pub mod stopwords;
pub mod wordcloud;

pub use aggregate::{
    Comment, RatioEntry, TopComment, WordFrequency, join_clean_text, offensive_ratio, top_liked,
    word_frequencies,
};
pub use charts::bar_chart_svg;
pub use clean::clean_text;
pub use error::AnalysisError;
pub use export::{ExportFormat, csv_safe_cell, export_report};
pub use ingest::{Encoding, RawComment, collect_files, load_files};
pub use offensive::{KeywordCount, OFFENSIVE_KEYWORDS, is_offensive, keyword_frequency};
pub use report::render_text;
pub use stopwords::stopword_set;
pub use wordcloud::{CLOUD_HEIGHT, CLOUD_WIDTH, WordCloud};

/// Smallest number of top liked comments that can be requested.
pub const TOP_MIN: usize = 5;
/// Largest number of top liked comments that can be requested.
pub const TOP_MAX: usize = 100;
/// Number of top liked comments shown when none is requested.
pub const TOP_DEFAULT: usize = 10;
/// Default cap on distinct words in the word cloud.
pub const MAX_WORDS_DEFAULT: usize = 200;

/// Options for one analysis run.
#[derive(Clone, Debug)]
pub struct AnalysisOptions {
    /// CSV files or directories holding CSV files
    pub paths: Vec<PathBuf>,
    pub top: usize,
    /// Extra stopwords for the word cloud, one per line
    pub stopwords: Option<PathBuf>,
    pub encoding: Encoding,
    pub max_words: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions {
            paths: Vec::new(),
            top: TOP_DEFAULT,
            stopwords: None,
            encoding: Encoding::Latin1,
            max_words: MAX_WORDS_DEFAULT,
        }
    }
}

/// Result of one analysis run. Every aggregate is computed from the same rows.
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub files: Vec<PathBuf>,
    pub total_comments: usize,
    pub top_liked: Vec<TopComment>,
    pub word_frequencies: Vec<WordFrequency>,
    pub offensive_words: Vec<KeywordCount>,
    pub offensive_ratio: Vec<RatioEntry>,
}

impl Report {
    /// Lays out the word frequencies as an 800x300 word cloud.
    pub fn word_cloud(&self) -> WordCloud {
        WordCloud::layout(&self.word_frequencies, CLOUD_WIDTH, CLOUD_HEIGHT)
    }

    /// Bar chart of the offensive keyword table, `None` when no keyword was hit.
    pub fn keyword_chart(&self) -> Result<Option<String>, AnalysisError> {
        if self.offensive_words.is_empty() {
            return Ok(None);
        }
        let rows: Vec<(&str, usize)> = self
            .offensive_words
            .iter()
            .map(|k| (k.keyword.as_str(), k.count))
            .collect();
        bar_chart_svg("Most frequent offensive words", &rows).map(Some)
    }

    /// Bar chart of offensive vs. non-offensive comments, `None` for an empty dataset.
    pub fn ratio_chart(&self) -> Result<Option<String>, AnalysisError> {
        if self.offensive_ratio.is_empty() {
            return Ok(None);
        }
        let rows: Vec<(&str, usize)> = self
            .offensive_ratio
            .iter()
            .map(|r| (r.label.as_str(), r.count))
            .collect();
        bar_chart_svg("Offensive comment ratio", &rows).map(Some)
    }
}

/// Runs the whole pipeline: load and validate the input, clean and classify every
/// comment, then compute all aggregates. Nothing is computed if validation fails.
pub fn analyze(options: &AnalysisOptions) -> Result<Report, AnalysisError> {
    if !(TOP_MIN..=TOP_MAX).contains(&options.top) {
        return Err(AnalysisError::TopOutOfRange(options.top));
    }
    let files = collect_files(&options.paths)?;
    let raw = load_files(&files, options.encoding)?;
    let stopwords = stopword_set(options.stopwords.as_deref())?;

    let comments: Vec<Comment> = raw.into_iter().map(Comment::from_raw).collect();
    let offensive_count = comments.iter().filter(|c| c.offensive).count();
    info!(
        "Analyzing {} comments from {} file(s), {} offensive",
        comments.len(),
        files.len(),
        offensive_count
    );

    let top_liked = top_liked(&comments, options.top)?;
    let word_frequencies =
        word_frequencies(&join_clean_text(&comments), &stopwords, options.max_words);
    let offensive_words =
        keyword_frequency(&join_clean_text(comments.iter().filter(|c| c.offensive)));
    let offensive_ratio = offensive_ratio(&comments);
    debug!(
        "{} distinct cloud words, {} offensive keywords hit",
        word_frequencies.len(),
        offensive_words.len()
    );

    Ok(Report {
        files,
        total_comments: comments.len(),
        top_liked,
        word_frequencies,
        offensive_words,
        offensive_ratio,
    })
}
