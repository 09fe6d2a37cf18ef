use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::clean::clean_text;
use crate::ingest::RawComment;
use crate::offensive::is_offensive;
use crate::{AnalysisError, TOP_MAX, TOP_MIN};

pub const LABEL_OFFENSIVE: &str = "Ofensivo";
pub const LABEL_NOT_OFFENSIVE: &str = "No Ofensivo";

/// A comment with its cleaned text and offensive flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: Option<String>,
    pub digg_count: Option<u64>,
    pub clean_text: String,
    pub offensive: bool,
}

impl Comment {
    pub fn from_raw(raw: RawComment) -> Self {
        let clean_text = clean_text(raw.text.as_deref());
        let offensive = is_offensive(&clean_text);
        Comment {
            text: raw.text,
            digg_count: raw.digg_count,
            clean_text,
            offensive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopComment {
    pub text: String,
    #[serde(rename = "diggCount")]
    pub digg_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
    /// count relative to the most frequent word, in (0, 1]
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatioEntry {
    pub label: String,
    pub count: usize,
}

///Returns the `n` most liked comments. Sorting is stable, so equal counts keep input
///order; comments without a count rank last.
pub fn top_liked(comments: &[Comment], n: usize) -> Result<Vec<TopComment>, AnalysisError> {
    if !(TOP_MIN..=TOP_MAX).contains(&n) {
        return Err(AnalysisError::TopOutOfRange(n));
    }
    let mut ranked: Vec<&Comment> = comments.iter().collect();
    // None < Some(_), so reversing the comparison puts missing counts last
    ranked.sort_by(|a, b| b.digg_count.cmp(&a.digg_count));
    Ok(ranked
        .into_iter()
        .take(n)
        .map(|c| TopComment {
            text: c.text.clone().unwrap_or_default(),
            digg_count: c.digg_count,
        })
        .collect())
}

/// Joins the cleaned text of the selected comments with single spaces.
pub fn join_clean_text<'a, I>(comments: I) -> String
where
    I: IntoIterator<Item = &'a Comment>,
{
    comments
        .into_iter()
        .map(|c| c.clean_text.as_str())
        .collect::<Vec<&str>>()
        .join(" ")
}

///Counts whitespace separated words of `text`, skipping exact stopword matches.
///Sorted by count, descending, ties in order of first appearance; at most `max_words`
///entries are returned.
/// # Example
/// ```
/// use comment_analysis::word_frequencies;
/// use std::collections::HashSet;
/// let stop: HashSet<String> = ["de".to_string()].into_iter().collect();
/// let freq = word_frequencies("gato de gato perro", &stop, 200);
/// assert_eq!(freq[0].word, "gato");
/// assert_eq!(freq[0].count, 2);
/// assert_eq!(freq[1].weight, 0.5);
/// ```
pub fn word_frequencies(
    text: &str,
    stopwords: &HashSet<String>,
    max_words: usize,
) -> Vec<WordFrequency> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in text.split_whitespace() {
        if stopwords.contains(word) {
            continue;
        }
        let count = counts.entry(word).or_insert(0);
        if *count == 0 {
            order.push(word);
        }
        *count += 1;
    }

    let mut ranked: Vec<(&str, usize)> = order.into_iter().map(|w| (w, counts[w])).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(max_words);

    let max = ranked.first().map(|(_, c)| *c).unwrap_or(1) as f64;
    ranked
        .into_iter()
        .map(|(word, count)| WordFrequency {
            word: word.to_string(),
            count,
            weight: count as f64 / max,
        })
        .collect()
}

///Counts offensive and non-offensive comments. Empty categories are left out; the
///larger category comes first. On a tie the category of the first comment comes first.
pub fn offensive_ratio(comments: &[Comment]) -> Vec<RatioEntry> {
    let offensive = comments.iter().filter(|c| c.offensive).count();
    let clean = comments.len() - offensive;
    let mut counts = [(LABEL_OFFENSIVE, offensive), (LABEL_NOT_OFFENSIVE, clean)];
    if comments.first().is_some_and(|c| !c.offensive) {
        counts.swap(0, 1);
    }
    let mut entries: Vec<RatioEntry> = counts
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(label, count)| RatioEntry {
            label: label.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}
