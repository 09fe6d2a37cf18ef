//! Plain text rendering of an analysis [`Report`].

use std::fmt::Write as _;

use crate::Report;

const CLOUD_PREVIEW: usize = 20;

/// Renders all sections of the report as text for stdout or a `.txt` export.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Comment analysis: {} comments from {} file(s)\n",
        report.total_comments,
        report.files.len()
    );

    section(&mut out, "Top liked comments");
    let text_width = report
        .top_liked
        .iter()
        .map(|t| one_line(&t.text).chars().count())
        .max()
        .unwrap_or(0)
        .clamp(4, 80);
    let _ = writeln!(out, "{:>4}  {:<text_width$}  diggCount", "#", "text");
    for (i, t) in report.top_liked.iter().enumerate() {
        let digg = t.digg_count.map(|d| d.to_string()).unwrap_or_default();
        let _ = writeln!(
            out,
            "{:>4}  {:<text_width$}  {}",
            i + 1,
            truncate(&one_line(&t.text), text_width),
            digg
        );
    }
    out.push('\n');

    section(&mut out, "Most common words");
    if report.word_frequencies.is_empty() {
        out.push_str("(no words left after stopword removal)\n");
    } else {
        let rows: Vec<(&str, usize)> = report
            .word_frequencies
            .iter()
            .take(CLOUD_PREVIEW)
            .map(|w| (w.word.as_str(), w.count))
            .collect();
        out.push_str(&count_table("word", &rows));
    }
    out.push('\n');

    section(&mut out, "Most frequent offensive words");
    if report.offensive_words.is_empty() {
        out.push_str("(none)\n");
    } else {
        let rows: Vec<(&str, usize)> = report
            .offensive_words
            .iter()
            .map(|k| (k.keyword.as_str(), k.count))
            .collect();
        out.push_str(&count_table("keyword", &rows));
    }
    out.push('\n');

    section(&mut out, "Offensive comment ratio");
    let rows: Vec<(&str, usize)> = report
        .offensive_ratio
        .iter()
        .map(|r| (r.label.as_str(), r.count))
        .collect();
    out.push_str(&count_table("label", &rows));
    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}\n{}", "=".repeat(title.chars().count()));
}

/// Two column table of labels and counts, labels left aligned.
fn count_table(header: &str, rows: &[(&str, usize)]) -> String {
    let mut out = String::new();
    let width = rows
        .iter()
        .map(|(l, _)| l.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0);
    let _ = writeln!(out, "{header:<width$}  count");
    for (label, count) in rows {
        let _ = writeln!(out, "{label:<width$}  {count}");
    }
    out
}

fn one_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max.saturating_sub(3)).collect();
        t.push_str("...");
        t
    }
}
