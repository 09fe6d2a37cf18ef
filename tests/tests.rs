//! Integration tests for `comment_analysis`.
//
// This suite verifies:
// - Library behavior (loading, validation, cleaning, classification, aggregates)
// - CLI behavior including export formats, argument bounds and error exits
//
// Notes:
// - Every test writes into its own temp dir; CLI runs get it via --out.

use std::fs;
use std::path::{Path, PathBuf};

use assert_fs::prelude::*;
use predicates::prelude::*;
use regex::Regex;
use serde_json::Value as Json;

use comment_analysis::{
    AnalysisError, AnalysisOptions, Encoding, KeywordCount, analyze, clean_text, collect_files,
    is_offensive, load_files, render_text, OFFENSIVE_KEYWORDS,
};

// --------------------- helpers ---------------------

/// Create a file with content in a temp dir.
fn write_file(dir: &assert_fs::TempDir, name: &str, content: &str) -> PathBuf {
    let f = dir.child(name);
    f.write_str(content).unwrap();
    f.path().to_path_buf()
}

/// Options for a library run over the given paths.
fn opts<P: AsRef<Path>>(paths: &[P]) -> AnalysisOptions {
    AnalysisOptions {
        paths: paths.iter().map(|p| p.as_ref().to_path_buf()).collect(),
        ..AnalysisOptions::default()
    }
}

/// Run CLI successfully with a specific working directory.
fn run_cli_ok_in(dir: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = assert_cmd::Command::cargo_bin("comment_analysis").unwrap();
    cmd.current_dir(dir).env("RUST_LOG", "error");
    cmd.args(args).assert().success()
}

/// Run CLI expecting failure with a specific working directory.
fn run_cli_fail_in(dir: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = assert_cmd::Command::cargo_bin("comment_analysis").unwrap();
    cmd.current_dir(dir).env("RUST_LOG", "error");
    cmd.args(args).assert().failure()
}

/// Find an export file that ends with a given suffix (e.g., "_wordfreq.json").
fn find_with_suffix(dir: &Path, suffix: &str) -> PathBuf {
    for entry in fs::read_dir(dir).unwrap().filter_map(|e| e.ok()) {
        let p = entry.path();
        if let Some(name) = p.file_name().and_then(|n| n.to_str()) {
            if name.ends_with(suffix) {
                return p;
            }
        }
    }
    panic!("No file found ending with {}", suffix);
}

fn count_files(dir: &Path) -> usize {
    fs::read_dir(dir).map(|rd| rd.count()).unwrap_or(0)
}

fn numbered_rows(n: u64) -> String {
    let mut csv = String::from("text,diggCount\n");
    for i in 1..=n {
        csv.push_str(&format!("comentario numero {i},{i}\n"));
    }
    csv
}

fn kw(table: &[KeywordCount]) -> Vec<(&str, usize)> {
    table.iter().map(|k| (k.keyword.as_str(), k.count)).collect()
}

// --------------------- library tests ---------------------

#[test]
fn lib_top_ten_of_fifteen() {
    let td = assert_fs::TempDir::new().unwrap();
    let f = write_file(&td, "likes.csv", &numbered_rows(15));

    let report = analyze(&opts(&[&f])).expect("analysis runs");
    assert_eq!(report.total_comments, 15);
    let counts: Vec<u64> = report.top_liked.iter().filter_map(|t| t.digg_count).collect();
    assert_eq!(counts, vec![15, 14, 13, 12, 11, 10, 9, 8, 7, 6]);
    assert_eq!(report.top_liked[0].text, "comentario numero 15");
}

#[test]
fn lib_keyword_frequency_negro_feo() {
    let td = assert_fs::TempDir::new().unwrap();
    let f = write_file(
        &td,
        "c.csv",
        "text,diggCount\neres negro,1\n\"negro, negro\",2\nqué feo,3\nque lindo dia,4\n",
    );

    let report = analyze(&opts(&[&f])).unwrap();
    assert_eq!(kw(&report.offensive_words), vec![("negro", 3), ("feo", 1)]);
    let ratio: Vec<(&str, usize)> = report
        .offensive_ratio
        .iter()
        .map(|r| (r.label.as_str(), r.count))
        .collect();
    assert_eq!(ratio, vec![("Ofensivo", 3), ("No Ofensivo", 1)]);
}

#[test]
fn lib_all_clean_comments_give_empty_keyword_table() {
    let td = assert_fs::TempDir::new().unwrap();
    let f = write_file(
        &td,
        "clean.csv",
        "text,diggCount\nhola a todos,1\nque lindo video,5\n",
    );

    let report = analyze(&opts(&[&f])).unwrap();
    assert!(report.offensive_words.is_empty());
    assert_eq!(report.offensive_ratio.len(), 1);
    assert_eq!(report.offensive_ratio[0].label, "No Ofensivo");

    // no keyword chart: the section only says "(none)"
    let text = render_text(&report);
    let section = text
        .split("Most frequent offensive words")
        .nth(1)
        .and_then(|s| s.split("Offensive comment ratio").next())
        .unwrap();
    assert!(section.contains("(none)"));
    assert!(!section.contains('#'));
    assert!(!text.lines().any(|l| l.starts_with("Ofensivo ")));
    assert!(report.keyword_chart().unwrap().is_none());
}

#[test]
fn lib_all_offensive_comments_omit_clean_category() {
    let td = assert_fs::TempDir::new().unwrap();
    let f = write_file(&td, "all.csv", "text,diggCount
que feo,1
eres negro,2
");

    let report = analyze(&opts(&[&f])).unwrap();
    assert_eq!(report.offensive_ratio.len(), 1);
    assert_eq!(report.offensive_ratio[0].label, "Ofensivo");
    assert_eq!(report.offensive_ratio[0].count, 2);

    let text = render_text(&report);
    assert!(!text.contains("No Ofensivo"));
    let chart = report.ratio_chart().unwrap().expect("ratio chart");
    assert!(!chart.contains("No Ofensivo"));
}

#[test]
fn lib_nan_digg_count_is_missing_and_sorts_last() {
    let td = assert_fs::TempDir::new().unwrap();
    let f = write_file(&td, "nan.csv", "text,diggCount
hola,5
chau,NaN
buenas,null
");

    let report = analyze(&opts(&[&f])).expect("NA like counts load");
    assert_eq!(report.total_comments, 3);
    let top: Vec<(&str, Option<u64>)> = report
        .top_liked
        .iter()
        .map(|t| (t.text.as_str(), t.digg_count))
        .collect();
    assert_eq!(
        top,
        vec![("hola", Some(5)), ("chau", None), ("buenas", None)]
    );
}

#[test]
fn lib_na_text_cells_are_missing() {
    let td = assert_fs::TempDir::new().unwrap();
    let f = write_file(
        &td,
        "na.csv",
        "text,diggCount
NA,1
null,2
NaN,3
gato negro,4
",
    );

    let raw = load_files(&[f.clone()], Encoding::Utf8).unwrap();
    assert_eq!(raw.len(), 4);
    assert!(raw[..3].iter().all(|r| r.text.is_none()));
    assert_eq!(raw[3].text.as_deref(), Some("gato negro"));

    let report = analyze(&opts(&[&f])).unwrap();
    let words: Vec<&str> = report
        .word_frequencies
        .iter()
        .map(|w| w.word.as_str())
        .collect();
    assert!(!words.contains(&"na"));
    assert!(!words.contains(&"null"));
    assert!(!words.contains(&"nan"));
    assert!(words.contains(&"gato"));
    // missing text is clean and not offensive
    assert_eq!(kw(&report.offensive_words), vec![("negro", 1)]);
}

#[test]
fn lib_missing_digg_count_column_is_validation_error() {
    let td = assert_fs::TempDir::new().unwrap();
    let f = write_file(&td, "bad.csv", "text,likes\nhola,1\n");

    match analyze(&opts(&[&f])) {
        Err(AnalysisError::MissingColumns(cols)) => assert_eq!(cols, vec!["diggCount"]),
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn lib_missing_both_columns_lists_both() {
    let td = assert_fs::TempDir::new().unwrap();
    let f = write_file(&td, "bad.csv", "comment,likes\nhola,1\n");
    let err = load_files(&[f], Encoding::Latin1).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("text") && msg.contains("diggCount"), "{msg}");
}

#[test]
fn lib_files_concatenate_in_order_with_column_union() {
    let td = assert_fs::TempDir::new().unwrap();
    let a = write_file(&td, "a.csv", "diggCount,text\n5,primero\n5,segundo\n");
    let b = write_file(&td, "b.csv", "text,extra\ntercero,x\n");
    let c = write_file(&td, "c.csv", "text,diggCount\ncuarto,5\n");

    let rows = load_files(&[a.clone(), b.clone(), c.clone()], Encoding::Latin1).unwrap();
    let texts: Vec<&str> = rows.iter().filter_map(|r| r.text.as_deref()).collect();
    assert_eq!(texts, vec!["primero", "segundo", "tercero", "cuarto"]);
    assert_eq!(rows[2].digg_count, None);

    // ties keep upload order, the row without a count ranks last
    let report = analyze(&opts(&[&a, &b, &c])).unwrap();
    let top: Vec<&str> = report.top_liked.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(top, vec!["primero", "segundo", "cuarto", "tercero"]);
}

#[test]
fn lib_latin1_is_default_encoding() {
    let td = assert_fs::TempDir::new().unwrap();
    let f = td.child("latin.csv");
    f.write_binary(b"text,diggCount\nqu\xe9 \xc1RBOL,3\n").unwrap();

    let report = analyze(&opts(&[f.path()])).unwrap();
    assert_eq!(report.top_liked[0].text, "qué ÁRBOL");
    assert_eq!(kw(&report.offensive_words), vec![("árbol", 1)]);

    let mut o = opts(&[f.path()]);
    o.encoding = Encoding::Utf8;
    assert!(matches!(analyze(&o), Err(AnalysisError::Encoding { .. })));
}

#[test]
fn lib_invalid_digg_count_propagates() {
    let td = assert_fs::TempDir::new().unwrap();
    let f = write_file(&td, "x.csv", "text,diggCount\nhola,1\nchau,muchos\n");
    match analyze(&opts(&[&f])) {
        Err(AnalysisError::InvalidDiggCount { line, value, .. }) => {
            assert_eq!(line, 3);
            assert_eq!(value, "muchos");
        }
        other => panic!("expected InvalidDiggCount, got {other:?}"),
    }
}

#[test]
fn lib_directory_input_is_expanded_and_sorted() {
    let td = assert_fs::TempDir::new().unwrap();
    write_file(&td, "b.csv", "text,diggCount\nb,1\n");
    write_file(&td, "a.csv", "text,diggCount\na,1\n");
    write_file(&td, "notes.txt", "ignored");

    let files = collect_files(&[td.path()]).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.csv", "b.csv"]);
}

#[test]
fn lib_empty_directory_does_not_run() {
    let td = assert_fs::TempDir::new().unwrap();
    assert!(matches!(
        analyze(&opts(&[td.path()])),
        Err(AnalysisError::NoInput)
    ));
}

#[test]
fn lib_word_cloud_excludes_stopwords_case_sensitively() {
    let td = assert_fs::TempDir::new().unwrap();
    let f = write_file(
        &td,
        "w.csv",
        "text,diggCount\nel gato y el perro,1\nel gato duerme,2\n",
    );
    let stop = write_file(&td, "stop.txt", "duerme\n");

    let mut o = opts(&[&f]);
    o.stopwords = Some(stop);
    let report = analyze(&o).unwrap();
    let words: Vec<(&str, usize)> = report
        .word_frequencies
        .iter()
        .map(|w| (w.word.as_str(), w.count))
        .collect();
    assert_eq!(words, vec![("gato", 2), ("perro", 1)]);

    let svg = report.word_cloud().to_svg().unwrap();
    assert!(svg.contains("gato"));
    assert!(!svg.contains(">el<"));
}

#[test]
fn classification_matches_keyword_substrings() {
    let samples = [
        "Qué FEO!!!",
        "http://feo.com solo un link",
        "arbolito verdecito",
        "nada que ver",
        "EN PERÚ DEBO SER UN 10",
    ];
    for s in samples {
        let clean = clean_text(Some(s));
        let expected = OFFENSIVE_KEYWORDS.iter().any(|k| clean.contains(k));
        assert_eq!(is_offensive(&clean), expected, "{s:?}");
    }
    // digits are stripped, so a keyword with digits never matches
    assert!(!is_offensive(&clean_text(Some("EN PERÚ DEBO SER UN 10"))));
    assert!(!is_offensive(&clean_text(Some("http://feo.com solo un link"))));
}

// --------------------- CLI tests ---------------------

#[test]
fn cli_requires_at_least_one_path() {
    let td = tempfile::tempdir().unwrap();
    run_cli_fail_in(td.path(), &[]);
}

#[test]
fn cli_nonexistent_path_fails() {
    let td = tempfile::tempdir().unwrap();
    let bad = td.path().join("does_not_exist_here.csv");
    run_cli_fail_in(td.path(), &[bad.to_string_lossy().as_ref()]);
}

#[test]
fn cli_top_out_of_range_fails() {
    let td = assert_fs::TempDir::new().unwrap();
    let f = write_file(&td, "c.csv", &numbered_rows(3));
    run_cli_fail_in(td.path(), &[f.to_str().unwrap(), "--top", "4"]);
    run_cli_fail_in(td.path(), &[f.to_str().unwrap(), "--top", "101"]);
}

#[test]
fn cli_missing_column_fails_without_output() {
    let td = assert_fs::TempDir::new().unwrap();
    let f = write_file(&td, "bad.csv", "text\nhola\n");
    let out = td.child("out");

    run_cli_fail_in(
        td.path(),
        &[
            f.to_str().unwrap(),
            "--out",
            out.path().to_str().unwrap(),
            "--export-format",
            "csv",
        ],
    )
    .stderr(predicate::str::contains("diggCount"))
    .stdout(predicate::str::contains("Top liked").not());

    assert_eq!(count_files(out.path()), 0);
}

#[test]
fn cli_basic_run_csv() {
    let td = assert_fs::TempDir::new().unwrap();
    let f = write_file(&td, "comentarios.csv", &numbered_rows(12));
    let out = td.child("out");

    run_cli_ok_in(
        td.path(),
        &[
            f.to_str().unwrap(),
            "--export-format",
            "csv",
            "--out",
            out.path().to_str().unwrap(),
            "--top",
            "5",
        ],
    )
    .stdout(predicate::str::contains("Top liked comments"))
    .stdout(predicate::str::contains("comentario numero 12"));

    let re = Regex::new(r"^comentarios_\d{8}_\d{6}_wordfreq\.csv$").unwrap();
    let found = fs::read_dir(out.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .any(|e| re.is_match(e.file_name().to_string_lossy().as_ref()));
    assert!(found, "Expected comentarios_*_wordfreq.csv in out dir");

    let top = fs::read_to_string(find_with_suffix(out.path(), "_top_liked.csv")).unwrap();
    let lines: Vec<&str> = top.lines().collect();
    assert_eq!(lines[0], "text,diggCount");
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[1], "comentario numero 12,12");

    let svg = fs::read_to_string(find_with_suffix(out.path(), "_wordcloud.svg")).unwrap();
    assert!(svg.contains(r#"width="800""#));
    assert!(svg.contains(r#"height="300""#));

    // no keyword was hit, so only the ratio chart is written
    let ratio = fs::read_to_string(find_with_suffix(out.path(), "_offensive_ratio_chart.svg"))
        .unwrap();
    assert!(ratio.contains("No Ofensivo"));
    let keyword_charts = fs::read_dir(out.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_name()
                .to_string_lossy()
                .ends_with("_offensive_words_chart.svg")
        })
        .count();
    assert_eq!(keyword_charts, 0);
}

#[test]
fn cli_export_json_combined() {
    let td = assert_fs::TempDir::new().unwrap();
    let a = write_file(&td, "a.csv", "text,diggCount\nqué feo,10\n");
    let b = write_file(&td, "b.csv", "text,diggCount\nfeo y negro,20\nhola,1\n");
    let out = td.child("out");

    run_cli_ok_in(
        td.path(),
        &[
            a.to_str().unwrap(),
            b.to_str().unwrap(),
            "--export-format",
            "json",
            "--out",
            out.path().to_str().unwrap(),
        ],
    );

    let p = find_with_suffix(out.path(), "_offensive_words.json");
    assert!(
        p.file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("combined_")
    );
    let v: Json = serde_json::from_str(&fs::read_to_string(p).unwrap()).unwrap();
    let arr = v.as_array().expect("json array");
    assert_eq!(arr[0]["keyword"], "feo");
    assert_eq!(arr[0]["count"], 2);
    assert_eq!(arr[1]["keyword"], "negro");

    let top: Json = serde_json::from_str(
        &fs::read_to_string(find_with_suffix(out.path(), "_top_liked.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(top[0]["text"], "feo y negro");
    assert_eq!(top[0]["diggCount"], 20);

    let chart =
        fs::read_to_string(find_with_suffix(out.path(), "_offensive_words_chart.svg")).unwrap();
    assert!(chart.contains("feo"));
    assert!(chart.contains("negro"));
}

#[test]
fn cli_export_tsv_sanitizes_cells() {
    let td = assert_fs::TempDir::new().unwrap();
    let f = write_file(&td, "c.csv", "text,diggCount\n=HYPERLINK(1),3\n");
    let out = td.child("out");

    run_cli_ok_in(
        td.path(),
        &[
            f.to_str().unwrap(),
            "--export-format",
            "tsv",
            "--out",
            out.path().to_str().unwrap(),
        ],
    );

    let top = fs::read_to_string(find_with_suffix(out.path(), "_top_liked.tsv")).unwrap();
    let row = top.lines().nth(1).unwrap_or("");
    assert!(row.starts_with("'=HYPERLINK(1)\t3"), "got {row:?}");
}

#[test]
fn cli_default_txt_report() {
    let td = assert_fs::TempDir::new().unwrap();
    let f = write_file(&td, "c.csv", "text,diggCount\nque feo,1\nlindo,2\n");

    run_cli_ok_in(td.path(), &[f.to_str().unwrap()])
        .stdout(predicate::str::contains("Offensive comment ratio"))
        .stdout(predicate::str::contains("Ofensivo"));

    let report = fs::read_to_string(find_with_suffix(td.path(), "_report.txt")).unwrap();
    assert!(report.contains("Most frequent offensive words"));
    assert!(report.contains("feo"));
}
