//! Keyword based detection of offensive comments.
//!
//! Matching is plain substring search on cleaned text: a keyword also matches
//! inside a longer word. Entries overlap ("negro" and "negros") and some can
//! never match once text is cleaned ("wall-e"); the list is kept as is.

use serde::Serialize;

/// Fixed, ordered list of lowercase offensive phrases.
pub const OFFENSIVE_KEYWORDS: &[&str] = &[
    "cerru",
    "feo",
    "bello",
    "guapo",
    "guapa",
    "bonita",
    "feos",
    "verde",
    "arboles",
    "fallout",
    "wall-e",
    "marte",
    "marrón",
    "indígenas",
    "negros",
    "marrones",
    "negro",
    "polvoru",
    "ay mi gatito miau miau",
    "cerruano",
    "portal esperanza",
    "en perú debo ser un 10",
    "en peru seria un 10",
    "perukistan",
    "perusalen",
    "mierdu",
    "piedru",
    "ser guapo",
    "pueblo marrón",
    "árbol",
    "árboles",
    "ilegal plantar",
    "de que parte de europa",
    "se robó toda la belleza",
    "comepaloma",
];

/// One row of the offensive keyword frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

///Returns true if any offensive keyword occurs anywhere in `clean`.
/// # Example
/// ```
/// use comment_analysis::is_offensive;
/// assert!(is_offensive("que feote"));
/// assert!(!is_offensive("que lindo"));
/// ```
pub fn is_offensive(clean: &str) -> bool {
    OFFENSIVE_KEYWORDS.iter().any(|k| clean.contains(k))
}

///Counts non-overlapping occurrences of every keyword in `offensive_text` (the cleaned
///text of all offensive comments joined by single spaces).
///Keywords with zero hits are dropped; the rest are sorted by count, descending.
///The sort is stable, so ties keep keyword list order.
pub fn keyword_frequency(offensive_text: &str) -> Vec<KeywordCount> {
    let mut table: Vec<KeywordCount> = OFFENSIVE_KEYWORDS
        .iter()
        .map(|k| KeywordCount {
            keyword: k.to_string(),
            count: offensive_text.matches(k).count(),
        })
        .filter(|row| row.count > 0)
        .collect();
    table.sort_by(|a, b| b.count.cmp(&a.count));
    table
}
