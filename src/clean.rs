use std::sync::LazyLock;

use regex::Regex;

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+|www\S+|https\S+").expect("valid URL regex"));

static NON_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-ZáéíóúÁÉÍÓÚñÑ\s]").expect("valid letter regex"));

///Normalizes a raw comment: lowercases it, strips URLs and removes every char that is
///not a Latin letter (Spanish accented vowels and ñ included) or whitespace.
///A missing value yields an empty String.
/// # Example
/// ```
/// use comment_analysis::clean_text;
/// let cleaned = clean_text(Some("¡Mira ESTO! https://t.co/x 100% Ñandú"));
/// assert_eq!(cleaned, "mira esto   ñandú");
/// ```
pub fn clean_text(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let lowered = raw.to_lowercase();
    let without_urls = URL.replace_all(&lowered, "");
    let letters_only = NON_LETTER.replace_all(&without_urls, "");
    // stripping punctuation can glue a URL prefix back together ("ht-tpx")
    URL.replace_all(&letters_only, "").into_owned()
}
