/// Split free text into lower-cased maximal runs of ASCII letters and
/// digits. Everything else separates. No stemming, no stop words, no
/// deduplication; empty input yields an empty sequence.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
