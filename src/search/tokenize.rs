/// Splits text into lowercase terms on anything that is not a letter or digit.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(fold)
        .collect()
}

/// Case-folded copy of `text` used for substring matching.
pub fn normalize(text: &str) -> String {
    fold(text.trim())
}

/// Lowercases one character at a time. `str::to_lowercase` maps a final
/// capital sigma to `ς`, which would make a slice of a word fold differently
/// from the word itself.
fn fold(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}
