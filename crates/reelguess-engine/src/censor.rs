/// Hide the answer inside an overview.
///
/// Every exact, case-sensitive occurrence of `title` becomes a run of `?`
/// with the same number of characters. Matches are found left to right and
/// never overlap. An empty title leaves the overview untouched.
pub fn censor_title(overview: &str, title: &str) -> String {
    if title.is_empty() {
        return overview.to_string();
    }
    let mask = "?".repeat(title.chars().count());
    overview.replace(title, &mask)
}

/// Hint for an answer: the first character of each word stays, every other
/// letter or digit becomes `?`. Spacing and punctuation are kept so the
/// shape of the answer shows ("The Dark Knight" -> "T?? D??? K?????").
pub fn hint_mask(answer: &str) -> String {
    let mut hint = String::with_capacity(answer.len());
    let mut word_start = true;
    for c in answer.chars() {
        if c.is_alphanumeric() {
            hint.push(if word_start { c } else { '?' });
            word_start = false;
        } else {
            hint.push(c);
            word_start = c.is_whitespace();
        }
    }
    hint
}
