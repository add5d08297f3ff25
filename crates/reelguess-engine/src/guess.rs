/// Lowercased answer text with punctuation removed and whitespace collapsed.
///
/// Apostrophes are dropped inside words ("Who's" -> "whos"); any other
/// punctuation separates words ("Spider-Man" -> "spider man"). `&` reads as
/// "and".
fn normalize_guess(text: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if c.is_alphanumeric() {
            current.extend(c.to_lowercase());
        } else if c == '\'' || c == '\u{2019}' {
            continue;
        } else {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            if c == '&' {
                words.push("and".to_string());
            }
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words.join(" ")
}

/// Whether `input` names `answer`. Empty or punctuation-only input never matches.
pub fn is_correct_guess(input: &str, answer: &str) -> bool {
    let input = normalize_guess(input);
    !input.is_empty() && input == normalize_guess(answer)
}
