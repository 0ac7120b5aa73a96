//! Final string normalisation.
//!
//! Collapses whitespace, fixes "a" before a vowel, and capitalises sentence
//! starts. Idempotent: `post_process(&post_process(s)) == post_process(s)`.

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'A', 'E', 'I', 'O', 'U'];

/// Normalise a composed response.
#[must_use]
pub fn post_process(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut out: Vec<String> = Vec::with_capacity(words.len());
    let mut sentence_start = true;

    for (i, &word) in words.iter().enumerate() {
        let before_vowel = words
            .get(i + 1)
            .is_some_and(|next| next.starts_with(VOWELS));
        let mut fixed = match word {
            "a" if before_vowel => "an".to_string(),
            // Mid-sentence "A" is usually a letter name, not the article.
            "A" if before_vowel && sentence_start => "An".to_string(),
            _ => word.to_string(),
        };
        if sentence_start {
            fixed = capitalize(&fixed);
        }
        sentence_start = fixed.ends_with(['.', '!', '?']);
        out.push(fixed);
    }
    out.join(" ")
}

/// Uppercase the first character if it is lowercase.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => first.to_uppercase().chain(chars).collect(),
        _ => word.to_string(),
    }
}
