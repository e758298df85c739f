/// Sentence boundaries are `.`, `!` or `?` followed by whitespace or end of
/// input. Scanned rather than regex-split; trailing text without terminal
/// punctuation still counts as a sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        current.push(ch);

        if matches!(ch, '.' | '!' | '?') {
            let at_boundary = match chars.peek() {
                Some(next) => next.is_whitespace(),
                None => true,
            };
            if at_boundary {
                let sentence = current.trim().to_string();
                if !sentence.is_empty() {
                    sentences.push(sentence);
                }
                current.clear();
                // consume the separating whitespace
                while chars.peek().is_some_and(|c| c.is_whitespace()) {
                    chars.next();
                }
            }
        }
    }

    let tail = current.trim().to_string();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}

/// Greedily accumulate sentences into passages of at least `min_words` words.
/// Whatever remains below the threshold is flushed as a final short passage.
pub fn build_passages(text: &str, min_words: usize) -> Vec<String> {
    let mut passages = Vec::new();
    let mut current = String::new();

    for sentence in split_sentences(text) {
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&sentence);

        if current.split_whitespace().count() >= min_words {
            passages.push(std::mem::take(&mut current));
        }
    }

    if !current.trim().is_empty() {
        passages.push(current.trim().to_string());
    }

    passages
}
