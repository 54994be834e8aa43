/// Split text into chunks of at most `max_chars` characters.
///
/// Breaks on sentence boundaries where possible and on whitespace
/// otherwise. Words are never split, so a single word longer than
/// `max_chars` becomes an oversized chunk of its own.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for sentence in split_sentences(text) {
        let sentence_len = sentence.chars().count();
        if sentence_len > max_chars {
            // Sentence alone exceeds the limit, pack word by word.
            for word in sentence.split_whitespace() {
                let word_len = word.chars().count();
                if current_len > 0 && current_len + 1 + word_len > max_chars {
                    chunks.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                if current_len > 0 {
                    current.push(' ');
                    current_len += 1;
                }
                current.push_str(word);
                current_len += word_len;
            }
            continue;
        }

        if current_len > 0 && current_len + 1 + sentence_len > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(sentence);
        current_len += sentence_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Truncate text to roughly `max_chars` characters on a chunk boundary,
/// appending an ellipsis when anything was dropped.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    match chunk_text(text, max_chars).into_iter().next() {
        Some(first) => format!("{}…", first),
        None => String::new(),
    }
}

/// Split on sentence-ending punctuation followed by whitespace,
/// keeping the punctuation with its sentence.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?' | '。') {
            let end = i + c.len_utf8();
            let at_break = chars
                .peek()
                .map(|(_, next)| next.is_whitespace())
                .unwrap_or(true);
            if at_break {
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence);
                }
                start = end;
            }
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}
