//! Greedy, paragraph-aware line wrapping for the combined transcript.

/// Reflow `text` into lines of at most `max_line_length` characters.
///
/// The input is split on newlines into paragraphs. Each paragraph is trimmed;
/// an empty paragraph yields exactly one empty output line, preserving
/// paragraph breaks. Non-empty paragraphs are tokenized on spaces and packed
/// greedily: a token is appended to the current line when it fits together
/// with one separating space (the separator only counts when the line is
/// non-empty); otherwise the line is emitted and the token starts a new one.
///
/// There is no hyphenation and no token-splitting: a token longer than
/// `max_line_length` is placed alone on an overflowing line. That is allowed,
/// not an error. Words are never dropped or reordered, and re-wrapping
/// already-wrapped text at the same width reproduces the same lines.
pub fn wrap_text(text: &str, max_line_length: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut line = String::new();
        for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
            let fits = if line.is_empty() {
                word.len() <= max_line_length
            } else {
                line.len() + 1 + word.len() <= max_line_length
            };

            if !fits && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }

        if !line.is_empty() {
            lines.push(line);
        }
    }

    lines
}
