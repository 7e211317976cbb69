//! Splitting page markdown into LLM-sized chunks

/// Split `text` into chunks of at most `max_chars` characters
///
/// Chunks break on blank-line paragraph boundaries where possible; a single
/// paragraph longer than `max_chars` is cut on character boundaries. Blank
/// input yields no chunks.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for paragraph in text.split("\n\n").filter(|p| !p.trim().is_empty()) {
        let paragraph_len = paragraph.chars().count();
        let separator_len = if current.is_empty() { 0 } else { 2 };

        if current_len + separator_len + paragraph_len <= max_chars {
            if !current.is_empty() {
                current.push_str("\n\n");
            }
            current.push_str(paragraph);
            current_len += separator_len + paragraph_len;
            continue;
        }

        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if paragraph_len <= max_chars {
            current.push_str(paragraph);
            current_len = paragraph_len;
        } else {
            let chars: Vec<char> = paragraph.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
        }
    }

    if !current.trim().is_empty() {
        chunks.push(current);
    }

    chunks
}
