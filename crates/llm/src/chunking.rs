/// Text chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// Chunk text
    pub text: String,

    /// Start byte offset in original text
    pub start: usize,

    /// End byte offset in original text
    pub end: usize,
}

impl AsRef<str> for TextChunk {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Boundaries preferred when closing a chunk, strongest first
const BREAK_MARKERS: [&str; 10] = ["\n\n", ". ", ".\n", "! ", "!\n", "? ", "?\n", "。", "！", "？"];

/// Split text into overlapping chunks of at most `chunk_size` characters
///
/// Offsets always fall on char boundaries. Whitespace-only input yields no chunks.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<TextChunk> {
    if text.trim().is_empty() || chunk_size == 0 {
        return Vec::new();
    }

    // Byte offset of every char, plus the end of the text
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_len = bounds.len() - 1;

    if char_len <= chunk_size {
        return vec![TextChunk {
            text: text.to_string(),
            start: 0,
            end: text.len(),
        }];
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    loop {
        let ideal_end = (start + chunk_size).min(char_len);

        let end = if ideal_end < char_len {
            find_break_point(text, &bounds, start, ideal_end)
        } else {
            ideal_end
        };

        chunks.push(TextChunk {
            text: text[bounds[start]..bounds[end]].to_string(),
            start: bounds[start],
            end: bounds[end],
        });

        if end >= char_len {
            break;
        }

        // Step back by the overlap but always move forward
        start = end.saturating_sub(overlap).max(start + 1);
    }

    chunks
}

/// Char index just past the last break marker in the final 20% of the window
fn find_break_point(text: &str, bounds: &[usize], start: usize, ideal_end: usize) -> usize {
    let search_start = start + (ideal_end - start) * 80 / 100;
    let window_start = bounds[search_start];
    let search_text = &text[window_start..bounds[ideal_end]];

    BREAK_MARKERS
        .iter()
        .filter_map(|marker| {
            search_text
                .rfind(marker)
                .map(|idx| window_start + idx + marker.len())
        })
        .max()
        .and_then(|byte_end| bounds.binary_search(&byte_end).ok())
        .filter(|&end| end > start)
        .unwrap_or(ideal_end)
}

/// Split text by paragraphs
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
