//! Text layout helpers

/// Split `text` into pieces of at most `width` characters.
///
/// Always returns at least one (possibly empty) piece.
pub fn chunk(text: &str, width: i32) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut chunks: Vec<String> = match usize::try_from(width) {
        Ok(width) if width > 0 => chars.chunks(width).map(|c| c.iter().collect()).collect(),
        _ => Vec::new(),
    };
    if chunks.is_empty() {
        chunks.push(String::new());
    }
    chunks
}
