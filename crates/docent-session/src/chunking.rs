/// Split `text` into windows of `chunk_size` characters overlapping by
/// `overlap`. Offsets are character positions, end exclusive.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<(usize, usize, String)> {
    if chunk_size == 0 {
        return Vec::new();
    }
    let chars: Vec<char> = text.chars().collect();
    let n = chars.len();
    let step = chunk_size.saturating_sub(overlap).max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < n {
        let end = n.min(start + chunk_size);
        chunks.push((start, end, chars[start..end].iter().collect()));
        if end >= n {
            break;
        }
        start += step;
    }
    chunks
}
