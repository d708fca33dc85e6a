/// Small string helpers shared by the formatter and console logging.

/// Find the nearest char boundary at or before the given byte index.
/// Returns `s.len()` if `index >= s.len()`.
pub fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Single-line preview of a message for the console log.
/// Cuts at `max_len` bytes (on a char boundary) and flattens newlines.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    let flat = s.replace('\n', " ⏎ ");
    if flat.len() <= max_len {
        return flat;
    }
    let safe_end = floor_char_boundary(&flat, max_len);
    format!("{}…", &flat[..safe_end])
}
