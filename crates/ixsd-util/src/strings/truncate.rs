/// Truncate `text` to at most `max_chars` characters for display.
///
/// Returns `None` when the text already fits. When it does not, returns the
/// first `max_chars` characters followed by an ellipsis. Operates on `char`
/// boundaries, never bytes.
///
/// # Examples
///
/// ```
/// use ixsd_util::strings::truncate_chars;
///
/// assert_eq!(truncate_chars("short", 100), None);
/// assert_eq!(truncate_chars("abcdef", 3), Some("abc…".to_string()));
/// ```
pub fn truncate_chars(text: &str, max_chars: usize) -> Option<String> {
    if text.chars().count() <= max_chars {
        return None;
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push('…');
    Some(out)
}
